//! NPC FSM - Table-driven finite state machines for agents
//!
//! This crate provides the deterministic state machine core used to drive
//! NPC behaviour once per simulation tick.
//!
//! # Features
//!
//! - Per-state transition tables (stimulus -> target state)
//! - Shared state contract (`reason`, `act`, `enter_state_init`)
//! - Per-agent controller with an explicit switch protocol
//! - Nearest / furthest / random waypoint selection
//! - Pluggable diagnostic sinks for non-fatal failures
//!
//! # Example
//!
//! ```ignore
//! use npc_fsm::prelude::*;
//!
//! let mut patrol = StateCore::new(Guard::Patrol).with_waypoints(&points);
//! patrol.add_transition(Alert::SawPlayer, Guard::Chase)?;
//!
//! let mut fsm = FsmController::new();
//! fsm.add_state(Box::new(PatrolState::new(patrol)))?;
//! fsm.initialize(Guard::Patrol, &ctx)?;
//!
//! // Once per tick
//! fsm.tick(&mut ctx);
//! ```

pub mod context;
pub mod controller;
pub mod diagnostics;
pub mod error;
pub mod id;
pub mod math;
pub mod state;
pub mod table;
pub mod waypoint;

pub mod prelude {
    pub use crate::context::AgentContext;
    pub use crate::controller::{BoxedState, FsmController, TickOutcome};
    pub use crate::diagnostics::{Diagnostic, DiagnosticSink, LogSink, RecordingSink};
    pub use crate::error::{EmptyWaypointSet, FsmError, FsmResult, Severity};
    pub use crate::id::Identifier;
    pub use crate::math::{Positioned, Vec3};
    pub use crate::state::{is_in_range, FsmState, StateCore};
    pub use crate::table::TransitionTable;
    pub use crate::waypoint::SelectionMode;
}

pub use prelude::*;
