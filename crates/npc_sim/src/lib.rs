//! NPC Sim - Tank NPCs driven by npc_fsm
//!
//! Host-side pieces around the FSM core: concrete behaviours, the per-agent
//! context, configuration and a fixed-step world loop with a scripted player.
//!
//! # Behaviours
//!
//! - Patrol: wander between random waypoints, chase the player on sight
//! - Chase: close in on the player
//! - Attack: hold position, turn towards the player and fire
//! - Flee: run to the waypoint furthest from the player when badly hurt
//! - Dead: inert
//!
//! # Example
//!
//! ```ignore
//! use npc_sim::prelude::*;
//!
//! let config = SimConfig::load(Some(Path::new("sim.toml")))?;
//! let mut world = World::new(&config, Arc::new(LogSink))?;
//! let summary = world.run(config.sim.ticks);
//! ```

pub mod agent;
pub mod config;
pub mod context;
pub mod ids;
pub mod movement;
pub mod states;
pub mod world;

pub mod prelude {
    pub use crate::agent::{build_controller, TankController};
    pub use crate::config::{ConfigError, NpcConfig, PlayerConfig, SimConfig, SimSection};
    pub use crate::context::TankContext;
    pub use crate::ids::{TankState, TankStimulus};
    pub use crate::world::{AgentSummary, Player, World, WorldEvent};
}

pub use prelude::*;
