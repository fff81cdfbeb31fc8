//! Error types for the FSM core

use crate::id::Identifier;
use thiserror::Error;

/// How a failure should be surfaced
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Severity {
    /// Recoverable and expected to happen occasionally
    Warning,
    /// Recoverable but indicates misconfiguration
    Error,
}

/// Waypoint selection was requested with no candidate points
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("Waypoint set is empty")]
pub struct EmptyWaypointSet;

/// FSM errors
///
/// None of these abort a tick. Table operations leave the table untouched,
/// controller operations leave the current state untouched.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FsmError<S: Identifier, T: Identifier> {
    /// A transition pair with a null stimulus or null target was added
    #[error("Null transition not allowed ({stimulus:?} -> {target:?})")]
    NullTransition { stimulus: T, target: S },

    /// The null stimulus was used as a lookup or delete key
    #[error("Null transition is not a valid key")]
    InvalidStimulus,

    /// The stimulus is already mapped; the first mapping is kept
    #[error("Transition {stimulus:?} is already mapped to {existing:?} (rejected {rejected:?})")]
    DuplicateTransition {
        stimulus: T,
        existing: S,
        rejected: S,
    },

    /// The stimulus is not on this state's list
    #[error("Transition {stimulus:?} is not on this state's list")]
    UnknownTransition { stimulus: T },

    /// A switch named a state that is not registered with the controller
    #[error("No state registered for requested switch to {requested:?}")]
    UnknownTargetState { requested: S },

    /// Waypoint selection had no candidates
    #[error(transparent)]
    EmptyWaypointSet(#[from] EmptyWaypointSet),

    /// The null state identifier was used to register or enter a state
    #[error("Null state id not allowed")]
    InvalidStateId,

    /// A state with this identifier is already registered
    #[error("State {id:?} is already registered")]
    DuplicateState { id: S },

    /// No state with this identifier is registered
    #[error("State {id:?} is not registered")]
    UnknownState { id: S },

    /// The current state cannot be removed
    #[error("State {id:?} is the current state")]
    StateInUse { id: S },

    /// The controller has no current state yet
    #[error("Controller has not been initialized")]
    Uninitialized,
}

impl<S: Identifier, T: Identifier> FsmError<S, T> {
    /// Severity class for diagnostics
    pub fn severity(&self) -> Severity {
        match self {
            Self::NullTransition { .. } | Self::DuplicateTransition { .. } => Severity::Warning,
            _ => Severity::Error,
        }
    }
}

/// Result type for FSM operations
pub type FsmResult<R, S, T> = std::result::Result<R, FsmError<S, T>>;
