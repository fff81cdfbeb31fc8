//! Tank state and stimulus identifiers

use npc_fsm::Identifier;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Behaviour modes of a tank NPC
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TankState {
    None,
    Patrol,
    Chase,
    Attack,
    Flee,
    Dead,
}

impl Identifier for TankState {
    const NONE: Self = TankState::None;
}

impl fmt::Display for TankState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::None => write!(f, "none"),
            Self::Patrol => write!(f, "patrol"),
            Self::Chase => write!(f, "chase"),
            Self::Attack => write!(f, "attack"),
            Self::Flee => write!(f, "flee"),
            Self::Dead => write!(f, "dead"),
        }
    }
}

/// Conditions a tank reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TankStimulus {
    None,
    /// Player entered sight range
    SawPlayer,
    /// Player is within attack range
    ReachPlayer,
    /// Player left sight range
    LostPlayer,
    /// Health dropped to the flee threshold
    LowHealth,
    /// Health is gone
    NoHealth,
    /// Arrived at the flee destination
    ReachedRefuge,
}

impl Identifier for TankStimulus {
    const NONE: Self = TankStimulus::None;
}
