//! Tank behaviours

mod attack;
mod chase;
mod dead;
mod flee;
mod patrol;

pub use self::attack::AttackState;
pub use self::chase::ChaseState;
pub use self::dead::DeadState;
pub use self::flee::FleeState;
pub use self::patrol::PatrolState;

use crate::config::NpcConfig;
use crate::context::TankContext;
use crate::ids::{TankState, TankStimulus};
use npc_fsm::{FsmResult, StateCore};

type Core<'w> = StateCore<'w, TankState, TankStimulus>;
type Decision = FsmResult<Option<TankState>, TankState, TankStimulus>;

/// Resolve a fired stimulus through the state's own table
fn fire(core: &Core<'_>, stimulus: TankStimulus) -> Decision {
    core.output_state(stimulus).map(Some)
}

/// NoHealth, then LowHealth, for states that fight
fn vitals(core: &Core<'_>, ctx: &TankContext, tuning: &NpcConfig) -> Option<Decision> {
    if ctx.is_dead() {
        Some(fire(core, TankStimulus::NoHealth))
    } else if ctx.health_fraction() <= tuning.flee_health_fraction {
        Some(fire(core, TankStimulus::LowHealth))
    } else {
        None
    }
}
