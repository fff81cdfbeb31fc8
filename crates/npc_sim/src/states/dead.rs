//! Destroyed tank

use super::{Core, Decision};
use crate::context::TankContext;
use crate::ids::{TankState, TankStimulus};
use npc_fsm::{FsmState, StateCore};

/// Has no transitions; once entered the agent stays here.
pub struct DeadState<'w> {
    core: Core<'w>,
}

impl<'w> DeadState<'w> {
    pub fn new(core: Core<'w>) -> Self {
        Self { core }
    }
}

impl<'w> FsmState<'w, TankState, TankStimulus, TankContext> for DeadState<'w> {
    fn core(&self) -> &StateCore<'w, TankState, TankStimulus> {
        &self.core
    }

    fn core_mut(&mut self) -> &mut StateCore<'w, TankState, TankStimulus> {
        &mut self.core
    }

    fn enter_state_init(&mut self, ctx: &TankContext) {
        self.core.set_destination(ctx.agent.position);
        log::info!("Tank destroyed at {:?}", ctx.agent.position);
    }

    fn reason(&mut self, _ctx: &TankContext) -> Decision {
        Ok(None)
    }

    fn act(&mut self, _ctx: &mut TankContext) {}
}
