//! Chase the player

use super::{fire, vitals, Core, Decision};
use crate::config::NpcConfig;
use crate::context::TankContext;
use crate::ids::{TankState, TankStimulus};
use crate::movement;
use npc_fsm::{FsmState, StateCore};

pub struct ChaseState<'w> {
    core: Core<'w>,
    tuning: &'w NpcConfig,
}

impl<'w> ChaseState<'w> {
    pub fn new(core: Core<'w>, tuning: &'w NpcConfig) -> Self {
        let core = core
            .with_speed(tuning.chase_speed)
            .with_rotation_speed(tuning.rotation_speed);
        Self { core, tuning }
    }
}

impl<'w> FsmState<'w, TankState, TankStimulus, TankContext> for ChaseState<'w> {
    fn core(&self) -> &StateCore<'w, TankState, TankStimulus> {
        &self.core
    }

    fn core_mut(&mut self) -> &mut StateCore<'w, TankState, TankStimulus> {
        &mut self.core
    }

    fn enter_state_init(&mut self, ctx: &TankContext) {
        self.core
            .set_destination(ctx.agent.target.unwrap_or(ctx.agent.position));
    }

    fn reason(&mut self, ctx: &TankContext) -> Decision {
        if let Some(decision) = vitals(&self.core, ctx, self.tuning) {
            return decision;
        }

        let Some(target) = ctx.agent.target else {
            return fire(&self.core, TankStimulus::LostPlayer);
        };
        self.core.set_destination(target);

        let dist = ctx.agent.position.distance(target);
        if dist <= self.tuning.attack_range {
            fire(&self.core, TankStimulus::ReachPlayer)
        } else if dist > self.tuning.sight_range {
            fire(&self.core, TankStimulus::LostPlayer)
        } else {
            Ok(None)
        }
    }

    fn act(&mut self, ctx: &mut TankContext) {
        movement::steer(
            &mut ctx.agent,
            self.core.destination(),
            self.core.speed(),
            self.core.rotation_speed(),
        );
    }
}
