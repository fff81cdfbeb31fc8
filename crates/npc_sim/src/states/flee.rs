//! Run to the waypoint furthest from the threat
//!
//! The refuge only counts as reached once the threat is out of sight; until
//! then the tank holds there.

use super::{fire, Core, Decision};
use crate::config::NpcConfig;
use crate::context::TankContext;
use crate::ids::{TankState, TankStimulus};
use crate::movement;
use npc_fsm::{FsmState, StateCore};

pub struct FleeState<'w> {
    core: Core<'w>,
    tuning: &'w NpcConfig,
}

impl<'w> FleeState<'w> {
    pub fn new(core: Core<'w>, tuning: &'w NpcConfig) -> Self {
        let core = core
            .with_speed(tuning.chase_speed)
            .with_rotation_speed(tuning.rotation_speed);
        Self { core, tuning }
    }
}

impl<'w> FsmState<'w, TankState, TankStimulus, TankContext> for FleeState<'w> {
    fn core(&self) -> &StateCore<'w, TankState, TankStimulus> {
        &self.core
    }

    fn core_mut(&mut self) -> &mut StateCore<'w, TankState, TankStimulus> {
        &mut self.core
    }

    fn enter_state_init(&mut self, ctx: &TankContext) {
        let position = ctx.agent.position;
        let threat = ctx.agent.target.unwrap_or(position);

        let refuge = match self.core.furthest_waypoint(threat) {
            Ok(point) => *point,
            // Straight away from the threat
            Err(_) => position + (position - threat).normalize() * self.tuning.sight_range,
        };
        self.core.set_destination(refuge);
        log::debug!("Fleeing from {:?} to {:?}", threat, refuge);
    }

    fn reason(&mut self, ctx: &TankContext) -> Decision {
        if ctx.is_dead() {
            return fire(&self.core, TankStimulus::NoHealth);
        }
        let arrived = self.core.has_reached_destination(ctx.agent.position, self.tuning.arrival_range);
        if arrived && !ctx.agent.target_within(self.tuning.sight_range) {
            return fire(&self.core, TankStimulus::ReachedRefuge);
        }
        Ok(None)
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
