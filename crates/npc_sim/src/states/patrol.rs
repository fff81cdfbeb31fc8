//! Patrol between random waypoints

use super::{fire, Core, Decision};
use crate::config::NpcConfig;
use crate::context::TankContext;
use crate::ids::{TankState, TankStimulus};
use crate::movement;
use npc_fsm::{FsmState, StateCore};
use rand_chacha::ChaCha8Rng;

pub struct PatrolState<'w> {
    core: Core<'w>,
    tuning: &'w NpcConfig,
    rng: ChaCha8Rng,
}

impl<'w> PatrolState<'w> {
    pub fn new(core: Core<'w>, tuning: &'w NpcConfig, rng: ChaCha8Rng) -> Self {
        let core = core
            .with_speed(tuning.patrol_speed)
            .with_rotation_speed(tuning.rotation_speed);
        Self { core, tuning, rng }
    }
}

impl<'w> FsmState<'w, TankState, TankStimulus, TankContext> for PatrolState<'w> {
    fn core(&self) -> &StateCore<'w, TankState, TankStimulus> {
        &self.core
    }

    fn core_mut(&mut self) -> &mut StateCore<'w, TankState, TankStimulus> {
        &mut self.core
    }

    /// Resume the route from the nearest waypoint
    fn enter_state_init(&mut self, ctx: &TankContext) {
        let position = ctx.agent.position;
        let resume = self.core.closest_waypoint(position).copied().unwrap_or(position);
        self.core.set_destination(resume);
    }

    fn reason(&mut self, ctx: &TankContext) -> Decision {
        if ctx.is_dead() {
            return fire(&self.core, TankStimulus::NoHealth);
        }

        if ctx.agent.target_within(self.tuning.sight_range) {
            if ctx.health_fraction() <= self.tuning.flee_health_fraction {
                return fire(&self.core, TankStimulus::LowHealth);
            }
            return fire(&self.core, TankStimulus::SawPlayer);
        }

        Ok(None)
    }

    fn act(&mut self, ctx: &mut TankContext) {
        let agent = &mut ctx.agent;
        if self.is_in_current_range(agent.position, self.core.destination(), self.tuning.arrival_range)
            && self.core.find_next_point(&mut self.rng).is_err()
        {
            // No route to follow
            return;
        }

        movement::steer(
            agent,
            self.core.destination(),
            self.core.speed(),
            self.core.rotation_speed(),
        );
    }
}
