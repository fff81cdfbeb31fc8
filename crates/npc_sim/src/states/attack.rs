//! Hold position and fire at the player

use super::{fire, vitals, Core, Decision};
use crate::config::NpcConfig;
use crate::context::TankContext;
use crate::ids::{TankState, TankStimulus};
use crate::movement;
use npc_fsm::{FsmState, StateCore};

pub struct AttackState<'w> {
    core: Core<'w>,
    tuning: &'w NpcConfig,
    /// Seconds since the last shot
    reload: f32,
}

impl<'w> AttackState<'w> {
    pub fn new(core: Core<'w>, tuning: &'w NpcConfig) -> Self {
        let core = core.with_rotation_speed(tuning.rotation_speed);
        Self {
            core,
            tuning,
            reload: 0.0,
        }
    }

    /// Whole shots due for the time accumulated since the last one
    fn shots_due(&mut self) -> u32 {
        let rate = self.tuning.fire_rate;
        if !(rate.is_finite() && rate > 0.0) {
            return 0;
        }

        let due = (self.reload * rate).floor();
        if due < 1.0 {
            return 0;
        }
        self.reload = (self.reload - due / rate).max(0.0);
        // Float-to-int casts saturate
        due as u32
    }
}

impl<'w> FsmState<'w, TankState, TankStimulus, TankContext> for AttackState<'w> {
    fn core(&self) -> &StateCore<'w, TankState, TankStimulus> {
        &self.core
    }

    fn core_mut(&mut self) -> &mut StateCore<'w, TankState, TankStimulus> {
        &mut self.core
    }

    fn enter_state_init(&mut self, ctx: &TankContext) {
        self.reload = 0.0;
        self.core
            .set_destination(ctx.agent.target.unwrap_or(ctx.agent.position));
    }

    fn reason(&mut self, ctx: &TankContext) -> Decision {
        if let Some(decision) = vitals(&self.core, ctx, self.tuning) {
            return decision;
        }

        match ctx.agent.distance_to_target() {
            None => fire(&self.core, TankStimulus::LostPlayer),
            Some(dist) if dist > self.tuning.sight_range => fire(&self.core, TankStimulus::LostPlayer),
            Some(dist) if dist > self.tuning.attack_range => fire(&self.core, TankStimulus::SawPlayer),
            Some(_) => Ok(None),
        }
    }

    fn act(&mut self, ctx: &mut TankContext) {
        if let Some(target) = ctx.agent.target {
            self.core.set_destination(target);
        }
        movement::face(&mut ctx.agent, self.core.destination(), self.core.rotation_speed());

        self.reload += ctx.agent.delta_time;
        let shots = self.shots_due();
        if shots > 0 {
            ctx.shots_fired = ctx.shots_fired.saturating_add(shots);
            log::trace!("Fired {} at {:?}", shots, self.core.destination());
        }
    }
}
