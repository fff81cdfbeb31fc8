//! Assembles a tank's controller from its behaviours

use crate::config::SimConfig;
use crate::context::TankContext;
use crate::ids::{TankState, TankStimulus};
use crate::states::{AttackState, ChaseState, DeadState, FleeState, PatrolState};
use npc_fsm::{DiagnosticSink, FsmController, FsmResult, StateCore};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::sync::Arc;

pub type TankController<'w> = FsmController<'w, TankState, TankStimulus, TankContext>;

type Core<'w> = StateCore<'w, TankState, TankStimulus>;

/// Build a state core with its waypoints and outgoing transitions
fn core<'w>(
    id: TankState,
    waypoints: &'w [npc_fsm::Vec3],
    transitions: &[(TankStimulus, TankState)],
) -> FsmResult<Core<'w>, TankState, TankStimulus> {
    let mut core = StateCore::new(id).with_waypoints(waypoints);
    for &(stimulus, target) in transitions {
        core.add_transition(stimulus, target)?;
    }
    Ok(core)
}

/// Build and initialize a tank controller starting in `Patrol`.
///
/// `seed` drives the patrol route; tanks built with the same seed and
/// config behave identically.
pub fn build_controller<'w>(
    config: &'w SimConfig,
    seed: u64,
    sink: Arc<dyn DiagnosticSink>,
    ctx: &TankContext,
) -> FsmResult<TankController<'w>, TankState, TankStimulus> {
    use TankState as S;
    use TankStimulus as T;

    let waypoints = config.waypoints.as_slice();
    let tuning = &config.npc;

    let patrol = core(
        S::Patrol,
        waypoints,
        &[(T::SawPlayer, S::Chase), (T::LowHealth, S::Flee), (T::NoHealth, S::Dead)],
    )?;
    let chase = core(
        S::Chase,
        waypoints,
        &[
            (T::ReachPlayer, S::Attack),
            (T::LostPlayer, S::Patrol),
            (T::LowHealth, S::Flee),
            (T::NoHealth, S::Dead),
        ],
    )?;
    let attack = core(
        S::Attack,
        waypoints,
        &[
            (T::SawPlayer, S::Chase),
            (T::LostPlayer, S::Patrol),
            (T::LowHealth, S::Flee),
            (T::NoHealth, S::Dead),
        ],
    )?;
    let flee = core(
        S::Flee,
        waypoints,
        &[(T::ReachedRefuge, S::Patrol), (T::NoHealth, S::Dead)],
    )?;
    let dead = core(S::Dead, waypoints, &[])?;

    let mut controller = TankController::with_sink(sink);
    controller.add_state(Box::new(PatrolState::new(
        patrol,
        tuning,
        ChaCha8Rng::seed_from_u64(seed),
    )))?;
    controller.add_state(Box::new(ChaseState::new(chase, tuning)))?;
    controller.add_state(Box::new(AttackState::new(attack, tuning)))?;
    controller.add_state(Box::new(FleeState::new(flee, tuning)))?;
    controller.add_state(Box::new(DeadState::new(dead)))?;

    controller.initialize(S::Patrol, ctx)?;
    Ok(controller)
}

#[cfg(test)]
mod tests {
    use super::*;
    use npc_fsm::{FsmState, RecordingSink, Vec3};

    #[test]
    fn test_build_registers_every_behaviour() {
        let config = SimConfig::default();
        let sink = Arc::new(RecordingSink::new());
        let ctx = TankContext::new(Vec3::ZERO, config.npc.max_health);
        let controller = build_controller(&config, 1, sink.clone(), &ctx).unwrap();

        assert_eq!(controller.state_count(), 5);
        assert_eq!(controller.current_state_id(), Some(TankState::Patrol));
        assert!(sink.is_empty());

        let dead = controller.state(TankState::Dead).unwrap();
        assert!(dead.core().transitions().is_empty());
        let chase = controller.state(TankState::Chase).unwrap();
        assert_eq!(
            chase.core().output_state(TankStimulus::ReachPlayer),
            Ok(TankState::Attack)
        );
    }

    #[test]
    fn test_dies_from_any_fighting_state() {
        let config = SimConfig::default();
        let mut ctx = TankContext::new(Vec3::ZERO, config.npc.max_health);
        ctx.agent.delta_time = config.sim.delta_time;
        let mut controller = build_controller(&config, 1, Arc::new(RecordingSink::new()), &ctx).unwrap();

        ctx.agent.target = Some(Vec3::new(20.0, 0.0, 0.0));
        assert!(controller.tick(&mut ctx).is_switch());
        assert!(controller.is_in(TankState::Chase));

        ctx.take_damage(config.npc.max_health);
        controller.tick(&mut ctx);
        assert!(controller.is_in(TankState::Dead));
        assert_eq!(controller.previous_state_id(), Some(TankState::Chase));
    }
}
