//! Property tests for transition tables and waypoint selection

use npc_fsm::prelude::*;
use npc_fsm::waypoint::{furthest_index, nearest_index, select_waypoint};
use proptest::prelude::*;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
struct StateId(u8);

impl Identifier for StateId {
    const NONE: Self = StateId(0);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
struct Stim(u8);

impl Identifier for Stim {
    const NONE: Self = Stim(0);
}

fn point() -> impl Strategy<Value = Vec3> {
    (-100i32..100, -100i32..100, -100i32..100)
        .prop_map(|(x, y, z)| Vec3::new(x as f32, y as f32, z as f32))
}

proptest! {
    #[test]
    fn first_mapping_wins(s in 1u8.., t in 1u8.., t2 in 1u8..) {
        let mut table = TransitionTable::new();
        prop_assert!(table.add_transition(Stim(s), StateId(t)).is_ok());
        prop_assert_eq!(table.output_state(Stim(s)), Ok(StateId(t)));

        let second = table.add_transition(Stim(s), StateId(t2));
        let is_duplicate = matches!(second, Err(FsmError::DuplicateTransition { .. }));
        prop_assert!(is_duplicate);
        prop_assert_eq!(table.output_state(Stim(s)), Ok(StateId(t)));
    }

    #[test]
    fn null_lookup_always_fails(pairs in prop::collection::vec((1u8.., 1u8..), 0..16)) {
        let mut table = TransitionTable::new();
        for (s, t) in pairs {
            let _ = table.add_transition(Stim(s), StateId(t));
        }
        prop_assert_eq!(table.output_state(Stim::NONE), Err(FsmError::InvalidStimulus));
    }

    #[test]
    fn deleted_lookup_is_unknown(s in 1u8.., t in 1u8..) {
        let mut table = TransitionTable::new();
        table.add_transition(Stim(s), StateId(t)).unwrap();
        table.delete_transition(Stim(s)).unwrap();
        prop_assert_eq!(
            table.output_state(Stim(s)),
            Err(FsmError::UnknownTransition { stimulus: Stim(s) })
        );
    }

    #[test]
    fn nearest_and_furthest_bound_every_point(
        reference in point(),
        points in prop::collection::vec(point(), 1..32),
    ) {
        let near = nearest_index(reference, &points).unwrap();
        let far = furthest_index(reference, &points).unwrap();
        let near_d = reference.distance_squared(points[near]);
        let far_d = reference.distance_squared(points[far]);

        for p in &points {
            let d = reference.distance_squared(*p);
            prop_assert!(near_d <= d);
            prop_assert!(far_d >= d);
        }

        // Earliest of any tie
        prop_assert!(points[..near].iter().all(|p| reference.distance_squared(*p) > near_d));
        prop_assert!(points[..far].iter().all(|p| reference.distance_squared(*p) < far_d));

        // Deterministic regardless of rng state
        let mut rng_a = ChaCha8Rng::seed_from_u64(1);
        let mut rng_b = ChaCha8Rng::seed_from_u64(2);
        let a = select_waypoint(reference, &points, SelectionMode::Nearest, &mut rng_a).unwrap();
        let b = select_waypoint(reference, &points, SelectionMode::Nearest, &mut rng_b).unwrap();
        prop_assert!(std::ptr::eq(a, b));
    }

    #[test]
    fn single_point_is_both_extremes(reference in point(), only in point()) {
        let points = [only];
        prop_assert_eq!(nearest_index(reference, &points), Ok(0));
        prop_assert_eq!(furthest_index(reference, &points), Ok(0));
    }
}

#[test]
fn nearest_prefers_first_of_tied_minimum() {
    let points = [
        Vec3::new(10.0, 0.0, 0.0),
        Vec3::new(1.0, 0.0, 0.0),
        Vec3::new(1.0, 0.0, 0.0),
    ];
    assert_eq!(nearest_index(Vec3::ZERO, &points), Ok(1));
}

#[test]
fn empty_set_has_no_result_in_any_mode() {
    let points: Vec<Vec3> = Vec::new();
    let mut rng = ChaCha8Rng::seed_from_u64(9);
    for mode in [SelectionMode::Nearest, SelectionMode::Furthest, SelectionMode::Random] {
        assert_eq!(
            select_waypoint(Vec3::ZERO, &points, mode, &mut rng),
            Err(EmptyWaypointSet)
        );
    }
}
