//! Waypoint selection
//!
//! Nearest and furthest selection scan the candidates once, comparing squared
//! distances. The running best starts at the first point and is only replaced
//! on a strictly better distance, so ties resolve to the earliest point.

use crate::error::EmptyWaypointSet;
use crate::math::{Positioned, Vec3};
use rand::Rng;

/// How to pick a waypoint from a candidate set
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SelectionMode {
    Nearest,
    Furthest,
    Random,
}

/// Index of the point closest to `reference`
pub fn nearest_index<P: Positioned>(reference: Vec3, points: &[P]) -> Result<usize, EmptyWaypointSet> {
    scan(reference, points, |candidate, best| candidate < best)
}

/// Index of the point furthest from `reference`
pub fn furthest_index<P: Positioned>(reference: Vec3, points: &[P]) -> Result<usize, EmptyWaypointSet> {
    scan(reference, points, |candidate, best| candidate > best)
}

/// Uniformly random index
pub fn random_index<P, R: Rng + ?Sized>(points: &[P], rng: &mut R) -> Result<usize, EmptyWaypointSet> {
    if points.is_empty() {
        return Err(EmptyWaypointSet);
    }
    Ok(rng.gen_range(0..points.len()))
}

fn scan<P, F>(reference: Vec3, points: &[P], better: F) -> Result<usize, EmptyWaypointSet>
where
    P: Positioned,
    F: Fn(f32, f32) -> bool,
{
    let first = points.first().ok_or(EmptyWaypointSet)?;

    let mut best_index = 0;
    let mut best_dist = reference.distance_squared(first.position());

    for (i, point) in points.iter().enumerate().skip(1) {
        let dist = reference.distance_squared(point.position());
        if better(dist, best_dist) {
            best_index = i;
            best_dist = dist;
        }
    }

    Ok(best_index)
}

/// Pick an index according to `mode`
pub fn select_index<P, R>(
    reference: Vec3,
    points: &[P],
    mode: SelectionMode,
    rng: &mut R,
) -> Result<usize, EmptyWaypointSet>
where
    P: Positioned,
    R: Rng + ?Sized,
{
    match mode {
        SelectionMode::Nearest => nearest_index(reference, points),
        SelectionMode::Furthest => furthest_index(reference, points),
        SelectionMode::Random => random_index(points, rng),
    }
}

/// Pick a waypoint according to `mode`
pub fn select_waypoint<'a, P, R>(
    reference: Vec3,
    points: &'a [P],
    mode: SelectionMode,
    rng: &mut R,
) -> Result<&'a P, EmptyWaypointSet>
where
    P: Positioned,
    R: Rng + ?Sized,
{
    select_index(reference, points, mode, rng).map(|i| &points[i])
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn points() -> Vec<Vec3> {
        vec![
            Vec3::new(10.0, 0.0, 0.0),
            Vec3::new(1.0, 0.0, 0.0),
            Vec3::new(1.0, 0.0, 0.0),
            Vec3::new(-10.0, 0.0, 0.0),
        ]
    }

    #[test]
    fn test_nearest_first_tie_wins() {
        let pts = &points()[..3];
        assert_eq!(nearest_index(Vec3::ZERO, pts), Ok(1));
    }

    #[test]
    fn test_furthest_first_tie_wins() {
        // (10,0,0) and (-10,0,0) are equally far; the earlier one stays
        assert_eq!(furthest_index(Vec3::ZERO, &points()), Ok(0));
        assert_eq!(furthest_index(Vec3::new(2.0, 0.0, 0.0), &points()), Ok(3));
    }

    #[test]
    fn test_single_point() {
        let pts = [Vec3::new(5.0, 5.0, 5.0)];
        assert_eq!(nearest_index(Vec3::ZERO, &pts), Ok(0));
        assert_eq!(furthest_index(Vec3::ZERO, &pts), Ok(0));
    }

    #[test]
    fn test_empty_set() {
        let pts: [Vec3; 0] = [];
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        for mode in [SelectionMode::Nearest, SelectionMode::Furthest, SelectionMode::Random] {
            assert_eq!(
                select_waypoint(Vec3::ZERO, &pts, mode, &mut rng),
                Err(EmptyWaypointSet)
            );
        }
    }

    #[test]
    fn test_random_is_seeded() {
        let pts = points();
        let mut a = ChaCha8Rng::seed_from_u64(42);
        let mut b = ChaCha8Rng::seed_from_u64(42);

        let run_a: Vec<_> = (0..16).map(|_| random_index(&pts, &mut a).unwrap()).collect();
        let run_b: Vec<_> = (0..16).map(|_| random_index(&pts, &mut b).unwrap()).collect();

        assert_eq!(run_a, run_b);
        assert!(run_a.iter().all(|&i| i < pts.len()));
    }

    #[test]
    fn test_select_returns_reference_into_slice() {
        let pts = points();
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let picked = select_waypoint(Vec3::ZERO, &pts, SelectionMode::Nearest, &mut rng).unwrap();
        assert!(std::ptr::eq(picked, &pts[1]));
    }
}
