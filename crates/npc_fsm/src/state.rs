//! State contract and shared per-state working data

use crate::context::AgentContext;
use crate::error::{EmptyWaypointSet, FsmResult};
use crate::id::Identifier;
use crate::math::Vec3;
use crate::table::TransitionTable;
use crate::waypoint;
use rand::RngCore;

/// Whether `point` lies within `range` of `reference` (boundary inclusive)
pub fn is_in_range(reference: Vec3, point: Vec3, range: f32) -> bool {
    reference.distance(point) <= range
}

/// Data every state carries: its identifier, its transition table and the
/// movement working set used by its behaviour.
///
/// Waypoints are borrowed from the level that owns them and are never
/// written to.
#[derive(Debug, Clone)]
pub struct StateCore<'w, S, T> {
    id: S,
    transitions: TransitionTable<S, T>,
    destination: Vec3,
    waypoints: &'w [Vec3],
    rotation_speed: f32,
    speed: f32,
}

impl<'w, S: Identifier, T: Identifier> StateCore<'w, S, T> {
    /// Create a state core with an empty table and no waypoints
    pub fn new(id: S) -> Self {
        Self {
            id,
            transitions: TransitionTable::new(),
            destination: Vec3::ZERO,
            waypoints: &[],
            rotation_speed: 0.0,
            speed: 0.0,
        }
    }

    /// Set the borrowed waypoint set
    pub fn with_waypoints(mut self, waypoints: &'w [Vec3]) -> Self {
        self.waypoints = waypoints;
        self
    }

    /// Set movement speed
    pub fn with_speed(mut self, speed: f32) -> Self {
        self.speed = speed;
        self
    }

    /// Set turning rate (radians per second)
    pub fn with_rotation_speed(mut self, rotation_speed: f32) -> Self {
        self.rotation_speed = rotation_speed;
        self
    }

    /// Identifier, fixed at construction
    pub fn id(&self) -> S {
        self.id
    }

    /// Get transition table
    pub fn transitions(&self) -> &TransitionTable<S, T> {
        &self.transitions
    }

    /// Add a stimulus -> target pair to this state's table
    pub fn add_transition(&mut self, stimulus: T, target: S) -> FsmResult<(), S, T> {
        self.transitions.add_transition(stimulus, target)
    }

    /// Remove a stimulus from this state's table
    pub fn delete_transition(&mut self, stimulus: T) -> FsmResult<S, S, T> {
        self.transitions.delete_transition(stimulus)
    }

    /// Target state for a fired stimulus
    pub fn output_state(&self, stimulus: T) -> FsmResult<S, S, T> {
        self.transitions.output_state(stimulus)
    }

    /// Get current destination
    pub fn destination(&self) -> Vec3 {
        self.destination
    }

    /// Set destination
    pub fn set_destination(&mut self, destination: Vec3) {
        self.destination = destination;
    }

    /// Get waypoint set
    pub fn waypoints(&self) -> &'w [Vec3] {
        self.waypoints
    }

    /// Set waypoint set
    pub fn set_waypoints(&mut self, waypoints: &'w [Vec3]) {
        self.waypoints = waypoints;
    }

    /// Get movement speed
    pub fn speed(&self) -> f32 {
        self.speed
    }

    /// Set movement speed
    pub fn set_speed(&mut self, speed: f32) {
        self.speed = speed;
    }

    /// Get turning rate
    pub fn rotation_speed(&self) -> f32 {
        self.rotation_speed
    }

    /// Set turning rate
    pub fn set_rotation_speed(&mut self, rotation_speed: f32) {
        self.rotation_speed = rotation_speed;
    }

    /// Draw a new destination uniformly from the waypoint set
    pub fn find_next_point(&mut self, rng: &mut dyn RngCore) -> Result<Vec3, EmptyWaypointSet> {
        let index = waypoint::random_index(self.waypoints, rng)?;
        self.destination = self.waypoints[index];
        Ok(self.destination)
    }

    /// Waypoint nearest to `reference`
    pub fn closest_waypoint(&self, reference: Vec3) -> Result<&'w Vec3, EmptyWaypointSet> {
        let waypoints = self.waypoints;
        waypoint::nearest_index(reference, waypoints).map(|i| &waypoints[i])
    }

    /// Waypoint furthest from `reference`
    pub fn furthest_waypoint(&self, reference: Vec3) -> Result<&'w Vec3, EmptyWaypointSet> {
        let waypoints = self.waypoints;
        waypoint::furthest_index(reference, waypoints).map(|i| &waypoints[i])
    }

    /// Whether `position` is within `arrival_range` of the destination
    pub fn has_reached_destination(&self, position: Vec3, arrival_range: f32) -> bool {
        is_in_range(position, self.destination, arrival_range)
    }
}

/// A behaviour mode of an agent.
///
/// Per tick the controller calls `reason` and then `act`. `reason` only
/// decides: it returns the state it wants to switch to and the controller
/// performs the switch. `enter_state_init` runs every time the controller
/// enters this state, before its first `reason`/`act`.
pub trait FsmState<'w, S: Identifier, T: Identifier, C = AgentContext> {
    fn core(&self) -> &StateCore<'w, S, T>;

    fn core_mut(&mut self) -> &mut StateCore<'w, S, T>;

    fn id(&self) -> S {
        self.core().id()
    }

    /// Reset per-entry working data
    fn enter_state_init(&mut self, _ctx: &C) {}

    /// Evaluate stimuli.
    ///
    /// `Ok(Some(id))` requests a switch, `Ok(None)` stays. Errors are
    /// reported by the controller and the current state is kept.
    fn reason(&mut self, ctx: &C) -> FsmResult<Option<S>, S, T>;

    /// Perform this tick's behaviour
    fn act(&mut self, ctx: &mut C);

    fn find_next_point(&mut self, rng: &mut dyn RngCore) -> Result<Vec3, EmptyWaypointSet> {
        self.core_mut().find_next_point(rng)
    }

    fn is_in_current_range(&self, reference: Vec3, point: Vec3, range: f32) -> bool {
        is_in_range(reference, point, range)
    }
}
