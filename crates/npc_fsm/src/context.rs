//! Per-tick agent context supplied by the host

use crate::math::{Positioned, Vec3};
use serde::{Deserialize, Serialize};

/// What an agent knows about itself and its tracked target this tick
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AgentContext {
    /// Agent position
    pub position: Vec3,
    /// Agent heading as yaw around +Y (radians)
    pub heading: f32,
    /// Tracked target position, if any
    pub target: Option<Vec3>,
    /// Seconds since the previous tick
    pub delta_time: f32,
}

impl AgentContext {
    pub fn new(position: Vec3) -> Self {
        Self {
            position,
            heading: 0.0,
            target: None,
            delta_time: 0.0,
        }
    }

    /// Set tracked target
    pub fn with_target(mut self, target: Vec3) -> Self {
        self.target = Some(target);
        self
    }

    /// Set tick duration
    pub fn with_delta_time(mut self, delta_time: f32) -> Self {
        self.delta_time = delta_time;
        self
    }

    /// Distance to the tracked target
    pub fn distance_to_target(&self) -> Option<f32> {
        self.target.map(|t| self.position.distance(t))
    }

    /// Whether a target is tracked and within `range` (inclusive)
    pub fn target_within(&self, range: f32) -> bool {
        self.distance_to_target().is_some_and(|d| d <= range)
    }
}

impl Default for AgentContext {
    fn default() -> Self {
        Self::new(Vec3::ZERO)
    }
}

impl Positioned for AgentContext {
    fn position(&self) -> Vec3 {
        self.position
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_target_within() {
        let ctx = AgentContext::new(Vec3::ZERO);
        assert!(!ctx.target_within(100.0));

        let ctx = ctx.with_target(Vec3::new(3.0, 0.0, 4.0));
        assert_eq!(ctx.distance_to_target(), Some(5.0));
        assert!(ctx.target_within(5.0));
        assert!(!ctx.target_within(4.99));
    }
}
