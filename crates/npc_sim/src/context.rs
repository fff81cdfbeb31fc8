//! Per-tank tick context

use npc_fsm::{AgentContext, Positioned, Vec3};

/// What a tank's states see and change each tick
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TankContext {
    pub agent: AgentContext,
    pub health: f32,
    pub max_health: f32,
    pub shots_fired: u32,
}

impl TankContext {
    pub fn new(position: Vec3, max_health: f32) -> Self {
        Self {
            agent: AgentContext::new(position),
            health: max_health,
            max_health,
            shots_fired: 0,
        }
    }

    /// Remaining health in `0.0..=1.0`
    pub fn health_fraction(&self) -> f32 {
        if self.max_health <= 0.0 {
            0.0
        } else {
            (self.health / self.max_health).clamp(0.0, 1.0)
        }
    }

    pub fn is_dead(&self) -> bool {
        self.health <= 0.0
    }

    /// Apply damage, returning the health left
    pub fn take_damage(&mut self, amount: f32) -> f32 {
        self.health = (self.health - amount).max(0.0);
        self.health
    }
}

impl Positioned for TankContext {
    fn position(&self) -> Vec3 {
        self.agent.position
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_damage_clamps() {
        let mut ctx = TankContext::new(Vec3::ZERO, 50.0);
        assert_eq!(ctx.health_fraction(), 1.0);

        assert_eq!(ctx.take_damage(20.0), 30.0);
        assert_eq!(ctx.health_fraction(), 0.6);

        assert_eq!(ctx.take_damage(100.0), 0.0);
        assert!(ctx.is_dead());
    }
}
