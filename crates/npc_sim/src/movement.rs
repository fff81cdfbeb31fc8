//! Rate-based turning and movement for tank behaviours

use npc_fsm::math::{rotate_yaw_towards, yaw_towards};
use npc_fsm::{AgentContext, Vec3};

/// Turn towards `point` at `rotation_speed` rad/s without moving
pub fn face(agent: &mut AgentContext, point: Vec3, rotation_speed: f32) {
    if agent.position.distance_squared(point) == 0.0 {
        return;
    }
    let desired = yaw_towards(agent.position, point);
    agent.heading = rotate_yaw_towards(agent.heading, desired, rotation_speed * agent.delta_time);
}

/// Turn towards `destination` and advance at most `speed * dt`
pub fn steer(agent: &mut AgentContext, destination: Vec3, speed: f32, rotation_speed: f32) {
    face(agent, destination, rotation_speed);
    agent.position = agent
        .position
        .move_towards(destination, speed * agent.delta_time);
}
