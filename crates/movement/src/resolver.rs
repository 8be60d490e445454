//! Compose the per-tick displacement handed to the collision solver.

use engine_core::{forward_at_yaw, right_at_yaw};
use glam::{Vec2, Vec3};

/// Yaw-relative horizontal direction: `x * right(yaw) + y * forward(yaw)`.
pub fn horizontal_direction(move_axis: Vec2, yaw_degrees: f32) -> Vec3 {
    if !move_axis.is_finite() {
        return Vec3::ZERO;
    }
    right_at_yaw(yaw_degrees) * move_axis.x + forward_at_yaw(yaw_degrees) * move_axis.y
}

/// Displacement for one tick: horizontal direction scaled by `speed`, vertical
/// component set to `vertical_velocity`, everything multiplied by `dt`.
pub fn displacement(
    move_axis: Vec2,
    yaw_degrees: f32,
    speed: f32,
    vertical_velocity: f32,
    dt: f32,
) -> Vec3 {
    let mut velocity = horizontal_direction(move_axis, yaw_degrees) * speed;
    velocity.y = vertical_velocity;
    velocity * dt
}
