//! Vertical velocity: ground stabilization, jump impulse, gravity.
//!
//! Each tick runs, in this order: [`MotionState::stabilize`],
//! [`MotionState::try_jump`], [`MotionState::apply_gravity`]. A jump therefore
//! overrides stabilization, and even the jump tick receives one step of gravity.
//! Integration is first-order Euler over a variable timestep.

use crate::posture::Posture;

/// Velocity held while standing on the ground. Slightly negative so the agent
/// stays pressed into the floor and the next contact query still reports ground.
pub const GROUND_STICK_VELOCITY: f32 = -2.0;

/// Launch speed that reaches `jump_height` under `gravity` (negative):
/// `v = sqrt(h * -2 * g)`.
pub fn jump_velocity(jump_height: f32, gravity: f32) -> f32 {
    (jump_height * -2.0 * gravity).sqrt()
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct MotionState {
    pub vertical_velocity: f32,
}

impl MotionState {
    /// Step 1: on the ground and moving down, snap to the stick velocity.
    pub fn stabilize(&mut self, grounded: bool) {
        if grounded && self.vertical_velocity < 0.0 {
            self.vertical_velocity = GROUND_STICK_VELOCITY;
        }
    }

    /// Step 2: launch if a jump edge arrived, the agent is grounded and standing.
    /// Returns whether the jump happened.
    pub fn try_jump(&mut self, jump_edge: bool, grounded: bool, posture: Posture, launch_velocity: f32) -> bool {
        if jump_edge && grounded && posture.can_jump() {
            self.vertical_velocity = launch_velocity;
            true
        } else {
            false
        }
    }

    /// Step 3: accrue gravity unconditionally.
    pub fn apply_gravity(&mut self, gravity: f32, dt: f32) {
        self.vertical_velocity += gravity * dt;
    }
}
