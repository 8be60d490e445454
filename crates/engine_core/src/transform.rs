//! Transform component and utilities for spatial positioning.
//!
//! Conventions: right-handed, +Y up, forward is -Z at zero yaw and right is +X.
//! Yaw in degrees grows clockwise when viewed from above; pitch in degrees is
//! negative when looking up.

use glam::{Quat, Vec3};

/// A rigid transform: position plus rotation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    pub position: Vec3,
    pub rotation: Quat,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            rotation: Quat::IDENTITY,
        }
    }
}

/// Rotation about the vertical axis for a clockwise-positive yaw in degrees.
pub fn yaw_rotation(yaw_degrees: f32) -> Quat {
    Quat::from_rotation_y(-yaw_degrees.to_radians())
}

/// Local camera rotation for a pitch in degrees (negative looks up).
pub fn pitch_rotation(pitch_degrees: f32) -> Quat {
    Quat::from_rotation_x(-pitch_degrees.to_radians())
}

/// Horizontal forward direction at the given yaw.
pub fn forward_at_yaw(yaw_degrees: f32) -> Vec3 {
    let (sin, cos) = yaw_degrees.to_radians().sin_cos();
    Vec3::new(sin, 0.0, -cos)
}

/// Horizontal right direction at the given yaw.
pub fn right_at_yaw(yaw_degrees: f32) -> Vec3 {
    let (sin, cos) = yaw_degrees.to_radians().sin_cos();
    Vec3::new(cos, 0.0, sin)
}

impl Transform {
    /// Create a new transform at the given position.
    pub fn from_position(position: Vec3) -> Self {
        Self {
            position,
            ..Default::default()
        }
    }

    /// Get the forward direction (negative Z in right-handed coordinates).
    pub fn forward(&self) -> Vec3 {
        self.rotation * -Vec3::Z
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: Vec3, b: Vec3) -> bool {
        (a - b).length() < 1e-5
    }

    #[test]
    fn yaw_zero_faces_negative_z() {
        assert!(approx(forward_at_yaw(0.0), Vec3::NEG_Z));
        assert!(approx(right_at_yaw(0.0), Vec3::X));
    }

    #[test]
    fn positive_yaw_turns_clockwise_from_above() {
        // Quarter turn clockwise: forward swings from -Z to +X.
        assert!(approx(forward_at_yaw(90.0), Vec3::X));
        assert!(approx(right_at_yaw(90.0), Vec3::Z));
    }

    #[test]
    fn yaw_helpers_agree_with_quaternion() {
        for yaw in [-270.0, -45.0, 0.0, 30.0, 181.0, 720.0] {
            let t = Transform {
                position: Vec3::ZERO,
                rotation: yaw_rotation(yaw),
            };
            assert!(approx(t.forward(), forward_at_yaw(yaw)));
            assert!(approx(t.rotation * Vec3::X, right_at_yaw(yaw)));
        }
    }

    #[test]
    fn negative_pitch_looks_up() {
        let mut camera = Transform::default();
        camera.rotation = pitch_rotation(-30.0);
        assert!(camera.forward().y > 0.0);
        camera.rotation = pitch_rotation(30.0);
        assert!(camera.forward().y < 0.0);
    }
}
