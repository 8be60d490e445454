//! The seam between the movement core and whatever resolves collisions.

use glam::Vec3;

/// Upright capsule used as an agent's collision shape.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CapsuleGeometry {
    /// Total height, caps included.
    pub height: f32,
    pub radius: f32,
    /// Offset of the capsule center from the agent origin (the feet).
    pub center: Vec3,
}

impl CapsuleGeometry {
    /// Capsule standing on the origin: center at half height.
    pub fn standing(height: f32, radius: f32) -> Self {
        Self {
            height,
            radius,
            center: Vec3::new(0.0, height * 0.5, 0.0),
        }
    }

    /// Half length of the straight segment between the two caps.
    pub fn segment_half_height(&self) -> f32 {
        (self.height * 0.5 - self.radius).max(0.0)
    }
}

impl Default for CapsuleGeometry {
    fn default() -> Self {
        Self::standing(2.0, 0.5)
    }
}

/// Sweep-and-resolve collision backend for a single agent.
///
/// `move_by` applies a displacement and resolves it against the world; the
/// grounded state it produces is read back on the next tick through
/// `is_grounded`.
pub trait CollisionSolver {
    fn is_grounded(&self) -> bool;

    fn move_by(&mut self, displacement: Vec3);

    fn capsule(&self) -> CapsuleGeometry;

    fn set_capsule(&mut self, capsule: CapsuleGeometry);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standing_capsule_sits_on_origin() {
        let capsule = CapsuleGeometry::standing(1.8, 0.4);
        assert_eq!(capsule.center, Vec3::new(0.0, 0.9, 0.0));
        assert!((capsule.segment_half_height() - 0.5).abs() < 1e-6);
    }

    #[test]
    fn squat_capsule_has_no_segment() {
        let capsule = CapsuleGeometry::standing(0.6, 0.5);
        assert_eq!(capsule.segment_half_height(), 0.0);
    }
}
