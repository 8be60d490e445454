//! Yaw/pitch update from look input.

use glam::{Quat, Vec2};

use engine_core::{pitch_rotation, yaw_rotation};

/// Closed pitch band in degrees. Validated configs have `down <= up`; an
/// inverted band saturates to `up` instead of panicking.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PitchLimits {
    pub down: f32,
    pub up: f32,
}

impl PitchLimits {
    /// Saturate into the band. Idempotent.
    pub fn clamp(&self, pitch_degrees: f32) -> f32 {
        pitch_degrees.max(self.down).min(self.up)
    }
}

/// Facing of the agent. Yaw is unbounded; pitch stays inside its limits.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Orientation {
    pub yaw_degrees: f32,
    pub pitch_degrees: f32,
}

impl Orientation {
    /// Apply one look sample: `delta = look * sensitivity * dt`, yaw += delta.x,
    /// pitch -= delta.y (positive vertical input looks up), then clamp pitch.
    pub fn apply_look(&mut self, look: Vec2, sensitivity: f32, dt: f32, limits: PitchLimits) {
        let delta = look * sensitivity * dt;
        if delta.is_finite() {
            self.yaw_degrees += delta.x;
            self.pitch_degrees -= delta.y;
        }
        self.pitch_degrees = limits.clamp(self.pitch_degrees);
    }

    /// Body rotation (yaw only).
    pub fn body_rotation(&self) -> Quat {
        yaw_rotation(self.yaw_degrees)
    }

    /// Local rotation for the camera mount (pitch only).
    pub fn camera_rotation(&self) -> Quat {
        pitch_rotation(self.pitch_degrees)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const LIMITS: PitchLimits = PitchLimits {
        down: -80.0,
        up: 80.0,
    };

    #[test]
    fn look_scales_by_sensitivity_and_time() {
        let mut o = Orientation::default();
        o.apply_look(Vec2::new(2.0, 0.0), 25.0, 0.1, LIMITS);
        assert!((o.yaw_degrees - 5.0).abs() < 1e-5);
        assert_eq!(o.pitch_degrees, 0.0);
    }

    #[test]
    fn positive_vertical_input_decreases_pitch() {
        let mut o = Orientation::default();
        o.apply_look(Vec2::new(0.0, 1.0), 10.0, 1.0, LIMITS);
        assert_eq!(o.pitch_degrees, -10.0);
        // Negative pitch means the camera looks up.
        assert!((o.camera_rotation() * -glam::Vec3::Z).y > 0.0);
    }

    #[test]
    fn yaw_is_never_wrapped() {
        let mut o = Orientation::default();
        for _ in 0..10 {
            o.apply_look(Vec2::new(100.0, 0.0), 1.0, 1.0, LIMITS);
        }
        assert_eq!(o.yaw_degrees, 1000.0);
    }

    #[test]
    fn pitch_stays_in_band_for_any_input() {
        let mut o = Orientation::default();
        let samples = [1e6, -3.0, -1e6, 0.5, 42.0, -42.0, f32::MAX, f32::MIN];
        for (i, y) in samples.iter().cycle().take(64).enumerate() {
            let dt = 0.001 + (i as f32) * 0.01;
            o.apply_look(Vec2::new(0.0, *y), 25.0, dt, LIMITS);
            assert!(o.pitch_degrees >= LIMITS.down && o.pitch_degrees <= LIMITS.up);
        }
    }

    #[test]
    fn clamp_saturates_and_is_idempotent() {
        assert_eq!(LIMITS.clamp(200.0), 80.0);
        assert_eq!(LIMITS.clamp(-200.0), -80.0);
        for p in [-1000.0, -80.0, -12.5, 0.0, 79.9, 80.0, 1000.0] {
            let once = LIMITS.clamp(p);
            assert_eq!(LIMITS.clamp(once), once);
        }
    }

    #[test]
    fn inverted_or_nan_limits_saturate_without_panicking() {
        let inverted = PitchLimits {
            down: 10.0,
            up: -10.0,
        };
        assert_eq!(inverted.clamp(0.0), -10.0);
        assert_eq!(inverted.clamp(50.0), -10.0);

        let mut o = Orientation::default();
        o.apply_look(Vec2::new(0.0, 1.0), 25.0, 0.1, inverted);
        assert_eq!(o.pitch_degrees, -10.0);

        let open = PitchLimits {
            down: f32::NAN,
            up: f32::NAN,
        };
        assert_eq!(open.clamp(12.0), 12.0);
    }

    #[test]
    fn non_finite_look_leaves_orientation_untouched() {
        let mut o = Orientation {
            yaw_degrees: 12.0,
            pitch_degrees: -3.0,
        };
        o.apply_look(Vec2::new(f32::NAN, f32::INFINITY), 25.0, 0.016, LIMITS);
        assert_eq!(o.yaw_degrees, 12.0);
        assert_eq!(o.pitch_degrees, -3.0);
    }
}
