//! Standing/crouching state machine and the geometry it owns.

use engine_core::{CapsuleGeometry, Vec3};

use crate::config::{ConfigError, MovementConfig};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Posture {
    #[default]
    Standing,
    Crouching,
}

impl Posture {
    /// Crouch press. Redundant presses are no-ops.
    pub fn on_crouch_press(self) -> Self {
        Posture::Crouching
    }

    /// Crouch release. Redundant releases are no-ops.
    pub fn on_crouch_release(self) -> Self {
        Posture::Standing
    }

    /// Follow a level-triggered crouch hold.
    pub fn follow_hold(self, crouch_held: bool) -> Self {
        if crouch_held {
            self.on_crouch_press()
        } else {
            self.on_crouch_release()
        }
    }

    /// Jumping is only ever allowed while standing.
    pub fn can_jump(self) -> bool {
        self == Posture::Standing
    }
}

/// Constants that derive capsule geometry and speed from a [`Posture`].
///
/// The standing capsule is captured from the collision body when the agent is
/// created and handed back untouched on stand-up, so a crouch round trip
/// restores it bit for bit.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PostureProfile {
    standing: CapsuleGeometry,
    crouching: CapsuleGeometry,
    crouch_speed_multiplier: f32,
}

impl PostureProfile {
    pub fn new(standing: CapsuleGeometry, config: &MovementConfig) -> Result<Self, ConfigError> {
        if config.crouch_height > standing.height {
            return Err(ConfigError::CrouchTallerThanStanding {
                crouch: config.crouch_height,
                standing: standing.height,
            });
        }

        // Keep the feet planted: the crouched capsule sits on the same floor.
        let crouching = CapsuleGeometry {
            height: config.crouch_height,
            radius: standing.radius.min(config.crouch_height * 0.5),
            center: Vec3::new(
                standing.center.x,
                config.crouch_height * 0.5,
                standing.center.z,
            ),
        };

        Ok(Self {
            standing,
            crouching,
            crouch_speed_multiplier: config.crouch_speed_multiplier,
        })
    }

    pub fn geometry(&self, posture: Posture) -> CapsuleGeometry {
        match posture {
            Posture::Standing => self.standing,
            Posture::Crouching => self.crouching,
        }
    }

    pub fn speed_multiplier(&self, posture: Posture) -> f32 {
        match posture {
            Posture::Standing => 1.0,
            Posture::Crouching => self.crouch_speed_multiplier,
        }
    }
}
