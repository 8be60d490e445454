//! Per-agent movement tuning. Set once at construction, never mutated.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Movement, look, jump and crouch tuning for one agent.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MovementConfig {
    /// Horizontal speed while standing (units per second).
    #[serde(default = "default_move_speed")]
    pub move_speed: f32,
    /// Speed factor applied while crouching.
    #[serde(default = "default_crouch_speed_multiplier")]
    pub crouch_speed_multiplier: f32,
    /// Degrees per second per unit of look input.
    #[serde(default = "default_look_sensitivity")]
    pub look_sensitivity: f32,
    /// Pitch bound when looking up (degrees).
    #[serde(default = "default_max_look_up")]
    pub max_look_up: f32,
    /// Pitch bound when looking down (degrees, usually negative).
    #[serde(default = "default_max_look_down")]
    pub max_look_down: f32,
    /// Apex height of a standing jump.
    #[serde(default = "default_jump_height")]
    pub jump_height: f32,
    /// Vertical acceleration; must point down (negative).
    #[serde(default = "default_gravity")]
    pub gravity: f32,
    /// Capsule height while crouching.
    #[serde(default = "default_crouch_height")]
    pub crouch_height: f32,
}

fn default_move_speed() -> f32 {
    5.0
}
fn default_crouch_speed_multiplier() -> f32 {
    0.5
}
fn default_look_sensitivity() -> f32 {
    25.0
}
fn default_max_look_up() -> f32 {
    80.0
}
fn default_max_look_down() -> f32 {
    -80.0
}
fn default_jump_height() -> f32 {
    1.5
}
fn default_gravity() -> f32 {
    -9.81
}
fn default_crouch_height() -> f32 {
    1.0
}

impl Default for MovementConfig {
    fn default() -> Self {
        Self {
            move_speed: default_move_speed(),
            crouch_speed_multiplier: default_crouch_speed_multiplier(),
            look_sensitivity: default_look_sensitivity(),
            max_look_up: default_max_look_up(),
            max_look_down: default_max_look_down(),
            jump_height: default_jump_height(),
            gravity: default_gravity(),
            crouch_height: default_crouch_height(),
        }
    }
}

/// Configuration rejected at construction time.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("{field} must be finite")]
    NonFinite { field: &'static str },
    #[error("gravity must be negative (downward), got {0}")]
    GravityNotDownward(f32),
    #[error("max_look_down ({down}) is above max_look_up ({up})")]
    PitchLimitsInverted { down: f32, up: f32 },
    #[error("{field} must be positive, got {value}")]
    NotPositive { field: &'static str, value: f32 },
    #[error("{field} must not be negative, got {value}")]
    Negative { field: &'static str, value: f32 },
    #[error("crouch height {crouch} exceeds standing height {standing}")]
    CrouchTallerThanStanding { crouch: f32, standing: f32 },
}

impl MovementConfig {
    /// Check every invariant the movement core relies on.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let fields = [
            ("move_speed", self.move_speed),
            ("crouch_speed_multiplier", self.crouch_speed_multiplier),
            ("look_sensitivity", self.look_sensitivity),
            ("max_look_up", self.max_look_up),
            ("max_look_down", self.max_look_down),
            ("jump_height", self.jump_height),
            ("gravity", self.gravity),
            ("crouch_height", self.crouch_height),
        ];
        if let Some((field, _)) = fields.iter().find(|(_, v)| !v.is_finite()) {
            return Err(ConfigError::NonFinite { field: *field });
        }

        if self.gravity >= 0.0 {
            return Err(ConfigError::GravityNotDownward(self.gravity));
        }
        if self.max_look_down > self.max_look_up {
            return Err(ConfigError::PitchLimitsInverted {
                down: self.max_look_down,
                up: self.max_look_up,
            });
        }

        for (field, value) in [
            ("move_speed", self.move_speed),
            ("crouch_speed_multiplier", self.crouch_speed_multiplier),
            ("crouch_height", self.crouch_height),
        ] {
            if value <= 0.0 {
                return Err(ConfigError::NotPositive { field, value });
            }
        }
        for (field, value) in [
            ("look_sensitivity", self.look_sensitivity),
            ("jump_height", self.jump_height),
        ] {
            if value < 0.0 {
                return Err(ConfigError::Negative { field, value });
            }
        }

        Ok(())
    }
}
