//! First-person kinematic movement core.
//!
//! Turns sampled input and elapsed time into orientation, posture and
//! vertical-velocity updates plus one displacement per tick for an external
//! collision solver:
//! - [`orientation`]: yaw/pitch from look input, pitch clamped
//! - [`posture`]: standing/crouching, capsule geometry and speed factor
//! - [`vertical`]: ground stabilization, jump impulse, gravity
//! - [`resolver`]: yaw-relative displacement
//! - [`model`]: the pure per-tick step
//! - [`controller`]: the per-agent pipeline a host loop drives

pub mod config;
pub mod controller;
pub mod model;
pub mod orientation;
pub mod posture;
pub mod resolver;
pub mod vertical;

pub use config::{ConfigError, MovementConfig};
pub use controller::FirstPersonController;
pub use model::{AgentState, FrameInput, MovementModel, Step};
pub use orientation::{Orientation, PitchLimits};
pub use posture::{Posture, PostureProfile};
pub use vertical::{jump_velocity, MotionState, GROUND_STICK_VELOCITY};
