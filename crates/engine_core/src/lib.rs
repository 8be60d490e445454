//! Core types shared by every crate in the workspace.
//!
//! This crate provides the foundational pieces the movement core and its
//! collaborators agree on:
//! - Transform and spatial helpers
//! - Frame timing for host-owned simulation loops
//! - Subscription-based event channels
//! - The collision solver seam consumed by the movement core

pub mod events;
pub mod solver;
pub mod time;
pub mod transform;

pub use events::*;
pub use solver::*;
pub use time::*;
pub use transform::*;

// Re-export commonly used types
pub use glam::{Quat, Vec2, Vec3};
