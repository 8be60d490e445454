//! Physics system using Rapier3D: the world, collision groups, and the
//! kinematic character body that resolves agent movement.

pub mod character;
pub mod collision;
pub mod physics_world;

pub use character::*;
pub use collision::*;
pub use physics_world::*;

// Re-export Rapier for downstream crates
pub use rapier3d;

// Re-export common Rapier types
pub use rapier3d::prelude::{ColliderHandle, RigidBodyHandle};
