//! Collision groups and filtering.

use rapier3d::prelude::*;

/// Collision groups for the kinds of bodies in a level.
#[repr(u32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollisionGroup {
    /// Static environment (floor, walls)
    Environment = 1 << 0,
    /// Player-controlled agents
    Agent = 1 << 1,
    /// Loose dynamic props such as the ball
    Prop = 1 << 2,
}

impl CollisionGroup {
    /// Create a collision group for environment.
    pub fn environment() -> InteractionGroups {
        InteractionGroups::new(Group::from_bits_retain(Self::Environment as u32), Group::ALL)
    }

    /// Agents collide with the environment and props, never with each other.
    pub fn agent() -> InteractionGroups {
        InteractionGroups::new(
            Group::from_bits_retain(Self::Agent as u32),
            Group::from_bits_retain(Self::Environment as u32 | Self::Prop as u32),
        )
    }

    /// Props collide with everything solid.
    pub fn prop() -> InteractionGroups {
        InteractionGroups::new(
            Group::from_bits_retain(Self::Prop as u32),
            Group::from_bits_retain(
                Self::Environment as u32 | Self::Agent as u32 | Self::Prop as u32,
            ),
        )
    }
}
