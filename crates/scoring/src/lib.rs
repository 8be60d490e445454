//! Match scoring for the ball-and-goal level.
//!
//! Independent of the movement core: an explicitly constructed [`MatchContext`]
//! tracks score, follows level loads through an event subscription, and puts
//! the ball back on its spawn point. [`GoalZone`]s detect the ball entering a
//! goal.

pub mod context;
pub mod goal;

pub use context::*;
pub use goal::*;
