//! Input handling: logical movement events and the per-agent sampler.
//!
//! Device events are translated into [`InputEvent`]s (see [`bindings`]), published
//! on an `EventChannel`, and stored by an [`InputSampler`] at the start of the
//! owning tick. Storing is all the sampler does; the movement core reads it.

pub mod bindings;

pub use bindings::*;

use glam::Vec2;

/// Logical input events delivered to a movement controller.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    /// New 2D move vector; `Vec2::ZERO` means the move input was released.
    MoveChanged(Vec2),
    /// New look sample; `Vec2::ZERO` means the look input went idle.
    LookChanged(Vec2),
    JumpPressed,
    CrouchPressed,
    CrouchReleased,
}

/// Latest logical input for one agent.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct InputSampler {
    /// Each axis in [-1, 1].
    move_axis: Vec2,
    /// Unbounded per-sample delta.
    look_axis: Vec2,
    /// Set by a press, cleared when consumed.
    jump_requested: bool,
    crouch_held: bool,
}

impl InputSampler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store one event. Dispatches on the event kind; never fails.
    pub fn apply(&mut self, event: InputEvent) {
        match event {
            InputEvent::MoveChanged(axis) => {
                self.move_axis = axis.clamp(Vec2::NEG_ONE, Vec2::ONE);
            }
            InputEvent::LookChanged(delta) => self.look_axis = delta,
            InputEvent::JumpPressed => self.jump_requested = true,
            InputEvent::CrouchPressed => self.crouch_held = true,
            InputEvent::CrouchReleased => self.crouch_held = false,
        }
    }

    /// Store a batch of events in order.
    pub fn apply_all<I>(&mut self, events: I)
    where
        I: IntoIterator<Item = InputEvent>,
    {
        for event in events {
            self.apply(event);
        }
    }

    /// Current move vector.
    pub fn sample_move(&self) -> Vec2 {
        self.move_axis
    }

    /// Current look delta.
    pub fn sample_look(&self) -> Vec2 {
        self.look_axis
    }

    /// True once per jump press, false afterwards until pressed again.
    pub fn consume_jump_edge(&mut self) -> bool {
        std::mem::take(&mut self.jump_requested)
    }

    pub fn crouch_held(&self) -> bool {
        self.crouch_held
    }

    /// Forget everything (controller disabled).
    pub fn clear(&mut self) {
        *self = Self::default();
    }
}
