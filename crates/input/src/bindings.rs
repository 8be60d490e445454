//! Translation from raw device events (keys, mouse motion) to [`InputEvent`]s.

use std::collections::HashSet;

use engine_core::EventChannel;
use glam::Vec2;

use crate::InputEvent;

// Re-export for convenience
pub use winit::event::ElementState;
pub use winit::keyboard::KeyCode;

/// Which physical keys drive which logical action.
#[derive(Debug, Clone)]
pub struct KeyBindings {
    pub forward: Vec<KeyCode>,
    pub back: Vec<KeyCode>,
    pub left: Vec<KeyCode>,
    pub right: Vec<KeyCode>,
    pub jump: Vec<KeyCode>,
    pub crouch: Vec<KeyCode>,
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self {
            forward: vec![KeyCode::KeyW, KeyCode::ArrowUp],
            back: vec![KeyCode::KeyS, KeyCode::ArrowDown],
            left: vec![KeyCode::KeyA, KeyCode::ArrowLeft],
            right: vec![KeyCode::KeyD, KeyCode::ArrowRight],
            jump: vec![KeyCode::Space],
            crouch: vec![KeyCode::ControlLeft, KeyCode::ControlRight],
        }
    }
}

/// Turns device callbacks into logical events and publishes them once per tick.
///
/// Keys produce events as they arrive. Mouse motion is accumulated and flushed
/// as a single look sample per tick; an idle tick after motion emits a zero
/// sample so the look input does not stick.
#[derive(Debug, Default)]
pub struct DeviceTranslator {
    bindings: KeyBindings,
    keys_held: HashSet<KeyCode>,
    move_axis: Vec2,
    accumulated_look: Vec2,
    look_active: bool,
    pending: Vec<InputEvent>,
}

impl DeviceTranslator {
    pub fn new(bindings: KeyBindings) -> Self {
        Self {
            bindings,
            ..Default::default()
        }
    }

    /// Process a keyboard event.
    pub fn process_keyboard(&mut self, key: KeyCode, state: ElementState) {
        let was_crouching = self.any_held(&self.bindings.crouch);
        match state {
            ElementState::Pressed => {
                let newly_pressed = self.keys_held.insert(key);
                if newly_pressed && self.bindings.jump.contains(&key) {
                    self.pending.push(InputEvent::JumpPressed);
                }
            }
            ElementState::Released => {
                self.keys_held.remove(&key);
            }
        }

        let crouching = self.any_held(&self.bindings.crouch);
        if crouching != was_crouching {
            self.pending.push(if crouching {
                InputEvent::CrouchPressed
            } else {
                InputEvent::CrouchReleased
            });
        }

        let move_axis = self.movement_input();
        if move_axis != self.move_axis {
            self.move_axis = move_axis;
            self.pending.push(InputEvent::MoveChanged(move_axis));
        }
    }

    /// Process raw mouse motion (winit reports +y downwards).
    pub fn process_mouse_motion(&mut self, delta: (f64, f64)) {
        self.accumulated_look.x += delta.0 as f32;
        self.accumulated_look.y -= delta.1 as f32;
    }

    /// Publish everything gathered since the last flush. Returns the number of
    /// events published.
    pub fn flush(&mut self, channel: &mut EventChannel<InputEvent>) -> usize {
        if self.accumulated_look != Vec2::ZERO {
            self.pending.push(InputEvent::LookChanged(self.accumulated_look));
            self.accumulated_look = Vec2::ZERO;
            self.look_active = true;
        } else if self.look_active {
            self.pending.push(InputEvent::LookChanged(Vec2::ZERO));
            self.look_active = false;
        }

        let count = self.pending.len();
        for event in self.pending.drain(..) {
            channel.publish(event);
        }
        count
    }

    /// Drop held keys and pending events (focus lost).
    pub fn reset(&mut self, channel: &mut EventChannel<InputEvent>) {
        let was_crouching = self.any_held(&self.bindings.crouch);
        log::debug!("input reset: releasing {} held keys", self.keys_held.len());
        self.keys_held.clear();
        self.pending.clear();
        self.accumulated_look = Vec2::ZERO;
        if self.move_axis != Vec2::ZERO {
            self.move_axis = Vec2::ZERO;
            channel.publish(InputEvent::MoveChanged(Vec2::ZERO));
        }
        if was_crouching {
            channel.publish(InputEvent::CrouchReleased);
        }
        if self.look_active {
            self.look_active = false;
            channel.publish(InputEvent::LookChanged(Vec2::ZERO));
        }
    }

    fn any_held(&self, keys: &[KeyCode]) -> bool {
        keys.iter().any(|k| self.keys_held.contains(k))
    }

    /// Digital 2D composite, normalized so diagonals are not faster.
    fn movement_input(&self) -> Vec2 {
        let mut movement = Vec2::ZERO;

        if self.any_held(&self.bindings.forward) {
            movement.y += 1.0;
        }
        if self.any_held(&self.bindings.back) {
            movement.y -= 1.0;
        }
        if self.any_held(&self.bindings.left) {
            movement.x -= 1.0;
        }
        if self.any_held(&self.bindings.right) {
            movement.x += 1.0;
        }

        movement.normalize_or_zero()
    }
}
