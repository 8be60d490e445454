//! Scripted device input for headless sessions.

use input::{DeviceTranslator, ElementState, KeyCode};

/// A raw device event as a window system would deliver it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DeviceAction {
    Key(KeyCode, ElementState),
    MouseMotion(f64, f64),
}

/// Device events keyed by the tick they arrive before.
#[derive(Debug, Clone, Default)]
pub struct InputScript {
    events: Vec<(u64, DeviceAction)>,
}

impl InputScript {
    pub fn new() -> Self {
        Self::default()
    }

    /// Key down at `tick`, key up at `release`.
    pub fn hold(mut self, key: KeyCode, tick: u64, release: u64) -> Self {
        self.events.push((tick, DeviceAction::Key(key, ElementState::Pressed)));
        self.events.push((release, DeviceAction::Key(key, ElementState::Released)));
        self
    }

    /// Mouse motion delivered before `tick`.
    pub fn mouse(mut self, tick: u64, dx: f64, dy: f64) -> Self {
        self.events.push((tick, DeviceAction::MouseMotion(dx, dy)));
        self
    }

    /// Feed every event scheduled for `tick` into the translator.
    pub fn feed(&self, tick: u64, translator: &mut DeviceTranslator) {
        for (_, action) in self.events.iter().filter(|(t, _)| *t == tick) {
            match *action {
                DeviceAction::Key(key, state) => translator.process_keyboard(key, state),
                DeviceAction::MouseMotion(dx, dy) => translator.process_mouse_motion((dx, dy)),
            }
        }
    }

    /// Walk forward, turn, jump, then crouch-walk and stand back up.
    pub fn demo() -> Self {
        let mut script = Self::new()
            .hold(KeyCode::KeyW, 10, 130)
            .hold(KeyCode::Space, 70, 72)
            .hold(KeyCode::ControlLeft, 150, 220)
            .hold(KeyCode::KeyD, 160, 210);
        for tick in 100..118 {
            script = script.mouse(tick, 12.0, -2.0);
        }
        script
    }
}
