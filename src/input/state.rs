// Per-frame device state: raw snapshot, key transitions, mouse delta and lock

use super::device::DeviceSource;
use super::repeat::{KeyRepeatConfig, KeyRepeatTracker, KeyTransitions};
use glam::Vec2;
use log::debug;
use std::collections::HashSet;
use winit::keyboard::KeyCode;

/// Gamepad buttons recognised by action bindings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GamepadButton {
    // Face buttons
    A,
    B,
    X,
    Y,

    // Shoulders and triggers
    LeftShoulder,
    RightShoulder,
    LeftTrigger,
    RightTrigger,

    // Stick clicks
    LeftStick,
    RightStick,

    DPadUp,
    DPadDown,
    DPadLeft,
    DPadRight,

    Start,
    Back,
    Guide,
}

/// Gamepad state for the tracked player
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GamepadState {
    pub connected: bool,
    /// Stick deflection in -1.0..=1.0, +Y up as reported by the device
    pub left_stick: Vec2,
    pub right_stick: Vec2,
    pub buttons: HashSet<GamepadButton>,
}

impl GamepadState {
    pub fn is_button_down(&self, button: GamepadButton) -> bool {
        self.buttons.contains(&button)
    }
}

/// Everything read from the devices at one instant
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawDeviceSnapshot {
    /// Keys held right now
    pub held_keys: HashSet<KeyCode>,

    /// Cursor position in window pixels
    pub mouse_position: Vec2,

    pub gamepad: GamepadState,
}

impl RawDeviceSnapshot {
    /// Snapshot with the given keys held and nothing else
    pub fn with_keys<I: IntoIterator<Item = KeyCode>>(keys: I) -> Self {
        Self {
            held_keys: keys.into_iter().collect(),
            ..Self::default()
        }
    }
}

/// Input state for the current frame
///
/// Refreshed by [`InputState::update`]; all queries answer for the most
/// recent update.
#[derive(Debug, Default)]
pub struct InputState {
    snapshot: RawDeviceSnapshot,
    repeat: KeyRepeatTracker,
    keys: KeyTransitions,

    /// Position the next mouse delta is measured from
    last_mouse_position: Option<Vec2>,
    mouse_delta: Vec2,
    mouse_lock: Option<Vec2>,
}

impl InputState {
    /// Create an empty state with the given repeat timing
    pub fn new(repeat: KeyRepeatConfig) -> Self {
        Self {
            repeat: KeyRepeatTracker::new(repeat),
            ..Self::default()
        }
    }

    /// Poll the device and advance every frame set by `elapsed` seconds
    pub fn update<S: DeviceSource + ?Sized>(&mut self, source: &mut S, elapsed: f32) {
        self.snapshot = source.poll();

        self.repeat
            .advance(&self.snapshot.held_keys, elapsed, &mut self.keys);

        let position = self.snapshot.mouse_position;
        self.mouse_delta = match self.last_mouse_position {
            Some(last) => position - last,
            None => Vec2::ZERO,
        };

        match self.mouse_lock {
            Some(lock) => {
                source.set_mouse_position(lock);
                self.snapshot.mouse_position = lock;
                self.last_mouse_position = Some(lock);
            }
            None => self.last_mouse_position = Some(position),
        }
    }

    pub fn repeat_config(&self) -> KeyRepeatConfig {
        self.repeat.config()
    }

    pub fn set_repeat_config(&mut self, config: KeyRepeatConfig) {
        self.repeat.set_config(config);
    }

    pub fn is_key_down(&self, key: KeyCode) -> bool {
        self.keys.down.contains(&key)
    }

    /// True on the first frame a key is held and on every repeat frame
    pub fn is_key_pressed(&self, key: KeyCode) -> bool {
        self.keys.pressed.contains(&key)
    }

    pub fn is_key_released(&self, key: KeyCode) -> bool {
        self.keys.released.contains(&key)
    }

    pub fn is_button_down(&self, button: GamepadButton) -> bool {
        self.snapshot.gamepad.is_button_down(button)
    }

    pub fn pressed_keys(&self) -> &HashSet<KeyCode> {
        &self.keys.pressed
    }

    pub fn down_keys(&self) -> &HashSet<KeyCode> {
        &self.keys.down
    }

    pub fn released_keys(&self) -> &HashSet<KeyCode> {
        &self.keys.released
    }

    /// How long a key has been held, minus time spent on repeats
    pub fn hold_time(&self, key: KeyCode) -> Option<f32> {
        self.repeat.hold_time(key)
    }

    /// Raw snapshot of this frame, with the lock point substituted for the
    /// cursor position while the mouse is locked
    pub fn snapshot(&self) -> &RawDeviceSnapshot {
        &self.snapshot
    }

    pub fn gamepad(&self) -> &GamepadState {
        &self.snapshot.gamepad
    }

    pub fn mouse_position(&self) -> Vec2 {
        self.snapshot.mouse_position
    }

    /// Cursor movement since the previous frame
    pub fn mouse_delta(&self) -> Vec2 {
        self.mouse_delta
    }

    /// Pin the cursor to `position` from the next update on
    pub fn lock_mouse(&mut self, position: Vec2) {
        debug!("Mouse locked at ({}, {})", position.x, position.y);
        self.mouse_lock = Some(position);
    }

    pub fn unlock_mouse(&mut self) {
        if self.mouse_lock.take().is_some() {
            debug!("Mouse unlocked");
        }
    }

    pub fn mouse_lock(&self) -> Option<Vec2> {
        self.mouse_lock
    }

    pub fn is_mouse_locked(&self) -> bool {
        self.mouse_lock.is_some()
    }

    /// Drop all frame state and held keys; the mouse lock is kept
    pub fn clear(&mut self) {
        self.snapshot.held_keys.clear();
        self.snapshot.gamepad.buttons.clear();
        self.repeat.clear();
        self.keys.clear();
        self.last_mouse_position = None;
        self.mouse_delta = Vec2::ZERO;
    }
}
