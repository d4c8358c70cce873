// Device sources - where the raw per-frame snapshot comes from

use super::state::{GamepadButton, GamepadState, RawDeviceSnapshot};
use glam::Vec2;
use log::trace;
use std::collections::HashSet;
use winit::dpi::PhysicalPosition;
use winit::event::{ElementState, KeyEvent, WindowEvent};
use winit::keyboard::{KeyCode, PhysicalKey};

/// Supplies the raw device state once per frame
///
/// Polling must not block; it is a read of state the host already holds.
pub trait DeviceSource {
    /// Read the devices as they are right now
    fn poll(&mut self) -> RawDeviceSnapshot;

    /// Move the cursor to `position` (window pixels)
    fn set_mouse_position(&mut self, position: Vec2);
}

/// Device source fed by winit window events
///
/// Feed it every window event, then let the input manager poll it once per
/// frame. Cursor warps requested by a mouse lock are queued and must be
/// applied by the host with `Window::set_cursor_position`.
#[derive(Debug, Default)]
pub struct WinitDevice {
    held_keys: HashSet<KeyCode>,
    mouse_position: Vec2,
    gamepad: GamepadState,
    pending_warp: Option<Vec2>,
}

impl WinitDevice {
    pub fn new() -> Self {
        Self::default()
    }

    /// Process a window event, returning true if it touched input state
    pub fn process_window_event(&mut self, event: &WindowEvent) -> bool {
        match event {
            WindowEvent::KeyboardInput { event, .. } => {
                self.process_keyboard_event(event);
                true
            }
            WindowEvent::CursorMoved { position, .. } => {
                self.apply_cursor_moved(*position);
                true
            }
            WindowEvent::Focused(false) => {
                // Releases are not delivered while unfocused
                self.held_keys.clear();
                true
            }
            _ => false,
        }
    }

    /// Process a keyboard event from winit
    pub fn process_keyboard_event(&mut self, event: &KeyEvent) {
        // Only process physical key presses
        if let PhysicalKey::Code(key_code) = event.physical_key {
            self.apply_key(key_code, event.state, event.repeat);
        }
    }

    /// Record a key transition; OS repeats are dropped
    pub fn apply_key(&mut self, key: KeyCode, state: ElementState, repeat: bool) {
        if repeat {
            return;
        }
        match state {
            ElementState::Pressed => {
                self.held_keys.insert(key);
            }
            ElementState::Released => {
                self.held_keys.remove(&key);
            }
        }
    }

    pub fn apply_cursor_moved(&mut self, position: PhysicalPosition<f64>) {
        self.mouse_position = Vec2::new(position.x as f32, position.y as f32);
    }

    /// Replace the gamepad state, for hosts that poll a gamepad library
    pub fn set_gamepad(&mut self, gamepad: GamepadState) {
        self.gamepad = gamepad;
    }

    /// Cursor position requested by a mouse lock since the last call
    pub fn take_pending_warp(&mut self) -> Option<Vec2> {
        self.pending_warp.take()
    }
}

impl DeviceSource for WinitDevice {
    fn poll(&mut self) -> RawDeviceSnapshot {
        RawDeviceSnapshot {
            held_keys: self.held_keys.clone(),
            mouse_position: self.mouse_position,
            gamepad: self.gamepad.clone(),
        }
    }

    fn set_mouse_position(&mut self, position: Vec2) {
        self.mouse_position = position;
        self.pending_warp = Some(position);
    }
}

/// Device source driven directly by code
///
/// Used by tests and headless hosts to script input frame by frame.
#[derive(Debug, Default)]
pub struct ManualDevice {
    snapshot: RawDeviceSnapshot,
    warps: Vec<Vec2>,
}

impl ManualDevice {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn press(&mut self, key: KeyCode) {
        self.snapshot.held_keys.insert(key);
    }

    pub fn release(&mut self, key: KeyCode) {
        self.snapshot.held_keys.remove(&key);
    }

    pub fn release_all(&mut self) {
        self.snapshot.held_keys.clear();
        self.snapshot.gamepad.buttons.clear();
    }

    pub fn press_button(&mut self, button: GamepadButton) {
        self.snapshot.gamepad.connected = true;
        self.snapshot.gamepad.buttons.insert(button);
    }

    pub fn release_button(&mut self, button: GamepadButton) {
        self.snapshot.gamepad.buttons.remove(&button);
    }

    pub fn set_left_stick(&mut self, value: Vec2) {
        self.snapshot.gamepad.connected = true;
        self.snapshot.gamepad.left_stick = value;
    }

    pub fn set_right_stick(&mut self, value: Vec2) {
        self.snapshot.gamepad.connected = true;
        self.snapshot.gamepad.right_stick = value;
    }

    pub fn move_mouse_to(&mut self, position: Vec2) {
        self.snapshot.mouse_position = position;
    }

    pub fn move_mouse_by(&mut self, delta: Vec2) {
        self.snapshot.mouse_position += delta;
    }

    /// Every cursor warp requested so far, oldest first
    pub fn warps(&self) -> &[Vec2] {
        &self.warps
    }
}

impl DeviceSource for ManualDevice {
    fn poll(&mut self) -> RawDeviceSnapshot {
        self.snapshot.clone()
    }

    fn set_mouse_position(&mut self, position: Vec2) {
        trace!("Warping cursor to ({}, {})", position.x, position.y);
        self.snapshot.mouse_position = position;
        self.warps.push(position);
    }
}
