// Input handling system
//
// This module turns raw per-frame device state into named actions and axes.
// Actions are bound to plain keys, modifier combos and gamepad buttons;
// axes read a mouse delta or stick component.
//
// ## Architecture
//
// - `repeat`: Key hold tracking and synthetic key repeat
// - `state`: Per-frame snapshot, key sets, mouse delta and mouse lock
// - `device`: Device sources feeding the snapshot (winit, scripted)
// - `action`: Action bindings and press/down resolution
// - `axis`: Analog axis bindings
// - `context`: Context stack scoping which actions are live
// - `symbol`: Printable symbols for pressed keys
// - `config`: Binding tables and repeat timing
// - `manager`: Main input manager coordinating everything
//
// ## Usage Example
//
// ```rust
// use mg_input::{InputManager, WinitDevice, AxisType};
// use winit::keyboard::KeyCode;
//
// let mut input = InputManager::new(WinitDevice::new());
// input.bind_key("Game.Jump", KeyCode::Space);
// input.bind_combo("Game.QuickSave", KeyCode::ControlLeft, KeyCode::KeyS);
// input.bind_axis("Game.LookX", AxisType::MouseX);
//
// // In your event loop, feed window events to the device
// input.source_mut().process_window_event(&event);
//
// // Once per frame, before any query
// input.update(elapsed_seconds);
//
// if input.is_action_pressed("Game.Jump") {
//     // Jump pressed this frame (or repeated)
// }
// let look_x = input.axis("Game.LookX");
// ```

pub mod action;
pub mod axis;
pub mod config;
pub mod context;
pub mod device;
pub mod manager;
pub mod repeat;
pub mod state;
pub mod symbol;

// Re-export commonly used types
pub use action::{BindingKind, InputAction, InputSource, KeyCombo};
pub use axis::{AxisType, InputAxis};
pub use config::InputConfig;
pub use context::InputContextStack;
pub use device::{DeviceSource, ManualDevice, WinitDevice};
pub use manager::InputManager;
pub use repeat::{KeyRepeatConfig, KeyRepeatTracker};
pub use state::{GamepadButton, GamepadState, InputState, RawDeviceSnapshot};
pub use symbol::InputSymbol;

/// Input system errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InputError {
    #[error("Input context popped with no context pushed")]
    ContextStackUnderflow,

    #[error("Invalid key repeat configuration: {0}")]
    InvalidRepeatConfig(String),
}
