// Frame-based input layer: named actions and axes over keyboard, mouse and gamepad

pub mod input;

pub use input::{
    AxisType, BindingKind, DeviceSource, GamepadButton, GamepadState, InputAction, InputConfig,
    InputContextStack, InputError, InputManager, InputSource, InputState, InputSymbol, KeyCombo,
    KeyRepeatConfig, ManualDevice, RawDeviceSnapshot, WinitDevice,
};
