// Analog axis bindings

use super::state::GamepadState;
use glam::Vec2;

/// Analog source an axis reads from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum AxisType {
    #[default]
    None,
    MouseX,
    MouseY,
    LeftThumbStickX,
    LeftThumbStickY,
    RightThumbStickX,
    RightThumbStickY,
}

/// A named axis; rebinding replaces the source
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct InputAxis {
    axis_type: AxisType,
}

impl InputAxis {
    pub fn new(axis_type: AxisType) -> Self {
        Self { axis_type }
    }

    pub fn axis_type(&self) -> AxisType {
        self.axis_type
    }

    pub fn set_axis_type(&mut self, axis_type: AxisType) {
        self.axis_type = axis_type;
    }

    /// Current value of the axis
    ///
    /// Stick Y axes are flipped so that pushing a stick forward reads the
    /// same direction as moving the mouse up the screen.
    pub fn value(&self, mouse_delta: Vec2, gamepad: &GamepadState) -> f32 {
        match self.axis_type {
            AxisType::None => 0.0,
            AxisType::MouseX => mouse_delta.x,
            AxisType::MouseY => mouse_delta.y,
            AxisType::LeftThumbStickX => gamepad.left_stick.x,
            AxisType::LeftThumbStickY => -gamepad.left_stick.y,
            AxisType::RightThumbStickX => gamepad.right_stick.x,
            AxisType::RightThumbStickY => -gamepad.right_stick.y,
        }
    }
}
