// Binding tables and repeat timing

use super::action::{default_bindings, InputAction, InputSource, KeyCombo};
use super::axis::{AxisType, InputAxis};
use super::repeat::KeyRepeatConfig;
use super::state::GamepadButton;
use log::{debug, trace};
use std::collections::HashMap;
use winit::keyboard::KeyCode;

/// Action and axis tables plus key repeat timing
///
/// Actions are created on first bind and are never removed; later binds
/// only add to them. Axes hold a single source, so rebinding an axis
/// overwrites it.
#[derive(Debug, Clone, Default)]
pub struct InputConfig {
    /// Mapping from action names to their bindings
    actions: HashMap<String, InputAction>,

    /// Mapping from axis names to their source
    axes: HashMap<String, InputAxis>,

    repeat: KeyRepeatConfig,
}

impl InputConfig {
    /// Create an empty configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a configuration holding the default console and view bindings
    pub fn with_default_bindings() -> Self {
        Self::from_bindings(default_bindings())
    }

    /// Create a configuration from a list of bindings
    pub fn from_bindings<'a, I>(bindings: I) -> Self
    where
        I: IntoIterator<Item = (&'a str, InputSource)>,
    {
        let mut config = Self::new();
        for (name, source) in bindings {
            config.bind(name, source);
        }
        config
    }

    /// Bind an input source to an action, creating the action if needed
    pub fn bind(&mut self, action_name: &str, source: InputSource) {
        let added = self.action_entry(action_name).bind(source);
        if added {
            debug!("Bound {:?} to {}", source, action_name);
        } else {
            trace!("{:?} already bound to {}", source, action_name);
        }
    }

    pub fn bind_key(&mut self, action_name: &str, key: KeyCode) {
        self.bind(action_name, InputSource::Key(key));
    }

    pub fn bind_combo(&mut self, action_name: &str, modifier: KeyCode, key: KeyCode) {
        self.bind(action_name, InputSource::Combo(KeyCombo::new(modifier, key)));
    }

    pub fn bind_combo2(
        &mut self,
        action_name: &str,
        modifier: KeyCode,
        second_modifier: KeyCode,
        key: KeyCode,
    ) {
        self.bind(
            action_name,
            InputSource::Combo(KeyCombo::with_two_modifiers(modifier, second_modifier, key)),
        );
    }

    pub fn bind_button(&mut self, action_name: &str, button: GamepadButton) {
        self.bind(action_name, InputSource::Button(button));
    }

    /// Point an axis at a source, replacing any previous one
    pub fn bind_axis(&mut self, axis_name: &str, axis_type: AxisType) {
        debug!("Bound {:?} to axis {}", axis_type, axis_name);
        self.axes
            .entry(axis_name.to_string())
            .or_default()
            .set_axis_type(axis_type);
    }

    pub fn action(&self, action_name: &str) -> Option<&InputAction> {
        self.actions.get(action_name)
    }

    pub fn axis(&self, axis_name: &str) -> Option<&InputAxis> {
        self.axes.get(axis_name)
    }

    pub fn has_action(&self, action_name: &str) -> bool {
        self.actions.contains_key(action_name)
    }

    /// Iterate over every action and its bindings
    pub fn actions(&self) -> impl Iterator<Item = (&str, &InputAction)> {
        self.actions
            .iter()
            .map(|(name, action)| (name.as_str(), action))
    }

    pub fn action_names(&self) -> impl Iterator<Item = &str> {
        self.actions.keys().map(String::as_str)
    }

    pub fn repeat_config(&self) -> KeyRepeatConfig {
        self.repeat
    }

    pub fn set_repeat_config(&mut self, repeat: KeyRepeatConfig) {
        self.repeat = repeat;
    }

    fn action_entry(&mut self, action_name: &str) -> &mut InputAction {
        self.actions.entry(action_name.to_string()).or_default()
    }
}
