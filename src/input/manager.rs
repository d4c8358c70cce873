// Input manager - Main coordination system for all input

use super::action::InputAction;
use super::axis::AxisType;
use super::config::InputConfig;
use super::context::InputContextStack;
use super::device::DeviceSource;
use super::repeat::KeyRepeatConfig;
use super::state::{GamepadButton, InputState};
use super::symbol::{default_symbol_table, InputSymbol};
use super::InputError;
use glam::Vec2;
use log::{debug, error};
use std::collections::{HashMap, HashSet};
use winit::keyboard::KeyCode;

/// Main input manager: owns the bindings, the device source and the
/// results of the last frame
///
/// Single-threaded by construction. Call [`InputManager::update`] exactly
/// once per frame, then query. Binding between frames is fine; binding
/// happens through `&mut self` so it cannot overlap an update.
pub struct InputManager<S: DeviceSource> {
    source: S,
    config: InputConfig,
    state: InputState,
    contexts: InputContextStack,
    symbols: HashMap<KeyCode, InputSymbol>,

    actions_pressed: HashSet<String>,
    actions_down: HashSet<String>,
    symbols_pressed: HashSet<InputSymbol>,
}

impl<S: DeviceSource> InputManager<S> {
    /// Create an input manager with the default bindings
    pub fn new(source: S) -> Self {
        Self::with_config(source, InputConfig::with_default_bindings())
    }

    pub fn with_config(source: S, config: InputConfig) -> Self {
        let state = InputState::new(config.repeat_config());
        Self {
            source,
            config,
            state,
            contexts: InputContextStack::new(),
            symbols: default_symbol_table(),
            actions_pressed: HashSet::new(),
            actions_down: HashSet::new(),
            symbols_pressed: HashSet::new(),
        }
    }

    /// Advance all input state by `elapsed` seconds
    /// Call this once per frame before querying anything
    pub fn update(&mut self, elapsed: f32) {
        self.actions_pressed.clear();
        self.actions_down.clear();
        self.symbols_pressed.clear();

        self.state.set_repeat_config(self.config.repeat_config());
        self.state.update(&mut self.source, elapsed);

        for (name, action) in self.config.actions() {
            if !self.contexts.allows(name) {
                continue;
            }
            if action.is_pressed(&self.state).is_some() {
                self.actions_pressed.insert(name.to_string());
            }
            if action.is_down(&self.state).is_some() {
                self.actions_down.insert(name.to_string());
            }
        }

        for key in self.state.pressed_keys() {
            if let Some(symbol) = self.symbols.get(key) {
                self.symbols_pressed.insert(symbol.clone());
            }
        }
    }

    /// Bindings of an action, if anything was ever bound to it
    pub fn action(&self, name: &str) -> Option<&InputAction> {
        self.config.action(name)
    }

    /// Current value of an axis, 0.0 if unbound
    pub fn axis(&self, name: &str) -> f32 {
        self.config.axis(name).map_or(0.0, |axis| {
            axis.value(self.state.mouse_delta(), self.state.gamepad())
        })
    }

    /// Check if an action was pressed (or repeated) this frame
    pub fn is_action_pressed(&self, name: &str) -> bool {
        self.actions_pressed.contains(name)
    }

    /// Check if an action is held this frame
    pub fn is_action_down(&self, name: &str) -> bool {
        self.actions_down.contains(name)
    }

    /// Check if the modifiers of one of an action's combos are all held
    pub fn are_modifiers_applied(&self, name: &str) -> bool {
        self.config
            .action(name)
            .is_some_and(|action| action.are_modifiers_applied(&self.state))
    }

    pub fn bind_key(&mut self, action_name: &str, key: KeyCode) {
        self.config.bind_key(action_name, key);
    }

    pub fn bind_combo(&mut self, action_name: &str, modifier: KeyCode, key: KeyCode) {
        self.config.bind_combo(action_name, modifier, key);
    }

    pub fn bind_combo2(
        &mut self,
        action_name: &str,
        modifier: KeyCode,
        second_modifier: KeyCode,
        key: KeyCode,
    ) {
        self.config
            .bind_combo2(action_name, modifier, second_modifier, key);
    }

    pub fn bind_button(&mut self, action_name: &str, button: GamepadButton) {
        self.config.bind_button(action_name, button);
    }

    pub fn bind_axis(&mut self, axis_name: &str, axis_type: AxisType) {
        self.config.bind_axis(axis_name, axis_type);
    }

    /// Restrict evaluation to actions named `"<context>.<leaf>"`
    pub fn push_input_context(&mut self, context: &str) {
        debug!("Pushed input context {}", context);
        self.contexts.push(context);
    }

    /// Pop the most recently pushed context
    ///
    /// Popping with nothing pushed is a push/pop pairing bug: it panics in
    /// debug builds and is logged and ignored in release builds.
    pub fn pop_input_context(&mut self) {
        if let Err(err) = self.try_pop_input_context() {
            debug_assert!(false, "{}", err);
            error!("{}", err);
        }
    }

    /// Pop the most recently pushed context, reporting underflow
    pub fn try_pop_input_context(&mut self) -> Result<String, InputError> {
        let context = self.contexts.pop()?;
        debug!("Popped input context {}", context);
        Ok(context)
    }

    pub fn current_input_context(&self) -> Option<&str> {
        self.contexts.top()
    }

    /// Actions pressed this frame
    pub fn actions_pressed(&self) -> &HashSet<String> {
        &self.actions_pressed
    }

    /// Actions held this frame
    pub fn actions_down(&self) -> &HashSet<String> {
        &self.actions_down
    }

    /// Symbols of keys pressed this frame
    pub fn symbols_pressed(&self) -> &HashSet<InputSymbol> {
        &self.symbols_pressed
    }

    pub fn symbol_mappings(&self) -> &HashMap<KeyCode, InputSymbol> {
        &self.symbols
    }

    /// Replace the key to symbol table, e.g. for a non-US layout
    pub fn set_symbol_mappings(&mut self, symbols: HashMap<KeyCode, InputSymbol>) {
        self.symbols = symbols;
    }

    /// Device state of the last frame
    pub fn input_state(&self) -> &InputState {
        &self.state
    }

    /// Keep the cursor at `position` from the next update on
    pub fn lock_mouse(&mut self, position: Vec2) {
        self.state.lock_mouse(position);
    }

    pub fn unlock_mouse(&mut self) {
        self.state.unlock_mouse();
    }

    pub fn is_mouse_locked(&self) -> bool {
        self.state.is_mouse_locked()
    }

    pub fn set_repeat_config(&mut self, repeat: KeyRepeatConfig) {
        self.config.set_repeat_config(repeat);
        self.state.set_repeat_config(repeat);
    }

    /// Forget held keys and this frame's results, e.g. after focus loss
    pub fn reset(&mut self) {
        self.state.clear();
        self.actions_pressed.clear();
        self.actions_down.clear();
        self.symbols_pressed.clear();
    }

    pub fn config(&self) -> &InputConfig {
        &self.config
    }

    pub fn config_mut(&mut self) -> &mut InputConfig {
        &mut self.config
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn source_mut(&mut self) -> &mut S {
        &mut self.source
    }
}

impl<S: DeviceSource + Default> Default for InputManager<S> {
    fn default() -> Self {
        Self::new(S::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::action::BindingKind;
    use crate::input::device::ManualDevice;
    use approx::assert_relative_eq;

    const FRAME: f32 = 1.0 / 60.0;

    fn manager() -> InputManager<ManualDevice> {
        InputManager::with_config(ManualDevice::new(), InputConfig::new())
    }

    #[test]
    fn test_manager_creation() {
        let manager = InputManager::new(ManualDevice::new());
        assert!(manager.action("ConsoleAction.Copy").is_some());
        assert!(manager.actions_pressed().is_empty());
        assert_eq!(manager.current_input_context(), None);
    }

    #[test]
    fn test_unbound_lookups() {
        let manager = manager();
        assert!(manager.action("Game.Nothing").is_none());
        assert_eq!(manager.axis("Game.Nothing"), 0.0);
        assert!(!manager.is_action_pressed("Game.Nothing"));
        assert!(!manager.are_modifiers_applied("Game.Nothing"));
    }

    #[test]
    fn test_unbound_axis_read_does_not_create_entry() {
        let manager = manager();
        manager.axis("Look.X");
        assert!(manager.config().axis("Look.X").is_none());
    }

    #[test]
    fn test_press_then_hold_then_release() {
        let mut manager = manager();
        manager.bind_key("Game.Jump", KeyCode::Space);

        manager.source_mut().press(KeyCode::Space);
        manager.update(FRAME);
        assert!(manager.is_action_pressed("Game.Jump"));
        assert!(manager.is_action_down("Game.Jump"));

        manager.update(FRAME);
        assert!(!manager.is_action_pressed("Game.Jump"));
        assert!(manager.is_action_down("Game.Jump"));

        manager.source_mut().release(KeyCode::Space);
        manager.update(FRAME);
        assert!(!manager.is_action_pressed("Game.Jump"));
        assert!(!manager.is_action_down("Game.Jump"));
    }

    #[test]
    fn test_held_action_repeats() {
        let mut manager = manager();
        manager.bind_key("Console.Delete", KeyCode::Backspace);
        manager.set_repeat_config(KeyRepeatConfig::new(0.5, 0.25).unwrap());

        manager.source_mut().press(KeyCode::Backspace);
        let mut presses = 0;
        for _ in 0..5 {
            manager.update(0.125);
            if manager.is_action_pressed("Console.Delete") {
                presses += 1;
            }
        }

        // First press on frame 1, first repeat on frame 5
        assert_eq!(presses, 2);
    }

    #[test]
    fn test_copy_combo_does_not_fire_bare_key() {
        let mut manager = manager();
        manager.bind_combo("Edit.Copy", KeyCode::ControlLeft, KeyCode::KeyC);
        manager.bind_key("Edit.Copy", KeyCode::KeyC);

        manager.source_mut().press(KeyCode::ControlLeft);
        manager.update(FRAME);
        manager.source_mut().press(KeyCode::KeyC);
        manager.update(FRAME);

        assert!(manager.is_action_pressed("Edit.Copy"));
        let action = manager.action("Edit.Copy").unwrap();
        assert_eq!(
            action.is_pressed(manager.input_state()),
            Some(BindingKind::Combo)
        );
    }

    #[test]
    fn test_rebinding_same_combo_is_idempotent() {
        let mut manager = manager();
        manager.bind_combo2("Edit.Redo", KeyCode::ControlLeft, KeyCode::ShiftLeft, KeyCode::KeyZ);
        manager.bind_combo2("Edit.Redo", KeyCode::ControlLeft, KeyCode::ShiftLeft, KeyCode::KeyZ);
        assert_eq!(manager.action("Edit.Redo").unwrap().combos().len(), 1);

        manager.source_mut().press(KeyCode::ControlLeft);
        manager.source_mut().press(KeyCode::ShiftLeft);
        manager.update(FRAME);
        manager.source_mut().press(KeyCode::KeyZ);
        manager.update(FRAME);
        assert!(manager.is_action_pressed("Edit.Redo"));
    }

    #[test]
    fn test_context_filters_actions() {
        let mut manager = manager();
        manager.bind_key("A.Jump", KeyCode::Space);
        manager.bind_key("B.Fire", KeyCode::KeyF);

        manager.push_input_context("A");
        manager.source_mut().press(KeyCode::Space);
        manager.source_mut().press(KeyCode::KeyF);
        manager.update(FRAME);

        assert!(manager.is_action_pressed("A.Jump"));
        assert!(manager.is_action_down("A.Jump"));
        assert!(!manager.is_action_pressed("B.Fire"));
        assert!(!manager.is_action_down("B.Fire"));

        manager.pop_input_context();
        manager.update(FRAME);
        assert!(manager.is_action_down("A.Jump"));
        assert!(manager.is_action_down("B.Fire"));
    }

    #[test]
    fn test_nested_contexts_use_top() {
        let mut manager = manager();
        manager.bind_key("A.Jump", KeyCode::Space);
        manager.bind_key("B.Jump", KeyCode::Space);

        manager.push_input_context("A");
        manager.push_input_context("B");
        manager.source_mut().press(KeyCode::Space);
        manager.update(FRAME);
        assert!(!manager.is_action_down("A.Jump"));
        assert!(manager.is_action_down("B.Jump"));

        manager.pop_input_context();
        manager.update(FRAME);
        assert!(manager.is_action_down("A.Jump"));
        assert!(!manager.is_action_down("B.Jump"));
    }

    #[test]
    fn test_try_pop_empty_context() {
        let mut manager = manager();
        assert_eq!(
            manager.try_pop_input_context(),
            Err(InputError::ContextStackUnderflow)
        );
    }

    #[cfg(debug_assertions)]
    #[test]
    #[should_panic(expected = "Input context popped with no context pushed")]
    fn test_pop_empty_context_panics_in_debug() {
        let mut manager = manager();
        manager.pop_input_context();
    }

    #[test]
    fn test_symbols_pressed() {
        let mut manager = manager();
        manager.source_mut().press(KeyCode::KeyH);
        manager.source_mut().press(KeyCode::Enter);
        manager.update(FRAME);

        assert_eq!(manager.symbols_pressed().len(), 1);
        assert!(manager
            .symbols_pressed()
            .contains(&InputSymbol::new("h", "H")));

        manager.update(FRAME);
        assert!(manager.symbols_pressed().is_empty());
    }

    #[test]
    fn test_custom_symbol_mappings() {
        let mut manager = manager();
        let mut symbols = HashMap::new();
        symbols.insert(KeyCode::KeyZ, InputSymbol::new("y", "Y"));
        manager.set_symbol_mappings(symbols);

        manager.source_mut().press(KeyCode::KeyZ);
        manager.update(FRAME);
        assert!(manager
            .symbols_pressed()
            .contains(&InputSymbol::new("y", "Y")));
    }

    #[test]
    fn test_mouse_axis() {
        let mut manager = manager();
        manager.bind_axis("x", AxisType::MouseX);
        manager.update(FRAME);

        manager.source_mut().move_mouse_by(Vec2::new(3.5, -1.0));
        manager.update(FRAME);
        assert_relative_eq!(manager.axis("x"), 3.5);
    }

    #[test]
    fn test_stick_axis_inverted() {
        let mut manager = manager();
        manager.bind_axis("Move.Forward", AxisType::LeftThumbStickY);
        manager.source_mut().set_left_stick(Vec2::new(0.0, 0.8));
        manager.update(FRAME);

        assert_relative_eq!(manager.axis("Move.Forward"), -0.8);
    }

    #[test]
    fn test_mouse_lock() {
        let mut manager = manager();
        manager.bind_axis("Look.X", AxisType::MouseX);
        manager.source_mut().move_mouse_to(Vec2::new(100.0, 100.0));
        manager.update(FRAME);

        manager.lock_mouse(Vec2::new(100.0, 100.0));
        assert!(manager.is_mouse_locked());
        manager.source_mut().move_mouse_by(Vec2::new(12.0, 7.0));
        manager.update(FRAME);

        assert_eq!(
            manager.input_state().mouse_position(),
            Vec2::new(100.0, 100.0)
        );
        assert_relative_eq!(manager.axis("Look.X"), 12.0);
        assert_eq!(manager.source().warps(), &[Vec2::new(100.0, 100.0)]);

        manager.unlock_mouse();
        assert!(!manager.is_mouse_locked());
    }

    #[test]
    fn test_gamepad_button_action() {
        let mut manager = manager();
        manager.bind_button("Game.Jump", GamepadButton::A);

        manager.source_mut().press_button(GamepadButton::A);
        manager.update(FRAME);
        assert!(!manager.is_action_pressed("Game.Jump"));
        assert!(manager.is_action_down("Game.Jump"));
        assert!(manager.actions_pressed().is_empty());

        let action = manager.action("Game.Jump").unwrap();
        assert_eq!(action.is_pressed(manager.input_state()), None);
        assert_eq!(
            action.is_down(manager.input_state()),
            Some(BindingKind::Button)
        );
    }

    #[test]
    fn test_repeat_config_only_accepts_validated_timings() {
        let mut manager = manager();
        manager.bind_key("Game.Jump", KeyCode::Space);

        assert_eq!(
            KeyRepeatConfig::new(0.4, -1.0),
            Err(InputError::InvalidRepeatConfig(
                "cooldown must be a positive number of seconds, got -1".to_string()
            ))
        );

        manager.source_mut().press(KeyCode::Space);
        let mut presses = 0;
        for _ in 0..120 {
            manager.update(FRAME);
            if manager.is_action_pressed("Game.Jump") {
                presses += 1;
            }
        }

        // Default timings: the first repeat comes after 0.4s, then one per
        // cooldown. A runaway cooldown would repeat every frame past the delay.
        assert_eq!(manager.config().repeat_config(), KeyRepeatConfig::default());
        assert!(presses > 1 && presses < 60, "got {} presses", presses);
    }

    #[test]
    fn test_modifiers_applied_query() {
        let mut manager = manager();
        manager.bind_combo("Edit.Paste", KeyCode::ControlLeft, KeyCode::KeyV);

        manager.source_mut().press(KeyCode::ControlLeft);
        manager.update(FRAME);
        assert!(manager.are_modifiers_applied("Edit.Paste"));
        assert!(!manager.is_action_down("Edit.Paste"));
    }

    #[test]
    fn test_frame_results_do_not_accumulate() {
        let mut manager = manager();
        manager.bind_key("Game.Jump", KeyCode::Space);
        manager.bind_key("Game.Duck", KeyCode::KeyS);

        manager.source_mut().press(KeyCode::Space);
        manager.update(FRAME);
        manager.source_mut().release(KeyCode::Space);
        manager.source_mut().press(KeyCode::KeyS);
        manager.update(FRAME);

        assert_eq!(manager.actions_down().len(), 1);
        assert!(manager.actions_down().contains("Game.Duck"));
    }

    #[test]
    fn test_reset_releases_everything() {
        let mut manager = manager();
        manager.bind_key("Game.Jump", KeyCode::Space);
        manager.source_mut().press(KeyCode::Space);
        manager.update(FRAME);

        manager.reset();
        assert!(manager.actions_down().is_empty());
        assert!(!manager.input_state().is_key_down(KeyCode::Space));

        // Still held on the device, so it presses again
        manager.update(FRAME);
        assert!(manager.is_action_pressed("Game.Jump"));
    }

    #[test]
    fn test_default_console_bindings_resolve() {
        let mut manager = InputManager::new(ManualDevice::new());
        manager.push_input_context("ConsoleAction");

        manager.source_mut().press(KeyCode::ControlRight);
        manager.update(FRAME);
        manager.source_mut().press(KeyCode::ArrowLeft);
        manager.update(FRAME);

        assert!(manager.is_action_pressed("ConsoleAction.MoveLeftWord"));
        // Control only blocks plain keys on actions that bind it as a modifier
        assert!(manager.is_action_pressed("ConsoleAction.MoveLeft"));
    }
}
