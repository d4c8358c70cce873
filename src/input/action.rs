// Action bindings and their per-frame resolution

use super::state::{GamepadButton, InputState};
use std::collections::HashSet;
use winit::keyboard::KeyCode;

/// Which kind of binding made an action fire
///
/// Combos win over plain keys, plain keys win over buttons.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BindingKind {
    Combo,
    Key,
    Button,
}

/// One or two modifier keys held plus a trigger key
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KeyCombo {
    pub modifier: Option<KeyCode>,
    pub second_modifier: Option<KeyCode>,
    pub key: KeyCode,
}

impl KeyCombo {
    pub fn new(modifier: KeyCode, key: KeyCode) -> Self {
        Self {
            modifier: Some(modifier),
            second_modifier: None,
            key,
        }
    }

    pub fn with_two_modifiers(modifier: KeyCode, second_modifier: KeyCode, key: KeyCode) -> Self {
        Self {
            modifier: Some(modifier),
            second_modifier: Some(second_modifier),
            key,
        }
    }

    /// The modifiers that are set
    pub fn modifiers(&self) -> impl Iterator<Item = KeyCode> {
        self.modifier.into_iter().chain(self.second_modifier)
    }

    /// Number of modifiers that are set (0-2)
    pub fn modifier_count(&self) -> usize {
        self.modifiers().count()
    }

    fn modifiers_down(&self, state: &InputState) -> bool {
        self.modifiers().all(|modifier| state.is_key_down(modifier))
    }
}

/// Any physical input that can be bound to an action
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InputSource {
    Key(KeyCode),
    Combo(KeyCombo),
    Button(GamepadButton),
}

impl InputSource {
    /// Create a plain key input source
    pub fn key(code: KeyCode) -> Self {
        Self::Key(code)
    }

    /// Create a modifier + key input source
    pub fn combo(modifier: KeyCode, key: KeyCode) -> Self {
        Self::Combo(KeyCombo::new(modifier, key))
    }

    /// Create a two modifier + key input source
    pub fn combo2(modifier: KeyCode, second_modifier: KeyCode, key: KeyCode) -> Self {
        Self::Combo(KeyCombo::with_two_modifiers(modifier, second_modifier, key))
    }

    /// Create a gamepad button input source
    pub fn button(button: GamepadButton) -> Self {
        Self::Button(button)
    }
}

/// A named action's set of bindings
///
/// Bindings only accumulate; binding the same input twice is a no-op.
#[derive(Debug, Clone, Default)]
pub struct InputAction {
    keys: Vec<KeyCode>,
    combos: Vec<KeyCombo>,
    buttons: Vec<GamepadButton>,

    /// Union of every combo's modifiers, blocks plain keys while held
    modifiers: HashSet<KeyCode>,
}

impl InputAction {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a binding, returning false if it was already bound
    pub fn bind(&mut self, source: InputSource) -> bool {
        match source {
            InputSource::Key(key) => self.bind_key(key),
            InputSource::Combo(combo) => self.bind_combo(combo),
            InputSource::Button(button) => self.bind_button(button),
        }
    }

    pub fn bind_key(&mut self, key: KeyCode) -> bool {
        if self.keys.contains(&key) {
            return false;
        }
        self.keys.push(key);
        true
    }

    pub fn bind_combo(&mut self, combo: KeyCombo) -> bool {
        if self.combos.contains(&combo) {
            return false;
        }
        self.modifiers.extend(combo.modifiers());
        self.combos.push(combo);
        true
    }

    pub fn bind_button(&mut self, button: GamepadButton) -> bool {
        if self.buttons.contains(&button) {
            return false;
        }
        self.buttons.push(button);
        true
    }

    /// Whether the action fired this frame, and through which binding
    ///
    /// Gamepad buttons only report as held, never as pressed.
    ///
    /// A plain key only counts while none of this action's combo modifiers
    /// are down, so `Ctrl+C` never also fires a bare `C` on the same action.
    pub fn is_pressed(&self, state: &InputState) -> Option<BindingKind> {
        if self
            .combos
            .iter()
            .any(|combo| state.is_key_pressed(combo.key) && combo.modifiers_down(state))
        {
            return Some(BindingKind::Combo);
        }

        if self.keys.iter().any(|&key| state.is_key_pressed(key)) && !self.is_modifier_down(state)
        {
            return Some(BindingKind::Key);
        }

        None
    }

    /// Whether the action is held this frame, and through which binding
    pub fn is_down(&self, state: &InputState) -> Option<BindingKind> {
        if self
            .combos
            .iter()
            .any(|combo| state.is_key_down(combo.key) && combo.modifiers_down(state))
        {
            return Some(BindingKind::Combo);
        }

        if self.keys.iter().any(|&key| state.is_key_down(key)) && !self.is_modifier_down(state) {
            return Some(BindingKind::Key);
        }

        if self
            .buttons
            .iter()
            .any(|&button| state.is_button_down(button))
        {
            return Some(BindingKind::Button);
        }

        None
    }

    /// True if every modifier of at least one combo is down, whether or not
    /// its trigger key is
    pub fn are_modifiers_applied(&self, state: &InputState) -> bool {
        self.combos.iter().any(|combo| combo.modifiers_down(state))
    }

    fn is_modifier_down(&self, state: &InputState) -> bool {
        self.modifiers.iter().any(|&key| state.is_key_down(key))
    }

    pub fn keys(&self) -> &[KeyCode] {
        &self.keys
    }

    pub fn combos(&self) -> &[KeyCombo] {
        &self.combos
    }

    pub fn buttons(&self) -> &[GamepadButton] {
        &self.buttons
    }

    /// Every key used as a modifier by this action's combos
    pub fn bound_modifiers(&self) -> &HashSet<KeyCode> {
        &self.modifiers
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty() && self.combos.is_empty() && self.buttons.is_empty()
    }
}

/// Default bindings for the in-game console and map view
pub fn default_bindings() -> Vec<(&'static str, InputSource)> {
    use KeyCode::*;

    vec![
        // Console editing
        ("ConsoleAction.ExecuteCommand", InputSource::key(Enter)),
        ("ConsoleAction.MoveLeft", InputSource::key(ArrowLeft)),
        ("ConsoleAction.MoveRight", InputSource::key(ArrowRight)),
        ("ConsoleAction.MoveLeftWord", InputSource::combo(ControlLeft, ArrowLeft)),
        ("ConsoleAction.MoveLeftWord", InputSource::combo(ControlRight, ArrowLeft)),
        ("ConsoleAction.MoveRightWord", InputSource::combo(ControlLeft, ArrowRight)),
        ("ConsoleAction.MoveRightWord", InputSource::combo(ControlRight, ArrowRight)),
        ("ConsoleAction.MoveToBeginning", InputSource::key(Home)),
        ("ConsoleAction.MoveToEnd", InputSource::key(End)),
        ("ConsoleAction.DeletePreviousChar", InputSource::key(Backspace)),
        ("ConsoleAction.DeleteCurrentChar", InputSource::key(Delete)),
        ("ConsoleAction.UppercaseModifier", InputSource::key(ShiftLeft)),
        ("ConsoleAction.UppercaseModifier", InputSource::key(ShiftRight)),
        ("ConsoleAction.PreviousCommandInHistory", InputSource::key(ArrowUp)),
        ("ConsoleAction.NextCommandInHistory", InputSource::key(ArrowDown)),
        ("ConsoleAction.Cut", InputSource::combo(ControlLeft, KeyX)),
        ("ConsoleAction.Cut", InputSource::combo(ControlRight, KeyX)),
        ("ConsoleAction.Copy", InputSource::combo(ControlLeft, KeyC)),
        ("ConsoleAction.Copy", InputSource::combo(ControlRight, KeyC)),
        ("ConsoleAction.Paste", InputSource::combo(ControlLeft, KeyV)),
        ("ConsoleAction.Paste", InputSource::combo(ControlRight, KeyV)),
        ("ConsoleAction.NewLine", InputSource::combo(ShiftLeft, Enter)),
        ("ConsoleAction.NewLine", InputSource::combo(ShiftRight, Enter)),
        // Autocomplete
        ("ConsoleAction.AutocompleteForward", InputSource::combo(ControlLeft, Space)),
        ("ConsoleAction.AutocompleteForward", InputSource::combo(ControlRight, Space)),
        ("ConsoleAction.AutocompleteBackward", InputSource::combo2(ControlLeft, ShiftLeft, Space)),
        ("ConsoleAction.AutocompleteBackward", InputSource::combo2(ControlLeft, ShiftRight, Space)),
        ("ConsoleAction.AutocompleteBackward", InputSource::combo2(ControlRight, ShiftLeft, Space)),
        ("ConsoleAction.AutocompleteBackward", InputSource::combo2(ControlRight, ShiftRight, Space)),
        ("ConsoleAction.Tab", InputSource::key(Tab)),
        ("ConsoleAction.RemoveTab", InputSource::combo(ShiftLeft, Tab)),
        ("ConsoleAction.RemoveTab", InputSource::combo(ShiftRight, Tab)),
        ("ConsoleAction.SelectionModifier", InputSource::key(ShiftLeft)),
        ("ConsoleAction.SelectionModifier", InputSource::key(ShiftRight)),
        // Map view
        ("ViewAction.ViewMap", InputSource::key(F10)),
        ("ViewAction.ViewHeatMap0", InputSource::key(F5)),
        ("ViewAction.ViewHeatMap1", InputSource::key(F6)),
        ("ViewAction.ViewHeatMap3", InputSource::key(F7)),
        ("ViewAction.ViewHeatMap4", InputSource::key(F8)),
        ("ViewAction.ViewHeatMap5", InputSource::key(F9)),
        ("ViewAction.ScrollUp", InputSource::key(KeyW)),
        ("ViewAction.ScrollDown", InputSource::key(KeyS)),
        ("ViewAction.ScrollLeft", InputSource::key(KeyA)),
        ("ViewAction.ScrollRight", InputSource::key(KeyD)),
    ]
}
