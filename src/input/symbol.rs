// Printable symbols produced by key presses

use std::collections::HashMap;
use winit::keyboard::KeyCode;

/// Lowercase/uppercase glyph pair for a key
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct InputSymbol {
    pub lowercase: String,
    pub uppercase: Option<String>,
}

impl InputSymbol {
    /// Symbol with distinct unshifted and shifted glyphs
    pub fn new(lowercase: &str, uppercase: &str) -> Self {
        Self {
            lowercase: lowercase.to_string(),
            uppercase: Some(uppercase.to_string()),
        }
    }

    /// Symbol that has no shifted form
    pub fn single(glyph: &str) -> Self {
        Self {
            lowercase: glyph.to_string(),
            uppercase: None,
        }
    }

    /// Glyph to insert; falls back to the lowercase glyph when unshiftable
    pub fn glyph(&self, shifted: bool) -> &str {
        match (&self.uppercase, shifted) {
            (Some(upper), true) => upper,
            _ => &self.lowercase,
        }
    }
}

/// US layout symbol table
pub fn default_symbol_table() -> HashMap<KeyCode, InputSymbol> {
    use KeyCode::*;

    let pairs = [
        // Digits
        (Digit1, "1", "!"),
        (Digit2, "2", "@"),
        (Digit3, "3", "#"),
        (Digit4, "4", "$"),
        (Digit5, "5", "%"),
        (Digit6, "6", "^"),
        (Digit7, "7", "&"),
        (Digit8, "8", "*"),
        (Digit9, "9", "("),
        (Digit0, "0", ")"),
        // Letters
        (KeyQ, "q", "Q"),
        (KeyW, "w", "W"),
        (KeyE, "e", "E"),
        (KeyR, "r", "R"),
        (KeyT, "t", "T"),
        (KeyY, "y", "Y"),
        (KeyU, "u", "U"),
        (KeyI, "i", "I"),
        (KeyO, "o", "O"),
        (KeyP, "p", "P"),
        (BracketLeft, "[", "{"),
        (BracketRight, "]", "}"),
        (KeyA, "a", "A"),
        (KeyS, "s", "S"),
        (KeyD, "d", "D"),
        (KeyF, "f", "F"),
        (KeyG, "g", "G"),
        (KeyH, "h", "H"),
        (KeyJ, "j", "J"),
        (KeyK, "k", "K"),
        (KeyL, "l", "L"),
        (Semicolon, ";", ":"),
        (Quote, "'", "\""),
        (Backslash, "\\", "|"),
        (IntlBackslash, "\\", "|"),
        (KeyZ, "z", "Z"),
        (KeyX, "x", "X"),
        (KeyC, "c", "C"),
        (KeyV, "v", "V"),
        (KeyB, "b", "B"),
        (KeyN, "n", "N"),
        (KeyM, "m", "M"),
        (Comma, ",", "<"),
        (Period, ".", ">"),
        (Slash, "/", "?"),
        // Special
        (Space, " ", " "),
        (Minus, "-", "_"),
        (Equal, "=", "+"),
    ];

    let singles = [
        (Numpad1, "1"),
        (Numpad2, "2"),
        (Numpad3, "3"),
        (Numpad4, "4"),
        (Numpad5, "5"),
        (Numpad6, "6"),
        (Numpad7, "7"),
        (Numpad8, "8"),
        (Numpad9, "9"),
        (Numpad0, "0"),
        (NumpadDecimal, "."),
        (NumpadAdd, "+"),
        (NumpadSubtract, "-"),
        (NumpadMultiply, "*"),
        (NumpadDivide, "/"),
    ];

    pairs
        .into_iter()
        .map(|(key, lower, upper)| (key, InputSymbol::new(lower, upper)))
        .chain(
            singles
                .into_iter()
                .map(|(key, glyph)| (key, InputSymbol::single(glyph))),
        )
        .collect()
}
