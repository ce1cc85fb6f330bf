// src/keys.rs

//! Key and mouse button identifiers.
//!
//! Input state is indexed by 8-bit virtual key codes: letters and digits use
//! their uppercase ASCII value, space is `0x20`, and the named keys below use
//! the conventional desktop virtual-key numbering. [`KeySymbol`] gives those
//! codes readable names; anything that takes a key accepts either a symbol
//! or a raw `u8`.

use serde::{Deserialize, Serialize};

/// A raw 8-bit virtual key code.
pub type KeyCode = u8;

/// Number of distinct key codes tracked by the input state.
pub const KEY_COUNT: usize = 256;

/// Number of mouse button slots tracked by the input state.
pub const MOUSE_BUTTON_COUNT: usize = 16;

/// A named key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum KeySymbol {
    /// A printable key, identified by its character. Letters map to the same
    /// code regardless of case.
    Char(u8),

    F1,
    F2,
    F3,
    F4,
    F5,
    F6,
    F7,
    F8,
    F9,
    F10,
    F11,
    F12,

    Shift,
    Control,
    Alt,
    CapsLock,

    Left,
    Right,
    Up,
    Down,
    PageUp,
    PageDown,
    Home,
    End,
    Insert,
    Delete,

    Enter,
    Backspace,
    Tab,
    Escape,

    #[default]
    Unknown,
}

impl KeySymbol {
    /// The virtual key code for this symbol. `Unknown` maps to 0.
    pub fn code(self) -> KeyCode {
        match self {
            KeySymbol::Char(c) => c.to_ascii_uppercase(),
            KeySymbol::F1 => 0x70,
            KeySymbol::F2 => 0x71,
            KeySymbol::F3 => 0x72,
            KeySymbol::F4 => 0x73,
            KeySymbol::F5 => 0x74,
            KeySymbol::F6 => 0x75,
            KeySymbol::F7 => 0x76,
            KeySymbol::F8 => 0x77,
            KeySymbol::F9 => 0x78,
            KeySymbol::F10 => 0x79,
            KeySymbol::F11 => 0x7a,
            KeySymbol::F12 => 0x7b,
            KeySymbol::Shift => 0x10,
            KeySymbol::Control => 0x11,
            KeySymbol::Alt => 0x12,
            KeySymbol::CapsLock => 0x14,
            KeySymbol::PageUp => 0x21,
            KeySymbol::PageDown => 0x22,
            KeySymbol::End => 0x23,
            KeySymbol::Home => 0x24,
            KeySymbol::Left => 0x25,
            KeySymbol::Up => 0x26,
            KeySymbol::Right => 0x27,
            KeySymbol::Down => 0x28,
            KeySymbol::Insert => 0x2d,
            KeySymbol::Delete => 0x2e,
            KeySymbol::Enter => 0x0d,
            KeySymbol::Backspace => 0x08,
            KeySymbol::Tab => 0x09,
            KeySymbol::Escape => 0x1b,
            KeySymbol::Unknown => 0,
        }
    }

    /// Names a raw code. Printable codes come back as `Char` with the
    /// uppercase character.
    pub fn from_code(code: KeyCode) -> KeySymbol {
        match code {
            0x20 | b'0'..=b'9' | b'A'..=b'Z' => KeySymbol::Char(code),
            0x70..=0x7b => NAMED_FUNCTION_KEYS[(code - 0x70) as usize],
            0x10 => KeySymbol::Shift,
            0x11 => KeySymbol::Control,
            0x12 => KeySymbol::Alt,
            0x14 => KeySymbol::CapsLock,
            0x21 => KeySymbol::PageUp,
            0x22 => KeySymbol::PageDown,
            0x23 => KeySymbol::End,
            0x24 => KeySymbol::Home,
            0x25 => KeySymbol::Left,
            0x26 => KeySymbol::Up,
            0x27 => KeySymbol::Right,
            0x28 => KeySymbol::Down,
            0x2d => KeySymbol::Insert,
            0x2e => KeySymbol::Delete,
            0x0d => KeySymbol::Enter,
            0x08 => KeySymbol::Backspace,
            0x09 => KeySymbol::Tab,
            0x1b => KeySymbol::Escape,
            _ => KeySymbol::Unknown,
        }
    }

    /// Returns true if the key symbol represents a modifier key.
    pub fn is_modifier(&self) -> bool {
        matches!(
            self,
            KeySymbol::Shift | KeySymbol::Control | KeySymbol::Alt | KeySymbol::CapsLock
        )
    }
}

const NAMED_FUNCTION_KEYS: [KeySymbol; 12] = [
    KeySymbol::F1,
    KeySymbol::F2,
    KeySymbol::F3,
    KeySymbol::F4,
    KeySymbol::F5,
    KeySymbol::F6,
    KeySymbol::F7,
    KeySymbol::F8,
    KeySymbol::F9,
    KeySymbol::F10,
    KeySymbol::F11,
    KeySymbol::F12,
];

impl From<KeySymbol> for KeyCode {
    fn from(sym: KeySymbol) -> Self {
        sym.code()
    }
}

/// A mouse button. The discriminant is the button's slot in the input state;
/// slot 0 is never used by the platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum MouseButton {
    Left = 1,
    Right = 2,
    Middle = 3,
}

impl From<MouseButton> for u8 {
    fn from(button: MouseButton) -> Self {
        button as u8
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn letters_are_case_insensitive() {
        assert_eq!(KeySymbol::Char(b'a').code(), b'A');
        assert_eq!(KeySymbol::Char(b'A').code(), b'A');
        assert_eq!(KeySymbol::Char(b' ').code(), 0x20);
    }

    #[test]
    fn named_codes_round_trip() {
        for sym in [
            KeySymbol::F1,
            KeySymbol::F12,
            KeySymbol::Escape,
            KeySymbol::Left,
            KeySymbol::Down,
            KeySymbol::Shift,
            KeySymbol::Char(b'Q'),
            KeySymbol::Char(b'7'),
        ] {
            assert_eq!(KeySymbol::from_code(sym.code()), sym);
        }
        assert_eq!(KeySymbol::from_code(0xff), KeySymbol::Unknown);
    }

    #[test]
    fn modifiers() {
        assert!(KeySymbol::Shift.is_modifier());
        assert!(!KeySymbol::Char(b'x').is_modifier());
    }

    #[test]
    fn mouse_button_slots() {
        assert_eq!(u8::from(MouseButton::Left), 1);
        assert_eq!(u8::from(MouseButton::Right), 2);
        assert_eq!(u8::from(MouseButton::Middle), 3);
    }
}
