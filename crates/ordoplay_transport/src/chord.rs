// SPDX-License-Identifier: MIT OR Apache-2.0
//! Key chords: a key plus held modifiers, parsed from strings like
//! `"shift+option+right"`.

use std::fmt;

/// Modifier keys held with a chord
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Modifiers {
    /// Control key (Cmd on macOS)
    pub ctrl: bool,
    /// Shift key
    pub shift: bool,
    /// Alt key (Option on macOS)
    pub alt: bool,
}

impl Modifiers {
    /// No modifiers
    pub const NONE: Self = Self { ctrl: false, shift: false, alt: false };
    /// Shift only
    pub const SHIFT: Self = Self { ctrl: false, shift: true, alt: false };
    /// Alt only
    pub const ALT: Self = Self { ctrl: false, shift: false, alt: true };
    /// Shift + Alt
    pub const SHIFT_ALT: Self = Self { ctrl: false, shift: true, alt: true };
    /// Control + Alt
    pub const CTRL_ALT: Self = Self { ctrl: true, shift: false, alt: true };

    /// Create from egui modifiers
    pub fn from_egui(mods: &egui::Modifiers) -> Self {
        Self {
            ctrl: mods.ctrl || mods.command,
            shift: mods.shift,
            alt: mods.alt,
        }
    }
}

impl fmt::Display for Modifiers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut parts = Vec::new();
        if self.ctrl {
            parts.push("Ctrl");
        }
        if self.shift {
            parts.push("Shift");
        }
        if self.alt {
            parts.push("Alt");
        }
        write!(f, "{}", parts.join("+"))
    }
}

/// A key pressed together with modifiers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KeyChord {
    /// The main key
    pub key: egui::Key,
    /// Modifier keys
    pub modifiers: Modifiers,
}

impl KeyChord {
    /// Chord without modifiers
    pub const fn new(key: egui::Key) -> Self {
        Self {
            key,
            modifiers: Modifiers::NONE,
        }
    }

    /// Chord with custom modifiers
    pub const fn with_modifiers(key: egui::Key, modifiers: Modifiers) -> Self {
        Self { key, modifiers }
    }

    /// Chord from an egui key event
    pub fn from_egui(key: egui::Key, mods: &egui::Modifiers) -> Self {
        Self {
            key,
            modifiers: Modifiers::from_egui(mods),
        }
    }

    /// Parse a chord such as `"space"`, `"shift+x"` or `"ctrl+option+left"`
    ///
    /// Returns `None` for an unknown key name, a missing key or an unknown
    /// modifier.
    pub fn parse(s: &str) -> Option<Self> {
        let parts: Vec<&str> = s.split('+').map(str::trim).collect();
        let (key_part, modifier_parts) = parts.split_last()?;

        let mut modifiers = Modifiers::NONE;
        for part in modifier_parts {
            match part.to_lowercase().as_str() {
                "ctrl" | "control" | "cmd" | "command" | "meta" | "mod" => modifiers.ctrl = true,
                "shift" => modifiers.shift = true,
                "alt" | "option" => modifiers.alt = true,
                _ => return None,
            }
        }

        let key = Self::parse_key(key_part)?;
        Some(Self { key, modifiers })
    }

    /// Parse a key name to `egui::Key`
    fn parse_key(s: &str) -> Option<egui::Key> {
        use egui::Key;

        let lower = s.to_lowercase();
        let key = match lower.as_str() {
            "a" => Key::A,
            "b" => Key::B,
            "c" => Key::C,
            "d" => Key::D,
            "e" => Key::E,
            "f" => Key::F,
            "g" => Key::G,
            "h" => Key::H,
            "i" => Key::I,
            "j" => Key::J,
            "k" => Key::K,
            "l" => Key::L,
            "m" => Key::M,
            "n" => Key::N,
            "o" => Key::O,
            "p" => Key::P,
            "q" => Key::Q,
            "r" => Key::R,
            "s" => Key::S,
            "t" => Key::T,
            "u" => Key::U,
            "v" => Key::V,
            "w" => Key::W,
            "x" => Key::X,
            "y" => Key::Y,
            "z" => Key::Z,
            "0" => Key::Num0,
            "1" => Key::Num1,
            "2" => Key::Num2,
            "3" => Key::Num3,
            "4" => Key::Num4,
            "5" => Key::Num5,
            "6" => Key::Num6,
            "7" => Key::Num7,
            "8" => Key::Num8,
            "9" => Key::Num9,
            "f1" => Key::F1,
            "f2" => Key::F2,
            "f3" => Key::F3,
            "f4" => Key::F4,
            "f5" => Key::F5,
            "f6" => Key::F6,
            "f7" => Key::F7,
            "f8" => Key::F8,
            "f9" => Key::F9,
            "f10" => Key::F10,
            "f11" => Key::F11,
            "f12" => Key::F12,
            "space" => Key::Space,
            // combokeys treats both names as the same key
            "enter" | "return" => Key::Enter,
            "escape" | "esc" => Key::Escape,
            "tab" => Key::Tab,
            "backspace" => Key::Backspace,
            "delete" | "del" => Key::Delete,
            "insert" | "ins" => Key::Insert,
            "home" => Key::Home,
            "end" => Key::End,
            "pageup" | "pgup" => Key::PageUp,
            "pagedown" | "pgdn" => Key::PageDown,
            "up" | "arrowup" => Key::ArrowUp,
            "down" | "arrowdown" => Key::ArrowDown,
            "left" | "arrowleft" => Key::ArrowLeft,
            "right" | "arrowright" => Key::ArrowRight,
            "-" | "minus" => Key::Minus,
            "=" | "equals" => Key::Equals,
            "," | "comma" => Key::Comma,
            "." | "period" => Key::Period,
            _ => return None,
        };
        Some(key)
    }

    /// Display string, e.g. `Shift+Alt+ArrowRight`
    pub fn display(&self) -> String {
        let key_name = format!("{:?}", self.key);
        if self.modifiers == Modifiers::NONE {
            key_name
        } else {
            format!("{}+{}", self.modifiers, key_name)
        }
    }
}

impl fmt::Display for KeyChord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display())
    }
}
