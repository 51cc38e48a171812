//! Hotkey descriptors: compact `ctrl-key` / `ctrl-shift-key` strings.
//!
//! A descriptor always requires the command modifier (`ctrl` or `⌘`, matched
//! by either Ctrl or Meta on the event) and optionally shift (`shift` or `⇧`).
//! Shift must be held iff the descriptor names it.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

use crate::key::{KeyCode, KeyEvent, Modifiers};

const DELIMITER: char = '-';

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DescriptorError {
    #[error("hotkey '{0}' must have the form ctrl-key or ctrl-shift-key")]
    TokenCount(String),
    #[error("unsupported modifier '{0}', expected ctrl or ⌘")]
    Modifier(String),
    #[error("unsupported shift marker '{0}', expected shift or ⇧")]
    ShiftMarker(String),
    #[error("unknown key name '{0}'")]
    Key(String),
}

/// A parsed hotkey. Immutable once built.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct HotkeyDescriptor {
    shift: bool,
    key: KeyCode,
}

impl HotkeyDescriptor {
    /// `ctrl-<key>`.
    pub fn command(key: KeyCode) -> Self {
        Self { shift: false, key }
    }

    /// `ctrl-shift-<key>`.
    pub fn command_shift(key: KeyCode) -> Self {
        Self { shift: true, key }
    }

    pub fn key(&self) -> KeyCode {
        self.key
    }

    pub fn requires_shift(&self) -> bool {
        self.shift
    }

    pub fn matches(&self, event: &KeyEvent) -> bool {
        event.mods.has_command()
            && event.mods.contains(Modifiers::SHIFT) == self.shift
            && self.key.eq_ignore_case(&event.code)
    }
}

fn is_command_marker(token: &str) -> bool {
    token.eq_ignore_ascii_case("ctrl") || token == "⌘"
}

fn is_shift_marker(token: &str) -> bool {
    token.eq_ignore_ascii_case("shift") || token == "⇧"
}

impl FromStr for HotkeyDescriptor {
    type Err = DescriptorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let tokens: Vec<&str> = s.split(DELIMITER).collect();
        let (modifier, shift, key) = match tokens.as_slice() {
            [modifier, key] => (*modifier, false, *key),
            [modifier, marker, key] => {
                if !is_shift_marker(marker) {
                    return Err(DescriptorError::ShiftMarker((*marker).to_string()));
                }
                (*modifier, true, *key)
            }
            _ => return Err(DescriptorError::TokenCount(s.to_string())),
        };
        if !is_command_marker(modifier) {
            return Err(DescriptorError::Modifier(modifier.to_string()));
        }
        let key = KeyCode::from_name(key).ok_or_else(|| DescriptorError::Key(key.to_string()))?;
        Ok(Self { shift, key })
    }
}

impl fmt::Display for HotkeyDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.shift {
            write!(f, "ctrl-shift-{}", self.key.name())
        } else {
            write!(f, "ctrl-{}", self.key.name())
        }
    }
}

/// Parses `descriptor` and tests it against `event`.
///
/// Malformed descriptors never match.
pub fn matches(descriptor: &str, event: &KeyEvent) -> bool {
    descriptor
        .parse::<HotkeyDescriptor>()
        .is_ok_and(|parsed| parsed.matches(event))
}
