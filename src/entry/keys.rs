//! Keyboard input as seen by the fret entry state machine

use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(tag = "kind", content = "digit", rename_all = "camelCase")]
pub enum EntryKey {
    /// '0'..='9'
    Digit(u8),
    Escape,
    Backspace,
    /// Anything else; ignored
    Other,
}

impl EntryKey {
    /// Map a browser `KeyboardEvent.key` value
    pub fn from_key(key: &str) -> Self {
        match key {
            "Escape" | "Esc" => EntryKey::Escape,
            "Backspace" => EntryKey::Backspace,
            _ => {
                let mut chars = key.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) => c
                        .to_digit(10)
                        .map(|d| EntryKey::Digit(d as u8))
                        .unwrap_or(EntryKey::Other),
                    _ => EntryKey::Other,
                }
            }
        }
    }
}

impl From<&str> for EntryKey {
    fn from(key: &str) -> Self {
        Self::from_key(key)
    }
}
