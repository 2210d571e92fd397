//! Keystroke-driven input state machine
//!
//! Every front end reduces its button clicks and key presses to [`Key`]
//! values and feeds them to an [`InputMachine`], which owns the text buffer,
//! the pending operation and the display string.

mod machine;
mod script;

pub use machine::{InputMachine, InputState, PendingOperation, DEFAULT_ERROR_TEXT};
pub use script::{parse_key_script, KeyScriptError};

use serde::{Deserialize, Serialize};

use crate::core::Operation;

const DIGIT_LABELS: [&str; 10] = ["0", "1", "2", "3", "4", "5", "6", "7", "8", "9"];

/// A single calculator key
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Key {
    /// Digit 0-9
    Digit(u8),
    /// Decimal point
    Decimal,
    /// Binary operator
    Operator(Operation),
    /// Evaluate the pending operation
    Equals,
    /// Reset input, pending operation and result register
    Clear,
    /// Remove the last typed character
    Backspace,
    /// Toggle the sign of the number being entered
    Negate,
    /// Divide the number being entered by 100
    Percent,
    /// Store the number on display into memory (MS)
    MemoryStore,
    /// Recall memory into the buffer (MR)
    MemoryRecall,
    /// Reset memory (MC)
    MemoryClear,
}

impl Key {
    /// Maps a typed character to a key, the way the keyboard does
    #[must_use]
    pub fn from_char(c: char) -> Option<Self> {
        if let Some(d) = c.to_digit(10) {
            return Some(Self::Digit(d as u8));
        }
        match c {
            '.' => Some(Self::Decimal),
            '=' => Some(Self::Equals),
            '%' => Some(Self::Percent),
            '±' => Some(Self::Negate),
            _ => Operation::from_char(c).map(Self::Operator),
        }
    }

    /// Returns the keypad label for this key
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Self::Digit(d) => DIGIT_LABELS.get(usize::from(*d)).copied().unwrap_or("?"),
            Self::Decimal => ".",
            Self::Operator(op) => op.symbol(),
            Self::Equals => "=",
            Self::Clear => "C",
            Self::Backspace => "⌫",
            Self::Negate => "±",
            Self::Percent => "%",
            Self::MemoryStore => "MS",
            Self::MemoryRecall => "MR",
            Self::MemoryClear => "MC",
        }
    }

    /// Returns true for the memory keys
    #[must_use]
    pub const fn is_memory(&self) -> bool {
        matches!(
            self,
            Self::MemoryStore | Self::MemoryRecall | Self::MemoryClear
        )
    }
}

impl std::fmt::Display for Key {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_char_digits() {
        for d in 0..=9u8 {
            let c = char::from_digit(u32::from(d), 10).unwrap();
            assert_eq!(Key::from_char(c), Some(Key::Digit(d)));
        }
    }

    #[test]
    fn test_from_char_keyboard_operators() {
        assert_eq!(
            Key::from_char('*'),
            Some(Key::Operator(Operation::Multiply))
        );
        assert_eq!(Key::from_char('/'), Some(Key::Operator(Operation::Divide)));
        assert_eq!(Key::from_char('+'), Some(Key::Operator(Operation::Add)));
        assert_eq!(
            Key::from_char('-'),
            Some(Key::Operator(Operation::Subtract))
        );
    }

    #[test]
    fn test_from_char_specials() {
        assert_eq!(Key::from_char('.'), Some(Key::Decimal));
        assert_eq!(Key::from_char('='), Some(Key::Equals));
        assert_eq!(Key::from_char('%'), Some(Key::Percent));
        assert_eq!(Key::from_char('±'), Some(Key::Negate));
        assert_eq!(Key::from_char('?'), None);
    }

    #[test]
    fn test_labels() {
        assert_eq!(Key::Digit(7).label(), "7");
        assert_eq!(Key::Operator(Operation::Divide).label(), "÷");
        assert_eq!(Key::MemoryRecall.label(), "MR");
        assert_eq!(Key::Backspace.to_string(), "⌫");
    }

    #[test]
    fn test_out_of_range_digit_label() {
        assert_eq!(Key::Digit(12).label(), "?");
    }

    #[test]
    fn test_is_memory() {
        assert!(Key::MemoryStore.is_memory());
        assert!(Key::MemoryRecall.is_memory());
        assert!(Key::MemoryClear.is_memory());
        assert!(!Key::Clear.is_memory());
    }
}
