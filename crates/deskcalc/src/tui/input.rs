//! Keyboard input handling
//!
//! Maps crossterm key events to calculator keys. Anything without a
//! mapping becomes [`KeyAction::None`] and is dropped by the app.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::core::Operation;
use crate::input::Key;

/// Actions that can be triggered by keyboard input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    /// Press a calculator key
    Press(Key),
    /// Quit the application
    Quit,
    /// No action (ignored input)
    None,
}

/// Input handler that maps key events to actions
#[derive(Debug, Default)]
pub struct InputHandler;

impl InputHandler {
    /// Creates a new input handler
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Maps a key event to an action
    #[must_use]
    pub fn handle_key(&self, event: KeyEvent) -> KeyAction {
        let KeyEvent {
            code,
            modifiers,
            kind,
            ..
        } = event;

        // Terminals with enhanced reporting also send release events
        if kind == KeyEventKind::Release {
            return KeyAction::None;
        }

        if modifiers.contains(KeyModifiers::CONTROL) {
            return match code {
                KeyCode::Char('c' | 'q') => KeyAction::Quit,
                _ => KeyAction::None,
            };
        }

        match code {
            KeyCode::Char('q' | 'Q') => KeyAction::Quit,
            KeyCode::Char('n' | 'N') => KeyAction::Press(Key::Negate),
            KeyCode::Char('m' | 'M') => KeyAction::Press(Key::MemoryStore),
            KeyCode::Char('r' | 'R') => KeyAction::Press(Key::MemoryRecall),
            KeyCode::Char('l' | 'L') => KeyAction::Press(Key::MemoryClear),
            KeyCode::Char('^') => KeyAction::Press(Key::Operator(Operation::Power)),
            KeyCode::Char(c) => Key::from_char(c).map_or(KeyAction::None, KeyAction::Press),
            KeyCode::Enter => KeyAction::Press(Key::Equals),
            KeyCode::Backspace | KeyCode::Delete => KeyAction::Press(Key::Backspace),
            KeyCode::Esc => KeyAction::Press(Key::Clear),
            _ => KeyAction::None,
        }
    }

    /// Returns the key event that produces `key`, if the keyboard has one
    #[must_use]
    pub fn key_event_for(key: Key) -> Option<KeyEvent> {
        let code = match key {
            Key::Digit(d) => KeyCode::Char(char::from_digit(u32::from(d), 10)?),
            Key::Decimal => KeyCode::Char('.'),
            Key::Operator(op) => KeyCode::Char(match op {
                Operation::Add => '+',
                Operation::Subtract => '-',
                Operation::Multiply => '*',
                Operation::Divide => '/',
                Operation::Power => '^',
            }),
            Key::Equals => KeyCode::Enter,
            Key::Clear => KeyCode::Esc,
            Key::Backspace => KeyCode::Backspace,
            Key::Negate => KeyCode::Char('n'),
            Key::Percent => KeyCode::Char('%'),
            Key::MemoryStore => KeyCode::Char('m'),
            Key::MemoryRecall => KeyCode::Char('r'),
            Key::MemoryClear => KeyCode::Char('l'),
        };
        Some(KeyEvent::new(code, KeyModifiers::NONE))
    }
}
