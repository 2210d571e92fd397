//! TUI application state

use ratatui::layout::Rect;

use super::input::KeyAction;
use super::keypad::{Keypad, KeypadLayout};
use crate::input::{InputMachine, Key};

/// Calculator application state
#[derive(Debug)]
pub struct CalculatorApp {
    /// Keystroke state machine
    machine: InputMachine,
    /// On-screen keypad, highlighting the last key pressed
    keypad: Keypad,
    /// Whether the app should quit
    should_quit: bool,
}

impl Default for CalculatorApp {
    fn default() -> Self {
        Self::new(KeypadLayout::default())
    }
}

impl CalculatorApp {
    /// Creates an app with a fresh state machine
    #[must_use]
    pub fn new(layout: KeypadLayout) -> Self {
        Self::with_machine(InputMachine::new(), layout)
    }

    /// Creates an app around a preconfigured state machine
    #[must_use]
    pub fn with_machine(machine: InputMachine, layout: KeypadLayout) -> Self {
        Self {
            machine,
            keypad: Keypad::new(layout),
            should_quit: false,
        }
    }

    /// Returns the state machine
    #[must_use]
    pub fn machine(&self) -> &InputMachine {
        &self.machine
    }

    /// Returns the keypad
    #[must_use]
    pub fn keypad(&self) -> &Keypad {
        &self.keypad
    }

    /// Returns the keypad layout
    #[must_use]
    pub fn layout(&self) -> KeypadLayout {
        self.keypad.layout()
    }

    /// Returns whether the app should quit
    #[must_use]
    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// Sets the quit flag
    pub fn quit(&mut self) {
        self.should_quit = true;
    }

    /// Presses a key and highlights its button
    pub fn press(&mut self, key: Key) {
        self.machine.press(key);
        self.keypad.highlight(key);
    }

    /// Handles a key action
    pub fn handle_action(&mut self, action: KeyAction) {
        match action {
            KeyAction::Press(key) => self.press(key),
            KeyAction::Quit => self.quit(),
            KeyAction::None => {}
        }
    }

    /// Handles a mouse click at screen position `(x, y)`.
    ///
    /// `keypad_area` is where the keypad was last drawn. Returns true when
    /// the click landed on a button.
    pub fn click(&mut self, keypad_area: Rect, x: u16, y: u16) -> bool {
        match self.keypad.key_at(keypad_area, x, y) {
            Some(key) => {
                self.press(key);
                true
            }
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Operation;

    fn press_str(app: &mut CalculatorApp, keys: &str) {
        for c in keys.chars() {
            app.press(Key::from_char(c).unwrap());
        }
    }

    // ===== Constructor tests =====

    #[test]
    fn test_app_default() {
        let app = CalculatorApp::default();
        assert_eq!(app.layout(), KeypadLayout::Standard);
        assert_eq!(app.machine().display(), "0");
        assert!(!app.should_quit());
    }

    #[test]
    fn test_app_with_machine() {
        let machine = InputMachine::new().with_error_text("E");
        let app = CalculatorApp::with_machine(machine, KeypadLayout::Memory);
        assert_eq!(app.machine().error_text(), "E");
        assert_eq!(app.keypad().layout(), KeypadLayout::Memory);
    }

    // ===== Key handling =====

    #[test]
    fn test_press_updates_display() {
        let mut app = CalculatorApp::default();
        press_str(&mut app, "12+3=");
        assert_eq!(app.machine().display(), "15");
    }

    #[test]
    fn test_press_highlights_button() {
        let mut app = CalculatorApp::default();
        app.press(Key::Digit(7));
        assert_eq!(app.keypad().highlighted().unwrap().key, Key::Digit(7));
        app.press(Key::Operator(Operation::Add));
        assert_eq!(
            app.keypad().highlighted().unwrap().key,
            Key::Operator(Operation::Add)
        );
    }

    #[test]
    fn test_handle_action_press() {
        let mut app = CalculatorApp::default();
        app.handle_action(KeyAction::Press(Key::Digit(4)));
        assert_eq!(app.machine().display(), "4");
    }

    #[test]
    fn test_handle_action_quit() {
        let mut app = CalculatorApp::default();
        app.handle_action(KeyAction::Quit);
        assert!(app.should_quit());
    }

    #[test]
    fn test_handle_action_none() {
        let mut app = CalculatorApp::default();
        app.handle_action(KeyAction::None);
        assert_eq!(app.machine().display(), "0");
        assert!(!app.should_quit());
    }

    // ===== Mouse =====

    #[test]
    fn test_click_on_button() {
        let mut app = CalculatorApp::new(KeypadLayout::Memory);
        let area = Rect::new(40, 2, 30, 17);
        let idx = app.keypad().find_button(Key::Digit(9)).unwrap();
        let (x, y) = app.keypad().button_center(area, idx).unwrap();

        assert!(app.click(area, x, y));
        assert_eq!(app.machine().display(), "9");
    }

    #[test]
    fn test_click_memory_buttons() {
        let mut app = CalculatorApp::new(KeypadLayout::Memory);
        let area = Rect::new(0, 0, 30, 17);
        let click_key = |app: &mut CalculatorApp, key: Key| {
            let idx = app.keypad().find_button(key).unwrap();
            let (x, y) = app.keypad().button_center(area, idx).unwrap();
            assert!(app.click(area, x, y));
        };

        press_str(&mut app, "42");
        click_key(&mut app, Key::MemoryStore);
        click_key(&mut app, Key::Clear);
        click_key(&mut app, Key::MemoryRecall);
        assert_eq!(app.machine().display(), "42");
    }

    #[test]
    fn test_click_outside_keypad() {
        let mut app = CalculatorApp::default();
        let area = Rect::new(40, 2, 30, 17);
        assert!(!app.click(area, 0, 0));
        assert_eq!(app.machine().display(), "0");
    }
}
