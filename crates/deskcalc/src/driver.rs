//! Unified calculator driver
//!
//! **Write the test logic once, run it everywhere.** The bare
//! [`InputMachine`] and the terminal front end both implement
//! [`CalculatorDriver`], and the `verify_*` functions below hold the
//! behaviour every front end must share.

use crate::input::{parse_key_script, InputMachine, Key, KeyScriptError};

/// Abstract driver for keypad interactions
///
/// # Example
///
/// ```rust
/// use deskcalc::prelude::*;
///
/// let mut driver = InputMachine::new();
/// driver.press_script("42*10=").unwrap();
/// assert_eq!(driver.display_text(), "420");
/// ```
pub trait CalculatorDriver {
    /// Presses one key
    fn press(&mut self, key: Key);

    /// Presses every key of a key script, in order
    fn press_script(&mut self, script: &str) -> Result<(), KeyScriptError> {
        for key in parse_key_script(script)? {
            self.press(key);
        }
        Ok(())
    }

    /// Text currently on the display
    fn display_text(&self) -> String;

    /// Pending operation as shown to the user, e.g. `5 +`
    fn pending_text(&self) -> Option<String>;

    /// True while the display shows the error text
    fn shows_error(&self) -> bool;

    /// Value held in memory
    fn memory_value(&self) -> f64;

    /// Completed calculations, newest first
    fn tape_lines(&self) -> Vec<String>;

    /// Resets the calculator through its clear key
    fn clear(&mut self) {
        self.press(Key::Clear);
    }
}

impl CalculatorDriver for InputMachine {
    fn press(&mut self, key: Key) {
        InputMachine::press(self, key);
    }

    fn display_text(&self) -> String {
        self.display().to_string()
    }

    fn pending_text(&self) -> Option<String> {
        self.pending_display()
    }

    fn shows_error(&self) -> bool {
        self.is_error()
    }

    fn memory_value(&self) -> f64 {
        self.calculator().memory()
    }

    fn tape_lines(&self) -> Vec<String> {
        self.tape().iter_rev().map(|e| e.display()).collect()
    }
}

/// TUI driver implementation
#[cfg(feature = "tui")]
pub mod tui_driver {
    use ratatui::layout::Rect;

    use super::CalculatorDriver;
    use crate::input::Key;
    use crate::tui::{keypad_area, CalculatorApp, InputHandler, KeypadLayout};

    /// Screen size the driver pretends to render at
    const SCREEN: Rect = Rect {
        x: 0,
        y: 0,
        width: 100,
        height: 30,
    };

    /// Drives a [`CalculatorApp`] through terminal events.
    ///
    /// Memory keys are clicked when the keypad shows them, so the mouse
    /// path stays covered. Every other key is sent as a key event.
    #[derive(Debug)]
    pub struct TuiDriver {
        app: CalculatorApp,
        handler: InputHandler,
    }

    impl Default for TuiDriver {
        fn default() -> Self {
            Self::new(KeypadLayout::default())
        }
    }

    impl TuiDriver {
        /// Creates a driver around a fresh app
        #[must_use]
        pub fn new(layout: KeypadLayout) -> Self {
            Self::with_app(CalculatorApp::new(layout))
        }

        /// Creates a driver around an existing app
        #[must_use]
        pub fn with_app(app: CalculatorApp) -> Self {
            Self {
                app,
                handler: InputHandler::new(),
            }
        }

        /// Returns the underlying app
        #[must_use]
        pub fn app(&self) -> &CalculatorApp {
            &self.app
        }

        /// Returns the underlying app mutably
        pub fn app_mut(&mut self) -> &mut CalculatorApp {
            &mut self.app
        }

        /// Sends a left click at screen position `(x, y)`
        pub fn click(&mut self, x: u16, y: u16) -> bool {
            self.app.click(keypad_area(SCREEN), x, y)
        }

        fn click_key(&mut self, key: Key) -> bool {
            let area = keypad_area(SCREEN);
            let Some((x, y)) = self
                .app
                .keypad()
                .find_button(key)
                .and_then(|idx| self.app.keypad().button_center(area, idx))
            else {
                return false;
            };
            self.click(x, y)
        }
    }

    impl CalculatorDriver for TuiDriver {
        fn press(&mut self, key: Key) {
            if key.is_memory() && self.click_key(key) {
                return;
            }
            match InputHandler::key_event_for(key) {
                Some(event) => {
                    let action = self.handler.handle_key(event);
                    self.app.handle_action(action);
                }
                None => {
                    tracing::debug!(key = key.label(), layout = %self.app.layout(), "key has no binding");
                }
            }
        }

        fn display_text(&self) -> String {
            self.app.machine().display().to_string()
        }

        fn pending_text(&self) -> Option<String> {
            self.app.machine().pending_display()
        }

        fn shows_error(&self) -> bool {
            self.app.machine().is_error()
        }

        fn memory_value(&self) -> f64 {
            self.app.machine().calculator().memory()
        }

        fn tape_lines(&self) -> Vec<String> {
            self.app
                .machine()
                .tape()
                .iter_rev()
                .map(|e| e.display())
                .collect()
        }
    }
}

#[cfg(feature = "tui")]
pub use tui_driver::TuiDriver;

// ===== Unified behaviour checks =====
// These work with ANY CalculatorDriver implementation

/// Verifies the four basic operators
pub fn verify_basic_arithmetic<D: CalculatorDriver>(driver: &mut D) {
    for (script, expected) in [("2+3=", "5"), ("10-4=", "6"), ("6*7=", "42"), ("7/2=", "3.5")] {
        driver.clear();
        driver.press_script(script).unwrap();
        assert_eq!(driver.display_text(), expected, "script {script}");
    }
    driver.clear();
}

/// Verifies left-to-right chaining without precedence
pub fn verify_chaining<D: CalculatorDriver>(driver: &mut D) {
    driver.clear();
    driver.press_script("5+3+2=").unwrap();
    assert_eq!(driver.display_text(), "10");

    driver.clear();
    driver.press_script("2+3*4=").unwrap();
    assert_eq!(driver.display_text(), "20");

    driver.clear();
    driver.press_script("5+3*").unwrap();
    assert_eq!(driver.display_text(), "8");
    assert_eq!(driver.pending_text().as_deref(), Some("8 ×"));
    driver.clear();
}

/// Verifies number entry: leading zeros, decimal point and backspace
pub fn verify_number_entry<D: CalculatorDriver>(driver: &mut D) {
    driver.clear();
    driver.press_script("007").unwrap();
    assert_eq!(driver.display_text(), "7");

    driver.clear();
    driver.press_script(".").unwrap();
    assert_eq!(driver.display_text(), "0.");

    driver.clear();
    driver.press_script("1.5.3").unwrap();
    assert_eq!(driver.display_text(), "1.53");

    driver.clear();
    driver.press_script("123[DEL][DEL]").unwrap();
    assert_eq!(driver.display_text(), "1");
    driver.press_script("[DEL][DEL]").unwrap();
    assert_eq!(driver.display_text(), "0");
    driver.clear();
}

/// Verifies division by zero shows the error text and resets the operation
pub fn verify_division_by_zero<D: CalculatorDriver>(driver: &mut D) {
    driver.clear();
    driver.press_script("5/0=").unwrap();
    assert!(driver.shows_error());
    assert_eq!(driver.display_text(), "Error");
    assert!(driver.pending_text().is_none());

    // Entry resumes from scratch
    driver.press_script("4+1=").unwrap();
    assert!(!driver.shows_error());
    assert_eq!(driver.display_text(), "5");
    driver.clear();
}

/// Verifies sign toggle and percent
pub fn verify_negate_and_percent<D: CalculatorDriver>(driver: &mut D) {
    driver.clear();
    driver.press_script("12[NEG]").unwrap();
    assert_eq!(driver.display_text(), "-12");
    driver.press_script("[NEG]").unwrap();
    assert_eq!(driver.display_text(), "12");

    driver.clear();
    driver.press_script("50%").unwrap();
    assert_eq!(driver.display_text(), "0.5");
    driver.clear();
}

/// Verifies the memory keys; memory survives clear
pub fn verify_memory<D: CalculatorDriver>(driver: &mut D) {
    driver.press_script("[MC]").unwrap();
    driver.clear();
    driver.press_script("6*7=[MS]").unwrap();
    assert_eq!(driver.memory_value(), 42.0);

    driver.clear();
    assert_eq!(driver.memory_value(), 42.0);
    driver.press_script("[MR]+8=").unwrap();
    assert_eq!(driver.display_text(), "50");

    driver.press_script("[MC][MR]").unwrap();
    assert_eq!(driver.display_text(), "0");
    driver.clear();
}

/// Verifies the tape records completed calculations, newest first
pub fn verify_tape<D: CalculatorDriver>(driver: &mut D) {
    driver.clear();
    let before = driver.tape_lines().len();
    driver.press_script("1+1=").unwrap();
    driver.press_script("2*3=").unwrap();
    driver.press_script("9/0=").unwrap();

    let tape = driver.tape_lines();
    assert_eq!(tape.len(), before + 2);
    assert_eq!(tape[0], "2 × 3 = 6");
    assert_eq!(tape[1], "1 + 1 = 2");
    driver.clear();
}
