//! Terminal front end
//!
//! A display, a pending-operation line, the calculation tape and a
//! clickable keypad, all driven by one [`InputMachine`](crate::input::InputMachine).

mod app;
mod input;
mod keypad;
mod ui;

pub use app::CalculatorApp;
pub use input::{InputHandler, KeyAction};
pub use keypad::{Keypad, KeypadButton, KeypadLayout, KeypadWidget};
pub use ui::{keypad_area, render, CalculatorUI, APP_TITLE, HELP_SHORTCUTS};
