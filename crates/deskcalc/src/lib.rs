//! deskcalc - a keypad calculator
//!
//! The crate has three layers:
//!
//! - [`core`]: the arithmetic [`Calculator`](core::Calculator) with its
//!   result register and memory cell, plus number formatting and the tape
//! - [`input`]: the keystroke state machine every front end feeds
//! - [`tui`]: a ratatui front end with a clickable keypad (feature `tui`)
//!
//! [`driver`] ties them together so one set of behaviour checks runs
//! against every front end.
//!
//! # Example
//!
//! ```rust
//! use deskcalc::prelude::*;
//!
//! // Direct arithmetic
//! let mut calc = Calculator::new();
//! assert_eq!(calc.calculate(6.0, 7.0, Operation::Multiply).unwrap(), 42.0);
//! assert!(calc.divide(1.0, 0.0).is_err());
//!
//! // Keystrokes
//! let mut machine = InputMachine::new();
//! machine.press_all(parse_key_script("5+3+2=").unwrap());
//! assert_eq!(machine.display(), "10");
//! ```

#![cfg_attr(
    test,
    allow(
        clippy::unwrap_used,
        clippy::expect_used,
        clippy::panic,
        clippy::float_cmp
    )
)]
#![deny(missing_docs)]
#![deny(missing_debug_implementations)]

pub mod core;
pub mod driver;
pub mod input;

#[cfg(feature = "tui")]
pub mod tui;

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::core::tape::{Tape, TapeEntry};
    pub use crate::core::{format_value, CalcError, CalcResult, Calculator, Operation};
    pub use crate::driver::CalculatorDriver;
    pub use crate::input::{
        parse_key_script, InputMachine, InputState, Key, KeyScriptError, PendingOperation,
    };

    #[cfg(feature = "tui")]
    pub use crate::driver::TuiDriver;
    #[cfg(feature = "tui")]
    pub use crate::tui::{CalculatorApp, KeypadLayout};
}
