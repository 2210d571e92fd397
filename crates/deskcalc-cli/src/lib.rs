//! deskcalc CLI library
//!
//! Command-line front end for the deskcalc keypad calculator.

#![warn(missing_docs)]
#![allow(clippy::module_name_repetitions)]

mod commands;
mod config;
pub mod demo;
mod error;
pub mod keys;
pub mod logging;
mod output;
pub mod session;
pub mod tui_runner;

pub use commands::{
    Cli, ColorArg, Commands, KeysArgs, KeysFormat, LayoutArg, SessionArgs, TuiArgs,
};
pub use config::{CalcConfig, CliConfig, ColorChoice, Verbosity};
pub use error::{CliError, CliResult};
pub use keys::KeysReport;
pub use logging::LogTarget;
pub use output::Reporter;
