//! Log subscriber setup
//!
//! `RUST_LOG` wins over the verbosity flags, e.g.
//! `RUST_LOG=deskcalc=trace deskcalc keys 5+3=` shows every key press.

use std::fs::OpenOptions;
use std::path::Path;
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;

use crate::config::CliConfig;
use crate::error::{CliError, CliResult};

/// Where log output goes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogTarget<'a> {
    /// Plain stderr
    Stderr,
    /// Append to a file, without ANSI colors
    File(&'a Path),
    /// No subscriber; the terminal UI owns the screen
    Off,
}

impl<'a> LogTarget<'a> {
    /// Picks the target for a command.
    ///
    /// Interactive commands only log when a log file was given.
    #[must_use]
    pub fn select(config: &'a CliConfig, interactive: bool) -> Self {
        match (&config.log_file, interactive) {
            (Some(path), _) => Self::File(path),
            (None, true) => Self::Off,
            (None, false) => Self::Stderr,
        }
    }
}

/// Builds the level filter, honoring `RUST_LOG` when set
#[must_use]
pub fn env_filter(config: &CliConfig) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(config.verbosity.log_level()))
}

/// Installs the global subscriber
pub fn init(config: &CliConfig, target: LogTarget<'_>) -> CliResult<()> {
    let filter = env_filter(config);

    let installed = match target {
        LogTarget::Off => return Ok(()),
        LogTarget::Stderr => tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .with_ansi(config.color.should_color())
            .with_target(config.verbosity.is_debug())
            .try_init(),
        LogTarget::File(path) => {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .map_err(|e| {
                    CliError::config(format!("cannot open log file {}: {e}", path.display()))
                })?;
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(Mutex::new(file))
                .with_ansi(false)
                .try_init()
        }
    };

    installed.map_err(|e| CliError::config(format!("cannot install logger: {e}")))
}
