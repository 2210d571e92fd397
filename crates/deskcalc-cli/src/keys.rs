//! Key script runner

use deskcalc::core::tape::TapeEntry;
use deskcalc::input::{parse_key_script, InputMachine, InputState};
use serde::Serialize;

use crate::commands::KeysFormat;
use crate::config::CliConfig;
use crate::error::CliResult;
use crate::output::Reporter;

/// Machine state after a key script, as printed by `--format json`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct KeysReport {
    /// Display text
    pub display: String,
    /// Coarse input state
    pub state: InputState,
    /// Pending operation, e.g. `5 +`
    pub pending: Option<String>,
    /// Whether the display shows the error text
    pub error: bool,
    /// Memory register
    pub memory: f64,
    /// Completed calculations, oldest first
    pub tape: Vec<TapeEntry>,
}

impl KeysReport {
    /// Captures the state of a machine
    #[must_use]
    pub fn capture(machine: &InputMachine) -> Self {
        Self {
            display: machine.display().to_string(),
            state: machine.state(),
            pending: machine.pending_display(),
            error: machine.is_error(),
            memory: machine.calculator().memory(),
            tape: machine.tape().iter().cloned().collect(),
        }
    }
}

/// Feeds a key script through a fresh machine
pub fn evaluate(config: &CliConfig, script: &str) -> CliResult<KeysReport> {
    let keys = parse_key_script(script)?;
    tracing::debug!(count = keys.len(), "running key script");
    let mut machine = config.input_machine();
    machine.press_all(keys);
    Ok(KeysReport::capture(&machine))
}

/// Runs a key script and prints the result
pub fn run(
    config: &CliConfig,
    script: &str,
    format: KeysFormat,
    reporter: &Reporter,
) -> CliResult<()> {
    let report = evaluate(config, script)?;
    match format {
        KeysFormat::Text if report.error => reporter.error_line(&report.display),
        KeysFormat::Text => reporter.line(&report.display),
        KeysFormat::Json => reporter.line(&serde_json::to_string_pretty(&report)?),
    }
    Ok(())
}
