//! CLI configuration

use std::path::{Path, PathBuf};

use deskcalc::core::tape::Tape;
use deskcalc::input::{InputMachine, DEFAULT_ERROR_TEXT};
use deskcalc::tui::KeypadLayout;
use serde::{Deserialize, Serialize};

use crate::error::{CliError, CliResult};

/// CLI verbosity level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Verbosity {
    /// Quiet - errors only
    Quiet,
    /// Normal - default output
    #[default]
    Normal,
    /// Verbose - extra output
    Verbose,
    /// Debug - maximum output
    Debug,
}

impl Verbosity {
    /// Check if quiet mode
    #[must_use]
    pub const fn is_quiet(self) -> bool {
        matches!(self, Self::Quiet)
    }

    /// Check if debug mode
    #[must_use]
    pub const fn is_debug(self) -> bool {
        matches!(self, Self::Debug)
    }

    /// Default log filter directive for this verbosity
    #[must_use]
    pub const fn log_level(self) -> &'static str {
        match self {
            Self::Quiet => "error",
            Self::Normal => "warn",
            Self::Verbose => "info",
            Self::Debug => "debug",
        }
    }
}

/// Color output choice
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ColorChoice {
    /// Always use colors
    Always,
    /// Use colors when output is a terminal
    #[default]
    Auto,
    /// Never use colors
    Never,
}

impl ColorChoice {
    /// Should use colors based on output detection
    #[must_use]
    pub fn should_color(self) -> bool {
        match self {
            Self::Always => true,
            Self::Never => false,
            Self::Auto => std::io::IsTerminal::is_terminal(&std::io::stdout()),
        }
    }
}

/// Settings read from a YAML configuration file.
///
/// Every key is optional:
///
/// ```yaml
/// layout: memory
/// error_text: "Cannot divide by zero"
/// tape_capacity: 50
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CalcConfig {
    /// Keypad layout for the terminal front end
    pub layout: Option<KeypadLayout>,
    /// Text shown after a division by zero
    pub error_text: Option<String>,
    /// Number of completed calculations kept on the tape
    pub tape_capacity: Option<usize>,
}

impl CalcConfig {
    /// Parses configuration from YAML text
    pub fn from_yaml(text: &str) -> CliResult<Self> {
        serde_yaml_ng::from_str(text).map_err(|e| CliError::config(e.to_string()))
    }

    /// Reads configuration from a YAML file
    pub fn load(path: &Path) -> CliResult<Self> {
        let text = std::fs::read_to_string(path).map_err(|e| {
            CliError::config(format!("cannot read {}: {e}", path.display()))
        })?;
        Self::from_yaml(&text)
    }
}

/// CLI configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CliConfig {
    /// Verbosity level
    pub verbosity: Verbosity,
    /// Color output choice
    pub color: ColorChoice,
    /// Keypad layout for the terminal front end
    pub layout: KeypadLayout,
    /// Text shown after a division by zero
    pub error_text: String,
    /// Number of completed calculations kept on the tape
    pub tape_capacity: usize,
    /// Write logs here instead of stderr
    pub log_file: Option<PathBuf>,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            verbosity: Verbosity::Normal,
            color: ColorChoice::Auto,
            layout: KeypadLayout::Standard,
            error_text: DEFAULT_ERROR_TEXT.to_string(),
            tape_capacity: Tape::DEFAULT_CAPACITY,
            log_file: None,
        }
    }
}

impl CliConfig {
    /// Create new default configuration
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set verbosity
    #[must_use]
    pub const fn with_verbosity(mut self, verbosity: Verbosity) -> Self {
        self.verbosity = verbosity;
        self
    }

    /// Set color choice
    #[must_use]
    pub const fn with_color(mut self, color: ColorChoice) -> Self {
        self.color = color;
        self
    }

    /// Set keypad layout
    #[must_use]
    pub const fn with_layout(mut self, layout: KeypadLayout) -> Self {
        self.layout = layout;
        self
    }

    /// Set error text
    #[must_use]
    pub fn with_error_text(mut self, text: impl Into<String>) -> Self {
        self.error_text = text.into();
        self
    }

    /// Set tape capacity
    #[must_use]
    pub const fn with_tape_capacity(mut self, capacity: usize) -> Self {
        self.tape_capacity = capacity;
        self
    }

    /// Set log file
    #[must_use]
    pub fn with_log_file(mut self, path: Option<PathBuf>) -> Self {
        self.log_file = path;
        self
    }

    /// Applies the keys present in a configuration file
    #[must_use]
    pub fn with_file(mut self, file: CalcConfig) -> Self {
        if let Some(layout) = file.layout {
            self.layout = layout;
        }
        if let Some(text) = file.error_text {
            self.error_text = text;
        }
        if let Some(capacity) = file.tape_capacity {
            self.tape_capacity = capacity;
        }
        self
    }

    /// Builds a state machine with these settings
    #[must_use]
    pub fn input_machine(&self) -> InputMachine {
        InputMachine::new()
            .with_error_text(self.error_text.clone())
            .with_tape_capacity(self.tape_capacity)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    mod verbosity_tests {
        use super::*;

        #[test]
        fn test_default_verbosity() {
            assert_eq!(Verbosity::default(), Verbosity::Normal);
        }

        #[test]
        fn test_is_quiet() {
            assert!(Verbosity::Quiet.is_quiet());
            assert!(!Verbosity::Normal.is_quiet());
        }

        #[test]
        fn test_is_debug() {
            assert!(!Verbosity::Verbose.is_debug());
            assert!(Verbosity::Debug.is_debug());
        }

        #[test]
        fn test_log_level() {
            assert_eq!(Verbosity::Quiet.log_level(), "error");
            assert_eq!(Verbosity::Normal.log_level(), "warn");
            assert_eq!(Verbosity::Verbose.log_level(), "info");
            assert_eq!(Verbosity::Debug.log_level(), "debug");
        }
    }

    mod color_choice_tests {
        use super::*;

        #[test]
        fn test_default_color() {
            assert_eq!(ColorChoice::default(), ColorChoice::Auto);
        }

        #[test]
        fn test_should_color_fixed() {
            assert!(ColorChoice::Always.should_color());
            assert!(!ColorChoice::Never.should_color());
        }

        #[test]
        fn test_deserialize() {
            let c: ColorChoice = serde_json::from_str("\"Never\"").unwrap();
            assert_eq!(c, ColorChoice::Never);
        }
    }

    mod calc_config_tests {
        use super::*;

        #[test]
        fn test_empty_yaml_is_default() {
            let config = CalcConfig::from_yaml("{}").unwrap();
            assert_eq!(config, CalcConfig::default());
        }

        #[test]
        fn test_full_yaml() {
            let yaml = "layout: memory\nerror_text: \"Cannot divide by zero\"\ntape_capacity: 5\n";
            let config = CalcConfig::from_yaml(yaml).unwrap();
            assert_eq!(config.layout, Some(KeypadLayout::Memory));
            assert_eq!(config.error_text.as_deref(), Some("Cannot divide by zero"));
            assert_eq!(config.tape_capacity, Some(5));
        }

        #[test]
        fn test_unknown_key_rejected() {
            let err = CalcConfig::from_yaml("colour: red\n").unwrap_err();
            assert!(err.to_string().contains("Configuration"));
        }

        #[test]
        fn test_bad_layout_rejected() {
            assert!(CalcConfig::from_yaml("layout: scientific\n").is_err());
        }

        #[test]
        fn test_load_missing_file() {
            let err = CalcConfig::load(Path::new("/nonexistent/deskcalc.yaml")).unwrap_err();
            assert!(err.to_string().contains("cannot read"));
        }

        #[test]
        fn test_load_from_file() {
            let dir = tempfile::tempdir().unwrap();
            let path = dir.path().join("deskcalc.yaml");
            std::fs::write(&path, "tape_capacity: 3\n").unwrap();
            let config = CalcConfig::load(&path).unwrap();
            assert_eq!(config.tape_capacity, Some(3));
        }
    }

    mod cli_config_tests {
        use super::*;

        #[test]
        fn test_default_config() {
            let config = CliConfig::default();
            assert_eq!(config.verbosity, Verbosity::Normal);
            assert_eq!(config.color, ColorChoice::Auto);
            assert_eq!(config.layout, KeypadLayout::Standard);
            assert_eq!(config.error_text, "Error");
            assert_eq!(config.tape_capacity, 100);
            assert!(config.log_file.is_none());
        }

        #[test]
        fn test_chained_builders() {
            let config = CliConfig::new()
                .with_verbosity(Verbosity::Verbose)
                .with_color(ColorChoice::Always)
                .with_layout(KeypadLayout::Memory)
                .with_error_text("E")
                .with_tape_capacity(7)
                .with_log_file(Some(PathBuf::from("calc.log")));

            assert_eq!(config.verbosity, Verbosity::Verbose);
            assert_eq!(config.color, ColorChoice::Always);
            assert_eq!(config.layout, KeypadLayout::Memory);
            assert_eq!(config.error_text, "E");
            assert_eq!(config.tape_capacity, 7);
            assert_eq!(config.log_file, Some(PathBuf::from("calc.log")));
        }

        #[test]
        fn test_with_file_only_overrides_present_keys() {
            let file = CalcConfig {
                error_text: Some("Oops".to_string()),
                ..CalcConfig::default()
            };
            let config = CliConfig::new().with_layout(KeypadLayout::Memory).with_file(file);
            assert_eq!(config.layout, KeypadLayout::Memory);
            assert_eq!(config.error_text, "Oops");
            assert_eq!(config.tape_capacity, 100);
        }

        #[test]
        fn test_input_machine_uses_settings() {
            let mut machine = CliConfig::new()
                .with_error_text("E")
                .with_tape_capacity(1)
                .input_machine();
            machine.press_all(deskcalc::input::parse_key_script("1+1=2+2=3/0=").unwrap());
            assert_eq!(machine.display(), "E");
            assert_eq!(machine.tape().len(), 1);
        }

        #[test]
        fn test_serialize() {
            let json = serde_json::to_string(&CliConfig::new()).unwrap();
            assert!(json.contains("\"layout\":\"standard\""));
            assert!(json.contains("tape_capacity"));
        }
    }
}
