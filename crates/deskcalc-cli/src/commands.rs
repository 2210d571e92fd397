//! CLI command definitions using clap

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use deskcalc::tui::KeypadLayout;

use crate::config::ColorChoice;

/// deskcalc: a keypad calculator for the terminal
#[derive(Parser, Debug)]
#[command(name = "deskcalc")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Verbosity level (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Quiet mode (suppress non-error output)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Color output (auto, always, never)
    #[arg(long, default_value = "auto", global = true)]
    pub color: ColorArg,

    /// YAML configuration file (layout, error_text, tape_capacity)
    #[arg(long, global = true, env = "DESKCALC_CONFIG")]
    pub config: Option<PathBuf>,

    /// Write logs to this file instead of stderr
    #[arg(long, global = true)]
    pub log_file: Option<PathBuf>,

    /// Subcommand to run
    #[command(subcommand)]
    pub command: Commands,
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the interactive terminal keypad
    Tui(TuiArgs),

    /// Print the scripted demonstration
    Demo,

    /// Run a key script and print the display
    ///
    /// Characters map as the keyboard does (`*` multiplies, `/` divides);
    /// other keys are written in brackets: [C] [DEL] [NEG] [PCT] [MS] [MR] [MC].
    Keys(KeysArgs),

    /// Pretty-print a JSONL session log
    Session(SessionArgs),
}

/// Arguments for the tui command
#[derive(Parser, Debug)]
pub struct TuiArgs {
    /// Keypad layout (overrides the config file)
    #[arg(short, long)]
    pub layout: Option<LayoutArg>,
}

/// Arguments for the keys command
#[derive(Parser, Debug)]
pub struct KeysArgs {
    /// Key script, e.g. "5+3+2=" or "12[MS][C][MR]"
    pub script: String,

    /// Output format
    #[arg(short, long, default_value = "text")]
    pub format: KeysFormat,
}

/// Arguments for the session command
#[derive(Parser, Debug)]
pub struct SessionArgs {
    /// Session file (one JSON object per line)
    pub file: PathBuf,
}

/// Output format for the keys command
#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum KeysFormat {
    /// Final display text only
    #[default]
    Text,
    /// Display, state, memory and tape as JSON
    Json,
}

/// Keypad layout argument
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum LayoutArg {
    /// C ± % ÷ across the top
    Standard,
    /// MC MR MS C across the top
    Memory,
}

impl From<LayoutArg> for KeypadLayout {
    fn from(arg: LayoutArg) -> Self {
        match arg {
            LayoutArg::Standard => Self::Standard,
            LayoutArg::Memory => Self::Memory,
        }
    }
}

/// Color argument
#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ColorArg {
    /// Use colors when output is a terminal
    #[default]
    Auto,
    /// Always use colors
    Always,
    /// Never use colors
    Never,
}

impl From<ColorArg> for ColorChoice {
    fn from(arg: ColorArg) -> Self {
        match arg {
            ColorArg::Auto => Self::Auto,
            ColorArg::Always => Self::Always,
            ColorArg::Never => Self::Never,
        }
    }
}
