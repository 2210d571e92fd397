//! deskcalc: keypad calculator for the terminal
//!
//! ## Usage
//!
//! ```bash
//! deskcalc tui --layout memory        # Interactive keypad
//! deskcalc demo                       # Scripted demonstration
//! deskcalc keys "5+3+2="              # Run a key script
//! deskcalc keys "12[MS][C][MR]" -f json
//! deskcalc session log.jsonl          # Pretty-print a session log
//! ```

use clap::Parser;
use deskcalc_cli::{
    demo, keys, logging, session, tui_runner, CalcConfig, Cli, CliConfig, CliResult, ColorChoice,
    Commands, LogTarget, Reporter, Verbosity,
};
use std::process::ExitCode;

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> CliResult<()> {
    let cli = Cli::parse();

    // Build configuration from the config file and CLI args
    let config = build_config(&cli)?;

    let interactive = matches!(cli.command, Commands::Tui(_));
    logging::init(&config, LogTarget::select(&config, interactive))?;
    tracing::debug!(?config, "configuration loaded");

    let reporter = Reporter::new(config.color.should_color(), config.verbosity.is_quiet());

    match cli.command {
        Commands::Tui(_) => tui_runner::run(&config),
        Commands::Demo => {
            demo::run(&reporter);
            Ok(())
        }
        Commands::Keys(args) => keys::run(&config, &args.script, args.format, &reporter),
        Commands::Session(args) => session::run(&args.file, &reporter),
    }
}

fn build_config(cli: &Cli) -> CliResult<CliConfig> {
    let verbosity = if cli.quiet {
        Verbosity::Quiet
    } else {
        match cli.verbose {
            0 => Verbosity::Normal,
            1 => Verbosity::Verbose,
            _ => Verbosity::Debug,
        }
    };

    let color: ColorChoice = cli.color.into();

    let mut config = CliConfig::new()
        .with_verbosity(verbosity)
        .with_color(color)
        .with_log_file(cli.log_file.clone());

    if let Some(path) = &cli.config {
        config = config.with_file(CalcConfig::load(path)?);
    }

    // Flags override the config file
    if let Commands::Tui(args) = &cli.command {
        if let Some(layout) = args.layout {
            config = config.with_layout(layout.into());
        }
    }

    Ok(config)
}
