//! Pinpoint CLI: ranked locators for elements of an HTML page
//!
//! ## Usage
//!
//! ```bash
//! pinpoint inspect page.html --target "form button"       # Ranked locators
//! pinpoint inspect page.html -t "#save" --best             # Best locator only
//! pinpoint inspect page.html -t li --history history.json  # Append to history
//! pinpoint aria page.html --target "nav li" --format json  # ARIA snapshot
//! pinpoint config --defaults                               # Default engine config
//! ```

use clap::Parser;
use pinpoint_cli::{
    handlers::{execute_aria, execute_config, execute_inspect},
    init_logging, load_engine_config, Cli, CliConfig, CliResult, ColorChoice, Commands, Verbosity,
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

    let config = build_config(&cli)?;
    init_logging(config.verbosity);

    let output = match &cli.command {
        Commands::Inspect(args) => execute_inspect(&config, args)?,
        Commands::Aria(args) => execute_aria(&config, args)?,
        Commands::Config(args) => execute_config(&config, args)?,
    };

    if !config.verbosity.is_quiet() || matches!(cli.command, Commands::Config(_)) {
        println!("{}", output.trim_end());
    }
    Ok(())
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

    let engine = load_engine_config(cli.config.as_deref())?;

    Ok(CliConfig::new()
        .with_verbosity(verbosity)
        .with_color(color)
        .with_engine(engine))
}
