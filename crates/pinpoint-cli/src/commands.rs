//! CLI command definitions using clap

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Pinpoint: ranked, scored locators for elements of an HTML page
#[derive(Parser, Debug)]
#[command(name = "pinpoint")]
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

    /// Engine configuration file (YAML)
    #[arg(long, global = true, env = "PINPOINT_CONFIG")]
    pub config: Option<PathBuf>,

    /// Subcommand to run
    #[command(subcommand)]
    pub command: Commands,
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Generate ranked locators for an element
    Inspect(InspectArgs),

    /// Show the accessibility snapshot of an element
    Aria(AriaArgs),

    /// Show engine configuration
    Config(ConfigArgs),
}

/// Arguments for the inspect command
#[derive(Parser, Debug)]
pub struct InspectArgs {
    /// HTML file to load
    pub html: PathBuf,

    /// CSS selector picking the element to inspect (first match)
    #[arg(short, long)]
    pub target: String,

    /// Page URL recorded with the result
    #[arg(long, default_value = "")]
    pub url: String,

    /// Output format
    #[arg(short, long, default_value = "text")]
    pub format: FormatArg,

    /// Print only the highest-ranked locator
    #[arg(long)]
    pub best: bool,

    /// Append the result to a JSON history file
    #[arg(long)]
    pub history: Option<PathBuf>,
}

/// Arguments for the aria command
#[derive(Parser, Debug)]
pub struct AriaArgs {
    /// HTML file to load
    pub html: PathBuf,

    /// CSS selector picking the element to describe (first match)
    #[arg(short, long)]
    pub target: String,

    /// Output format
    #[arg(short, long, default_value = "text")]
    pub format: FormatArg,
}

/// Arguments for the config command
#[derive(Parser, Debug)]
pub struct ConfigArgs {
    /// Print built-in defaults instead of the effective configuration
    #[arg(long)]
    pub defaults: bool,
}

/// Color argument
#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ColorArg {
    /// Automatic color detection
    #[default]
    Auto,
    /// Always use colors
    Always,
    /// Never use colors
    Never,
}

impl From<ColorArg> for crate::config::ColorChoice {
    fn from(arg: ColorArg) -> Self {
        match arg {
            ColorArg::Auto => Self::Auto,
            ColorArg::Always => Self::Always,
            ColorArg::Never => Self::Never,
        }
    }
}

/// Output format argument
#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum FormatArg {
    /// Human-readable text
    #[default]
    Text,
    /// JSON
    Json,
}

impl From<FormatArg> for crate::output::OutputFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Text => Self::Text,
            FormatArg::Json => Self::Json,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    mod cli_tests {
        use super::*;

        #[test]
        fn test_parse_inspect() {
            let cli = Cli::try_parse_from([
                "pinpoint", "inspect", "page.html", "--target", "#save", "--format", "json", "--best",
            ])
            .unwrap();
            match cli.command {
                Commands::Inspect(args) => {
                    assert_eq!(args.html, PathBuf::from("page.html"));
                    assert_eq!(args.target, "#save");
                    assert_eq!(args.format, FormatArg::Json);
                    assert!(args.best);
                    assert!(args.history.is_none());
                }
                other => panic!("unexpected command {other:?}"),
            }
        }

        #[test]
        fn test_global_flags() {
            let cli = Cli::try_parse_from([
                "pinpoint", "-vv", "--color", "never", "aria", "page.html", "-t", "li",
            ])
            .unwrap();
            assert_eq!(cli.verbose, 2);
            assert_eq!(cli.color, ColorArg::Never);
            assert!(matches!(cli.command, Commands::Aria(_)));
        }

        #[test]
        fn test_target_is_required() {
            assert!(Cli::try_parse_from(["pinpoint", "inspect", "page.html"]).is_err());
        }

        #[test]
        fn test_config_defaults_flag() {
            let cli = Cli::try_parse_from(["pinpoint", "config", "--defaults"]).unwrap();
            assert!(matches!(cli.command, Commands::Config(ConfigArgs { defaults: true })));
        }
    }
}
