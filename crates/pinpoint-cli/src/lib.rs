//! Pinpoint CLI Library
//!
//! Command-line front end for the Pinpoint locator engine: loads an HTML
//! file, resolves the element to inspect and renders ranked locators or its
//! ARIA snapshot as text or JSON.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::format_push_string)] // String building is clear and correct
#![allow(clippy::missing_errors_doc)] // Error types are self-documenting

mod commands;
mod config;
mod error;
pub mod handlers;
mod logging;
mod output;

pub use commands::{AriaArgs, Cli, ColorArg, Commands, ConfigArgs, FormatArg, InspectArgs};
pub use config::{load_engine_config, CliConfig, ColorChoice, Verbosity};
pub use error::{CliError, CliResult};
pub use logging::init_logging;
pub use output::{render_inspection, render_snapshot, OutputFormat};
