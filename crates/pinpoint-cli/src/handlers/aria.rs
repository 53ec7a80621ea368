//! Aria command handler

use pinpoint::LocatorEngine;

use super::{load_page, resolve_target};
use crate::commands::AriaArgs;
use crate::config::CliConfig;
use crate::error::CliResult;
use crate::output::render_snapshot;

/// Execute the aria command
pub fn execute_aria(config: &CliConfig, args: &AriaArgs) -> CliResult<String> {
    let page = load_page(&args.html)?;
    let document = page.document();
    let element = resolve_target(&document, &args.target)?;
    let snapshot = LocatorEngine::new(config.engine.clone()).aria_snapshot(&element, &document)?;
    render_snapshot(&snapshot, args.format.into(), config.color.should_color())
}
