//! Command handlers - extracted from main.rs for testability
//!
//! Each handler returns the text to print so it can be tested without
//! capturing stdout.

pub mod aria;
pub mod config;
pub mod inspect;

pub use aria::execute_aria;
pub use config::execute_config;
pub use inspect::execute_inspect;

use std::path::Path;

use pinpoint::{DomDocument, HtmlDocument, HtmlElement, HtmlPage};
use tracing::debug;

use crate::error::{CliError, CliResult};

/// Read and parse an HTML file
pub fn load_page(path: &Path) -> CliResult<HtmlPage> {
    let source = std::fs::read_to_string(path)?;
    debug!(path = %path.display(), bytes = source.len(), "loaded page");
    Ok(HtmlPage::parse(&source))
}

/// First element matching the target selector
pub fn resolve_target<'a>(document: &HtmlDocument<'a>, selector: &str) -> CliResult<HtmlElement<'a>> {
    let matches = document
        .query_selector_all(selector)
        .map_err(pinpoint::PinpointError::from)?;
    if matches.len() > 1 {
        debug!(selector, count = matches.len(), "target matches several elements, using the first");
    }
    matches
        .into_iter()
        .next()
        .ok_or_else(|| CliError::target_not_found(selector))
}
