//! Inspect command handler

use pinpoint::{LocatorEngine, LocatorHistory, LocatorSink};
use tracing::info;

use super::{load_page, resolve_target};
use crate::commands::InspectArgs;
use crate::config::CliConfig;
use crate::error::CliResult;
use crate::output::render_inspection;

/// Execute the inspect command
pub fn execute_inspect(config: &CliConfig, args: &InspectArgs) -> CliResult<String> {
    let page = load_page(&args.html)?;
    let document = page.document();
    let element = resolve_target(&document, &args.target)?;

    let engine = LocatorEngine::new(config.engine.clone());
    let url = if args.url.is_empty() {
        format!("file://{}", args.html.display())
    } else {
        args.url.clone()
    };
    let data = engine.inspect(&element, &document, &url)?;
    let rendered = render_inspection(&data, args.format.into(), config.color.should_color(), args.best)?;

    if let Some(path) = &args.history {
        let mut history = LocatorHistory::load(path, config.engine.history_limit)?;
        history.receive(data);
        history.save(path)?;
        info!(path = %path.display(), entries = history.len(), "history updated");
    }

    Ok(rendered)
}
