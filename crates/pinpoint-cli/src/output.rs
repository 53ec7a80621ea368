//! Output formatting

use console::style;
use pinpoint::{AriaSnapshot, LocatorData, LocatorStrategy};
use serde::{Deserialize, Serialize};

use crate::error::CliResult;

/// Output format for results
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum OutputFormat {
    /// Human-readable text
    #[default]
    Text,
    /// JSON output
    Json,
}

/// Render an inspection record
///
/// With `best_only` the JSON form is the single top strategy (or `null`).
pub fn render_inspection(
    data: &LocatorData,
    format: OutputFormat,
    use_color: bool,
    best_only: bool,
) -> CliResult<String> {
    match format {
        OutputFormat::Json if best_only => Ok(serde_json::to_string_pretty(&data.best())?),
        OutputFormat::Json => Ok(serde_json::to_string_pretty(data)?),
        OutputFormat::Text if best_only => Ok(data
            .best()
            .map_or_else(|| "no locator found".to_string(), |s| s.selector.clone())),
        OutputFormat::Text => Ok(inspection_text(data, use_color)),
    }
}

fn inspection_text(data: &LocatorData, use_color: bool) -> String {
    let info = &data.element_info;
    let mut out = format!("<{}> {}\n", info.tag_name, info.xpath);
    if data.strategies.is_empty() {
        out.push_str("  no locator found\n");
        return out;
    }
    for (rank, strategy) in data.strategies.iter().enumerate() {
        out.push_str(&format!(
            "{:>3}. {:>3}  {:<6} {}{}\n",
            rank + 1,
            score_label(strategy.score(), use_color),
            strategy.locator_type.as_str(),
            strategy.selector,
            flags(strategy),
        ));
        out.push_str(&format!("          {}\n", strategy.explanation));
        for warning in &strategy.confidence.warnings {
            let line = if use_color {
                style(format!("! {warning}")).yellow().to_string()
            } else {
                format!("! {warning}")
            };
            out.push_str(&format!("          {line}\n"));
        }
    }
    out
}

fn flags(strategy: &LocatorStrategy) -> String {
    let mut parts = Vec::new();
    if strategy.is_unique {
        parts.push("unique");
    }
    if strategy.is_stable {
        parts.push("stable");
    }
    if parts.is_empty() {
        String::new()
    } else {
        format!("  [{}]", parts.join(", "))
    }
}

fn score_label(score: u8, use_color: bool) -> String {
    let text = format!("{score:>3}");
    if !use_color {
        return text;
    }
    match score {
        80..=100 => style(text).green().bold().to_string(),
        50..=79 => style(text).yellow().to_string(),
        _ => style(text).red().to_string(),
    }
}

/// Render an ARIA snapshot
pub fn render_snapshot(snapshot: &AriaSnapshot, format: OutputFormat, use_color: bool) -> CliResult<String> {
    if format == OutputFormat::Json {
        return Ok(serde_json::to_string_pretty(snapshot)?);
    }
    let heading = if use_color {
        style(&snapshot.element).cyan().bold().to_string()
    } else {
        snapshot.element.clone()
    };
    let mut out = format!("{heading}\n");
    out.push_str(&format!("  role:        {}\n", or_dash(&snapshot.role)));
    out.push_str(&format!("  name:        {}\n", or_dash(&snapshot.accessible_name)));
    out.push_str(&format!("  description: {}\n", or_dash(&snapshot.accessible_description)));
    let states: Vec<&str> = snapshot.states.iter().map(String::as_str).collect();
    out.push_str(&format!("  states:      {}\n", or_dash(&states.join(", "))));
    out.push_str(&format!("  hierarchy:   {}\n", or_dash(&snapshot.hierarchy.join(" < "))));
    for (name, value) in &snapshot.aria_attributes {
        out.push_str(&format!("  {name}=\"{value}\"\n"));
    }
    Ok(out)
}

fn or_dash(value: &str) -> &str {
    if value.is_empty() {
        "-"
    } else {
        value
    }
}
