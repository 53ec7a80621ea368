//! Capture of element snapshots and result records.

use std::collections::BTreeMap;

use chrono::Utc;
use tracing::debug;
use uuid::Uuid;

use crate::config::EngineConfig;
use crate::dom::{normalize_space, DomElement};
use crate::generators::absolute_xpath;
use crate::locator::{ElementInfo, ElementPosition, LocatorData, LocatorStrategy};
use crate::ranking::compare_strategies;

impl ElementInfo {
    /// Snapshot an element
    ///
    /// Text is whitespace-normalized and truncated to
    /// `config.max_text_length` characters. Without layout the position is
    /// zeroed.
    pub fn capture<E: DomElement>(element: &E, config: &EngineConfig) -> Self {
        let text: String = normalize_space(&element.text_content())
            .chars()
            .take(config.max_text_length)
            .collect();

        let position = match element.bounding_rect() {
            Ok(rect) => ElementPosition {
                x: rect.x,
                y: rect.y,
                width: rect.width,
                height: rect.height,
                top: rect.top(),
                left: rect.left(),
                bottom: rect.bottom(),
                right: rect.right(),
            },
            Err(e) => {
                debug!(error = %e, "no geometry available, using zeroed position");
                ElementPosition::default()
            }
        };

        Self {
            tag_name: element.tag_name(),
            text_content: text,
            attributes: element.attributes().into_iter().collect::<BTreeMap<_, _>>(),
            position,
            xpath: absolute_xpath(element),
        }
    }
}

impl LocatorData {
    /// Create a record with a fresh id and the current time
    #[must_use]
    pub fn new(url: impl Into<String>, element_info: ElementInfo, strategies: Vec<LocatorStrategy>) -> Self {
        Self {
            id: Uuid::new_v4(),
            timestamp: Utc::now(),
            url: url.into(),
            element_info,
            strategies,
            screenshot: None,
        }
    }

    /// Attach a screenshot reference
    #[must_use]
    pub fn with_screenshot(mut self, screenshot: impl Into<String>) -> Self {
        self.screenshot = Some(screenshot.into());
        self
    }

    /// Highest-ranked strategy
    #[must_use]
    pub fn best(&self) -> Option<&LocatorStrategy> {
        self.strategies
            .iter()
            .enumerate()
            .min_by(|(ia, a), (ib, b)| compare_strategies(a, b).then(ia.cmp(ib)))
            .map(|(_, s)| s)
    }
}
