//! ARIA attribute strategy.
//!
//! One candidate per ARIA attribute present on the element, visited in
//! [`ARIA_PRIORITY`] order and then the remaining `aria-*` attributes by name.
//! A bare `[attr="value"]` selector is qualified with the tag name when the
//! bare form is ambiguous. State attributes (`aria-expanded`, `aria-hidden`,
//! ...) still yield candidates but score as unstable.

use tracing::debug;

use super::{attribute_selector, ensure_attached, LocatorGenerator};
use crate::dom::{DomDocument, DomElement};
use crate::locator::{LocatorStrategy, LocatorType};
use crate::result::PinpointResult;
use crate::scoring::{matches_only, ConfidenceScorer};

/// ARIA attributes in descending identification strength
pub const ARIA_PRIORITY: &[&str] = &["aria-label", "role", "aria-labelledby", "aria-describedby"];

/// ARIA strategy generator
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AriaGenerator;

impl AriaGenerator {
    /// `(attribute, value)` pairs in the order candidates are built
    pub fn qualifying_attributes<E: DomElement>(element: &E) -> Vec<(String, String)> {
        let mut out: Vec<(String, String)> = ARIA_PRIORITY
            .iter()
            .filter_map(|attr| {
                element
                    .attribute(attr)
                    .filter(|v| !v.trim().is_empty())
                    .map(|v| ((*attr).to_string(), v))
            })
            .collect();

        let mut rest: Vec<(String, String)> = element
            .attributes()
            .into_iter()
            .filter(|(name, value)| {
                name.starts_with("aria-")
                    && !ARIA_PRIORITY.contains(&name.as_str())
                    && !value.trim().is_empty()
            })
            .collect();
        rest.sort_by(|a, b| a.0.cmp(&b.0));
        out.extend(rest);
        out
    }

    fn selector_for<D: DomDocument>(
        element: &D::Element,
        document: &D,
        attribute: &str,
        value: &str,
    ) -> String {
        let bare = attribute_selector(attribute, value);
        match matches_only(document, LocatorType::Aria, &bare, element) {
            Ok(true) => bare,
            Ok(false) => format!("{}{bare}", element.tag_name()),
            // the scorer reports the failure on the bare selector
            Err(_) => bare,
        }
    }
}

impl LocatorGenerator for AriaGenerator {
    fn name(&self) -> &'static str {
        "aria"
    }

    fn generate<D: DomDocument>(
        &self,
        element: &D::Element,
        document: &D,
        scorer: &ConfidenceScorer,
    ) -> PinpointResult<Vec<LocatorStrategy>> {
        ensure_attached(element, document)?;
        let mut out: Vec<LocatorStrategy> = Self::qualifying_attributes(element)
            .into_iter()
            .map(|(attribute, value)| {
                let selector = Self::selector_for(element, document, &attribute, &value);
                debug!(attribute = %attribute, selector = %selector, "aria: candidate");
                scorer.evaluate(LocatorType::Aria, &selector, element, document)
            })
            .collect();
        out.sort_by(|a, b| b.score().cmp(&a.score()));
        Ok(out)
    }
}

/// Every ARIA candidate for `element`, best first
pub fn generate_all_aria_strategies<D: DomDocument>(
    element: &D::Element,
    document: &D,
    scorer: &ConfidenceScorer,
) -> PinpointResult<Vec<LocatorStrategy>> {
    AriaGenerator.generate(element, document, scorer)
}

/// The best ARIA candidate, `None` when the element has no ARIA attributes
pub fn generate_aria_locator<D: DomDocument>(
    element: &D::Element,
    document: &D,
    scorer: &ConfidenceScorer,
) -> PinpointResult<Option<LocatorStrategy>> {
    Ok(generate_all_aria_strategies(element, document, scorer)?
        .into_iter()
        .next())
}
