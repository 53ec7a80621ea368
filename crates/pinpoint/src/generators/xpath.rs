//! XPath strategy.
//!
//! Tiers, in priority order: id predicate, attribute predicate, class
//! predicate (`contains()` joined with `and`), text predicate for buttons and
//! links, parent-qualified position, absolute path. The first tier holding a
//! unique expression wins; within a tier the shortest unique expression is
//! preferred.

use tracing::{debug, warn};

use super::{ensure_attached, LocatorGenerator};
use crate::config::EngineConfig;
use crate::dom::{normalize_space, xpath_string, DomDocument, DomElement, DomError};
use crate::locator::{LocatorStrategy, LocatorType};
use crate::patterns::{is_text_bearing, TEST_ATTRIBUTES};
use crate::result::PinpointResult;
use crate::scoring::{matches_only, ConfidenceScorer};

/// Attributes tried by the attribute-predicate tier after test hooks
const PREDICATE_ATTRIBUTES: &[&str] = &["name", "aria-label", "placeholder", "title", "alt", "for", "href"];

/// XPath strategy generator
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct XPathGenerator {
    max_text_length: usize,
}

impl Default for XPathGenerator {
    fn default() -> Self {
        Self::new(EngineConfig::default().max_text_predicate_length)
    }
}

impl XPathGenerator {
    /// Create a generator using text predicates up to `max_text_length` chars
    #[must_use]
    pub const fn new(max_text_length: usize) -> Self {
        Self { max_text_length }
    }

    /// Create a generator from engine configuration
    #[must_use]
    pub const fn from_config(config: &EngineConfig) -> Self {
        Self::new(config.max_text_predicate_length)
    }

    /// Candidate tiers in priority order
    pub fn candidate_tiers<E: DomElement>(&self, element: &E) -> Vec<Vec<String>> {
        let tag = element.tag_name();
        let mut tiers = Vec::new();

        tiers.push(
            element
                .id()
                .and_then(|id| xpath_string(&id))
                .map(|id| vec![format!("//*[@id={id}]")])
                .unwrap_or_default(),
        );

        tiers.push(
            TEST_ATTRIBUTES
                .iter()
                .chain(PREDICATE_ATTRIBUTES)
                .filter_map(|attr| {
                    let value = element.attribute(attr).filter(|v| !v.is_empty())?;
                    Some(format!("//{tag}[@{attr}={}]", xpath_string(&value)?))
                })
                .collect(),
        );

        tiers.push(
            class_predicate(&tag, &element.class_list())
                .into_iter()
                .collect(),
        );

        tiers.push(self.text_predicate(element).into_iter().collect());

        tiers.push(vec![positional_path(element)]);

        tiers
    }

    fn text_predicate<E: DomElement>(&self, element: &E) -> Option<String> {
        let tag = element.tag_name();
        if !is_text_bearing(&tag) {
            return None;
        }
        let text = normalize_space(&element.text_content());
        if text.is_empty() || text.chars().count() > self.max_text_length {
            return None;
        }
        Some(format!("//{tag}[normalize-space(.)={}]", xpath_string(&text)?))
    }

    /// Drop classes from a class predicate while it stays unique
    fn minimize_classes<D: DomDocument>(
        &self,
        element: &D::Element,
        document: &D,
    ) -> Result<Option<String>, DomError> {
        let tag = element.tag_name();
        let mut classes = element.class_list();
        let Some(full) = class_predicate(&tag, &classes) else {
            return Ok(None);
        };
        if !matches_only(document, LocatorType::Xpath, &full, element)? {
            return Ok(None);
        }
        let mut i = 0;
        while i < classes.len() && classes.len() > 1 {
            let mut fewer = classes.clone();
            fewer.remove(i);
            match class_predicate(&tag, &fewer) {
                Some(expr) if matches_only(document, LocatorType::Xpath, &expr, element)? => {
                    classes = fewer;
                }
                _ => i += 1,
            }
        }
        Ok(class_predicate(&tag, &classes))
    }
}

impl LocatorGenerator for XPathGenerator {
    fn name(&self) -> &'static str {
        "xpath"
    }

    fn generate<D: DomDocument>(
        &self,
        element: &D::Element,
        document: &D,
        scorer: &ConfidenceScorer,
    ) -> PinpointResult<Vec<LocatorStrategy>> {
        ensure_attached(element, document)?;
        let mut failure: Option<DomError> = None;

        for (tier, mut candidates) in self.candidate_tiers(element).into_iter().enumerate() {
            if tier == 2 {
                match self.minimize_classes(element, document) {
                    Ok(Some(shorter)) => candidates = vec![shorter],
                    Ok(None) => {}
                    Err(e) => {
                        warn!(error = %e, "xpath: class minimisation failed");
                        failure.get_or_insert(e);
                    }
                }
            }
            let mut unique: Vec<String> = Vec::new();
            for candidate in candidates {
                match matches_only(document, LocatorType::Xpath, &candidate, element) {
                    Ok(true) => unique.push(candidate),
                    Ok(false) => debug!(expression = %candidate, "xpath: not unique"),
                    Err(e) => {
                        warn!(expression = %candidate, error = %e, "xpath: evaluation failed");
                        failure.get_or_insert(e);
                    }
                }
            }
            // stable: equal lengths keep tier order
            unique.sort_by_key(String::len);
            if let Some(best) = unique.into_iter().next() {
                debug!(expression = %best, tier, "xpath: unique expression");
                return Ok(vec![scorer.evaluate(LocatorType::Xpath, &best, element, document)]);
            }
        }

        let absolute = absolute_xpath(element);
        Ok(vec![match failure {
            Some(e) => scorer.degraded(LocatorType::Xpath, &absolute, element, document, &e.to_string()),
            None => scorer.evaluate(LocatorType::Xpath, &absolute, element, document),
        }])
    }
}

/// Absolute path from the document root, e.g. `/html/body/div[2]/button`
///
/// Positional predicates are added only where same-tag siblings exist.
#[must_use]
pub fn absolute_xpath<E: DomElement>(element: &E) -> String {
    let mut steps = vec![step(element)];
    let mut current = element.parent_element();
    while let Some(parent) = current {
        steps.push(step(&parent));
        current = parent.parent_element();
    }
    steps.reverse();
    format!("/{}", steps.join("/"))
}

fn step<E: DomElement>(element: &E) -> String {
    let tag = element.tag_name();
    if element.same_tag_sibling_count() > 1 {
        format!("{tag}[{}]", element.sibling_index())
    } else {
        tag
    }
}

/// `//parent/tag[n]`, with the parent identified by id or tag
fn positional_path<E: DomElement>(element: &E) -> String {
    let own = step(element);
    match element.parent_element() {
        Some(parent) => {
            let anchor = parent
                .id()
                .and_then(|id| xpath_string(&id))
                .map_or_else(|| format!("//{}", step(&parent)), |id| format!("//*[@id={id}]"));
            format!("{anchor}/{own}")
        }
        None => format!("/{own}"),
    }
}

fn class_predicate(tag: &str, classes: &[String]) -> Option<String> {
    let parts: Vec<String> = classes
        .iter()
        .filter_map(|c| xpath_string(c).map(|q| format!("contains(@class,{q})")))
        .collect();
    if parts.is_empty() {
        None
    } else {
        Some(format!("//{tag}[{}]", parts.join(" and ")))
    }
}
