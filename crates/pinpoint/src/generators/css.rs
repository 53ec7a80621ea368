//! CSS selector strategy.
//!
//! Priority cascade, first unique candidate wins:
//!
//! 1. `#id`
//! 2. a distinguishing attribute (test hooks on any element, `name` and
//!    `placeholder` on form-like elements)
//! 3. the full class list
//! 4. an ancestor-qualified path (`nav.main > ul > li.item`), walking up to a
//!    depth cap and finally adding `:nth-of-type()`
//! 5. the bare tag name

use tracing::{debug, warn};

use super::{attribute_selector, class_selector, ensure_attached, id_selector, LocatorGenerator};
use crate::config::EngineConfig;
use crate::dom::{DomDocument, DomElement, DomError, DomResult};
use crate::locator::{LocatorStrategy, LocatorType};
use crate::patterns::{classify_name, is_auto_generated, is_form_like, TEST_ATTRIBUTES};
use crate::result::PinpointResult;
use crate::scoring::{matches_only, ConfidenceScorer};

/// Attributes that identify form controls
const FORM_ATTRIBUTES: &[&str] = &["name", "placeholder"];

/// Stable classes kept per hierarchy segment
const MAX_SEGMENT_CLASSES: usize = 2;

/// CSS strategy generator
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CssGenerator {
    max_ancestor_depth: usize,
}

impl Default for CssGenerator {
    fn default() -> Self {
        Self::new(EngineConfig::default().max_ancestor_depth)
    }
}

impl CssGenerator {
    /// Create a generator walking at most `max_ancestor_depth` ancestors
    #[must_use]
    pub const fn new(max_ancestor_depth: usize) -> Self {
        Self { max_ancestor_depth }
    }

    /// Create a generator from engine configuration
    #[must_use]
    pub const fn from_config(config: &EngineConfig) -> Self {
        Self::new(config.max_ancestor_depth)
    }

    /// Direct candidates in priority order
    pub fn direct_candidates<E: DomElement>(&self, element: &E) -> Vec<String> {
        let tag = element.tag_name();
        let mut out = Vec::new();
        if let Some(id) = element.id() {
            out.push(id_selector(&id));
        }
        for attr in TEST_ATTRIBUTES {
            if let Some(value) = element.attribute(attr).filter(|v| !v.is_empty()) {
                out.push(attribute_selector(attr, &value));
            }
        }
        if is_form_like(&tag) {
            for attr in FORM_ATTRIBUTES {
                if let Some(value) = element.attribute(attr).filter(|v| !v.is_empty()) {
                    out.push(format!("{tag}{}", attribute_selector(attr, &value)));
                }
            }
        }
        if let Some(classes) = class_selector(&element.class_list()) {
            out.push(classes);
        }
        out
    }

    /// Walk ancestors until the path is unique
    pub fn hierarchical_selector<D: DomDocument>(
        &self,
        element: &D::Element,
        document: &D,
    ) -> DomResult<Option<String>> {
        let mut path: Vec<(String, D::Element)> = vec![(segment(element), element.clone())];
        let mut current = element.parent_element();
        let mut depth = 0;

        while let Some(ancestor) = current {
            if depth >= self.max_ancestor_depth {
                break;
            }
            let (seg, anchored) = ancestor_segment(&ancestor);
            path.insert(0, (seg, ancestor.clone()));
            let selector = join(&path);
            if matches_only(document, LocatorType::Css, &selector, element)? {
                return Ok(Some(selector));
            }
            if anchored {
                break;
            }
            current = ancestor.parent_element();
            depth += 1;
        }

        let positioned: Vec<(String, D::Element)> = path
            .into_iter()
            .map(|(seg, el)| {
                if seg.starts_with('#') || seg.starts_with("[id=") || el.same_tag_sibling_count() < 2 {
                    (seg, el)
                } else {
                    (format!("{seg}:nth-of-type({})", el.sibling_index()), el)
                }
            })
            .collect();
        let selector = join(&positioned);
        if matches_only(document, LocatorType::Css, &selector, element)? {
            return Ok(Some(selector));
        }
        Ok(None)
    }
}

impl LocatorGenerator for CssGenerator {
    fn name(&self) -> &'static str {
        "css"
    }

    fn generate<D: DomDocument>(
        &self,
        element: &D::Element,
        document: &D,
        scorer: &ConfidenceScorer,
    ) -> PinpointResult<Vec<LocatorStrategy>> {
        ensure_attached(element, document)?;
        let tag = element.tag_name();
        let mut failure: Option<DomError> = None;

        for candidate in self.direct_candidates(element) {
            match matches_only(document, LocatorType::Css, &candidate, element) {
                Ok(true) => {
                    debug!(selector = %candidate, "css: unique direct selector");
                    return Ok(vec![scorer.evaluate(LocatorType::Css, &candidate, element, document)]);
                }
                Ok(false) => debug!(selector = %candidate, "css: not unique"),
                Err(e) => {
                    warn!(selector = %candidate, error = %e, "css: query failed");
                    failure.get_or_insert(e);
                }
            }
        }

        match self.hierarchical_selector(element, document) {
            Ok(Some(selector)) => {
                debug!(selector = %selector, "css: unique hierarchical selector");
                return Ok(vec![scorer.evaluate(LocatorType::Css, &selector, element, document)]);
            }
            Ok(None) => debug!("css: hierarchy did not reach uniqueness"),
            Err(e) => {
                warn!(error = %e, "css: hierarchy query failed");
                failure.get_or_insert(e);
            }
        }

        Ok(vec![match failure {
            Some(e) => scorer.degraded(LocatorType::Css, &tag, element, document, &e.to_string()),
            None => scorer.evaluate(LocatorType::Css, &tag, element, document),
        }])
    }
}

/// Selector segment for the inspected element itself
fn segment<E: DomElement>(element: &E) -> String {
    let tag = element.tag_name();
    let stable: Vec<String> = stable_classes(element);
    match class_selector(&stable) {
        Some(classes) => format!("{tag}{classes}"),
        None => tag,
    }
}

/// Selector segment for an ancestor, and whether it anchors the path
fn ancestor_segment<E: DomElement>(element: &E) -> (String, bool) {
    if let Some(id) = element.id().filter(|id| !is_auto_generated(id)) {
        return (id_selector(&id), true);
    }
    (segment(element), false)
}

fn stable_classes<E: DomElement>(element: &E) -> Vec<String> {
    element
        .class_list()
        .into_iter()
        .filter(|c| !classify_name(c).is_fragile())
        .take(MAX_SEGMENT_CLASSES)
        .collect()
}

fn join<E>(path: &[(String, E)]) -> String {
    path.iter()
        .map(|(seg, _)| seg.as_str())
        .collect::<Vec<_>>()
        .join(" > ")
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::dom::HtmlPage;

    const PAGE: &str = r#"
        <html><body>
          <div id="app">
            <nav class="main-nav">
              <ul class="menu">
                <li class="item">Home</li>
                <li class="item active">About</li>
              </ul>
            </nav>
            <section>
              <ul class="menu">
                <li class="item">Other</li>
              </ul>
            </section>
            <form>
              <input name="email" placeholder="Email">
              <input name="email" placeholder="Confirm email">
              <button data-testid="save" class="btn">Save</button>
              <button class="btn">Cancel</button>
              <button id="submit-btn">Submit</button>
            </form>
            <p>one</p><p>two</p>
          </div>
        </body></html>
    "#;

    fn generate(html: &HtmlPage, css: &str) -> LocatorStrategy {
        let doc = html.document();
        let el = doc.query_selector(css).unwrap().unwrap();
        let mut out = CssGenerator::default()
            .generate(&el, &doc, &ConfidenceScorer::default())
            .unwrap();
        assert_eq!(out.len(), 1);
        out.remove(0)
    }

    mod cascade_tests {
        use super::*;

        #[test]
        fn test_id_first() {
            let page = HtmlPage::parse(PAGE);
            let s = generate(&page, "#submit-btn");
            assert_eq!(s.selector, "#submit-btn");
            assert_eq!(s.locator_type, LocatorType::Css);
            assert!(s.is_unique);
        }

        #[test]
        fn test_test_attribute_second() {
            let page = HtmlPage::parse(PAGE);
            let s = generate(&page, "[data-testid]");
            assert_eq!(s.selector, "[data-testid=\"save\"]");
            assert!(s.is_unique);
        }

        #[test]
        fn test_form_attribute_falls_through_to_placeholder() {
            let page = HtmlPage::parse(PAGE);
            let s = generate(&page, "input[placeholder=\"Confirm email\"]");
            assert_eq!(s.selector, "input[placeholder=\"Confirm email\"]");
            assert!(s.is_unique);
        }

        #[test]
        fn test_hierarchy_when_direct_selectors_ambiguous() {
            let page = HtmlPage::parse(PAGE);
            let s = generate(&page, "section li");
            assert_eq!(s.selector, "section > ul.menu > li.item");
            assert!(s.is_unique);
        }

        #[test]
        fn test_hierarchy_adds_nth_of_type() {
            let page = HtmlPage::parse(PAGE);
            let s = generate(&page, "nav li.item:not(.active)");
            assert!(s.selector.contains(":nth-of-type(1)"), "{}", s.selector);
            assert!(s.is_unique);
            let doc = page.document();
            assert_eq!(doc.count_css(&s.selector).unwrap(), 1);
        }

        #[test]
        fn test_hierarchy_anchors_on_ancestor_id() {
            let page = HtmlPage::parse(PAGE);
            let s = generate(&page, "p");
            assert!(s.selector.starts_with("#app > p"), "{}", s.selector);
            assert!(s.is_unique);
        }
    }

    mod candidate_tests {
        use super::*;

        #[test]
        fn test_direct_candidates_order() {
            let page = HtmlPage::parse(PAGE);
            let doc = page.document();
            let el = doc.query_selector("[data-testid]").unwrap().unwrap();
            let c = CssGenerator::default().direct_candidates(&el);
            assert_eq!(c, vec!["[data-testid=\"save\"]".to_string(), ".btn".to_string()]);
        }

        #[test]
        fn test_depth_cap_limits_walk() {
            let page = HtmlPage::parse(PAGE);
            let doc = page.document();
            let el = doc.query_selector("section li").unwrap().unwrap();
            let shallow = CssGenerator::new(0).hierarchical_selector(&el, &doc).unwrap();
            assert!(shallow.is_none());
        }

        #[test]
        fn test_detached_element_is_error() {
            let page = HtmlPage::parse(PAGE);
            let other = HtmlPage::parse(PAGE);
            let foreign = other.document().element_by_id("submit-btn").unwrap();
            let result = CssGenerator::default().generate(
                &foreign,
                &page.document(),
                &ConfidenceScorer::default(),
            );
            assert!(result.is_err());
        }
    }

    mod degraded_tests {
        use super::*;
        use crate::dom::fake::FlakyDocument;

        #[test]
        fn test_failing_queries_fall_back_to_tag() {
            let page = HtmlPage::parse(PAGE);
            let el = page.document().element_by_id("submit-btn").unwrap();
            let doc = FlakyDocument::new(page.document()).failing_css();
            let scorer = ConfidenceScorer::default();

            let out = CssGenerator::default().generate(&el, &doc, &scorer).unwrap();
            assert_eq!(out.len(), 1);
            let s = &out[0];
            assert_eq!(s.selector, "button");
            assert!(!s.is_unique);
            assert!(!s.is_stable);
            assert!(s.confidence.factors.iter().any(|f| f.name == "degraded"));
            assert!(s.confidence.warnings.iter().any(|w| w.contains("Query failed")));

            let plain = scorer.evaluate(LocatorType::Css, "button", &el, &doc);
            assert_eq!(s.score(), plain.score().saturating_sub(25));
        }

        #[test]
        fn test_xpath_failure_does_not_touch_css() {
            let page = HtmlPage::parse(PAGE);
            let el = page.document().element_by_id("submit-btn").unwrap();
            let doc = FlakyDocument::new(page.document()).failing_xpath();
            let out = CssGenerator::default()
                .generate(&el, &doc, &ConfidenceScorer::default())
                .unwrap();
            assert_eq!(out[0].selector, "#submit-btn");
            assert!(out[0].is_unique);
        }
    }
}
