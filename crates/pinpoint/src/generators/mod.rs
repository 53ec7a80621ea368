//! Strategy generators.
//!
//! Each generator inspects one element, validates uniqueness with live
//! queries against the owning document and returns zero or more scored
//! candidates. Query failures never escape a generator: it degrades to a
//! conservative fallback carrying a warning. The only error is a
//! precondition violation (an element that is not part of the document).

mod aria;
mod attribute;
mod css;
mod xpath;

pub use aria::{generate_all_aria_strategies, generate_aria_locator, AriaGenerator, ARIA_PRIORITY};
pub use attribute::{ClassGenerator, IdGenerator, NameGenerator, TagGenerator};
pub use css::CssGenerator;
pub use xpath::{absolute_xpath, XPathGenerator};

use tracing::warn;

use crate::dom::{css_string, is_css_identifier, DomDocument, DomElement};
use crate::locator::LocatorStrategy;
use crate::result::{PinpointError, PinpointResult};
use crate::scoring::ConfidenceScorer;

/// A locator-generation approach
pub trait LocatorGenerator {
    /// Short generator name used in logs
    fn name(&self) -> &'static str;

    /// Produce scored candidates for `element`
    ///
    /// Returns an empty list when the element offers nothing this strategy can
    /// use, and an error only when `element` is not attached to `document`.
    fn generate<D: DomDocument>(
        &self,
        element: &D::Element,
        document: &D,
        scorer: &ConfidenceScorer,
    ) -> PinpointResult<Vec<LocatorStrategy>>;
}

/// Reject elements that do not belong to `document`
pub fn ensure_attached<D: DomDocument>(element: &D::Element, document: &D) -> PinpointResult<()> {
    if document.contains(element) {
        Ok(())
    } else {
        let tag = element.tag_name();
        warn!(tag = %tag, "element is not attached to the inspected document");
        Err(PinpointError::detached(tag))
    }
}

/// `#id` when the id is a plain identifier, `[id="..."]` otherwise
#[must_use]
pub fn id_selector(id: &str) -> String {
    if is_css_identifier(id) {
        format!("#{id}")
    } else {
        format!("[id={}]", css_string(id))
    }
}

/// `.a.b` from the classes that are plain identifiers, `None` if none are
#[must_use]
pub fn class_selector<S: AsRef<str>>(classes: &[S]) -> Option<String> {
    let parts: Vec<&str> = classes
        .iter()
        .map(AsRef::as_ref)
        .filter(|c| is_css_identifier(c))
        .collect();
    if parts.is_empty() {
        None
    } else {
        Some(parts.iter().map(|c| format!(".{c}")).collect())
    }
}

/// `[name="value"]`
#[must_use]
pub fn attribute_selector(name: &str, value: &str) -> String {
    format!("[{name}={}]", css_string(value))
}
