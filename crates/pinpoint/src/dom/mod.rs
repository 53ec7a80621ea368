//! DOM capability layer.
//!
//! Generators, the scorer and the snapshot builder never touch a concrete
//! browser binding. They work against two small traits:
//!
//! - [`DomElement`]: tag name, attribute iteration, text content, bounding
//!   geometry and ancestor traversal
//! - [`DomDocument`]: CSS match queries and ordered XPath evaluation
//!
//! [`HtmlPage`] provides an in-memory implementation backed by `scraper`,
//! used by the CLI and by tests.

#[cfg(test)]
pub(crate) mod fake;
mod html;
mod xpath;

pub use html::{HtmlDocument, HtmlElement, HtmlPage};
pub use xpath::XPathExpr;

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Result type for DOM queries
pub type DomResult<T> = Result<T, DomError>;

/// Errors raised by a DOM backend while answering a query
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomError {
    /// CSS selector could not be parsed
    #[error("Invalid CSS selector `{selector}`: {message}")]
    InvalidSelector {
        /// Offending selector
        selector: String,
        /// Parser message
        message: String,
    },

    /// XPath expression could not be parsed
    #[error("Invalid XPath `{expression}`: {message}")]
    InvalidXPath {
        /// Offending expression
        expression: String,
        /// Parser message
        message: String,
    },

    /// Backend has no layout information
    #[error("Layout information is not available for this document")]
    LayoutUnavailable,

    /// Query failed for another reason
    #[error("Query failed: {message}")]
    QueryFailed {
        /// Error message
        message: String,
    },
}

/// Viewport-relative bounding box of an element
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    /// X coordinate
    pub x: f64,
    /// Y coordinate
    pub y: f64,
    /// Width
    pub width: f64,
    /// Height
    pub height: f64,
}

impl Rect {
    /// Create a new rect
    #[must_use]
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Top edge
    #[must_use]
    pub fn top(&self) -> f64 {
        self.y
    }

    /// Left edge
    #[must_use]
    pub fn left(&self) -> f64 {
        self.x
    }

    /// Bottom edge
    #[must_use]
    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    /// Right edge
    #[must_use]
    pub fn right(&self) -> f64 {
        self.x + self.width
    }
}

/// An element reference in some document
pub trait DomElement: Clone + PartialEq + fmt::Debug {
    /// Lower-case tag name
    fn tag_name(&self) -> String;

    /// Attribute value, if present
    fn attribute(&self, name: &str) -> Option<String>;

    /// All attributes as `(name, value)` pairs in document order
    fn attributes(&self) -> Vec<(String, String)>;

    /// Concatenated text of the element and its descendants
    fn text_content(&self) -> String;

    /// Bounding geometry at the time of the call
    fn bounding_rect(&self) -> DomResult<Rect>;

    /// Parent element, `None` for the document element
    fn parent_element(&self) -> Option<Self>;

    /// Element children in document order
    fn children(&self) -> Vec<Self>;

    /// Non-blank `id` attribute
    fn id(&self) -> Option<String> {
        self.attribute("id").filter(|id| !id.trim().is_empty())
    }

    /// Class tokens in attribute order, duplicates removed
    fn class_list(&self) -> Vec<String> {
        let mut classes: Vec<String> = Vec::new();
        if let Some(value) = self.attribute("class") {
            for token in value.split_whitespace() {
                if !classes.iter().any(|c| c == token) {
                    classes.push(token.to_string());
                }
            }
        }
        classes
    }

    /// Check whether an attribute is present
    fn has_attribute(&self, name: &str) -> bool {
        self.attribute(name).is_some()
    }

    /// Ancestors, nearest first, at most `limit` of them
    fn ancestors(&self, limit: usize) -> Vec<Self> {
        let mut out = Vec::new();
        let mut current = self.parent_element();
        while let Some(parent) = current {
            if out.len() >= limit {
                break;
            }
            current = parent.parent_element();
            out.push(parent);
        }
        out
    }

    /// 1-based position among siblings sharing this element's tag
    fn sibling_index(&self) -> usize {
        let Some(parent) = self.parent_element() else {
            return 1;
        };
        let tag = self.tag_name();
        parent
            .children()
            .into_iter()
            .filter(|c| c.tag_name() == tag)
            .position(|c| c == *self)
            .map_or(1, |p| p + 1)
    }

    /// Number of siblings (including self) sharing this element's tag
    fn same_tag_sibling_count(&self) -> usize {
        let Some(parent) = self.parent_element() else {
            return 1;
        };
        let tag = self.tag_name();
        parent
            .children()
            .into_iter()
            .filter(|c| c.tag_name() == tag)
            .count()
    }
}

/// A document able to answer selector and XPath queries
pub trait DomDocument {
    /// Element type handed out by this document
    type Element: DomElement;

    /// All elements matching a CSS selector, in document order
    fn query_selector_all(&self, selector: &str) -> DomResult<Vec<Self::Element>>;

    /// Ordered node set of elements selected by an XPath expression
    fn evaluate_xpath(&self, expression: &str) -> DomResult<Vec<Self::Element>>;

    /// Whether the element is attached to this document
    fn contains(&self, element: &Self::Element) -> bool;

    /// The document element (`<html>`)
    fn root_element(&self) -> Option<Self::Element>;

    /// First element matching a CSS selector
    fn query_selector(&self, selector: &str) -> DomResult<Option<Self::Element>> {
        Ok(self.query_selector_all(selector)?.into_iter().next())
    }

    /// Number of elements matching a CSS selector
    fn count_css(&self, selector: &str) -> DomResult<usize> {
        Ok(self.query_selector_all(selector)?.len())
    }

    /// Number of elements selected by an XPath expression
    fn count_xpath(&self, expression: &str) -> DomResult<usize> {
        Ok(self.evaluate_xpath(expression)?.len())
    }

    /// Element whose `id` attribute equals `id`
    fn element_by_id(&self, id: &str) -> Option<Self::Element> {
        let selector = format!("[id={}]", css_string(id));
        self.query_selector(&selector).ok().flatten()
    }
}

/// Whether `value` can be written as a bare CSS identifier (`#value`, `.value`)
#[must_use]
pub fn is_css_identifier(value: &str) -> bool {
    let mut chars = value.chars();
    let Some(first) = chars.next() else {
        return false;
    };
    let first_ok = first.is_ascii_alphabetic()
        || first == '_'
        || (first == '-' && chars.clone().next().is_some_and(|c| !c.is_ascii_digit()));
    first_ok && chars.all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}

/// Quote a value as a CSS string literal
#[must_use]
pub fn css_string(value: &str) -> String {
    let mut out = String::with_capacity(value.len() + 2);
    out.push('"');
    for c in value.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\a "),
            _ => out.push(c),
        }
    }
    out.push('"');
    out
}

/// Quote a value as an XPath string literal, `None` if it holds both quote kinds
#[must_use]
pub fn xpath_string(value: &str) -> Option<String> {
    if !value.contains('"') {
        Some(format!("\"{value}\""))
    } else if !value.contains('\'') {
        Some(format!("'{value}'"))
    } else {
        None
    }
}

/// Collapse runs of whitespace and trim, as XPath `normalize-space` does
#[must_use]
pub fn normalize_space(value: &str) -> String {
    value.split_whitespace().collect::<Vec<_>>().join(" ")
}
