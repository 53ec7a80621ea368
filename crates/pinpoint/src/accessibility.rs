//! ARIA snapshot builder.
//!
//! Computes the accessibility description of an element, independently of
//! selector generation:
//!
//! - accessible name: `aria-label`, then `aria-labelledby` targets, then an
//!   associated `<label>`, then text content, then `title`/`alt`/`placeholder`
//! - accessible description: `aria-describedby` targets, then `title` when it
//!   was not already used as the name
//! - role: first token of an explicit `role`, else the implicit role of the tag
//! - states: boolean ARIA/HTML attributes present (ARIA values of `"false"`
//!   do not count)
//! - hierarchy: resolved roles of ancestors, nearest first
//!
//! Missing attributes never fail; absent values are empty.

use std::collections::{BTreeMap, BTreeSet};

use crate::dom::{css_string, normalize_space, DomDocument, DomElement};
use crate::locator::AriaSnapshot;
use crate::patterns::{implicit_role_for, BOOLEAN_STATES};

/// Fallback attributes for the accessible name, in order
const NAME_FALLBACK_ATTRIBUTES: &[&str] = &["title", "alt", "placeholder"];

/// Build the ARIA snapshot of `element`
///
/// `max_depth` bounds the number of ancestors visited for the hierarchy.
pub fn generate_aria_snapshot<D: DomDocument>(
    element: &D::Element,
    document: &D,
    max_depth: usize,
) -> AriaSnapshot {
    let (accessible_name, name_source) = accessible_name(element, document);
    let accessible_description = resolve_references(element, document, "aria-describedby")
        .or_else(|| {
            (name_source != Some("title"))
                .then(|| non_blank(element, "title"))
                .flatten()
        })
        .unwrap_or_default();

    let hierarchy = element
        .ancestors(max_depth)
        .iter()
        .map(resolved_role)
        .filter(|role| !role.is_empty())
        .collect();

    AriaSnapshot {
        element: element_summary(element),
        aria_attributes: aria_attributes(element),
        accessible_name,
        accessible_description,
        role: resolved_role(element),
        states: states(element),
        hierarchy,
    }
}

/// Explicit role (first token) or implicit role, empty when neither applies
pub fn resolved_role<E: DomElement>(element: &E) -> String {
    if let Some(role) = element.attribute("role") {
        if let Some(first) = role.split_whitespace().next() {
            return first.to_ascii_lowercase();
        }
    }
    implicit_role_for(&element.tag_name(), |name| element.attribute(name))
        .unwrap_or_default()
        .to_string()
}

/// `tag#id.class` summary of an element
pub fn element_summary<E: DomElement>(element: &E) -> String {
    let mut out = element.tag_name();
    if let Some(id) = element.id() {
        out.push('#');
        out.push_str(&id);
    }
    for class in element.class_list() {
        out.push('.');
        out.push_str(&class);
    }
    out
}

fn accessible_name<D: DomDocument>(
    element: &D::Element,
    document: &D,
) -> (String, Option<&'static str>) {
    if let Some(label) = non_blank(element, "aria-label") {
        return (label, Some("aria-label"));
    }
    if let Some(text) = resolve_references(element, document, "aria-labelledby") {
        return (text, Some("aria-labelledby"));
    }
    if let Some(text) = associated_label(element, document) {
        return (text, Some("label"));
    }
    let text = normalize_space(&element.text_content());
    if !text.is_empty() {
        return (text, Some("content"));
    }
    for attr in NAME_FALLBACK_ATTRIBUTES {
        if let Some(value) = non_blank(element, attr) {
            return (value, Some(*attr));
        }
    }
    (String::new(), None)
}

/// Text of the elements referenced by an id-list attribute, space-joined
fn resolve_references<D: DomDocument>(
    element: &D::Element,
    document: &D,
    attribute: &str,
) -> Option<String> {
    let ids = element.attribute(attribute)?;
    let parts: Vec<String> = ids
        .split_whitespace()
        .filter_map(|id| document.element_by_id(id))
        .map(|target| normalize_space(&target.text_content()))
        .filter(|text| !text.is_empty())
        .collect();
    (!parts.is_empty()).then(|| parts.join(" "))
}

/// `<label for=id>` text, else the text of an enclosing `<label>`
fn associated_label<D: DomDocument>(element: &D::Element, document: &D) -> Option<String> {
    if let Some(id) = element.id() {
        let selector = format!("label[for={}]", css_string(&id));
        if let Ok(Some(label)) = document.query_selector(&selector) {
            let text = normalize_space(&label.text_content());
            if !text.is_empty() {
                return Some(text);
            }
        }
    }
    let mut current = element.parent_element();
    while let Some(ancestor) = current {
        if ancestor.tag_name() == "label" {
            let text = normalize_space(&ancestor.text_content());
            return (!text.is_empty()).then_some(text);
        }
        current = ancestor.parent_element();
    }
    None
}

fn aria_attributes<E: DomElement>(element: &E) -> BTreeMap<String, String> {
    element
        .attributes()
        .into_iter()
        .filter(|(name, _)| name == "role" || name.starts_with("aria-"))
        .collect()
}

fn states<E: DomElement>(element: &E) -> BTreeSet<String> {
    BOOLEAN_STATES
        .iter()
        .filter(|(attr, _)| match element.attribute(attr) {
            Some(value) if attr.starts_with("aria-") => !value.trim().eq_ignore_ascii_case("false"),
            Some(_) => true,
            None => false,
        })
        .map(|(_, state)| (*state).to_string())
        .collect()
}

fn non_blank<E: DomElement>(element: &E, attribute: &str) -> Option<String> {
    element
        .attribute(attribute)
        .map(|v| normalize_space(&v))
        .filter(|v| !v.is_empty())
}
