//! Single-attribute strategies: ID, Class, Name and Tag.
//!
//! Each produces at most one candidate, independently of the others. The
//! confidence hierarchy ID > Name > Class > Tag comes from the scorer's type
//! priors and stability caps.

use tracing::debug;

use super::{attribute_selector, class_selector, ensure_attached, id_selector, LocatorGenerator};
use crate::dom::{DomDocument, DomElement};
use crate::locator::{LocatorStrategy, LocatorType};
use crate::result::PinpointResult;
use crate::scoring::ConfidenceScorer;

fn single<D: DomDocument>(
    generator: &'static str,
    locator_type: LocatorType,
    selector: Option<String>,
    element: &D::Element,
    document: &D,
    scorer: &ConfidenceScorer,
) -> PinpointResult<Vec<LocatorStrategy>> {
    ensure_attached(element, document)?;
    let Some(selector) = selector else {
        debug!(generator, "no applicable attribute");
        return Ok(Vec::new());
    };
    Ok(vec![scorer.evaluate(locator_type, &selector, element, document)])
}

/// `#id` strategy
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IdGenerator;

impl LocatorGenerator for IdGenerator {
    fn name(&self) -> &'static str {
        "id"
    }

    fn generate<D: DomDocument>(
        &self,
        element: &D::Element,
        document: &D,
        scorer: &ConfidenceScorer,
    ) -> PinpointResult<Vec<LocatorStrategy>> {
        let selector = element.id().map(|id| id_selector(&id));
        single(self.name(), LocatorType::Id, selector, element, document, scorer)
    }
}

/// `.a.b` class-list strategy
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ClassGenerator;

impl LocatorGenerator for ClassGenerator {
    fn name(&self) -> &'static str {
        "class"
    }

    fn generate<D: DomDocument>(
        &self,
        element: &D::Element,
        document: &D,
        scorer: &ConfidenceScorer,
    ) -> PinpointResult<Vec<LocatorStrategy>> {
        let selector = class_selector(&element.class_list());
        single(self.name(), LocatorType::Class, selector, element, document, scorer)
    }
}

/// `[name="..."]` strategy
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NameGenerator;

impl LocatorGenerator for NameGenerator {
    fn name(&self) -> &'static str {
        "name"
    }

    fn generate<D: DomDocument>(
        &self,
        element: &D::Element,
        document: &D,
        scorer: &ConfidenceScorer,
    ) -> PinpointResult<Vec<LocatorStrategy>> {
        let selector = element
            .attribute("name")
            .filter(|n| !n.trim().is_empty())
            .map(|n| attribute_selector("name", &n));
        single(self.name(), LocatorType::Name, selector, element, document, scorer)
    }
}

/// Bare tag strategy
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TagGenerator;

impl LocatorGenerator for TagGenerator {
    fn name(&self) -> &'static str {
        "tag"
    }

    fn generate<D: DomDocument>(
        &self,
        element: &D::Element,
        document: &D,
        scorer: &ConfidenceScorer,
    ) -> PinpointResult<Vec<LocatorStrategy>> {
        let selector = Some(element.tag_name());
        single(self.name(), LocatorType::Tag, selector, element, document, scorer)
    }
}
