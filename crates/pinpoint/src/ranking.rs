//! Cross-strategy ranking and the locator engine.
//!
//! # Ordering
//!
//! Strategies are compared on three keys, in order, until one differs:
//!
//! 1. type priority tier ([`type_priority`], lower first)
//! 2. `is_unique` (unique first)
//! 3. confidence score (higher first)
//!
//! Sorting is stable, so full ties keep generation order. The first element
//! of a ranked list is the highest-rated locator.

use std::cmp::Ordering;

use tracing::{debug, info, warn};

use crate::accessibility::generate_aria_snapshot;
use crate::config::EngineConfig;
use crate::dom::DomDocument;
use crate::generators::{
    ensure_attached, generate_all_aria_strategies, ClassGenerator, CssGenerator, IdGenerator,
    LocatorGenerator, NameGenerator, TagGenerator, XPathGenerator,
};
use crate::locator::{AriaSnapshot, ElementInfo, LocatorData, LocatorStrategy, LocatorType};
use crate::result::PinpointResult;
use crate::scoring::ConfidenceScorer;

/// Ranking tier of a strategy, 0 ranks first
#[must_use]
pub fn type_priority(strategy: &LocatorStrategy) -> u8 {
    match strategy.locator_type {
        LocatorType::Id => 0,
        LocatorType::Aria if strategy.selector.contains("[aria-label=") => 0,
        LocatorType::Name | LocatorType::Class | LocatorType::Aria => 1,
        LocatorType::Css | LocatorType::Xpath => 2,
        LocatorType::Tag => 3,
    }
}

/// Three-key comparator; `Less` ranks first
#[must_use]
pub fn compare_strategies(a: &LocatorStrategy, b: &LocatorStrategy) -> Ordering {
    type_priority(a)
        .cmp(&type_priority(b))
        .then_with(|| b.is_unique.cmp(&a.is_unique))
        .then_with(|| b.score().cmp(&a.score()))
}

/// Stable sort of strategies into rank order
pub fn rank_strategies(strategies: &mut [LocatorStrategy]) {
    strategies.sort_by(compare_strategies);
}

/// Runs every generator and ranks the combined output
#[derive(Debug, Clone, Default)]
pub struct LocatorEngine {
    scorer: ConfidenceScorer,
    css: CssGenerator,
    xpath: XPathGenerator,
}

impl LocatorEngine {
    /// Create an engine with the given configuration
    #[must_use]
    pub fn new(config: EngineConfig) -> Self {
        Self {
            css: CssGenerator::from_config(&config),
            xpath: XPathGenerator::from_config(&config),
            scorer: ConfidenceScorer::new(config),
        }
    }

    /// Active configuration
    #[must_use]
    pub const fn config(&self) -> &EngineConfig {
        self.scorer.config()
    }

    /// Scorer shared by all generators
    #[must_use]
    pub const fn scorer(&self) -> &ConfidenceScorer {
        &self.scorer
    }

    /// Every candidate from every strategy, best first
    ///
    /// # Errors
    ///
    /// Returns [`crate::PinpointError::DetachedElement`] if `element` is not
    /// part of `document`. Failures inside individual generators are logged
    /// and that generator contributes nothing.
    pub fn generate_all_strategies<D: DomDocument>(
        &self,
        element: &D::Element,
        document: &D,
    ) -> PinpointResult<Vec<LocatorStrategy>> {
        ensure_attached(element, document)?;

        let mut all = Vec::new();
        self.collect(&self.css, element, document, &mut all);
        self.collect(&self.xpath, element, document, &mut all);
        self.collect(&IdGenerator, element, document, &mut all);
        self.collect(&ClassGenerator, element, document, &mut all);
        self.collect(&NameGenerator, element, document, &mut all);
        self.collect(&TagGenerator, element, document, &mut all);
        match generate_all_aria_strategies(element, document, &self.scorer) {
            Ok(found) => all.extend(found),
            Err(e) => warn!(generator = "aria", error = %e, "generator failed, skipping"),
        }

        rank_strategies(&mut all);
        debug!(count = all.len(), "ranked strategies");
        Ok(all)
    }

    /// Highest-ranked strategy
    ///
    /// # Errors
    ///
    /// Same as [`Self::generate_all_strategies`].
    pub fn best_strategy<D: DomDocument>(
        &self,
        element: &D::Element,
        document: &D,
    ) -> PinpointResult<Option<LocatorStrategy>> {
        Ok(self.generate_all_strategies(element, document)?.into_iter().next())
    }

    /// Capture and rank into one record
    ///
    /// # Errors
    ///
    /// Same as [`Self::generate_all_strategies`].
    pub fn inspect<D: DomDocument>(
        &self,
        element: &D::Element,
        document: &D,
        url: &str,
    ) -> PinpointResult<LocatorData> {
        let strategies = self.generate_all_strategies(element, document)?;
        let info = ElementInfo::capture(element, self.config());
        info!(
            tag = %info.tag_name,
            strategies = strategies.len(),
            best = strategies.first().map_or("", |s| s.selector.as_str()),
            "inspected element"
        );
        Ok(LocatorData::new(url, info, strategies))
    }

    /// Accessibility snapshot of `element`
    ///
    /// # Errors
    ///
    /// Returns [`crate::PinpointError::DetachedElement`] if `element` is not
    /// part of `document`.
    pub fn aria_snapshot<D: DomDocument>(
        &self,
        element: &D::Element,
        document: &D,
    ) -> PinpointResult<AriaSnapshot> {
        ensure_attached(element, document)?;
        Ok(generate_aria_snapshot(
            element,
            document,
            self.config().max_hierarchy_depth,
        ))
    }

    fn collect<G: LocatorGenerator, D: DomDocument>(
        &self,
        generator: &G,
        element: &D::Element,
        document: &D,
        out: &mut Vec<LocatorStrategy>,
    ) {
        match generator.generate(element, document, &self.scorer) {
            Ok(found) => {
                debug!(generator = generator.name(), count = found.len(), "generator finished");
                out.extend(found);
            }
            Err(e) => warn!(generator = generator.name(), error = %e, "generator failed, skipping"),
        }
    }
}
