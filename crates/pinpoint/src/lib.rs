//! Pinpoint: locator generation and confidence scoring.
//!
//! Given an element of a live document, Pinpoint produces a ranked set of
//! locator candidates (CSS, XPath, ID, class, name, tag, ARIA), each with a
//! 0–100 confidence score, an explanation, and uniqueness/stability flags.
//! Uniqueness is always checked against the supplied document at generation
//! time.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                    PINPOINT Architecture                        │
//! ├─────────────────────────────────────────────────────────────────┤
//! │   ┌────────────┐    ┌────────────┐    ┌────────────┐            │
//! │   │ Element +  │    │ Strategy   │    │ Confidence │            │
//! │   │ Document   │───►│ Generators │───►│ Scorer     │            │
//! │   │ (dom)      │    │            │    │            │            │
//! │   └────────────┘    └────────────┘    └─────┬──────┘            │
//! │                                             ▼                   │
//! │   ┌────────────┐    ┌────────────┐    ┌────────────┐            │
//! │   │ History /  │◄───│ Locator    │◄───│ Ranking    │            │
//! │   │ Sink       │    │ Data       │    │            │            │
//! │   └────────────┘    └────────────┘    └────────────┘            │
//! └─────────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Example
//!
//! ```
//! use pinpoint::prelude::*;
//!
//! let page = HtmlPage::parse(r#"<form><button id="submit-btn">Go</button></form>"#);
//! let doc = page.document();
//! let button = doc.element_by_id("submit-btn").unwrap();
//!
//! let engine = LocatorEngine::default();
//! let best = engine.best_strategy(&button, &doc).unwrap().unwrap();
//! assert_eq!(best.selector, "#submit-btn");
//! assert!(best.is_unique);
//! ```

#![warn(missing_docs)]
// Lints are configured in workspace Cargo.toml [workspace.lints.clippy]

#[allow(clippy::missing_errors_doc, clippy::must_use_candidate, clippy::doc_markdown)]
mod accessibility;
#[allow(clippy::must_use_candidate)]
mod capture;
mod config;
/// DOM capability traits and the in-memory HTML backend
#[allow(
    clippy::missing_errors_doc,
    clippy::must_use_candidate,
    clippy::doc_markdown,
    clippy::needless_pass_by_value
)]
pub mod dom;
/// Strategy generators
#[allow(
    clippy::missing_errors_doc,
    clippy::must_use_candidate,
    clippy::doc_markdown,
    clippy::module_name_repetitions
)]
pub mod generators;
#[allow(clippy::missing_errors_doc, clippy::must_use_candidate)]
mod history;
mod locator;
/// Naming and attribute pattern tables
#[allow(clippy::must_use_candidate, clippy::doc_markdown)]
pub mod patterns;
#[allow(clippy::missing_errors_doc, clippy::must_use_candidate)]
mod ranking;
mod result;
#[allow(
    clippy::cast_precision_loss,
    clippy::missing_errors_doc,
    clippy::must_use_candidate,
    clippy::unused_self,
    clippy::doc_markdown
)]
mod scoring;

pub use accessibility::{element_summary, generate_aria_snapshot, resolved_role};
pub use config::{EngineConfig, ScoreWeights};
pub use dom::{DomDocument, DomElement, DomError, DomResult, HtmlDocument, HtmlElement, HtmlPage, Rect};
pub use generators::{
    absolute_xpath, generate_all_aria_strategies, generate_aria_locator, AriaGenerator,
    ClassGenerator, CssGenerator, IdGenerator, LocatorGenerator, NameGenerator, TagGenerator,
    XPathGenerator,
};
pub use history::{LocatorHistory, LocatorSink};
pub use locator::{
    clamp_score, AriaSnapshot, ConfidenceFactor, ConfidenceScore, ElementInfo, ElementPosition,
    FactorImpact, LocatorData, LocatorStrategy, LocatorType,
};
pub use ranking::{compare_strategies, rank_strategies, type_priority, LocatorEngine};
pub use result::{PinpointError, PinpointResult};
pub use scoring::{
    aria_attribute_stability, generate_explanation, type_reliability, Assessment, ConfidenceScorer,
};

/// Prelude for convenient imports
pub mod prelude {
    pub use super::{
        compare_strategies, generate_aria_snapshot, AriaSnapshot, ConfidenceScore, ConfidenceScorer,
        DomDocument, DomElement, EngineConfig, HtmlDocument, HtmlElement, HtmlPage, LocatorData,
        LocatorEngine, LocatorHistory, LocatorSink, LocatorStrategy, LocatorType, PinpointError,
        PinpointResult,
    };
}
