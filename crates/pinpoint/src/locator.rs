//! Locator data model.
//!
//! Every value here is created fresh per inspection and is immutable once
//! returned to the caller. Field names serialize in camelCase, which is the
//! record shape handed to storage collaborators.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use chrono::{DateTime, Utc};
use uuid::Uuid;

/// Kind of locator a strategy produced
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LocatorType {
    /// CSS selector
    Css,
    /// XPath expression
    Xpath,
    /// `#id` selector
    Id,
    /// Class-list selector
    Class,
    /// `[name=".."]` selector
    Name,
    /// Bare tag selector
    Tag,
    /// ARIA attribute selector
    Aria,
}

impl LocatorType {
    /// All locator types in generation order
    pub const ALL: [Self; 7] = [
        Self::Css,
        Self::Xpath,
        Self::Id,
        Self::Class,
        Self::Name,
        Self::Tag,
        Self::Aria,
    ];

    /// Lower-case name
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Css => "css",
            Self::Xpath => "xpath",
            Self::Id => "id",
            Self::Class => "class",
            Self::Name => "name",
            Self::Tag => "tag",
            Self::Aria => "aria",
        }
    }

    /// Whether selectors of this type are CSS (queried with a selector engine)
    #[must_use]
    pub const fn is_css_syntax(self) -> bool {
        !matches!(self, Self::Xpath)
    }
}

impl fmt::Display for LocatorType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Direction of a confidence factor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FactorImpact {
    /// Raises confidence
    Positive,
    /// Lowers confidence
    Negative,
}

/// One evaluated contributor to a confidence score
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConfidenceFactor {
    /// Factor name
    pub name: String,
    /// Positive or negative
    pub impact: FactorImpact,
    /// Relative weight in [0, 1]
    pub weight: f64,
    /// Human-readable description
    pub description: String,
}

impl ConfidenceFactor {
    /// Create a positive factor
    #[must_use]
    pub fn positive(name: impl Into<String>, weight: f64, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            impact: FactorImpact::Positive,
            weight: clamp_weight(weight),
            description: description.into(),
        }
    }

    /// Create a negative factor
    #[must_use]
    pub fn negative(name: impl Into<String>, weight: f64, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            impact: FactorImpact::Negative,
            weight: clamp_weight(weight),
            description: description.into(),
        }
    }

    /// Check if this factor raises confidence
    #[must_use]
    pub fn is_positive(&self) -> bool {
        self.impact == FactorImpact::Positive
    }
}

/// Confidence assessment owned by a single strategy
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ConfidenceScore {
    /// Score in [0, 100]
    pub score: u8,
    /// Factors in evaluation order
    pub factors: Vec<ConfidenceFactor>,
    /// Warnings surfaced to the user
    pub warnings: Vec<String>,
}

impl ConfidenceScore {
    /// Create a score, clamping to [0, 100]
    #[must_use]
    pub fn new(score: f64, factors: Vec<ConfidenceFactor>, warnings: Vec<String>) -> Self {
        Self {
            score: clamp_score(score),
            factors,
            warnings,
        }
    }

    /// Check if any warning was raised
    #[must_use]
    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }
}

fn clamp_weight(weight: f64) -> f64 {
    if weight.is_nan() {
        0.0
    } else {
        weight.clamp(0.0, 1.0)
    }
}

/// Round and clamp a raw score into [0, 100]
#[must_use]
pub fn clamp_score(raw: f64) -> u8 {
    if raw.is_nan() {
        return 0;
    }
    raw.round().clamp(0.0, 100.0) as u8
}

/// One locator candidate
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LocatorStrategy {
    /// Locator kind
    #[serde(rename = "type")]
    pub locator_type: LocatorType,
    /// Literal locator string
    pub selector: String,
    /// Confidence assessment
    pub confidence: ConfidenceScore,
    /// Short rationale
    pub explanation: String,
    /// Matched exactly one element at generation time
    pub is_unique: bool,
    /// Likely to survive unrelated page changes
    pub is_stable: bool,
}

impl LocatorStrategy {
    /// Confidence score shortcut
    #[must_use]
    pub fn score(&self) -> u8 {
        self.confidence.score
    }
}

impl fmt::Display for LocatorStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}] {} ({}%)",
            self.locator_type, self.selector, self.confidence.score
        )
    }
}

/// Viewport-relative geometry captured with an element
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ElementPosition {
    /// X coordinate
    pub x: f64,
    /// Y coordinate
    pub y: f64,
    /// Width
    pub width: f64,
    /// Height
    pub height: f64,
    /// Top edge
    pub top: f64,
    /// Left edge
    pub left: f64,
    /// Bottom edge
    pub bottom: f64,
    /// Right edge
    pub right: f64,
}

/// Snapshot of an element at inspection time
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ElementInfo {
    /// Lower-case tag name
    pub tag_name: String,
    /// Possibly truncated text content
    pub text_content: String,
    /// Attributes keyed by name
    pub attributes: BTreeMap<String, String>,
    /// Geometry at capture time
    pub position: ElementPosition,
    /// Absolute XPath computed once at capture
    pub xpath: String,
}

/// One result/history record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LocatorData {
    /// Opaque unique token
    pub id: Uuid,
    /// Capture instant
    pub timestamp: DateTime<Utc>,
    /// Page origin and path at capture time
    pub url: String,
    /// Element snapshot
    pub element_info: ElementInfo,
    /// Ranked strategies, best first
    pub strategies: Vec<LocatorStrategy>,
    /// Optional screenshot reference supplied by the caller
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub screenshot: Option<String>,
}

/// Accessibility description of an element
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AriaSnapshot {
    /// Tag summary, e.g. `button#save.primary`
    pub element: String,
    /// `aria-*` and `role` attributes present on the element
    pub aria_attributes: BTreeMap<String, String>,
    /// Computed accessible name
    pub accessible_name: String,
    /// Computed accessible description
    pub accessible_description: String,
    /// Explicit or implicit role
    pub role: String,
    /// Active boolean states
    pub states: BTreeSet<String>,
    /// Ancestor roles, nearest first
    pub hierarchy: Vec<String>,
}
