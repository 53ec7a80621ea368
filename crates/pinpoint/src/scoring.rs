//! Confidence scoring engine.
//!
//! Maps `(type, selector, element, document)` to a [`ConfidenceScore`] from
//! four weighted sub-scores, each in [0, 1]:
//!
//! | Factor | Default weight | Source |
//! |--------|----------------|--------|
//! | Uniqueness | 0.40 | live match count against the document |
//! | Stability | 0.35 | type-specific fragility heuristics |
//! | Type reliability | 0.15 | fixed prior per locator type |
//! | Pattern analysis | 0.10 | semantic / test / accessibility / generated naming |
//!
//! The final score is `round(100 * Σ weight·sub)` clamped to [0, 100].

use lazy_static::lazy_static;
use regex::Regex;
use tracing::{debug, warn};

use crate::config::EngineConfig;
use crate::dom::{DomDocument, DomElement, DomResult};
use crate::locator::{clamp_score, ConfidenceFactor, ConfidenceScore, LocatorStrategy, LocatorType};
use crate::patterns::{
    classify_name, has_digit_suffix, is_accessibility_attribute, is_aria_state_attribute,
    is_auto_generated, is_semantic_name, is_test_attribute, is_utility_class, NamingPattern,
};

lazy_static! {
    static ref INDEX_PREDICATE: Regex = Regex::new(r"\[\d+\]").expect("index pattern must compile");
    static ref NTH_PSEUDO: Regex =
        Regex::new(r":nth-(child|of-type|last-child|last-of-type)\(").expect("nth pattern must compile");
    static ref CSS_IDENT: Regex = Regex::new(r"([#.])([A-Za-z_-][\w-]*)").expect("ident pattern must compile");
    static ref QUOTED: Regex = Regex::new(r#""([^"]*)"|'([^']*)'"#).expect("quote pattern must compile");
    static ref CSS_ATTR: Regex = Regex::new(r"\[([A-Za-z_][\w:.-]*)").expect("attribute pattern must compile");
    static ref XPATH_ATTR: Regex = Regex::new(r"@([A-Za-z_][\w:.-]*)").expect("attribute pattern must compile");
    static ref XPATH_CLASS: Regex = Regex::new(r#"contains\(@class,\s*["']([^"']+)["']\)"#)
        .expect("class predicate pattern must compile");
}

/// Stability penalty per positional predicate or `:nth-*` pseudo-class
const POSITION_PENALTY: f64 = 0.3;

/// Stability penalty per child combinator in a CSS path
const DEPTH_PENALTY: f64 = 0.05;

/// Points removed from a fallback candidate produced after a failed query
const DEGRADED_PENALTY: u8 = 25;

/// Fixed reliability prior for a locator type
#[must_use]
pub const fn type_reliability(locator_type: LocatorType) -> f64 {
    match locator_type {
        LocatorType::Id => 1.0,
        LocatorType::Aria => 0.85,
        LocatorType::Name => 0.8,
        LocatorType::Css => 0.7,
        LocatorType::Class | LocatorType::Xpath => 0.6,
        LocatorType::Tag => 0.2,
    }
}

/// Stability of a selector keyed by the ARIA attribute it targets
#[must_use]
pub fn aria_attribute_stability(attribute: &str) -> f64 {
    match attribute {
        "aria-label" => 1.0,
        "aria-labelledby" => 0.85,
        "aria-describedby" => 0.7,
        "role" => 0.6,
        a if is_aria_state_attribute(a) => 0.1,
        _ => 0.5,
    }
}

/// Full outcome of scoring one candidate
#[derive(Debug, Clone, PartialEq)]
pub struct Assessment {
    /// Score, factors and warnings
    pub confidence: ConfidenceScore,
    /// Selector matched exactly the inspected element
    pub is_unique: bool,
    /// Stability sub-score reached the configured threshold
    pub is_stable: bool,
    /// Number of matches, `None` if the query failed
    pub match_count: Option<usize>,
    /// Stability sub-score
    pub stability: f64,
}

/// Factors and warnings collected while scoring
#[derive(Debug, Default)]
struct Findings {
    factors: Vec<ConfidenceFactor>,
    warnings: Vec<String>,
}

impl Findings {
    fn positive(&mut self, name: &str, weight: f64, description: impl Into<String>) {
        self.factors
            .push(ConfidenceFactor::positive(name, weight, description));
    }

    fn negative(&mut self, name: &str, weight: f64, description: impl Into<String>) {
        self.factors
            .push(ConfidenceFactor::negative(name, weight, description));
    }

    fn warn(&mut self, warning: impl Into<String>) {
        let warning = warning.into();
        if !self.warnings.contains(&warning) {
            self.warnings.push(warning);
        }
    }
}

/// Computes confidence scores for locator candidates
#[derive(Debug, Clone, Default)]
pub struct ConfidenceScorer {
    config: EngineConfig,
}

impl ConfidenceScorer {
    /// Create a scorer with the given configuration
    #[must_use]
    pub const fn new(config: EngineConfig) -> Self {
        Self { config }
    }

    /// Active configuration
    #[must_use]
    pub const fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Score a candidate against a live document
    pub fn assess<D: DomDocument>(
        &self,
        locator_type: LocatorType,
        selector: &str,
        element: &D::Element,
        document: &D,
    ) -> Assessment {
        let weights = self.config.weights;
        let mut findings = Findings::default();

        let (uniqueness, match_count, is_unique) =
            self.uniqueness(locator_type, selector, element, document, &mut findings);
        let stability = self.stability(locator_type, selector, element, &mut findings);

        let reliability = type_reliability(locator_type);
        let reliability_desc = format!("{locator_type} locators have a reliability prior of {reliability:.2}");
        if reliability >= 0.5 {
            findings.positive("type-reliability", weights.type_reliability * reliability, reliability_desc);
        } else {
            findings.negative("type-reliability", weights.type_reliability * (1.0 - reliability), reliability_desc);
        }

        let pattern = self.pattern_analysis(selector, &mut findings);

        let raw = 100.0
            * (weights.uniqueness * uniqueness
                + weights.stability * stability
                + weights.type_reliability * reliability
                + weights.pattern * pattern);
        let score = clamp_score(raw);
        if score < self.config.fragile_threshold {
            findings.warn(format!(
                "Low confidence ({score}): this locator is fragile and likely to break"
            ));
        }

        debug!(
            locator_type = %locator_type,
            selector,
            uniqueness,
            stability,
            pattern,
            score,
            "scored candidate"
        );

        Assessment {
            confidence: ConfidenceScore {
                score,
                factors: findings.factors,
                warnings: findings.warnings,
            },
            is_unique,
            is_stable: stability >= self.config.stable_threshold,
            match_count,
            stability,
        }
    }

    /// Score a candidate and wrap it as a strategy
    pub fn evaluate<D: DomDocument>(
        &self,
        locator_type: LocatorType,
        selector: &str,
        element: &D::Element,
        document: &D,
    ) -> LocatorStrategy {
        let assessment = self.assess(locator_type, selector, element, document);
        let explanation =
            generate_explanation(&assessment.confidence.factors, &assessment.confidence.warnings);
        LocatorStrategy {
            locator_type,
            selector: selector.to_string(),
            confidence: assessment.confidence,
            explanation,
            is_unique: assessment.is_unique,
            is_stable: assessment.is_stable,
        }
    }

    /// Score a fallback candidate substituted after a failed query
    pub fn degraded<D: DomDocument>(
        &self,
        locator_type: LocatorType,
        selector: &str,
        element: &D::Element,
        document: &D,
        reason: &str,
    ) -> LocatorStrategy {
        let mut strategy = self.evaluate(locator_type, selector, element, document);
        let confidence = &mut strategy.confidence;
        confidence.factors.push(ConfidenceFactor::negative(
            "degraded",
            f64::from(DEGRADED_PENALTY) / 100.0,
            format!("Fallback after a failed query: {reason}"),
        ));
        confidence.warnings.push(format!(
            "Query failed ({reason}); fell back to a conservative locator with degraded reliability"
        ));
        confidence.score = confidence.score.saturating_sub(DEGRADED_PENALTY);
        strategy.is_stable = false;
        strategy.explanation = generate_explanation(&confidence.factors, &confidence.warnings);
        strategy
    }

    fn uniqueness<D: DomDocument>(
        &self,
        locator_type: LocatorType,
        selector: &str,
        element: &D::Element,
        document: &D,
        findings: &mut Findings,
    ) -> (f64, Option<usize>, bool) {
        let weight = self.config.weights.uniqueness;
        match query_matches(document, locator_type, selector) {
            Ok(matches) => {
                let count = matches.len();
                let hits_target = matches.contains(element);
                if count == 1 && hits_target {
                    findings.positive("uniqueness", weight, "Selector matches exactly one element");
                    (1.0, Some(1), true)
                } else if count == 0 {
                    findings.negative("uniqueness", weight, "Selector matches no elements");
                    findings.warn("Selector matches no elements in the document");
                    (0.0, Some(0), false)
                } else if !hits_target {
                    findings.negative("uniqueness", weight, "Selector does not match the inspected element");
                    findings.warn(format!(
                        "Selector matches {count} element(s) but not the inspected one"
                    ));
                    (0.0, Some(count), false)
                } else {
                    let value = 0.3 / (count - 1) as f64;
                    findings.negative(
                        "uniqueness",
                        weight * (1.0 - value),
                        format!("Selector matches {count} elements"),
                    );
                    findings.warn(format!(
                        "Selector is not unique: it matches {count} elements"
                    ));
                    (value, Some(count), false)
                }
            }
            Err(e) => {
                warn!(selector, error = %e, "uniqueness query failed");
                findings.negative("query-failure", weight, format!("Query failed: {e}"));
                findings.warn(format!(
                    "Uniqueness could not be verified ({e}); reliability degraded"
                ));
                (0.0, None, false)
            }
        }
    }

    fn stability<E: DomElement>(
        &self,
        locator_type: LocatorType,
        selector: &str,
        element: &E,
        findings: &mut Findings,
    ) -> f64 {
        let raw = match locator_type {
            LocatorType::Id => self.id_stability(element.id().as_deref(), findings),
            LocatorType::Name => self.name_stability(element.attribute("name").as_deref(), findings),
            LocatorType::Class => self.class_stability(&css_classes(selector), findings),
            LocatorType::Tag => {
                findings.negative("generic-tag", 0.7 * self.config.weights.stability, "Tag names are shared by many elements");
                0.3
            }
            LocatorType::Css => self.css_stability(selector, element, findings),
            LocatorType::Xpath => self.xpath_stability(selector, element, findings),
            LocatorType::Aria => self.aria_stability(selector, findings),
        };
        let value = raw.clamp(0.0, 1.0);
        let weight = self.config.weights.stability;
        let desc = format!("Stability estimate {value:.2}");
        if value >= self.config.stable_threshold {
            findings.positive("stability", weight * value, desc);
        } else {
            findings.negative("stability", weight * (1.0 - value), desc);
        }
        value
    }

    fn id_stability(&self, id: Option<&str>, findings: &mut Findings) -> f64 {
        let weight = self.config.weights.stability;
        match id {
            None => 0.3,
            Some(id) if is_auto_generated(id) => {
                findings.negative("auto-generated-id", 0.8 * weight, format!("ID \"{id}\" looks auto-generated"));
                findings.warn(format!(
                    "ID \"{id}\" looks auto-generated; fragile naming may change between page loads"
                ));
                0.2
            }
            Some(id) if has_digit_suffix(id) => {
                findings.negative("numeric-id-suffix", 0.4 * weight, format!("ID \"{id}\" ends in a number"));
                0.6
            }
            Some(id) => {
                findings.positive("explicit-id", weight, format!("ID \"{id}\" is explicit and stable"));
                1.0
            }
        }
    }

    fn name_stability(&self, name: Option<&str>, findings: &mut Findings) -> f64 {
        let weight = self.config.weights.stability;
        match name {
            None => 0.3,
            Some(name) if is_auto_generated(name) => {
                findings.negative("auto-generated-name", 0.5 * weight, format!("Name \"{name}\" looks generated"));
                findings.warn(format!(
                    "Name \"{name}\" looks auto-generated; fragile naming may change"
                ));
                0.5
            }
            Some(name) => {
                findings.positive("explicit-name", 0.95 * weight, format!("Name \"{name}\" is form-bound and stable"));
                0.95
            }
        }
    }

    fn class_stability(&self, classes: &[String], findings: &mut Findings) -> f64 {
        if classes.is_empty() {
            return 0.3;
        }
        let weight = self.config.weights.stability;
        let mut total = 0.0;
        let mut worst: f64 = 1.0;
        for class in classes {
            let pattern = classify_name(class);
            let value = pattern.class_stability();
            total += value;
            worst = worst.min(value);
            match pattern {
                NamingPattern::AutoGenerated => {
                    findings.negative("auto-generated-class", 0.9 * weight, format!("Class \"{class}\" looks auto-generated"));
                    findings.warn(format!(
                        "Class \"{class}\" looks auto-generated; fragile naming may change between builds"
                    ));
                }
                NamingPattern::Utility => {
                    findings.negative("utility-class", 0.6 * weight, format!("Class \"{class}\" is a utility class"));
                    findings.warn(format!(
                        "Class \"{class}\" is a utility class tied to styling, not identity"
                    ));
                }
                NamingPattern::Positional => {
                    findings.negative("positional-class", 0.7 * weight, format!("Class \"{class}\" reflects position or state"));
                    findings.warn(format!(
                        "Class \"{class}\" reflects position or state and may change with interaction"
                    ));
                }
                NamingPattern::Bem => {
                    findings.positive("bem-naming", 0.85 * weight, format!("Class \"{class}\" follows BEM naming"));
                }
                NamingPattern::Semantic => {
                    findings.positive("semantic-class", 0.8 * weight, format!("Class \"{class}\" describes purpose"));
                }
                NamingPattern::Plain => {}
            }
        }
        let mean = total / classes.len() as f64;
        ((mean + worst) / 2.0).min(0.85)
    }

    fn css_stability<E: DomElement>(&self, selector: &str, element: &E, findings: &mut Findings) -> f64 {
        let weight = self.config.weights.stability;
        let compound = selector.rsplit(" > ").next().unwrap_or(selector);
        let attrs = captures(&CSS_ATTR, compound);
        let classes = css_classes(compound);

        let mut value = if !css_ids(compound).is_empty() || attrs.iter().any(|a| a == "id") {
            self.id_stability(element.id().as_deref(), findings)
        } else if attrs.iter().any(|a| is_test_attribute(a)) {
            findings.positive("test-attribute", weight, "Dedicated test attribute");
            1.0
        } else if attrs.iter().any(|a| a == "name") {
            self.name_stability(element.attribute("name").as_deref(), findings)
        } else if attrs.iter().any(|a| a == "aria-label") {
            0.95
        } else if attrs.iter().any(|a| a == "placeholder") {
            findings.positive("placeholder", 0.75 * weight, "Placeholder text identifies the field");
            0.75
        } else if !classes.is_empty() {
            self.class_stability(&classes, findings)
        } else if !attrs.is_empty() {
            0.6
        } else {
            findings.negative("generic-tag", 0.7 * weight, "Selector relies on tag names only");
            0.3
        };

        let positional = NTH_PSEUDO.find_iter(selector).count();
        if positional > 0 {
            value -= POSITION_PENALTY * positional as f64;
            findings.negative("position-dependent", POSITION_PENALTY * weight, "Selector depends on sibling position");
            findings.warn("Selector is position-based and breaks when siblings are added or removed");
        }

        let depth = selector.matches(" > ").count();
        if depth > 0 {
            value -= DEPTH_PENALTY * depth as f64;
            findings.negative(
                "hierarchy-depth",
                DEPTH_PENALTY * depth as f64 * weight,
                format!("Selector spans {} levels of hierarchy", depth + 1),
            );
        }
        value
    }

    fn xpath_stability<E: DomElement>(&self, selector: &str, element: &E, findings: &mut Findings) -> f64 {
        let weight = self.config.weights.stability;
        if selector.starts_with('/') && !selector.starts_with("//") {
            findings.negative("absolute-path", 0.85 * weight, "Absolute path from the document root");
            findings.warn("Absolute XPath depends on the full document structure and is fragile");
            return 0.15;
        }

        let attrs = captures(&XPATH_ATTR, selector);
        let mut value = if attrs.iter().any(|a| a == "id") {
            self.id_stability(element.id().as_deref(), findings)
        } else if attrs.iter().any(|a| is_test_attribute(a)) {
            findings.positive("test-attribute", weight, "Dedicated test attribute");
            1.0
        } else if attrs.iter().any(|a| a == "name") {
            self.name_stability(element.attribute("name").as_deref(), findings)
                .min(0.9)
        } else if attrs.iter().any(|a| a == "aria-label") {
            0.95
        } else if attrs.iter().any(|a| a == "class") {
            self.class_stability(&captures(&XPATH_CLASS, selector), findings)
        } else if selector.contains("normalize-space(") || selector.contains("text()") {
            findings.positive("text-predicate", 0.7 * weight, "Visible text identifies the element");
            0.7
        } else if !attrs.is_empty() {
            0.6
        } else {
            findings.negative("generic-tag", 0.7 * weight, "Expression relies on tag names only");
            0.3
        };

        let positional = INDEX_PREDICATE.find_iter(selector).count();
        if positional > 0 {
            value -= POSITION_PENALTY * positional as f64;
            findings.negative("position-dependent", POSITION_PENALTY * weight, "Expression uses positional predicates");
            findings.warn("XPath is position-based and breaks when siblings are added or removed");
        }
        value
    }

    fn aria_stability(&self, selector: &str, findings: &mut Findings) -> f64 {
        let weight = self.config.weights.stability;
        let Some(attribute) = captures(&CSS_ATTR, selector).into_iter().next() else {
            return 0.3;
        };
        let value = aria_attribute_stability(&attribute);
        if is_aria_state_attribute(&attribute) {
            findings.negative("aria-state", 0.9 * weight, format!("{attribute} describes transient state"));
            findings.warn(format!(
                "ARIA state attribute {attribute} changes with interaction and is not a stable identifier"
            ));
        } else if attribute == "aria-label" {
            findings.positive("aria-label", weight, "aria-label is the strongest accessibility hook");
        } else {
            findings.positive("aria-attribute", value * weight, format!("{attribute} carries accessibility semantics"));
        }
        value
    }

    fn pattern_analysis(&self, selector: &str, findings: &mut Findings) -> f64 {
        let weight = self.config.weights.pattern;
        let tokens = naming_tokens(selector);
        let mut attrs = captures(&CSS_ATTR, selector);
        attrs.extend(captures(&XPATH_ATTR, selector));
        let mut classes = css_classes(selector);
        classes.extend(captures(&XPATH_CLASS, selector));

        let mut value: f64 = 0.5;
        if tokens.iter().any(|t| is_semantic_name(t)) {
            value += 0.3;
            findings.positive("semantic-naming", 0.3 * weight, "Names describe the element's purpose");
        }
        if attrs.iter().any(|a| is_test_attribute(a)) {
            value += 0.2;
            findings.positive("test-attribute-naming", 0.2 * weight, "Uses an attribute reserved for tests");
        }
        if attrs.iter().any(|a| is_accessibility_attribute(a)) {
            value += 0.3;
            findings.positive("accessibility-naming", 0.3 * weight, "Uses accessibility-oriented attributes");
        }
        if tokens.iter().any(|t| is_auto_generated(t)) {
            value -= 0.4;
            findings.negative("auto-generated-naming", 0.4 * weight, "Contains machine-generated names");
        }
        if classes.iter().any(|c| is_utility_class(c)) {
            value -= 0.2;
            findings.negative("utility-naming", 0.2 * weight, "Contains styling utility classes");
        }
        value.clamp(0.0, 1.0)
    }
}

/// Run a selector with the query language its type implies
pub(crate) fn query_matches<D: DomDocument>(
    document: &D,
    locator_type: LocatorType,
    selector: &str,
) -> DomResult<Vec<D::Element>> {
    if locator_type.is_css_syntax() {
        document.query_selector_all(selector)
    } else {
        document.evaluate_xpath(selector)
    }
}

/// Whether a selector matches exactly the given element
pub(crate) fn matches_only<D: DomDocument>(
    document: &D,
    locator_type: LocatorType,
    selector: &str,
    element: &D::Element,
) -> DomResult<bool> {
    let matches = query_matches(document, locator_type, selector)?;
    Ok(matches.len() == 1 && matches[0] == *element)
}

/// Render factors and warnings into a short, deterministic explanation
#[must_use]
pub fn generate_explanation(factors: &[ConfidenceFactor], warnings: &[String]) -> String {
    let Some(dominant) = factors
        .iter()
        .enumerate()
        .max_by(|(ia, a), (ib, b)| a.weight.total_cmp(&b.weight).then(ib.cmp(ia)))
        .map(|(_, f)| f)
    else {
        return if warnings.is_empty() {
            "No factors evaluated".to_string()
        } else {
            format!("No factors evaluated; {} warning(s)", warnings.len())
        };
    };

    let mut out = dominant.description.clone();
    let strengths: Vec<&str> = factors
        .iter()
        .filter(|f| f.is_positive() && !std::ptr::eq(*f, dominant))
        .map(|f| f.name.as_str())
        .collect();
    let concerns: Vec<&str> = factors
        .iter()
        .filter(|f| !f.is_positive() && !std::ptr::eq(*f, dominant))
        .map(|f| f.name.as_str())
        .collect();
    if !strengths.is_empty() {
        out.push_str("; strengths: ");
        out.push_str(&strengths.join(", "));
    }
    if !concerns.is_empty() {
        out.push_str("; concerns: ");
        out.push_str(&concerns.join(", "));
    }
    if !warnings.is_empty() {
        out.push_str(&format!("; {} warning(s)", warnings.len()));
    }
    out
}

fn captures(re: &Regex, haystack: &str) -> Vec<String> {
    re.captures_iter(haystack)
        .filter_map(|c| c.get(c.len() - 1).map(|m| m.as_str().to_string()))
        .collect()
}

fn css_classes(selector: &str) -> Vec<String> {
    css_idents(selector, ".")
}

/// `#id` tokens, ignoring anything inside quoted attribute values
fn css_ids(selector: &str) -> Vec<String> {
    css_idents(selector, "#")
}

fn css_idents(selector: &str, sigil: &str) -> Vec<String> {
    let unquoted = QUOTED.replace_all(selector, "\"\"");
    CSS_IDENT
        .captures_iter(&unquoted)
        .filter(|c| &c[1] == sigil)
        .map(|c| c[2].to_string())
        .collect()
}

fn naming_tokens(selector: &str) -> Vec<String> {
    let unquoted = QUOTED.replace_all(selector, "\"\"");
    let mut tokens: Vec<String> = CSS_IDENT
        .captures_iter(&unquoted)
        .map(|c| c[2].to_string())
        .collect();
    for c in QUOTED.captures_iter(selector) {
        if let Some(m) = c.get(1).or_else(|| c.get(2)) {
            if !m.as_str().is_empty() {
                tokens.push(m.as_str().to_string());
            }
        }
    }
    tokens
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::dom::HtmlPage;

    const PAGE: &str = r#"
        <html><body>
          <form>
            <input name="email" class="field">
            <input name="email" class="field">
            <input name="username" class="field">
            <button id="submit-btn" class="login-button">Submit</button>
            <button id="ember123">Go</button>
            <button aria-label="Close dialog" aria-expanded="false">X</button>
          </form>
          <div class="css-1a2b3c">a</div>
          <div class="css-1a2b3c">b</div>
          <ul><li>one</li><li class="mt-4">two</li></ul>
        </body></html>
    "#;

    fn scorer() -> ConfidenceScorer {
        ConfidenceScorer::default()
    }

    mod uniqueness_tests {
        use super::*;

        #[test]
        fn test_unique_id_scores_high() {
            let page = HtmlPage::parse(PAGE);
            let doc = page.document();
            let el = doc.element_by_id("submit-btn").unwrap();
            let a = scorer().assess(LocatorType::Id, "#submit-btn", &el, &doc);
            assert!(a.is_unique);
            assert!(a.is_stable);
            assert_eq!(a.match_count, Some(1));
            assert!(a.confidence.score >= 90, "score {}", a.confidence.score);
            assert!(a.confidence.warnings.is_empty());
        }

        #[test]
        fn test_ambiguous_name_warns_and_scores_lower() {
            let page = HtmlPage::parse(PAGE);
            let doc = page.document();
            let inputs = doc.query_selector_all("input").unwrap();
            let dup = scorer().assess(LocatorType::Name, "[name=\"email\"]", &inputs[0], &doc);
            let uniq = scorer().assess(LocatorType::Name, "[name=\"username\"]", &inputs[2], &doc);
            assert!(!dup.is_unique);
            assert_eq!(dup.match_count, Some(2));
            assert!(dup.confidence.warnings.iter().any(|w| w.contains("not unique")));
            assert!(uniq.is_unique);
            assert!(uniq.confidence.score >= dup.confidence.score + 20);
        }

        #[test]
        fn test_zero_matches() {
            let page = HtmlPage::parse(PAGE);
            let doc = page.document();
            let el = doc.element_by_id("submit-btn").unwrap();
            let a = scorer().assess(LocatorType::Css, "#nothing-here", &el, &doc);
            assert!(!a.is_unique);
            assert_eq!(a.match_count, Some(0));
            assert!(a.confidence.warnings.iter().any(|w| w.contains("no elements")));
        }

        #[test]
        fn test_query_failure_degrades_without_panicking() {
            let page = HtmlPage::parse(PAGE);
            let doc = page.document();
            let el = doc.element_by_id("submit-btn").unwrap();
            let a = scorer().assess(LocatorType::Css, "button[", &el, &doc);
            assert!(!a.is_unique);
            assert_eq!(a.match_count, None);
            assert!(a.confidence.warnings.iter().any(|w| w.contains("degraded")));
        }

        #[test]
        fn test_single_match_of_other_element_is_not_unique() {
            let page = HtmlPage::parse(PAGE);
            let doc = page.document();
            let el = doc.element_by_id("submit-btn").unwrap();
            let a = scorer().assess(LocatorType::Id, "#ember123", &el, &doc);
            assert!(!a.is_unique);
        }
    }

    mod stability_tests {
        use super::*;

        #[test]
        fn test_hashed_class_is_unstable() {
            let page = HtmlPage::parse(PAGE);
            let doc = page.document();
            let div = doc.query_selector("div.css-1a2b3c").unwrap().unwrap();
            let hashed = scorer().assess(LocatorType::Class, ".css-1a2b3c", &div, &doc);
            assert!(!hashed.is_stable);
            assert!(hashed
                .confidence
                .warnings
                .iter()
                .any(|w| w.contains("auto-generated") && w.contains("fragile")));

            let btn = doc.element_by_id("submit-btn").unwrap();
            let semantic = scorer().assess(LocatorType::Class, ".login-button", &btn, &doc);
            assert!(semantic.is_stable);
            assert!(semantic.confidence.score >= hashed.confidence.score + 30);
        }

        #[test]
        fn test_auto_generated_id_is_unstable() {
            let page = HtmlPage::parse(PAGE);
            let doc = page.document();
            let el = doc.element_by_id("ember123").unwrap();
            let a = scorer().assess(LocatorType::Id, "#ember123", &el, &doc);
            assert!(a.is_unique);
            assert!(!a.is_stable);
            assert!(a.confidence.warnings.iter().any(|w| w.contains("auto-generated")));
        }

        #[test]
        fn test_xpath_position_penalty() {
            let page = HtmlPage::parse(PAGE);
            let doc = page.document();
            let li = doc.query_selector("li.mt-4").unwrap().unwrap();
            let positional = scorer().assess(LocatorType::Xpath, "//ul/li[2]", &li, &doc);
            let absolute = scorer().assess(LocatorType::Xpath, "/html/body/ul/li[2]", &li, &doc);
            assert!(positional.is_unique);
            assert!(!positional.is_stable);
            assert!(absolute.stability < 0.2);
            assert!(positional
                .confidence
                .warnings
                .iter()
                .any(|w| w.contains("position-based")));
        }

        #[test]
        fn test_css_nth_of_type_penalty() {
            let page = HtmlPage::parse(PAGE);
            let doc = page.document();
            let li = doc.query_selector("li.mt-4").unwrap().unwrap();
            let a = scorer().assess(LocatorType::Css, "ul > li:nth-of-type(2)", &li, &doc);
            assert!(a.is_unique);
            assert!(a.stability < 0.1);
        }

        #[test]
        fn test_hash_inside_attribute_value_is_not_an_id() {
            let page = HtmlPage::parse(r##"<html><body><input placeholder="#tag"><b id="main">x</b></body></html>"##);
            let doc = page.document();
            let input = doc.query_selector("input").unwrap().unwrap();
            let a = scorer().assess(LocatorType::Css, r##"input[placeholder="#tag"]"##, &input, &doc);
            assert!(a.is_unique);
            assert!(a.confidence.factors.iter().any(|f| f.name == "placeholder"));
            assert!(a.stability > 0.5);

            let b = doc.element_by_id("main").unwrap();
            let id = scorer().assess(LocatorType::Css, "b#main", &b, &doc);
            assert!(id.confidence.factors.iter().any(|f| f.name == "explicit-id"));
        }

        #[test]
        fn test_aria_attribute_tiers() {
            assert!(aria_attribute_stability("aria-label") > aria_attribute_stability("aria-labelledby"));
            assert!(aria_attribute_stability("aria-labelledby") > aria_attribute_stability("aria-describedby"));
            assert!(aria_attribute_stability("aria-describedby") > aria_attribute_stability("role"));
            assert!(aria_attribute_stability("role") > aria_attribute_stability("aria-controls"));
            assert!(aria_attribute_stability("aria-controls") > aria_attribute_stability("aria-expanded"));
        }

        #[test]
        fn test_aria_label_scores_high_and_state_is_penalized() {
            let page = HtmlPage::parse(PAGE);
            let doc = page.document();
            let el = doc.query_selector("[aria-label]").unwrap().unwrap();
            let label = scorer().assess(LocatorType::Aria, "[aria-label=\"Close dialog\"]", &el, &doc);
            let state = scorer().assess(LocatorType::Aria, "[aria-expanded=\"false\"]", &el, &doc);
            assert!(label.confidence.score >= 90, "score {}", label.confidence.score);
            assert!(!state.is_stable);
            assert!(state.confidence.warnings.iter().any(|w| w.contains("aria-expanded")));
        }
    }

    mod type_hierarchy_tests {
        use super::*;

        #[test]
        fn test_reliability_priors_order() {
            assert!(type_reliability(LocatorType::Id) > type_reliability(LocatorType::Name));
            assert!(type_reliability(LocatorType::Name) > type_reliability(LocatorType::Class));
            assert!(type_reliability(LocatorType::Class) > type_reliability(LocatorType::Tag));
        }

        #[test]
        fn test_tag_scores_lowest() {
            let page = HtmlPage::parse(PAGE);
            let doc = page.document();
            let el = doc.element_by_id("submit-btn").unwrap();
            let id = scorer().assess(LocatorType::Id, "#submit-btn", &el, &doc);
            let class = scorer().assess(LocatorType::Class, ".login-button", &el, &doc);
            let tag = scorer().assess(LocatorType::Tag, "button", &el, &doc);
            assert!(id.confidence.score > class.confidence.score);
            assert!(class.confidence.score > tag.confidence.score);
            assert!(tag.confidence.warnings.iter().any(|w| w.contains("Low confidence")));
        }
    }

    mod degraded_tests {
        use super::*;

        #[test]
        fn test_degraded_lowers_score_and_warns() {
            let page = HtmlPage::parse(PAGE);
            let doc = page.document();
            let el = doc.element_by_id("submit-btn").unwrap();
            let normal = scorer().evaluate(LocatorType::Css, "button", &el, &doc);
            let degraded = scorer().degraded(LocatorType::Css, "button", &el, &doc, "bad selector");
            assert!(degraded.confidence.score < normal.confidence.score || normal.confidence.score == 0);
            assert!(!degraded.is_stable);
            assert!(degraded.confidence.warnings.iter().any(|w| w.contains("degraded")));
            assert!(degraded.explanation.contains("degraded"));
        }
    }

    mod explanation_tests {
        use super::*;

        #[test]
        fn test_explanation_is_deterministic() {
            let factors = vec![
                ConfidenceFactor::positive("uniqueness", 0.4, "Selector matches exactly one element"),
                ConfidenceFactor::positive("stability", 0.3, "Stability estimate 0.86"),
                ConfidenceFactor::negative("utility-naming", 0.02, "Contains styling utility classes"),
            ];
            let warnings = vec!["careful".to_string()];
            let a = generate_explanation(&factors, &warnings);
            let b = generate_explanation(&factors, &warnings);
            assert_eq!(a, b);
            assert_eq!(
                a,
                "Selector matches exactly one element; strengths: stability; concerns: utility-naming; 1 warning(s)"
            );
        }

        #[test]
        fn test_explanation_tie_prefers_first_factor() {
            let factors = vec![
                ConfidenceFactor::positive("a", 0.5, "first"),
                ConfidenceFactor::positive("b", 0.5, "second"),
            ];
            assert!(generate_explanation(&factors, &[]).starts_with("first"));
        }

        #[test]
        fn test_explanation_without_factors() {
            assert_eq!(generate_explanation(&[], &[]), "No factors evaluated");
        }

        #[test]
        fn test_scored_strategy_has_dominant_factor() {
            let page = HtmlPage::parse(PAGE);
            let doc = page.document();
            let el = doc.element_by_id("submit-btn").unwrap();
            let s = scorer().evaluate(LocatorType::Id, "#submit-btn", &el, &doc);
            assert!(!s.confidence.factors.is_empty());
            assert!(s.explanation.starts_with("Selector matches exactly one element"));
        }
    }
}
