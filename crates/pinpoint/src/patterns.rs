//! Heuristic pattern tables.
//!
//! Static, versioned data consulted by the generators and the scorer:
//! auto-generated naming, utility and positional classes, BEM naming,
//! semantic keywords, test attributes, tag categories and the implicit
//! ARIA role table. Regexes are compiled once on first use.

use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};

/// Version of the pattern tables; bump when any table changes
pub const PATTERN_TABLE_VERSION: u32 = 4;

/// Attributes conventionally reserved for test automation
pub const TEST_ATTRIBUTES: &[&str] = &["data-testid", "data-test-id", "data-test", "data-cy", "data-qa"];

/// Tags whose `name`/`placeholder` attributes usually identify them
pub const FORM_LIKE_TAGS: &[&str] = &[
    "input", "select", "textarea", "button", "form", "fieldset", "output", "option",
];

/// Tags whose visible text is a reasonable identifier
pub const TEXT_BEARING_TAGS: &[&str] = &[
    "a", "button", "label", "h1", "h2", "h3", "h4", "h5", "h6", "option", "summary", "legend", "th",
];

/// Attributes that carry accessibility semantics
pub const ACCESSIBILITY_ATTRIBUTES: &[&str] = &[
    "aria-label",
    "aria-labelledby",
    "aria-describedby",
    "role",
    "alt",
    "title",
];

/// ARIA attributes that describe transient state rather than identity
pub const ARIA_STATE_ATTRIBUTES: &[&str] = &[
    "aria-hidden",
    "aria-expanded",
    "aria-selected",
    "aria-checked",
    "aria-pressed",
    "aria-disabled",
    "aria-busy",
    "aria-current",
    "aria-invalid",
    "aria-live",
    "aria-grabbed",
    "aria-activedescendant",
    "aria-valuenow",
    "aria-valuetext",
    "aria-setsize",
    "aria-posinset",
];

/// Boolean states reported in accessibility snapshots, as `(attribute, state)`
pub const BOOLEAN_STATES: &[(&str, &str)] = &[
    ("disabled", "disabled"),
    ("aria-disabled", "disabled"),
    ("checked", "checked"),
    ("aria-checked", "checked"),
    ("selected", "selected"),
    ("aria-selected", "selected"),
    ("aria-expanded", "expanded"),
    ("aria-pressed", "pressed"),
    ("hidden", "hidden"),
    ("aria-hidden", "hidden"),
    ("required", "required"),
    ("aria-required", "required"),
    ("readonly", "readonly"),
    ("aria-readonly", "readonly"),
    ("aria-invalid", "invalid"),
    ("aria-busy", "busy"),
    ("open", "open"),
    ("multiple", "multiselectable"),
    ("aria-multiselectable", "multiselectable"),
];

/// Keywords that mark a class or id as describing purpose
pub const SEMANTIC_KEYWORDS: &[&str] = &[
    "header", "footer", "nav", "menu", "main", "content", "sidebar", "search", "login", "logout",
    "signin", "signup", "register", "submit", "cancel", "close", "save", "delete", "edit",
    "button", "btn", "link", "form", "input", "field", "email", "password", "username", "user",
    "title", "heading", "modal", "dialog", "card", "list", "item", "table", "row", "tab",
    "panel", "toolbar", "dropdown", "checkout", "cart", "profile", "avatar", "message", "error",
    "alert", "toast", "notification", "banner", "logo", "container", "wrapper", "section",
];

lazy_static! {
    static ref AUTO_GENERATED: Vec<Regex> = compile(&[
        // CSS-in-JS: emotion, styled-components, styled-jsx, JSS
        r"^css-[a-z]*\d[a-z0-9]{2,}(-[A-Za-z0-9]+)?$",
        r"^sc-[A-Za-z0-9]{4,}(-\d+)?$",
        r"^jsx-\d+$",
        r"^emotion-\d+$",
        r"^(makeStyles|jss)-?[A-Za-z]*-\d+$",
        // CSS modules: name__hash or name_hash5
        r"^[A-Za-z][\w-]*__[a-z_-]*[A-Z0-9][A-Za-z0-9_-]{2,}$",
        r"^[A-Za-z][A-Za-z-]*_[a-z]*[A-Z0-9][A-Za-z0-9]{2,}$",
        // framework generated ids
        r"^ember\d+$",
        r"^:[a-z]?[a-z0-9]+:$",
        r"^react-select-\d+-",
        r"^(mui|mat|ng|cdk|headlessui)-[a-z-]*\d+",
        r"^yui_[\d_]+",
        r"^ext-(gen|comp)-?\d+$",
        r"^gwt-uid-\d+$",
        // uuids, trailing hash tokens and long trailing digit runs
        r"^[0-9a-f]{8}-[0-9a-f]{4}-[0-9a-f]{4}-[0-9a-f]{4}-[0-9a-f]{12}$",
        r"(^|[-_])[0-9a-f]{8,}$",
        r"\d{5,}$",
        r"^[a-zA-Z]{1,3}\d{2,}[a-zA-Z]?$",
    ]);

    static ref UTILITY_CLASS: Vec<Regex> = compile(&[
        // Tailwind
        r"^-?(m|p)[trblxy]?-(\d+(\.\d+)?|px|auto)$",
        r"^(w|h|min-w|min-h|max-w|max-h)-",
        r"^(flex|grid|block|inline|inline-block|inline-flex|hidden|contents|table)$",
        r"^(flex|grid|gap|col|row|justify|items|content|self|place|order)-",
        r"^(text|bg|border|ring|shadow|rounded|font|leading|tracking|opacity|z|inset|top|left|right|bottom)-",
        r"^(sm|md|lg|xl|2xl|hover|focus|active|disabled|dark|group-hover):",
        r"^(absolute|relative|fixed|sticky|static|truncate|underline|uppercase|lowercase|italic)$",
        // Bootstrap
        r"^col(-(xs|sm|md|lg|xl|xxl))?(-\d+)?$",
        r"^(d|m|p)[trblxy]?(-(sm|md|lg|xl|xxl))?-\d$",
        r"^(d|float|align|justify-content|align-items|text|bg|fw|fs)-(sm-|md-|lg-|xl-)?[a-z]+$",
        r"^(row|container-fluid|clearfix|sr-only|visually-hidden)$",
    ]);

    static ref POSITIONAL_CLASS: Vec<Regex> = compile(&[
        r"^(first|last|odd|even|middle)(-child|-of-type|-item)?$",
        r"^(nth|item|child|index|pos|position)-\d+$",
        r"^(active|selected|current|focused|hover|open|closed|visible|hidden|disabled|checked|expanded|collapsed)$",
        r"^(is|has)-[a-z][a-z-]*$",
    ]);

    static ref BEM: Regex = Regex::new(
        r"^[a-z][a-z0-9]*(-[a-z0-9]+)*(__[a-z0-9]+(-[a-z0-9]+)*)?(--[a-z0-9]+(-[a-z0-9]+)*)?$"
    ).expect("BEM pattern must compile");

    static ref DIGIT_SUFFIX: Regex = Regex::new(r"[-_]?\d+$").expect("suffix pattern must compile");

    static ref WORD_SPLIT: Regex = Regex::new(r"[-_.:\s]+|([a-z])([A-Z])").expect("word split pattern must compile");

    /// Implicit ARIA role for elements without an explicit `role`
    static ref IMPLICIT_ROLES: Vec<(&'static str, &'static str)> = vec![
        ("a", "link"),
        ("area", "link"),
        ("article", "article"),
        ("aside", "complementary"),
        ("button", "button"),
        ("datalist", "listbox"),
        ("details", "group"),
        ("dialog", "dialog"),
        ("fieldset", "group"),
        ("figure", "figure"),
        ("footer", "contentinfo"),
        ("form", "form"),
        ("h1", "heading"),
        ("h2", "heading"),
        ("h3", "heading"),
        ("h4", "heading"),
        ("h5", "heading"),
        ("h6", "heading"),
        ("header", "banner"),
        ("hr", "separator"),
        ("img", "img"),
        ("li", "listitem"),
        ("main", "main"),
        ("math", "math"),
        ("menu", "list"),
        ("meter", "meter"),
        ("nav", "navigation"),
        ("ol", "list"),
        ("optgroup", "group"),
        ("option", "option"),
        ("output", "status"),
        ("progress", "progressbar"),
        ("section", "region"),
        ("select", "combobox"),
        ("summary", "button"),
        ("table", "table"),
        ("tbody", "rowgroup"),
        ("td", "cell"),
        ("textarea", "textbox"),
        ("tfoot", "rowgroup"),
        ("th", "columnheader"),
        ("thead", "rowgroup"),
        ("tr", "row"),
        ("ul", "list"),
    ];
}

fn compile(sources: &[&str]) -> Vec<Regex> {
    sources
        .iter()
        .map(|s| Regex::new(s).expect("pattern table entry must compile"))
        .collect()
}

/// Naming category of a class or id token
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum NamingPattern {
    /// Hash-like or framework-generated
    AutoGenerated,
    /// Utility/framework layout class
    Utility,
    /// Position or transient state class
    Positional,
    /// Block__element--modifier naming
    Bem,
    /// Describes purpose in plain words
    Semantic,
    /// None of the above
    Plain,
}

impl NamingPattern {
    /// Stability estimate for a class of this pattern
    #[must_use]
    pub const fn class_stability(self) -> f64 {
        match self {
            Self::Bem => 0.85,
            Self::Semantic => 0.8,
            Self::Plain => 0.65,
            Self::Utility => 0.4,
            Self::Positional => 0.3,
            Self::AutoGenerated => 0.1,
        }
    }

    /// Whether the naming is considered fragile
    #[must_use]
    pub const fn is_fragile(self) -> bool {
        matches!(self, Self::AutoGenerated | Self::Utility | Self::Positional)
    }
}

/// Whether a class or id token looks machine-generated
#[must_use]
pub fn is_auto_generated(token: &str) -> bool {
    if token.is_empty() {
        return false;
    }
    AUTO_GENERATED.iter().any(|re| re.is_match(token))
}

/// Whether a class is a utility/framework class
#[must_use]
pub fn is_utility_class(token: &str) -> bool {
    UTILITY_CLASS.iter().any(|re| re.is_match(token))
}

/// Whether a class describes position or transient state
#[must_use]
pub fn is_positional_class(token: &str) -> bool {
    POSITIONAL_CLASS.iter().any(|re| re.is_match(token))
}

/// Whether a token follows BEM naming with an element or modifier part
#[must_use]
pub fn is_bem(token: &str) -> bool {
    (token.contains("__") || token.contains("--")) && BEM.is_match(token)
}

/// Whether a token contains a semantic keyword as one of its words
#[must_use]
pub fn is_semantic_name(token: &str) -> bool {
    words(token)
        .iter()
        .any(|w| SEMANTIC_KEYWORDS.contains(&w.as_str()))
}

/// Whether a token ends in a numeric suffix (`item-3`, `row_12`)
#[must_use]
pub fn has_digit_suffix(token: &str) -> bool {
    DIGIT_SUFFIX.is_match(token)
}

/// Classify a class or id token, most fragile category first
#[must_use]
pub fn classify_name(token: &str) -> NamingPattern {
    if is_auto_generated(token) {
        NamingPattern::AutoGenerated
    } else if is_positional_class(token) {
        NamingPattern::Positional
    } else if is_utility_class(token) {
        NamingPattern::Utility
    } else if is_bem(token) {
        NamingPattern::Bem
    } else if is_semantic_name(token) {
        NamingPattern::Semantic
    } else {
        NamingPattern::Plain
    }
}

/// Whether an attribute is a test automation hook
#[must_use]
pub fn is_test_attribute(name: &str) -> bool {
    TEST_ATTRIBUTES.contains(&name)
}

/// Whether an attribute carries accessibility semantics
#[must_use]
pub fn is_accessibility_attribute(name: &str) -> bool {
    ACCESSIBILITY_ATTRIBUTES.contains(&name)
}

/// Whether an ARIA attribute describes transient state
#[must_use]
pub fn is_aria_state_attribute(name: &str) -> bool {
    ARIA_STATE_ATTRIBUTES.contains(&name)
}

/// Whether a tag is form-like
#[must_use]
pub fn is_form_like(tag: &str) -> bool {
    FORM_LIKE_TAGS.contains(&tag)
}

/// Whether a tag's text identifies it
#[must_use]
pub fn is_text_bearing(tag: &str) -> bool {
    TEXT_BEARING_TAGS.contains(&tag)
}

/// Implicit ARIA role of a tag, if any
#[must_use]
pub fn implicit_role(tag: &str) -> Option<&'static str> {
    IMPLICIT_ROLES
        .iter()
        .find(|(t, _)| *t == tag)
        .map(|(_, role)| *role)
}

/// Implicit role of an element, considering attributes that change it
#[must_use]
pub fn implicit_role_for(tag: &str, attribute: impl Fn(&str) -> Option<String>) -> Option<&'static str> {
    match tag {
        "a" | "area" if attribute("href").is_none() => None,
        "img" if attribute("alt").is_some_and(|alt| alt.is_empty()) => Some("presentation"),
        "input" => Some(input_role(attribute("type").as_deref().unwrap_or("text"))),
        "select" if attribute("multiple").is_some() => Some("listbox"),
        _ => implicit_role(tag),
    }
}

fn input_role(input_type: &str) -> &'static str {
    match input_type.to_ascii_lowercase().as_str() {
        "button" | "submit" | "reset" | "image" => "button",
        "checkbox" => "checkbox",
        "radio" => "radio",
        "range" => "slider",
        "number" => "spinbutton",
        "search" => "searchbox",
        _ => "textbox",
    }
}

fn words(token: &str) -> Vec<String> {
    WORD_SPLIT
        .replace_all(token, "$1 $2")
        .split_whitespace()
        .map(str::to_ascii_lowercase)
        .collect()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    mod auto_generated_tests {
        use super::*;

        #[test]
        fn test_css_in_js_hashes() {
            assert!(is_auto_generated("css-1a2b3c"));
            assert!(is_auto_generated("sc-bdVaJa"));
            assert!(is_auto_generated("jsx-2384923"));
            assert!(is_auto_generated("emotion-0"));
        }

        #[test]
        fn test_framework_ids() {
            assert!(is_auto_generated("ember123"));
            assert!(is_auto_generated(":r0:"));
            assert!(is_auto_generated("react-select-3-input"));
            assert!(is_auto_generated("mui-12345"));
            assert!(is_auto_generated("123e4567-e89b-12d3-a456-426614174000"));
        }

        #[test]
        fn test_css_module_suffixes() {
            assert!(is_auto_generated("Button_a1B2c"));
            assert!(is_auto_generated("header__3xQzP"));
        }

        #[test]
        fn test_human_names_are_not_generated() {
            assert!(!is_auto_generated("submit-btn"));
            assert!(!is_auto_generated("login-button"));
            assert!(!is_auto_generated("card__title"));
            assert!(!is_auto_generated("nav"));
            assert!(!is_auto_generated(""));
        }

        #[test]
        fn test_years_and_hex_words_are_not_generated() {
            assert!(!is_auto_generated("footer-2024"));
            assert!(!is_auto_generated("deadbeef-panel"));
            assert!(!is_auto_generated("release-notes-2024-q1"));
            assert!(is_auto_generated("panel-8f3a9c2e"));
            assert!(is_auto_generated("row_123456"));
            assert!(is_auto_generated("a1b2c3d4e5"));
        }
    }

    mod class_category_tests {
        use super::*;

        #[test]
        fn test_utility_classes() {
            assert!(is_utility_class("mt-4"));
            assert!(is_utility_class("px-2"));
            assert!(is_utility_class("flex"));
            assert!(is_utility_class("text-center"));
            assert!(is_utility_class("md:hidden"));
            assert!(is_utility_class("col-md-6"));
            assert!(!is_utility_class("login-button"));
        }

        #[test]
        fn test_positional_classes() {
            assert!(is_positional_class("first"));
            assert!(is_positional_class("last-child"));
            assert!(is_positional_class("active"));
            assert!(is_positional_class("is-open"));
            assert!(is_positional_class("item-3"));
            assert!(!is_positional_class("menu"));
        }

        #[test]
        fn test_bem() {
            assert!(is_bem("card__title"));
            assert!(is_bem("card__title--large"));
            assert!(is_bem("button--primary"));
            assert!(!is_bem("card"));
            assert!(!is_bem("Card__Title"));
        }

        #[test]
        fn test_semantic_names() {
            assert!(is_semantic_name("login-button"));
            assert!(is_semantic_name("mainNav"));
            assert!(is_semantic_name("user_profile"));
            assert!(!is_semantic_name("xyzzy"));
        }

        #[test]
        fn test_classify_name_order() {
            assert_eq!(classify_name("css-1a2b3c"), NamingPattern::AutoGenerated);
            assert_eq!(classify_name("active"), NamingPattern::Positional);
            assert_eq!(classify_name("mt-4"), NamingPattern::Utility);
            assert_eq!(classify_name("card__title"), NamingPattern::Bem);
            assert_eq!(classify_name("login-button"), NamingPattern::Semantic);
            assert_eq!(classify_name("xyzzy"), NamingPattern::Plain);
        }

        #[test]
        fn test_class_stability_order() {
            assert!(NamingPattern::Bem.class_stability() > NamingPattern::Utility.class_stability());
            assert!(
                NamingPattern::Semantic.class_stability()
                    > NamingPattern::AutoGenerated.class_stability()
            );
            assert!(NamingPattern::AutoGenerated.is_fragile());
            assert!(!NamingPattern::Semantic.is_fragile());
        }

        #[test]
        fn test_digit_suffix() {
            assert!(has_digit_suffix("row-12"));
            assert!(has_digit_suffix("item3"));
            assert!(!has_digit_suffix("submit-btn"));
        }
    }

    mod table_tests {
        use super::*;

        #[test]
        fn test_attribute_tables() {
            assert!(is_test_attribute("data-testid"));
            assert!(is_test_attribute("data-cy"));
            assert!(!is_test_attribute("data-id"));
            assert!(is_accessibility_attribute("aria-label"));
            assert!(is_aria_state_attribute("aria-expanded"));
            assert!(!is_aria_state_attribute("aria-label"));
        }

        #[test]
        fn test_tag_tables() {
            assert!(is_form_like("input"));
            assert!(!is_form_like("div"));
            assert!(is_text_bearing("button"));
            assert!(is_text_bearing("a"));
            assert!(!is_text_bearing("div"));
        }

        #[test]
        fn test_implicit_roles() {
            assert_eq!(implicit_role("ul"), Some("list"));
            assert_eq!(implicit_role("li"), Some("listitem"));
            assert_eq!(implicit_role("nav"), Some("navigation"));
            assert_eq!(implicit_role("div"), None);
        }

        #[test]
        fn test_implicit_role_for_attribute_dependent_tags() {
            let none = |_: &str| None::<String>;
            assert_eq!(implicit_role_for("a", none), None);
            assert_eq!(
                implicit_role_for("a", |n: &str| (n == "href").then(|| "/".to_string())),
                Some("link")
            );
            assert_eq!(
                implicit_role_for("input", |n: &str| (n == "type").then(|| "checkbox".to_string())),
                Some("checkbox")
            );
            assert_eq!(implicit_role_for("input", none), Some("textbox"));
        }

        #[test]
        fn test_pattern_tables_compile() {
            assert_eq!(AUTO_GENERATED.len(), 18);
            assert_eq!(UTILITY_CLASS.len(), 11);
            assert_eq!(POSITIONAL_CLASS.len(), 4);
            assert!(PATTERN_TABLE_VERSION > 0);
        }
    }
}
