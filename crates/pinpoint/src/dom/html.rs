//! In-memory DOM backed by `scraper`.

use scraper::{ElementRef, Html, Selector};
use std::fmt;

use super::xpath::XPathExpr;
use super::{DomDocument, DomElement, DomError, DomResult, Rect};

/// A parsed HTML page that owns its tree
pub struct HtmlPage {
    html: Html,
}

impl fmt::Debug for HtmlPage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HtmlPage")
            .field("errors", &self.html.errors.len())
            .finish()
    }
}

impl HtmlPage {
    /// Parse a full HTML document
    #[must_use]
    pub fn parse(source: &str) -> Self {
        Self {
            html: Html::parse_document(source),
        }
    }

    /// Borrow the page as a queryable document
    #[must_use]
    pub fn document(&self) -> HtmlDocument<'_> {
        HtmlDocument { html: &self.html }
    }
}

/// Borrowed view of an [`HtmlPage`] implementing [`DomDocument`]
#[derive(Clone, Copy)]
pub struct HtmlDocument<'a> {
    html: &'a Html,
}

impl fmt::Debug for HtmlDocument<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HtmlDocument").finish_non_exhaustive()
    }
}

impl<'a> HtmlDocument<'a> {
    /// Every element in document order
    #[must_use]
    pub fn all_elements(&self) -> Vec<HtmlElement<'a>> {
        self.html
            .root_element()
            .descendants()
            .filter_map(ElementRef::wrap)
            .map(HtmlElement)
            .collect()
    }

    fn select(&self, selector: &str) -> DomResult<Vec<HtmlElement<'a>>> {
        let parsed = Selector::parse(selector).map_err(|e| DomError::InvalidSelector {
            selector: selector.to_string(),
            message: format!("{e:?}"),
        })?;
        Ok(self.html.select(&parsed).map(HtmlElement).collect())
    }
}

impl<'a> DomDocument for HtmlDocument<'a> {
    type Element = HtmlElement<'a>;

    fn query_selector_all(&self, selector: &str) -> DomResult<Vec<Self::Element>> {
        self.select(selector)
    }

    fn evaluate_xpath(&self, expression: &str) -> DomResult<Vec<Self::Element>> {
        let expr = XPathExpr::parse(expression)?;
        let hits = expr.evaluate(self.html.root_element());
        Ok(hits.into_iter().map(HtmlElement).collect())
    }

    fn contains(&self, element: &Self::Element) -> bool {
        element
            .0
            .ancestors()
            .last()
            .is_some_and(|top| top == self.html.tree.root())
    }

    fn root_element(&self) -> Option<Self::Element> {
        Some(HtmlElement(self.html.root_element()))
    }
}

/// Element of an [`HtmlDocument`]
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct HtmlElement<'a>(ElementRef<'a>);

impl fmt::Debug for HtmlElement<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<{}", self.0.value().name())?;
        if let Some(id) = self.0.value().id() {
            write!(f, " id=\"{id}\"")?;
        }
        write!(f, ">")
    }
}

impl<'a> HtmlElement<'a> {
    /// Wrap a `scraper` element reference
    #[must_use]
    pub const fn new(element: ElementRef<'a>) -> Self {
        Self(element)
    }

    /// Underlying `scraper` element reference
    #[must_use]
    pub const fn element_ref(&self) -> ElementRef<'a> {
        self.0
    }
}

impl DomElement for HtmlElement<'_> {
    fn tag_name(&self) -> String {
        self.0.value().name().to_ascii_lowercase()
    }

    fn attribute(&self, name: &str) -> Option<String> {
        self.0.value().attr(name).map(str::to_string)
    }

    fn attributes(&self) -> Vec<(String, String)> {
        self.0
            .value()
            .attrs()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    fn text_content(&self) -> String {
        self.0.text().collect()
    }

    fn bounding_rect(&self) -> DomResult<Rect> {
        Err(DomError::LayoutUnavailable)
    }

    fn parent_element(&self) -> Option<Self> {
        self.0.parent().and_then(ElementRef::wrap).map(Self)
    }

    fn children(&self) -> Vec<Self> {
        self.0.children().filter_map(ElementRef::wrap).map(Self).collect()
    }
}
