//! Test double with injectable query failures and detachment.

use std::cell::Cell;

use super::{DomDocument, DomError, DomResult, HtmlDocument, HtmlElement};

/// Wraps an [`HtmlDocument`], failing selected query kinds on demand
#[derive(Debug)]
pub(crate) struct FlakyDocument<'a> {
    inner: HtmlDocument<'a>,
    fail_css: bool,
    fail_xpath: bool,
    attached_checks: Option<Cell<usize>>,
}

impl<'a> FlakyDocument<'a> {
    pub(crate) const fn new(inner: HtmlDocument<'a>) -> Self {
        Self {
            inner,
            fail_css: false,
            fail_xpath: false,
            attached_checks: None,
        }
    }

    /// Every CSS query errors
    pub(crate) const fn failing_css(mut self) -> Self {
        self.fail_css = true;
        self
    }

    /// Every XPath evaluation errors
    pub(crate) const fn failing_xpath(mut self) -> Self {
        self.fail_xpath = true;
        self
    }

    /// Elements count as attached for the first `checks` calls only
    pub(crate) fn detach_after(mut self, checks: usize) -> Self {
        self.attached_checks = Some(Cell::new(checks));
        self
    }
}

impl<'a> DomDocument for FlakyDocument<'a> {
    type Element = HtmlElement<'a>;

    fn query_selector_all(&self, selector: &str) -> DomResult<Vec<Self::Element>> {
        if self.fail_css {
            return Err(DomError::QueryFailed {
                message: format!("selector engine unavailable for {selector}"),
            });
        }
        self.inner.query_selector_all(selector)
    }

    fn evaluate_xpath(&self, expression: &str) -> DomResult<Vec<Self::Element>> {
        if self.fail_xpath {
            return Err(DomError::QueryFailed {
                message: format!("xpath engine unavailable for {expression}"),
            });
        }
        self.inner.evaluate_xpath(expression)
    }

    fn contains(&self, element: &Self::Element) -> bool {
        if let Some(left) = &self.attached_checks {
            match left.get() {
                0 => return false,
                n => left.set(n - 1),
            }
        }
        self.inner.contains(element)
    }

    fn root_element(&self) -> Option<Self::Element> {
        self.inner.root_element()
    }
}
