//! XPath subset evaluator over a `scraper` tree.
//!
//! Supports the location paths locator generation produces: absolute
//! (`/html/body/div[2]`) and descendant (`//button[@id="x"]`) steps, name and
//! `*` node tests, positional predicates, attribute comparison and existence,
//! `contains()`, `starts-with()`, `normalize-space()`, `text()`, `.` and
//! `and`/`or` combinations.

use std::collections::HashSet;

use ego_tree::NodeId;
use pest::iterators::Pair;
use pest::Parser;
use pest_derive::Parser;
use scraper::ElementRef;

use super::{normalize_space, DomError, DomResult};

#[derive(Parser)]
#[grammar = "dom/xpath.pest"]
struct XPathParser;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Axis {
    Child,
    Descendant,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum NodeTest {
    Any,
    Name(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Operand {
    Attribute(String),
    Text,
    Context,
    NormalizeSpace(Option<Box<Operand>>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Condition {
    Or(Vec<Condition>),
    And(Vec<Condition>),
    Equals(Operand, String),
    Contains(Operand, String),
    StartsWith(Operand, String),
    HasAttribute(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Predicate {
    Index(usize),
    Filter(Condition),
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Step {
    axis: Axis,
    test: NodeTest,
    predicates: Vec<Predicate>,
}

/// A parsed XPath location path
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct XPathExpr {
    steps: Vec<Step>,
}

/// Evaluation context: the document node or an element
#[derive(Clone, Copy, PartialEq, Eq)]
enum Context<'a> {
    Document,
    Element(ElementRef<'a>),
}

impl XPathExpr {
    /// Parse an expression
    pub fn parse(expression: &str) -> DomResult<Self> {
        let invalid = |message: String| DomError::InvalidXPath {
            expression: expression.to_string(),
            message,
        };
        let mut pairs =
            XPathParser::parse(Rule::xpath, expression).map_err(|e| invalid(e.to_string()))?;
        let root = pairs
            .next()
            .ok_or_else(|| invalid("empty expression".to_string()))?;

        let mut steps = Vec::new();
        for pair in root.into_inner() {
            if pair.as_rule() == Rule::step {
                steps.push(parse_step(pair).map_err(invalid)?);
            }
        }
        Ok(Self { steps })
    }

    /// Whether the path starts at the document root with a child step
    #[must_use]
    pub fn is_absolute(&self) -> bool {
        self.steps.first().is_some_and(|s| s.axis == Axis::Child)
    }

    /// Number of positional predicates in the path
    #[must_use]
    pub fn index_predicates(&self) -> usize {
        self.steps
            .iter()
            .flat_map(|s| &s.predicates)
            .filter(|p| matches!(p, Predicate::Index(_)))
            .count()
    }

    /// Evaluate against the tree rooted at `root`, returning matches in document order
    #[must_use]
    pub fn evaluate<'a>(&self, root: ElementRef<'a>) -> Vec<ElementRef<'a>> {
        let mut contexts = vec![Context::Document];
        for step in &self.steps {
            let mut next: Vec<Context<'a>> = Vec::new();
            let mut seen: HashSet<NodeId> = HashSet::new();
            for parent in step_parents(&contexts, step.axis, root) {
                let candidates: Vec<ElementRef<'a>> = child_elements(parent, root)
                    .into_iter()
                    .filter(|el| step.test.matches(el))
                    .collect();
                for el in apply_predicates(candidates, &step.predicates) {
                    if seen.insert(el.id()) {
                        next.push(Context::Element(el));
                    }
                }
            }
            contexts = next;
        }

        let hits: HashSet<NodeId> = contexts.iter().filter_map(Context::node_id).collect();
        in_document_order(root, &hits)
    }
}

impl Context<'_> {
    fn node_id(&self) -> Option<NodeId> {
        match self {
            Self::Document => None,
            Self::Element(el) => Some(el.id()),
        }
    }
}

impl NodeTest {
    fn matches(&self, element: &ElementRef<'_>) -> bool {
        match self {
            Self::Any => true,
            Self::Name(name) => element.value().name().eq_ignore_ascii_case(name),
        }
    }
}

/// Elements of the tree under `root` whose node ids are in `ids`, in document order
fn in_document_order<'a>(root: ElementRef<'a>, ids: &HashSet<NodeId>) -> Vec<ElementRef<'a>> {
    if ids.is_empty() {
        return Vec::new();
    }
    root.descendants()
        .filter_map(ElementRef::wrap)
        .filter(|el| ids.contains(&el.id()))
        .collect()
}

/// Parent set of a step: the contexts themselves, or every node under them
///
/// Descendant expansion visits contexts in document order and skips any that
/// lie inside an already expanded subtree, so each node is walked once.
fn step_parents<'a>(contexts: &[Context<'a>], axis: Axis, root: ElementRef<'a>) -> Vec<Context<'a>> {
    match axis {
        Axis::Child => contexts.to_vec(),
        Axis::Descendant if contexts.contains(&Context::Document) => std::iter::once(Context::Document)
            .chain(root.descendants().filter_map(ElementRef::wrap).map(Context::Element))
            .collect(),
        Axis::Descendant => {
            let ids: HashSet<NodeId> = contexts.iter().filter_map(Context::node_id).collect();
            let mut covered: HashSet<NodeId> = HashSet::new();
            let mut parents: Vec<Context<'a>> = Vec::new();
            for el in in_document_order(root, &ids) {
                if covered.contains(&el.id()) {
                    continue;
                }
                for node in el.descendants().filter_map(ElementRef::wrap) {
                    covered.insert(node.id());
                    parents.push(Context::Element(node));
                }
            }
            parents
        }
    }
}

fn child_elements<'a>(parent: Context<'a>, root: ElementRef<'a>) -> Vec<ElementRef<'a>> {
    match parent {
        Context::Document => vec![root],
        Context::Element(el) => el.children().filter_map(ElementRef::wrap).collect(),
    }
}

fn apply_predicates<'a>(mut nodes: Vec<ElementRef<'a>>, predicates: &[Predicate]) -> Vec<ElementRef<'a>> {
    for predicate in predicates {
        nodes = match predicate {
            Predicate::Index(n) => nodes.get(n.wrapping_sub(1)).copied().into_iter().collect(),
            Predicate::Filter(cond) => nodes.into_iter().filter(|el| cond.holds(el)).collect(),
        };
    }
    nodes
}

impl Condition {
    fn holds(&self, element: &ElementRef<'_>) -> bool {
        match self {
            Self::Or(parts) => parts.iter().any(|c| c.holds(element)),
            Self::And(parts) => parts.iter().all(|c| c.holds(element)),
            Self::Equals(operand, literal) => operand.values(element).iter().any(|v| v == literal),
            Self::Contains(operand, literal) => operand.first_value(element).contains(literal.as_str()),
            Self::StartsWith(operand, literal) => {
                operand.first_value(element).starts_with(literal.as_str())
            }
            Self::HasAttribute(name) => element.value().attr(name).is_some(),
        }
    }
}

impl Operand {
    /// String values of the operand's node set
    fn values(&self, element: &ElementRef<'_>) -> Vec<String> {
        match self {
            Self::Attribute(name) => element.value().attr(name).map(str::to_string).into_iter().collect(),
            Self::Text => element
                .children()
                .filter_map(|node| node.value().as_text().map(|t| (**t).to_string()))
                .collect(),
            Self::Context => vec![element.text().collect()],
            Self::NormalizeSpace(inner) => {
                let raw = match inner {
                    Some(op) => op.first_value(element),
                    None => Self::Context.first_value(element),
                };
                vec![normalize_space(&raw)]
            }
        }
    }

    fn first_value(&self, element: &ElementRef<'_>) -> String {
        self.values(element).into_iter().next().unwrap_or_default()
    }
}

fn parse_step(pair: Pair<'_, Rule>) -> Result<Step, String> {
    let mut axis = Axis::Child;
    let mut test = NodeTest::Any;
    let mut predicates = Vec::new();
    for inner in pair.into_inner() {
        match inner.as_rule() {
            Rule::child => axis = Axis::Child,
            Rule::descendant => axis = Axis::Descendant,
            Rule::wildcard => test = NodeTest::Any,
            Rule::name => test = NodeTest::Name(inner.as_str().to_ascii_lowercase()),
            Rule::predicate => predicates.push(parse_predicate(inner)?),
            other => return Err(format!("unexpected rule {other:?} in step")),
        }
    }
    Ok(Step {
        axis,
        test,
        predicates,
    })
}

fn parse_predicate(pair: Pair<'_, Rule>) -> Result<Predicate, String> {
    let inner = pair
        .into_inner()
        .next()
        .ok_or_else(|| "empty predicate".to_string())?;
    match inner.as_rule() {
        Rule::index => {
            let n: usize = inner
                .as_str()
                .parse()
                .map_err(|e| format!("bad index: {e}"))?;
            if n == 0 {
                return Err("positions start at 1".to_string());
            }
            Ok(Predicate::Index(n))
        }
        _ => Ok(Predicate::Filter(parse_condition(inner)?)),
    }
}

fn parse_condition(pair: Pair<'_, Rule>) -> Result<Condition, String> {
    match pair.as_rule() {
        Rule::or_expr | Rule::and_expr => {
            let is_or = pair.as_rule() == Rule::or_expr;
            let mut parts = pair
                .into_inner()
                .map(parse_condition)
                .collect::<Result<Vec<_>, _>>()?;
            if parts.len() == 1 {
                return Ok(parts.remove(0));
            }
            Ok(if is_or {
                Condition::Or(parts)
            } else {
                Condition::And(parts)
            })
        }
        Rule::comparison => {
            let (operand, literal) = operand_and_literal(pair)?;
            Ok(Condition::Equals(operand, literal))
        }
        Rule::contains_fn => {
            let (operand, literal) = operand_and_literal(pair)?;
            Ok(Condition::Contains(operand, literal))
        }
        Rule::starts_with_fn => {
            let (operand, literal) = operand_and_literal(pair)?;
            Ok(Condition::StartsWith(operand, literal))
        }
        Rule::attr_ref => Ok(Condition::HasAttribute(attr_name(pair)?)),
        other => Err(format!("unexpected rule {other:?} in predicate")),
    }
}

fn operand_and_literal(pair: Pair<'_, Rule>) -> Result<(Operand, String), String> {
    let mut inner = pair.into_inner();
    let operand = inner
        .next()
        .ok_or_else(|| "missing operand".to_string())
        .and_then(parse_operand)?;
    let literal = inner
        .next()
        .ok_or_else(|| "missing literal".to_string())
        .map(parse_literal)?;
    Ok((operand, literal))
}

fn parse_operand(pair: Pair<'_, Rule>) -> Result<Operand, String> {
    match pair.as_rule() {
        Rule::attr_ref => Ok(Operand::Attribute(attr_name(pair)?)),
        Rule::text_fn => Ok(Operand::Text),
        Rule::context_node => Ok(Operand::Context),
        Rule::normalize_space_fn => {
            let inner = match pair.into_inner().next() {
                Some(p) => Some(Box::new(parse_operand(p)?)),
                None => None,
            };
            Ok(Operand::NormalizeSpace(inner))
        }
        other => Err(format!("unexpected rule {other:?} as operand")),
    }
}

fn attr_name(pair: Pair<'_, Rule>) -> Result<String, String> {
    pair.into_inner()
        .next()
        .map(|p| p.as_str().to_ascii_lowercase())
        .ok_or_else(|| "missing attribute name".to_string())
}

fn parse_literal(pair: Pair<'_, Rule>) -> String {
    pair.into_inner()
        .next()
        .map(|p| p.as_str().to_string())
        .unwrap_or_default()
}
