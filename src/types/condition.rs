use std::fmt;
use std::sync::Arc;

use super::dataset::Dataset;
use super::error::LoadError;
use super::Value;
use crate::registry::{self, Params};

/// How a value-inspecting condition compares an element against its
/// configured value. Spelled with the usual comparison symbols in
/// configuration; equality is the default there.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompareOp {
    Eq,
    Neq,
    Gt,
    Gte,
    Lt,
    Lte,
}

impl CompareOp {
    /// Parse an operator from its configuration spelling. Inverse of
    /// [`symbol()`](Self::symbol).
    #[must_use]
    pub fn parse(s: &str) -> Option<CompareOp> {
        match s {
            "==" => Some(CompareOp::Eq),
            "!=" => Some(CompareOp::Neq),
            ">" => Some(CompareOp::Gt),
            ">=" => Some(CompareOp::Gte),
            "<" => Some(CompareOp::Lt),
            "<=" => Some(CompareOp::Lte),
            _ => None,
        }
    }

    /// The configuration spelling of this operator.
    #[must_use]
    pub fn symbol(self) -> &'static str {
        match self {
            CompareOp::Eq => "==",
            CompareOp::Neq => "!=",
            CompareOp::Gt => ">",
            CompareOp::Gte => ">=",
            CompareOp::Lt => "<",
            CompareOp::Lte => "<=",
        }
    }
}

impl fmt::Display for CompareOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// A boolean predicate over a dataset.
///
/// Evaluation is deterministic given the dataset state at call time and
/// cannot mutate the dataset (enforced by the shared borrow). Condition
/// trees are built once at rule-load time, frozen behind `Arc`, and shared
/// read-only across rules and worker threads.
pub trait Condition: fmt::Debug + Send + Sync {
    fn eval(&self, dataset: &dyn Dataset) -> bool;
}

/// Condition that is always satisfied.
#[derive(Debug, Clone, Copy, Default)]
pub struct True;

impl Condition for True {
    fn eval(&self, _dataset: &dyn Dataset) -> bool {
        true
    }
}

/// Condition that is never satisfied.
#[derive(Debug, Clone, Copy, Default)]
pub struct False;

impl Condition for False {
    fn eval(&self, _dataset: &dyn Dataset) -> bool {
        false
    }
}

/// OR-combination of child conditions. Empty `Any` evaluates to `false`.
#[derive(Debug, Default)]
pub struct Any {
    children: Vec<Arc<dyn Condition>>,
}

impl Any {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_children(children: Vec<Arc<dyn Condition>>) -> Self {
        Self { children }
    }

    /// Append a child. Only possible while the node is still exclusively
    /// owned; wrapping in `Arc` freezes the child set.
    pub fn add_child(&mut self, child: Arc<dyn Condition>) {
        self.children.push(child);
    }
}

impl Condition for Any {
    fn eval(&self, dataset: &dyn Dataset) -> bool {
        self.children.iter().any(|c| c.eval(dataset))
    }
}

/// AND-combination of child conditions. Empty `All` evaluates to `true`.
#[derive(Debug, Default)]
pub struct All {
    children: Vec<Arc<dyn Condition>>,
}

impl All {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_children(children: Vec<Arc<dyn Condition>>) -> Self {
        Self { children }
    }

    /// Append a child. Only possible while the node is still exclusively
    /// owned; wrapping in `Arc` freezes the child set.
    pub fn add_child(&mut self, child: Arc<dyn Condition>) {
        self.children.push(child);
    }
}

impl Condition for All {
    fn eval(&self, dataset: &dyn Dataset) -> bool {
        self.children.iter().all(|c| c.eval(dataset))
    }
}

/// Negation of exactly one child condition, fixed at construction.
#[derive(Debug)]
pub struct Not {
    child: Arc<dyn Condition>,
}

impl Not {
    #[must_use]
    pub fn new(child: Arc<dyn Condition>) -> Self {
        Self { child }
    }
}

impl Condition for Not {
    fn eval(&self, dataset: &dyn Dataset) -> bool {
        !self.child.eval(dataset)
    }
}

/// Satisfied when the tag is present in the dataset.
#[derive(Debug, Clone)]
pub struct ElementExists {
    tag: String,
}

impl ElementExists {
    #[must_use]
    pub fn new(tag: &str) -> Self {
        Self {
            tag: tag.to_owned(),
        }
    }
}

impl Condition for ElementExists {
    fn eval(&self, dataset: &dyn Dataset) -> bool {
        dataset.exists(&self.tag)
    }
}

/// Satisfied when the tag's value compares true against a configured value.
/// A missing tag or an incompatible comparison evaluates to `false`.
#[derive(Debug, Clone)]
pub struct ElementMatch {
    tag: String,
    op: CompareOp,
    value: Value,
}

impl ElementMatch {
    #[must_use]
    pub fn new(tag: &str, op: CompareOp, value: impl Into<Value>) -> Self {
        Self {
            tag: tag.to_owned(),
            op,
            value: value.into(),
        }
    }
}

impl Condition for ElementMatch {
    fn eval(&self, dataset: &dyn Dataset) -> bool {
        dataset
            .get(&self.tag)
            .and_then(|v| v.compare(self.op, &self.value))
            .unwrap_or(false)
    }
}

#[must_use]
pub fn always() -> Arc<dyn Condition> {
    Arc::new(True)
}

#[must_use]
pub fn never() -> Arc<dyn Condition> {
    Arc::new(False)
}

#[must_use]
pub fn any(children: Vec<Arc<dyn Condition>>) -> Arc<dyn Condition> {
    Arc::new(Any::with_children(children))
}

#[must_use]
pub fn all(children: Vec<Arc<dyn Condition>>) -> Arc<dyn Condition> {
    Arc::new(All::with_children(children))
}

#[must_use]
pub fn not(child: Arc<dyn Condition>) -> Arc<dyn Condition> {
    Arc::new(Not::new(child))
}

#[must_use]
pub fn element_exists(tag: &str) -> Arc<dyn Condition> {
    Arc::new(ElementExists::new(tag))
}

#[must_use]
pub fn element_match(tag: &str, op: CompareOp, value: impl Into<Value>) -> Arc<dyn Condition> {
    Arc::new(ElementMatch::new(tag, op, value))
}

// Configuration constructors wired into the registry builtins. Each receives
// the node's parsed params and its already-built children.

pub(crate) fn true_from_config(
    _params: &Params,
    children: Vec<Arc<dyn Condition>>,
) -> Result<Arc<dyn Condition>, LoadError> {
    registry::expect_no_children("True", &children)?;
    Ok(always())
}

pub(crate) fn false_from_config(
    _params: &Params,
    children: Vec<Arc<dyn Condition>>,
) -> Result<Arc<dyn Condition>, LoadError> {
    registry::expect_no_children("False", &children)?;
    Ok(never())
}

pub(crate) fn any_from_config(
    _params: &Params,
    children: Vec<Arc<dyn Condition>>,
) -> Result<Arc<dyn Condition>, LoadError> {
    Ok(any(children))
}

pub(crate) fn all_from_config(
    _params: &Params,
    children: Vec<Arc<dyn Condition>>,
) -> Result<Arc<dyn Condition>, LoadError> {
    Ok(all(children))
}

pub(crate) fn not_from_config(
    _params: &Params,
    mut children: Vec<Arc<dyn Condition>>,
) -> Result<Arc<dyn Condition>, LoadError> {
    if children.len() != 1 {
        return Err(LoadError::InvalidStructure {
            class: "Not".to_owned(),
            reason: format!("expected exactly 1 child, got {}", children.len()),
        });
    }
    let child = children.remove(0);
    Ok(not(child))
}

pub(crate) fn element_exists_from_config(
    params: &Params,
    children: Vec<Arc<dyn Condition>>,
) -> Result<Arc<dyn Condition>, LoadError> {
    registry::expect_no_children("ElementExists", &children)?;
    let tag = registry::str_param(params, "ElementExists", "tag")?;
    Ok(element_exists(tag))
}

pub(crate) fn element_match_from_config(
    params: &Params,
    children: Vec<Arc<dyn Condition>>,
) -> Result<Arc<dyn Condition>, LoadError> {
    registry::expect_no_children("ElementMatch", &children)?;
    let tag = registry::str_param(params, "ElementMatch", "tag")?;
    let value = registry::value_param(params, "ElementMatch", "value")?;
    let op = match params.get("op") {
        None => CompareOp::Eq,
        Some(raw) => {
            let symbol = raw.as_str().unwrap_or_default();
            CompareOp::parse(symbol).ok_or_else(|| LoadError::BadParam {
                class: "ElementMatch".to_owned(),
                param: "op".to_owned(),
                reason: format!("unknown operator '{symbol}'"),
            })?
        }
    };
    Ok(element_match(tag, op, value))
}
