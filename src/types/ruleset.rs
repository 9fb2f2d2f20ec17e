use std::fmt;
use std::sync::Arc;

use super::action::Action;
use super::condition::Condition;
use super::dataset::Dataset;
use super::error::LoadError;
use super::report::ExecutionReport;
use super::rule::Rule;
use crate::load::RuleSetConfig;
use crate::registry::Registry;

/// Builder for constructing a [`RuleSet`] programmatically.
///
/// Rules are defined via closures; configuration-driven construction goes
/// through [`RuleSet::from_config()`] instead.
///
/// # Example
///
/// ```
/// use tagsift::{RuleSetBuilder, always, element_exists, delete_element, empty_element};
///
/// let ruleset = RuleSetBuilder::new()
///     .rule("strip_modality", |r| {
///         r.when(element_exists("Modality"))
///             .then(delete_element("Modality"))
///     })
///     .rule("blank_sex", |r| {
///         r.when(always()).then(empty_element("PatientSex"))
///     })
///     .build()
///     .unwrap();
/// ```
#[derive(Debug, Default)]
pub struct RuleSetBuilder {
    rules: Vec<PendingRule>,
}

#[derive(Debug)]
struct PendingRule {
    name: String,
    condition: Option<Arc<dyn Condition>>,
    actions: Vec<Arc<dyn Action>>,
}

/// Intermediate builder passed to the rule definition closure.
#[derive(Debug, Default)]
pub struct RuleBuilder {
    condition: Option<Arc<dyn Condition>>,
    actions: Vec<Arc<dyn Action>>,
}

impl RuleSetBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Define a rule. The closure must call `.when(condition)`; building
    /// fails with [`LoadError::MissingCondition`] otherwise. A rule with no
    /// actions is legal and applies as a no-op.
    #[must_use]
    pub fn rule(mut self, name: &str, f: impl FnOnce(RuleBuilder) -> RuleBuilder) -> Self {
        let builder = f(RuleBuilder::default());
        self.rules.push(PendingRule {
            name: name.to_owned(),
            condition: builder.condition,
            actions: builder.actions,
        });
        self
    }

    /// Freeze the rules into an immutable `RuleSet`.
    ///
    /// # Errors
    ///
    /// Returns [`LoadError::MissingCondition`] if a rule never set one.
    pub fn build(self) -> Result<RuleSet, LoadError> {
        let mut rules = Vec::with_capacity(self.rules.len());
        for pending in self.rules {
            let condition = pending
                .condition
                .ok_or_else(|| LoadError::MissingCondition {
                    rule: pending.name.clone(),
                })?;
            rules.push(Rule {
                name: pending.name,
                condition,
                actions: pending.actions,
            });
        }
        Ok(RuleSet { rules })
    }
}

impl RuleBuilder {
    /// Set the rule's condition.
    #[must_use]
    pub fn when(mut self, condition: Arc<dyn Condition>) -> Self {
        self.condition = Some(condition);
        self
    }

    /// Append an action, preserving declaration order.
    #[must_use]
    pub fn then(mut self, action: Arc<dyn Action>) -> Self {
        self.actions.push(action);
        self
    }
}

/// An immutable, ordered sequence of rules. Thread-safe and designed to live
/// behind `Arc`; reloading means building a new `RuleSet` and swapping the
/// reference, never mutating one in place while workers read it.
#[derive(Debug)]
pub struct RuleSet {
    pub(crate) rules: Vec<Rule>,
}

impl RuleSet {
    /// Apply every rule, in order, to the dataset.
    ///
    /// Each rule's condition is evaluated against the current dataset state,
    /// which may already have been mutated by earlier rules in the same
    /// pass. Every rule is considered; there is no short-circuit at the
    /// ruleset level. Action failures are recorded in the report and never
    /// abort the pass.
    pub fn apply(&self, dataset: &mut dyn Dataset) -> ExecutionReport {
        crate::engine::apply(&self.rules, dataset)
    }

    /// Build a `RuleSet` from parsed configuration, resolving class names
    /// through the registry.
    ///
    /// # Errors
    ///
    /// Returns [`LoadError`] on any unknown class, arity, or parameter
    /// problem; the whole ruleset is rejected.
    pub fn from_config(registry: &Registry, config: RuleSetConfig) -> Result<Self, LoadError> {
        crate::load::load(registry, config)
    }

    /// Parse a JSON configuration string and build a `RuleSet`.
    ///
    /// # Errors
    ///
    /// Returns [`TagsiftError`](crate::TagsiftError) on JSON or load failure.
    pub fn from_json(registry: &Registry, input: &str) -> Result<Self, crate::TagsiftError> {
        let config: RuleSetConfig = serde_json::from_str(input)?;
        let ruleset = Self::from_config(registry, config)?;
        Ok(ruleset)
    }

    /// Read a JSON configuration file and build a `RuleSet`.
    ///
    /// # Errors
    ///
    /// Returns [`TagsiftError`](crate::TagsiftError) on I/O, JSON, or load
    /// failure.
    pub fn from_file(
        registry: &Registry,
        path: impl AsRef<std::path::Path>,
    ) -> Result<Self, crate::TagsiftError> {
        let input = std::fs::read_to_string(path)?;
        Self::from_json(registry, &input)
    }

    /// The number of rules.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Whether the ruleset holds no rules.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Rule names in execution order.
    #[must_use]
    pub fn rule_names(&self) -> Vec<&str> {
        self.rules.iter().map(|r| r.name.as_str()).collect()
    }
}

impl fmt::Display for RuleSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "RuleSet({} rules)", self.rules.len())
    }
}
