use std::sync::Arc;

use serde::Deserialize;
use tracing::debug;

use crate::registry::{Params, Registry};
use crate::types::{Condition, LoadError, Rule, RuleSet};

/// Parsed ruleset configuration: an ordered sequence of rule records.
///
/// The on-disk format is JSON; any format that deserializes into these
/// structures works the same way. Class names are resolved through the
/// [`Registry`] at load time.
#[derive(Debug, Clone, Deserialize)]
pub struct RuleSetConfig {
    pub rules: Vec<RuleConfig>,
}

/// One rule record: a condition tree and an ordered action list.
#[derive(Debug, Clone, Deserialize)]
pub struct RuleConfig {
    /// Optional identifier; unnamed rules are assigned `rule<ordinal>`.
    #[serde(default)]
    pub name: Option<String>,
    pub condition: ConditionConfig,
    #[serde(default)]
    pub actions: Vec<ActionConfig>,
}

/// One condition node: a registry class name, its params, and child nodes
/// for composite classes.
#[derive(Debug, Clone, Deserialize)]
pub struct ConditionConfig {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub params: Params,
    #[serde(default)]
    pub children: Vec<ConditionConfig>,
}

/// One action node: a registry class name and its params.
#[derive(Debug, Clone, Deserialize)]
pub struct ActionConfig {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub params: Params,
}

/// Build a [`RuleSet`] from parsed configuration. All-or-nothing: the first
/// error rejects the whole ruleset.
pub(crate) fn load(registry: &Registry, config: RuleSetConfig) -> Result<RuleSet, LoadError> {
    let mut rules = Vec::with_capacity(config.rules.len());
    for (index, rule_config) in config.rules.into_iter().enumerate() {
        let name = rule_config.name.unwrap_or_else(|| format!("rule{index}"));
        let condition = build_condition(registry, &rule_config.condition)?;
        let mut actions = Vec::with_capacity(rule_config.actions.len());
        for action_config in &rule_config.actions {
            actions.push(registry.build_action(&action_config.kind, &action_config.params)?);
        }
        rules.push(Rule {
            name,
            condition,
            actions,
        });
    }
    debug!(rules = rules.len(), "ruleset loaded");
    Ok(RuleSet { rules })
}

/// Build a condition tree depth-first: children before their parent.
fn build_condition(
    registry: &Registry,
    config: &ConditionConfig,
) -> Result<Arc<dyn Condition>, LoadError> {
    let mut children = Vec::with_capacity(config.children.len());
    for child in &config.children {
        children.push(build_condition(registry, child)?);
    }
    registry.build_condition(&config.kind, &config.params, children)
}
