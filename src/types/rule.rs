use std::sync::Arc;

use super::action::Action;
use super::condition::Condition;

/// A named rule: one condition paired with an ordered sequence of actions.
///
/// Rules are created via [`RuleSetBuilder`](super::RuleSet) or loaded from
/// configuration with [`RuleSet::from_config()`](super::RuleSet::from_config).
/// The condition and actions are shared, immutable trait objects, so a rule
/// is cheap to clone and safe to share across worker threads.
#[derive(Debug, Clone)]
pub struct Rule {
    pub name: String,
    pub condition: Arc<dyn Condition>,
    pub actions: Vec<Arc<dyn Action>>,
}
