use std::fmt;
use std::time::Duration;

use super::action::ActionError;

/// Outcome of one rule against one dataset.
#[derive(Debug, Clone, PartialEq)]
pub enum RuleOutcome {
    /// The condition held and every action succeeded.
    Applied,
    /// The condition did not hold; no action ran.
    Skipped,
    /// The condition held but an action failed. Actions after the failed one
    /// did not run; the pass continued with the next rule.
    Failed(ActionError),
}

impl fmt::Display for RuleOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RuleOutcome::Applied => write!(f, "applied"),
            RuleOutcome::Skipped => write!(f, "skipped"),
            RuleOutcome::Failed(err) => write!(f, "failed: {err}"),
        }
    }
}

/// Per-dataset report returned by [`RuleSet::apply()`](super::ruleset::RuleSet::apply).
///
/// Holds one `(rule name, outcome)` pair per rule, in execution order, plus
/// the wall-clock duration of the pass. The caller decides whether a dataset
/// with failed rules is acceptable output.
#[derive(Debug, Clone)]
#[must_use]
pub struct ExecutionReport {
    outcomes: Vec<(String, RuleOutcome)>,
    duration: Duration,
}

impl ExecutionReport {
    pub(crate) fn new(outcomes: Vec<(String, RuleOutcome)>, duration: Duration) -> Self {
        Self { outcomes, duration }
    }

    /// All `(rule name, outcome)` pairs in execution order.
    #[must_use]
    pub fn outcomes(&self) -> &[(String, RuleOutcome)] {
        &self.outcomes
    }

    /// The outcome recorded for a rule, or `None` for an unknown name.
    #[must_use]
    pub fn outcome_of(&self, rule_name: &str) -> Option<&RuleOutcome> {
        self.outcomes
            .iter()
            .find(|(name, _)| name == rule_name)
            .map(|(_, outcome)| outcome)
    }

    /// Names of rules that applied, in execution order.
    #[must_use]
    pub fn applied(&self) -> Vec<&str> {
        self.filter(|o| matches!(o, RuleOutcome::Applied))
    }

    /// Names of rules that were skipped, in execution order.
    #[must_use]
    pub fn skipped(&self) -> Vec<&str> {
        self.filter(|o| matches!(o, RuleOutcome::Skipped))
    }

    /// Names of rules that failed, in execution order.
    #[must_use]
    pub fn failed(&self) -> Vec<&str> {
        self.filter(|o| matches!(o, RuleOutcome::Failed(_)))
    }

    /// Whether no rule failed.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.failed().is_empty()
    }

    /// Wall-clock duration of the pass.
    #[must_use]
    pub fn duration(&self) -> Duration {
        self.duration
    }

    fn filter(&self, pred: impl Fn(&RuleOutcome) -> bool) -> Vec<&str> {
        self.outcomes
            .iter()
            .filter(|(_, outcome)| pred(outcome))
            .map(|(name, _)| name.as_str())
            .collect()
    }
}

impl fmt::Display for ExecutionReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} applied, {} skipped, {} failed",
            self.applied().len(),
            self.skipped().len(),
            self.failed().len(),
        )?;
        write!(f, ", duration: {:?}", self.duration)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ActionError, DatasetError};

    fn failure() -> ActionError {
        ActionError {
            action: "DeleteElement",
            tag: String::new(),
            source: DatasetError::MalformedTag { tag: String::new() },
        }
    }

    #[test]
    fn report_accessors() {
        let report = ExecutionReport::new(
            vec![
                ("a".into(), RuleOutcome::Applied),
                ("b".into(), RuleOutcome::Skipped),
                ("c".into(), RuleOutcome::Failed(failure())),
                ("d".into(), RuleOutcome::Applied),
            ],
            Duration::from_nanos(500),
        );

        assert_eq!(report.applied(), &["a", "d"]);
        assert_eq!(report.skipped(), &["b"]);
        assert_eq!(report.failed(), &["c"]);
        assert!(!report.is_clean());
        assert_eq!(report.duration(), Duration::from_nanos(500));
        assert_eq!(report.outcome_of("b"), Some(&RuleOutcome::Skipped));
        assert_eq!(report.outcome_of("nonexistent"), None);
    }

    #[test]
    fn clean_report() {
        let report = ExecutionReport::new(
            vec![
                ("a".into(), RuleOutcome::Applied),
                ("b".into(), RuleOutcome::Skipped),
            ],
            Duration::from_nanos(100),
        );
        assert!(report.is_clean());
    }

    #[test]
    fn report_display() {
        let report = ExecutionReport::new(
            vec![
                ("a".into(), RuleOutcome::Applied),
                ("b".into(), RuleOutcome::Skipped),
                ("c".into(), RuleOutcome::Failed(failure())),
            ],
            Duration::from_nanos(500),
        );
        let s = report.to_string();
        assert!(s.contains("1 applied, 1 skipped, 1 failed"));
    }

    #[test]
    fn outcome_display() {
        assert_eq!(RuleOutcome::Applied.to_string(), "applied");
        assert_eq!(RuleOutcome::Skipped.to_string(), "skipped");
        assert!(RuleOutcome::Failed(failure())
            .to_string()
            .starts_with("failed: DeleteElement"));
    }

    #[test]
    fn empty_report_is_clean() {
        let report = ExecutionReport::new(vec![], Duration::from_nanos(10));
        assert!(report.is_clean());
        assert!(report.outcomes().is_empty());
    }
}
