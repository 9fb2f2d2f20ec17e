use std::time::Instant;

use tracing::{debug, trace};

use crate::types::{ActionError, Dataset, ExecutionReport, Rule, RuleOutcome};

/// Apply every rule, in order, to one dataset.
///
/// Each condition sees the dataset state left by earlier rules in the same
/// pass. Every rule is considered; a rule's failure or success never stops
/// the pass. Within one rule, actions run in declared order and stop at the
/// first failure.
pub(crate) fn apply(rules: &[Rule], dataset: &mut dyn Dataset) -> ExecutionReport {
    let start = Instant::now();
    let mut outcomes = Vec::with_capacity(rules.len());

    for rule in rules {
        let outcome = if rule.condition.eval(dataset) {
            match run_actions(rule, dataset) {
                Ok(()) => RuleOutcome::Applied,
                Err(err) => RuleOutcome::Failed(err),
            }
        } else {
            RuleOutcome::Skipped
        };
        trace!(rule = %rule.name, outcome = %outcome, "rule evaluated");
        outcomes.push((rule.name.clone(), outcome));
    }

    let report = ExecutionReport::new(outcomes, start.elapsed());
    debug!(
        applied = report.applied().len(),
        skipped = report.skipped().len(),
        failed = report.failed().len(),
        "ruleset applied"
    );
    report
}

fn run_actions(rule: &Rule, dataset: &mut dyn Dataset) -> Result<(), ActionError> {
    for action in &rule.actions {
        action.run(dataset)?;
    }
    Ok(())
}
