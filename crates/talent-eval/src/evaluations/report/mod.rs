mod ranking;
mod summary;
pub mod views;

pub use ranking::promotion_ranking;
pub use summary::department_summaries;

use std::collections::BTreeMap;

use super::domain::{Employee, EmployeeId, EvaluationResult};

/// Most recent evaluation per employee, keyed by employee id.
///
/// Recency is the evaluation date; same-day evaluations resolve to the one
/// issued last.
pub fn latest_evaluations(
    evaluations: &[EvaluationResult],
) -> BTreeMap<&EmployeeId, &EvaluationResult> {
    let mut latest: BTreeMap<&EmployeeId, &EvaluationResult> = BTreeMap::new();
    for evaluation in evaluations {
        latest
            .entry(&evaluation.employee_id)
            .and_modify(|current| {
                if evaluation.recency_key() > current.recency_key() {
                    *current = evaluation;
                }
            })
            .or_insert(evaluation);
    }
    latest
}

/// Latest evaluations joined with their employee. Evaluations for unknown
/// employees are skipped.
pub(crate) fn latest_with_employees<'a>(
    employees: &'a [Employee],
    evaluations: &'a [EvaluationResult],
) -> Vec<(&'a Employee, &'a EvaluationResult)> {
    let latest = latest_evaluations(evaluations);
    employees
        .iter()
        .filter_map(|employee| {
            latest
                .get(&employee.id)
                .map(|evaluation| (employee, *evaluation))
        })
        .collect()
}
