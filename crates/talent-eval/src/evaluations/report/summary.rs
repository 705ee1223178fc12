use std::collections::BTreeMap;

use super::super::domain::{Employee, EvaluationResult, PerformanceLevel};
use super::views::{DepartmentSummary, LevelCount};

#[derive(Default)]
struct DepartmentTally {
    evaluated: usize,
    overall_sum: f64,
    levels: BTreeMap<PerformanceLevel, usize>,
}

/// Per-department averages and level distribution over each employee's
/// latest evaluation. Departments are sorted by name; employees without an
/// evaluation are not counted.
pub fn department_summaries(
    employees: &[Employee],
    evaluations: &[EvaluationResult],
) -> Vec<DepartmentSummary> {
    let mut tallies: BTreeMap<&str, DepartmentTally> = BTreeMap::new();

    for (employee, evaluation) in super::latest_with_employees(employees, evaluations) {
        let tally = tallies.entry(employee.department.as_str()).or_default();
        tally.evaluated += 1;
        tally.overall_sum += evaluation.calculated.overall;
        *tally.levels.entry(evaluation.level).or_default() += 1;
    }

    tallies
        .into_iter()
        .map(|(department, tally)| {
            let levels = PerformanceLevel::ranked()
                .into_iter()
                .chain(std::iter::once(PerformanceLevel::Indeterminate))
                .map(|level| LevelCount {
                    level,
                    level_label: level.label(),
                    count: tally.levels.get(&level).copied().unwrap_or(0),
                })
                .collect();

            DepartmentSummary {
                department: department.to_string(),
                evaluated: tally.evaluated,
                average_overall: tally.overall_sum / tally.evaluated as f64,
                levels,
            }
        })
        .collect()
}
