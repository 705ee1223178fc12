use std::cmp::Ordering;

use super::super::domain::{Employee, EvaluationResult, PerformanceLevel, PotentialRating};
use super::views::PromotionCandidate;

/// High performers with at least medium potential, best overall first.
pub fn promotion_ranking(
    employees: &[Employee],
    evaluations: &[EvaluationResult],
    limit: Option<usize>,
) -> Vec<PromotionCandidate> {
    let mut eligible: Vec<_> = super::latest_with_employees(employees, evaluations)
        .into_iter()
        .filter(|(_, evaluation)| {
            evaluation.level == PerformanceLevel::High
                && evaluation.potential >= PotentialRating::Medium
        })
        .collect();

    eligible.sort_by(|(a_emp, a_eval), (b_emp, b_eval)| {
        b_eval
            .calculated
            .overall
            .partial_cmp(&a_eval.calculated.overall)
            .unwrap_or(Ordering::Equal)
            .then_with(|| b_eval.potential.cmp(&a_eval.potential))
            .then_with(|| a_emp.name.cmp(&b_emp.name))
    });

    eligible
        .into_iter()
        .take(limit.unwrap_or(usize::MAX))
        .enumerate()
        .map(|(index, (employee, evaluation))| PromotionCandidate {
            rank: index + 1,
            employee_id: employee.id.clone(),
            name: employee.name.clone(),
            department: employee.department.clone(),
            position: employee.position.clone(),
            evaluation_id: evaluation.id.clone(),
            evaluated_on: evaluation.evaluated_on,
            overall: evaluation.calculated.overall,
            level: evaluation.level,
            potential: evaluation.potential,
        })
        .collect()
}
