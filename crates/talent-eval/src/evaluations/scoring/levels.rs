use super::super::domain::{LevelThreshold, PerformanceLevel};

/// Map a score to the first level, in ascending threshold order, whose
/// threshold is `>= score`. Scores above every threshold (and `NaN`) are
/// `Indeterminate`.
///
/// Threshold order and uniqueness are not checked here; an unordered or
/// overlapping configuration still yields the first ascending match. A `NaN`
/// threshold never matches.
pub fn classify(score: f64, thresholds: &[LevelThreshold]) -> PerformanceLevel {
    let mut ordered: Vec<&LevelThreshold> = thresholds.iter().collect();
    ordered.sort_by(|a, b| a.threshold.total_cmp(&b.threshold));

    ordered
        .into_iter()
        .find(|entry| entry.threshold >= score)
        .map(|entry| entry.name)
        .unwrap_or(PerformanceLevel::Indeterminate)
}
