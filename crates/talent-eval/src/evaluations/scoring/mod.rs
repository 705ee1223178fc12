mod config;
mod levels;
mod rules;

pub use config::{default_thresholds, ScoringConfig};
pub use levels::classify;
pub use rules::aggregate;

use super::domain::{
    CalculatedScores, EvaluationScore, Factor, LevelThreshold, PerformanceLevel,
};
use serde::{Deserialize, Serialize};

/// Aggregate plus the level it classifies into.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreOutcome {
    pub calculated: CalculatedScores,
    pub level: PerformanceLevel,
}

/// Run both steps of the scoring core against one threshold set.
pub fn score(
    scores: &[EvaluationScore],
    criteria: &[Factor],
    thresholds: &[LevelThreshold],
) -> ScoreOutcome {
    let calculated = aggregate(scores, criteria);
    let level = classify(calculated.overall, thresholds);
    ScoreOutcome { calculated, level }
}
