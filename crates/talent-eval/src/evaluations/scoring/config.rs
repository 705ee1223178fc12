use serde::{Deserialize, Serialize};

use super::super::domain::{LevelThreshold, PerformanceLevel};

/// Scoring policy: accepted rating range and the thresholds used until an
/// administrator stores their own.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoringConfig {
    pub score_min: f64,
    pub score_max: f64,
    pub require_complete_scores: bool,
    pub default_thresholds: Vec<LevelThreshold>,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            score_min: 1.0,
            score_max: 10.0,
            require_complete_scores: true,
            default_thresholds: default_thresholds(),
        }
    }
}

/// `Bajo <= 4`, `Medio <= 7`, `Alto <= 10`.
pub fn default_thresholds() -> Vec<LevelThreshold> {
    vec![
        LevelThreshold::new(PerformanceLevel::Low, 4.0),
        LevelThreshold::new(PerformanceLevel::Medium, 7.0),
        LevelThreshold::new(PerformanceLevel::High, 10.0),
    ]
}
