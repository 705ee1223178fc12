use std::collections::HashSet;

use super::domain::{
    CharacteristicId, Employee, EvaluationSubmission, EvaluationTemplate, FactorId,
    LevelThreshold, PerformanceLevel,
};
use super::scoring::ScoringConfig;

/// Input rejected before it reaches the scoring core or the repository.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ValidationError {
    #[error("{field} must not be empty")]
    EmptyField { field: &'static str },
    #[error("template defines no factors")]
    EmptyTemplate,
    #[error("factor id {0} is used more than once")]
    DuplicateFactor(FactorId),
    #[error("characteristic id {0} is used more than once")]
    DuplicateCharacteristic(CharacteristicId),
    #[error("characteristic {characteristic} has invalid weight {weight}")]
    InvalidWeight {
        characteristic: CharacteristicId,
        weight: f64,
    },
    #[error("template weights sum to zero")]
    ZeroTotalWeight,
    #[error("score references unknown characteristic {0}")]
    UnknownCharacteristic(CharacteristicId),
    #[error("characteristic {0} was scored more than once")]
    DuplicateScore(CharacteristicId),
    #[error("characteristic {0} has no score")]
    MissingScore(CharacteristicId),
    #[error("score {score} for {characteristic} is outside {min}..={max}")]
    ScoreOutOfRange {
        characteristic: CharacteristicId,
        score: f64,
        min: f64,
        max: f64,
    },
    #[error("at least one level threshold is required")]
    NoThresholds,
    #[error("{} cannot be configured as a threshold", PerformanceLevel::Indeterminate.label())]
    IndeterminateThreshold,
    #[error("threshold for {} is not a finite number", .0.label())]
    NonFiniteThreshold(PerformanceLevel),
    #[error("level {} is configured more than once", .0.label())]
    DuplicateLevel(PerformanceLevel),
    #[error("thresholds must increase strictly: {} ({lower_value}) then {} ({upper_value})", .lower.label(), .upper.label())]
    NonIncreasingThresholds {
        lower: PerformanceLevel,
        lower_value: f64,
        upper: PerformanceLevel,
        upper_value: f64,
    },
}

/// Checks the original form layer used to perform before data reached the scorer.
#[derive(Debug, Clone)]
pub struct EvaluationGuard {
    config: ScoringConfig,
}

impl Default for EvaluationGuard {
    fn default() -> Self {
        Self::new(ScoringConfig::default())
    }
}

impl EvaluationGuard {
    pub fn new(config: ScoringConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ScoringConfig {
        &self.config
    }

    pub fn check_employee(&self, employee: &Employee) -> Result<(), ValidationError> {
        require("employee id", employee.id.as_str())?;
        require("employee name", &employee.name)?;
        require("department", &employee.department)
    }

    pub fn check_template(&self, template: &EvaluationTemplate) -> Result<(), ValidationError> {
        require("template id", template.id.as_str())?;
        require("template name", &template.name)?;
        if template.criteria.is_empty() {
            return Err(ValidationError::EmptyTemplate);
        }

        let mut factor_ids = HashSet::new();
        let mut characteristic_ids = HashSet::new();
        let mut total_weight = 0.0;

        for factor in &template.criteria {
            require("factor name", &factor.name)?;
            if !factor_ids.insert(&factor.id) {
                return Err(ValidationError::DuplicateFactor(factor.id.clone()));
            }

            for characteristic in &factor.characteristics {
                require("characteristic name", &characteristic.name)?;
                if !characteristic_ids.insert(&characteristic.id) {
                    return Err(ValidationError::DuplicateCharacteristic(
                        characteristic.id.clone(),
                    ));
                }
                if !characteristic.weight.is_finite() || characteristic.weight < 0.0 {
                    return Err(ValidationError::InvalidWeight {
                        characteristic: characteristic.id.clone(),
                        weight: characteristic.weight,
                    });
                }
                total_weight += characteristic.weight;
            }
        }

        if total_weight <= 0.0 {
            return Err(ValidationError::ZeroTotalWeight);
        }

        Ok(())
    }

    /// Validate raw scores against the template they will be aggregated with.
    pub fn check_submission(
        &self,
        submission: &EvaluationSubmission,
        template: &EvaluationTemplate,
    ) -> Result<(), ValidationError> {
        let known: HashSet<&CharacteristicId> =
            template.characteristics().map(|c| &c.id).collect();
        let mut seen = HashSet::new();

        for entry in &submission.scores {
            let id = &entry.characteristic_id;
            if !known.contains(id) {
                return Err(ValidationError::UnknownCharacteristic(id.clone()));
            }
            if !seen.insert(id) {
                return Err(ValidationError::DuplicateScore(id.clone()));
            }
            let in_range = entry.score.is_finite()
                && entry.score >= self.config.score_min
                && entry.score <= self.config.score_max;
            if !in_range {
                return Err(ValidationError::ScoreOutOfRange {
                    characteristic: id.clone(),
                    score: entry.score,
                    min: self.config.score_min,
                    max: self.config.score_max,
                });
            }
        }

        if self.config.require_complete_scores {
            if let Some(missing) = template
                .characteristics()
                .find(|characteristic| !seen.contains(&characteristic.id))
            {
                return Err(ValidationError::MissingScore(missing.id.clone()));
            }
        }

        Ok(())
    }
}

/// Thresholds must name each real level once and increase strictly.
pub fn check_thresholds(thresholds: &[LevelThreshold]) -> Result<(), ValidationError> {
    if thresholds.is_empty() {
        return Err(ValidationError::NoThresholds);
    }

    let mut levels = HashSet::new();
    for entry in thresholds {
        if entry.name == PerformanceLevel::Indeterminate {
            return Err(ValidationError::IndeterminateThreshold);
        }
        if !entry.threshold.is_finite() {
            return Err(ValidationError::NonFiniteThreshold(entry.name));
        }
        if !levels.insert(entry.name) {
            return Err(ValidationError::DuplicateLevel(entry.name));
        }
    }

    let mut ordered: Vec<&LevelThreshold> = thresholds.iter().collect();
    ordered.sort_by(|a, b| a.threshold.total_cmp(&b.threshold));
    for pair in ordered.windows(2) {
        let (lower, upper) = (pair[0], pair[1]);
        if upper.threshold <= lower.threshold {
            return Err(ValidationError::NonIncreasingThresholds {
                lower: lower.name,
                lower_value: lower.threshold,
                upper: upper.name,
                upper_value: upper.threshold,
            });
        }
    }

    Ok(())
}

fn require(field: &'static str, value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        Err(ValidationError::EmptyField { field })
    } else {
        Ok(())
    }
}
