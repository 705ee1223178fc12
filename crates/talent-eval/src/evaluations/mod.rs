//! Evaluation workflow: criteria templates, weighted scoring, level
//! classification, and the talent reports built on top of completed
//! evaluations.

pub mod domain;
pub mod matrix;
pub mod report;
pub mod repository;
pub mod router;
pub mod scoring;
pub mod service;
pub mod store;
pub(crate) mod validation;

#[cfg(test)]
mod tests;

pub use domain::{
    CalculatedFactorScore, CalculatedScores, Characteristic, CharacteristicId, Employee,
    EmployeeId, EvaluationId, EvaluationResult, EvaluationScore, EvaluationSubmission,
    EvaluationTemplate, Factor, FactorId, LevelThreshold, PerformanceLevel, PotentialRating,
    RigorMode, TemplateId,
};
pub use matrix::{build_talent_matrix, MatrixCell, MatrixEntry, TalentBox, TalentMatrix};
pub use report::views::{DepartmentSummary, LevelCount, PromotionCandidate};
pub use report::{department_summaries, latest_evaluations, promotion_ranking};
pub use repository::{
    EvaluationSummaryView, FeedbackError, FeedbackGenerator, FeedbackRequest, RepositoryError,
    TalentRepository,
};
pub use router::evaluation_router;
pub use scoring::{aggregate, classify, default_thresholds, score, ScoreOutcome, ScoringConfig};
pub use service::{EvaluationService, EvaluationServiceError};
pub use store::{JsonFileStore, MemoryStore, TalentSnapshot};
pub use validation::{check_thresholds, EvaluationGuard, ValidationError};
