use serde::Serialize;

use super::domain::{
    CalculatedScores, Employee, EmployeeId, EvaluationId, EvaluationResult, EvaluationScore,
    EvaluationTemplate, Factor, LevelThreshold, PerformanceLevel, PotentialRating, RigorMode,
    TemplateId,
};

/// Storage abstraction so the service can run against memory, a JSON file, or a database.
pub trait TalentRepository: Send + Sync {
    fn insert_employee(&self, employee: Employee) -> Result<Employee, RepositoryError>;
    fn employee(&self, id: &EmployeeId) -> Result<Option<Employee>, RepositoryError>;
    fn employees(&self) -> Result<Vec<Employee>, RepositoryError>;

    fn insert_template(
        &self,
        template: EvaluationTemplate,
    ) -> Result<EvaluationTemplate, RepositoryError>;
    fn update_template(&self, template: EvaluationTemplate) -> Result<(), RepositoryError>;
    fn template(&self, id: &TemplateId) -> Result<Option<EvaluationTemplate>, RepositoryError>;

    fn insert_evaluation(
        &self,
        evaluation: EvaluationResult,
    ) -> Result<EvaluationResult, RepositoryError>;
    fn evaluation(&self, id: &EvaluationId) -> Result<Option<EvaluationResult>, RepositoryError>;
    fn evaluations(&self) -> Result<Vec<EvaluationResult>, RepositoryError>;

    /// Stored thresholds, or `None` when an administrator never saved any.
    fn level_thresholds(&self) -> Result<Option<Vec<LevelThreshold>>, RepositoryError>;
    fn save_level_thresholds(&self, thresholds: Vec<LevelThreshold>)
        -> Result<(), RepositoryError>;
}

/// Error enumeration for repository failures.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("record already exists")]
    Conflict,
    #[error("record not found")]
    NotFound,
    #[error("repository unavailable: {0}")]
    Unavailable(String),
    #[error("repository io failure: {0}")]
    Io(#[from] std::io::Error),
    #[error("repository data is corrupt: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Everything the narrative generator gets to see about one evaluation.
#[derive(Debug, Clone, Copy)]
pub struct FeedbackRequest<'a> {
    pub employee: &'a Employee,
    pub criteria: &'a [Factor],
    pub scores: &'a [EvaluationScore],
    pub rigor: RigorMode,
}

/// External narrative-feedback hook (language model, template engine, ...).
pub trait FeedbackGenerator: Send + Sync {
    fn generate(&self, request: FeedbackRequest<'_>) -> Result<String, FeedbackError>;
}

#[derive(Debug, thiserror::Error)]
pub enum FeedbackError {
    #[error("feedback provider unavailable: {0}")]
    Unavailable(String),
    #[error("feedback provider returned an empty response")]
    Empty,
}

/// Public summary of a stored evaluation.
#[derive(Debug, Clone, Serialize)]
pub struct EvaluationSummaryView {
    pub evaluation_id: EvaluationId,
    pub employee_id: EmployeeId,
    pub template_name: String,
    pub evaluated_on: chrono::NaiveDate,
    pub overall: f64,
    pub level: PerformanceLevel,
    pub level_label: &'static str,
    pub potential: PotentialRating,
    pub calculated: CalculatedScores,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub feedback: Option<String>,
}

impl EvaluationResult {
    pub fn summary_view(&self) -> EvaluationSummaryView {
        EvaluationSummaryView {
            evaluation_id: self.id.clone(),
            employee_id: self.employee_id.clone(),
            template_name: self.template_name.clone(),
            evaluated_on: self.evaluated_on,
            overall: self.calculated.overall,
            level: self.level,
            level_label: self.level.label(),
            potential: self.potential,
            calculated: self.calculated.clone(),
            feedback: self.feedback.clone(),
        }
    }
}
