use std::sync::{Arc, Mutex};

use axum::response::Response;
use chrono::NaiveDate;
use serde_json::Value;

use crate::evaluations::domain::{
    Characteristic, CharacteristicId, Employee, EmployeeId, EvaluationId, EvaluationResult,
    EvaluationScore, EvaluationSubmission, EvaluationTemplate, Factor, FactorId,
    LevelThreshold, PerformanceLevel, PotentialRating, RigorMode, TemplateId,
};
use crate::evaluations::repository::{
    FeedbackError, FeedbackGenerator, FeedbackRequest, RepositoryError, TalentRepository,
};
use crate::evaluations::scoring::{aggregate, default_thresholds, ScoringConfig};
use crate::evaluations::store::MemoryStore;
use crate::evaluations::{evaluation_router, EvaluationService};

pub(super) fn characteristic(id: &str, weight: f64) -> Characteristic {
    Characteristic {
        id: CharacteristicId::new(id),
        name: format!("Characteristic {id}"),
        weight,
    }
}

pub(super) fn factor(id: &str, name: &str, characteristics: &[(&str, f64)]) -> Factor {
    Factor {
        id: FactorId::new(id),
        name: name.to_string(),
        characteristics: characteristics
            .iter()
            .map(|(id, weight)| characteristic(id, *weight))
            .collect(),
    }
}

pub(super) fn score(id: &str, value: f64) -> EvaluationScore {
    EvaluationScore {
        characteristic_id: CharacteristicId::new(id),
        score: value,
    }
}

/// Factor A: two characteristics of weight 1; factor B: one of weight 2.
pub(super) fn two_factor_criteria() -> Vec<Factor> {
    vec![
        factor("f-a", "Technical Knowledge", &[("c-1", 1.0), ("c-2", 1.0)]),
        factor("f-b", "Teamwork", &[("c-3", 2.0)]),
    ]
}

pub(super) fn two_factor_scores() -> Vec<EvaluationScore> {
    vec![score("c-1", 8.0), score("c-2", 6.0), score("c-3", 10.0)]
}

pub(super) fn template() -> EvaluationTemplate {
    EvaluationTemplate {
        id: TemplateId::new("tpl-annual"),
        name: "Annual review".to_string(),
        criteria: two_factor_criteria(),
    }
}

pub(super) fn thresholds() -> Vec<LevelThreshold> {
    default_thresholds()
}

pub(super) fn employee(id: &str, name: &str, department: &str) -> Employee {
    Employee {
        id: EmployeeId::new(id),
        name: name.to_string(),
        department: department.to_string(),
        position: "Analyst".to_string(),
    }
}

pub(super) fn submission(employee_id: &str, scores: Vec<EvaluationScore>) -> EvaluationSubmission {
    EvaluationSubmission {
        employee_id: EmployeeId::new(employee_id),
        template_id: TemplateId::new("tpl-annual"),
        evaluated_on: date(2025, 6, 30),
        scores,
        potential: PotentialRating::High,
        rigor: RigorMode::Balanced,
    }
}

pub(super) fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("valid date")
}

/// Hand-built record for report and matrix tests that skip the service.
pub(super) fn evaluation_record(
    id: &str,
    employee_id: &str,
    evaluated_on: NaiveDate,
    overall: f64,
    level: PerformanceLevel,
    potential: PotentialRating,
) -> EvaluationResult {
    let criteria = vec![factor("f-x", "Overall", &[("c-x", 1.0)])];
    let scores = vec![score("c-x", overall)];
    let calculated = aggregate(&scores, &criteria);
    EvaluationResult {
        id: EvaluationId::new(id),
        employee_id: EmployeeId::new(employee_id),
        template_id: TemplateId::new("tpl-annual"),
        template_name: "Annual review".to_string(),
        evaluated_on,
        criteria,
        scores,
        calculated,
        level,
        potential,
        rigor: RigorMode::Balanced,
        feedback: None,
    }
}

pub(super) fn build_service() -> (
    EvaluationService<MemoryStore, RecordingFeedback>,
    Arc<MemoryStore>,
    Arc<RecordingFeedback>,
) {
    let repository = Arc::new(MemoryStore::default());
    let feedback = Arc::new(RecordingFeedback::default());
    let service =
        EvaluationService::new(repository.clone(), feedback.clone(), ScoringConfig::default());
    (service, repository, feedback)
}

/// Service with one registered employee (`emp-1`, Engineering) and the annual template.
pub(super) fn seeded_service() -> (
    EvaluationService<MemoryStore, RecordingFeedback>,
    Arc<MemoryStore>,
    Arc<RecordingFeedback>,
) {
    let (service, repository, feedback) = build_service();
    service
        .register_employee(employee("emp-1", "Ana Torres", "Engineering"))
        .expect("register employee");
    service.create_template(template()).expect("create template");
    (service, repository, feedback)
}

#[derive(Default)]
pub(super) struct RecordingFeedback {
    requests: Mutex<Vec<(EmployeeId, usize, RigorMode)>>,
}

impl RecordingFeedback {
    /// `(employee, scored characteristics, rigor)` per call.
    pub(super) fn requests(&self) -> Vec<(EmployeeId, usize, RigorMode)> {
        self.requests.lock().expect("feedback mutex poisoned").clone()
    }
}

impl FeedbackGenerator for RecordingFeedback {
    fn generate(&self, request: FeedbackRequest<'_>) -> Result<String, FeedbackError> {
        self.requests.lock().expect("feedback mutex poisoned").push((
            request.employee.id.clone(),
            request.scores.len(),
            request.rigor,
        ));
        Ok(format!(
            "{} reviewed across {} factors",
            request.employee.name,
            request.criteria.len()
        ))
    }
}

pub(super) struct FailingFeedback;

impl FeedbackGenerator for FailingFeedback {
    fn generate(&self, _request: FeedbackRequest<'_>) -> Result<String, FeedbackError> {
        Err(FeedbackError::Unavailable("model offline".to_string()))
    }
}

pub(super) struct UnavailableStore;

impl TalentRepository for UnavailableStore {
    fn insert_employee(&self, _employee: Employee) -> Result<Employee, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn employee(&self, _id: &EmployeeId) -> Result<Option<Employee>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn employees(&self) -> Result<Vec<Employee>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn insert_template(
        &self,
        _template: EvaluationTemplate,
    ) -> Result<EvaluationTemplate, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn update_template(&self, _template: EvaluationTemplate) -> Result<(), RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn template(&self, _id: &TemplateId) -> Result<Option<EvaluationTemplate>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn insert_evaluation(
        &self,
        _evaluation: EvaluationResult,
    ) -> Result<EvaluationResult, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn evaluation(&self, _id: &EvaluationId) -> Result<Option<EvaluationResult>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn evaluations(&self) -> Result<Vec<EvaluationResult>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn level_thresholds(&self) -> Result<Option<Vec<LevelThreshold>>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn save_level_thresholds(
        &self,
        _thresholds: Vec<LevelThreshold>,
    ) -> Result<(), RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}

pub(super) fn router_with_service(
    service: EvaluationService<MemoryStore, RecordingFeedback>,
) -> axum::Router {
    evaluation_router(Arc::new(service))
}

pub(super) fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-9,
        "expected {expected}, got {actual}"
    );
}
