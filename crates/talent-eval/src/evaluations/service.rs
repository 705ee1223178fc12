use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use tracing::{debug, info, warn};

use super::domain::{
    Employee, EmployeeId, EvaluationId, EvaluationResult, EvaluationScore, EvaluationSubmission,
    EvaluationTemplate, Factor, LevelThreshold, TemplateId,
};
use super::matrix::{build_talent_matrix, TalentMatrix};
use super::report::views::{DepartmentSummary, PromotionCandidate};
use super::report::{department_summaries, promotion_ranking};
use super::repository::{FeedbackGenerator, FeedbackRequest, RepositoryError, TalentRepository};
use super::scoring::{self, ScoreOutcome, ScoringConfig};
use super::validation::{check_thresholds, EvaluationGuard, ValidationError};

/// Service composing the validation guard, repository, scoring core, and feedback hook.
pub struct EvaluationService<R, F> {
    guard: EvaluationGuard,
    repository: Arc<R>,
    feedback: Arc<F>,
}

static EVALUATION_SEQUENCE: AtomicU64 = AtomicU64::new(1);

fn next_evaluation_id() -> EvaluationId {
    let id = EVALUATION_SEQUENCE.fetch_add(1, Ordering::Relaxed);
    EvaluationId(format!("eval-{id:06}"))
}

impl<R, F> EvaluationService<R, F>
where
    R: TalentRepository + 'static,
    F: FeedbackGenerator + 'static,
{
    pub fn new(repository: Arc<R>, feedback: Arc<F>, config: ScoringConfig) -> Self {
        Self {
            guard: EvaluationGuard::new(config),
            repository,
            feedback,
        }
    }

    pub fn config(&self) -> &ScoringConfig {
        self.guard.config()
    }

    pub fn register_employee(
        &self,
        employee: Employee,
    ) -> Result<Employee, EvaluationServiceError> {
        self.guard.check_employee(&employee)?;
        let stored = self.repository.insert_employee(employee)?;
        info!(employee_id = %stored.id, department = %stored.department, "employee registered");
        Ok(stored)
    }

    pub fn employee(&self, id: &EmployeeId) -> Result<Employee, EvaluationServiceError> {
        let employee = self
            .repository
            .employee(id)?
            .ok_or(RepositoryError::NotFound)?;
        Ok(employee)
    }

    pub fn create_template(
        &self,
        template: EvaluationTemplate,
    ) -> Result<EvaluationTemplate, EvaluationServiceError> {
        self.guard.check_template(&template)?;
        let stored = self.repository.insert_template(template)?;
        info!(template_id = %stored.id, factors = stored.criteria.len(), "template created");
        Ok(stored)
    }

    /// Replace a template's criteria. Completed evaluations keep their own snapshot.
    pub fn update_template(
        &self,
        template: EvaluationTemplate,
    ) -> Result<EvaluationTemplate, EvaluationServiceError> {
        self.guard.check_template(&template)?;
        self.repository.update_template(template.clone())?;
        info!(template_id = %template.id, "template updated");
        Ok(template)
    }

    pub fn template(&self, id: &TemplateId) -> Result<EvaluationTemplate, EvaluationServiceError> {
        let template = self
            .repository
            .template(id)?
            .ok_or(RepositoryError::NotFound)?;
        Ok(template)
    }

    /// Score a submission against a frozen copy of its template and persist the record.
    pub fn complete_evaluation(
        &self,
        submission: EvaluationSubmission,
    ) -> Result<EvaluationResult, EvaluationServiceError> {
        let employee = self.employee(&submission.employee_id)?;
        let template = self.template(&submission.template_id)?;
        self.guard.check_submission(&submission, &template)?;

        let thresholds = self.level_thresholds()?;
        let ScoreOutcome { calculated, level } =
            scoring::score(&submission.scores, &template.criteria, &thresholds);

        let feedback = self.request_feedback(&employee, &template.criteria, &submission);

        let record = EvaluationResult {
            id: self.unused_evaluation_id()?,
            employee_id: employee.id,
            template_id: template.id,
            template_name: template.name,
            evaluated_on: submission.evaluated_on,
            criteria: template.criteria,
            scores: submission.scores,
            calculated,
            level,
            potential: submission.potential,
            rigor: submission.rigor,
            feedback,
        };

        let stored = self.repository.insert_evaluation(record)?;
        info!(
            evaluation_id = %stored.id,
            employee_id = %stored.employee_id,
            overall = stored.calculated.overall,
            level = stored.level.label(),
            "evaluation completed"
        );
        Ok(stored)
    }

    /// The sequence restarts with the process; skip ids a persistent store already holds.
    fn unused_evaluation_id(&self) -> Result<EvaluationId, RepositoryError> {
        loop {
            let id = next_evaluation_id();
            if self.repository.evaluation(&id)?.is_none() {
                return Ok(id);
            }
        }
    }

    fn request_feedback(
        &self,
        employee: &Employee,
        criteria: &[Factor],
        submission: &EvaluationSubmission,
    ) -> Option<String> {
        let request = FeedbackRequest {
            employee,
            criteria,
            scores: &submission.scores,
            rigor: submission.rigor,
        };

        match self.feedback.generate(request) {
            Ok(text) if !text.trim().is_empty() => Some(text),
            Ok(_) => {
                warn!(employee_id = %employee.id, "feedback generator returned empty text");
                None
            }
            Err(err) => {
                warn!(employee_id = %employee.id, error = %err, "feedback generation failed");
                None
            }
        }
    }

    pub fn evaluation(
        &self,
        id: &EvaluationId,
    ) -> Result<EvaluationResult, EvaluationServiceError> {
        let evaluation = self
            .repository
            .evaluation(id)?
            .ok_or(RepositoryError::NotFound)?;
        Ok(evaluation)
    }

    /// Evaluations of one employee, newest first.
    pub fn evaluations_for(
        &self,
        employee_id: &EmployeeId,
    ) -> Result<Vec<EvaluationResult>, EvaluationServiceError> {
        let mut evaluations: Vec<_> = self
            .repository
            .evaluations()?
            .into_iter()
            .filter(|evaluation| &evaluation.employee_id == employee_id)
            .collect();
        evaluations.sort_by(|a, b| b.recency_key().cmp(&a.recency_key()));
        Ok(evaluations)
    }

    /// Stored thresholds, falling back to the configured defaults.
    pub fn level_thresholds(&self) -> Result<Vec<LevelThreshold>, EvaluationServiceError> {
        let stored = self.repository.level_thresholds()?;
        Ok(stored.unwrap_or_else(|| self.config().default_thresholds.clone()))
    }

    pub fn update_level_thresholds(
        &self,
        mut thresholds: Vec<LevelThreshold>,
    ) -> Result<Vec<LevelThreshold>, EvaluationServiceError> {
        check_thresholds(&thresholds)?;
        thresholds.sort_by(|a, b| a.threshold.total_cmp(&b.threshold));
        self.repository.save_level_thresholds(thresholds.clone())?;
        info!(levels = thresholds.len(), "level thresholds updated");
        Ok(thresholds)
    }

    /// Score without persisting, using the current thresholds.
    pub fn preview(
        &self,
        scores: &[EvaluationScore],
        criteria: &[Factor],
    ) -> Result<ScoreOutcome, EvaluationServiceError> {
        let thresholds = self.level_thresholds()?;
        let outcome = scoring::score(scores, criteria, &thresholds);
        debug!(overall = outcome.calculated.overall, "score preview computed");
        Ok(outcome)
    }

    pub fn talent_matrix(
        &self,
        department: Option<&str>,
    ) -> Result<TalentMatrix, EvaluationServiceError> {
        let employees = self.repository.employees()?;
        let evaluations = self.repository.evaluations()?;
        Ok(build_talent_matrix(&employees, &evaluations, department))
    }

    pub fn department_summaries(&self) -> Result<Vec<DepartmentSummary>, EvaluationServiceError> {
        let employees = self.repository.employees()?;
        let evaluations = self.repository.evaluations()?;
        Ok(department_summaries(&employees, &evaluations))
    }

    pub fn promotion_ranking(
        &self,
        limit: Option<usize>,
    ) -> Result<Vec<PromotionCandidate>, EvaluationServiceError> {
        let employees = self.repository.employees()?;
        let evaluations = self.repository.evaluations()?;
        Ok(promotion_ranking(&employees, &evaluations, limit))
    }
}

/// Error raised by the evaluation service.
#[derive(Debug, thiserror::Error)]
pub enum EvaluationServiceError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}
