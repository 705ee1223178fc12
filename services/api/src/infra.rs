use chrono::NaiveDate;
use metrics_exporter_prometheus::PrometheusHandle;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use talent_eval::config::StorageConfig;
use talent_eval::evaluations::{
    aggregate, CalculatedFactorScore, Employee, EmployeeId, EvaluationId, EvaluationResult,
    EvaluationTemplate, FeedbackError, FeedbackGenerator, FeedbackRequest, JsonFileStore,
    LevelThreshold, MemoryStore, RepositoryError, RigorMode, TalentRepository, TemplateId,
};

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Repository backend chosen at startup from `TALENT_DATA_PATH`.
pub(crate) enum ConfiguredStore {
    Memory(MemoryStore),
    File(JsonFileStore),
}

impl ConfiguredStore {
    pub(crate) fn from_config(storage: &StorageConfig) -> Result<Self, RepositoryError> {
        match &storage.data_path {
            Some(path) => JsonFileStore::open(path).map(Self::File),
            None => Ok(Self::Memory(MemoryStore::default())),
        }
    }

    pub(crate) fn backend(&self) -> &'static str {
        match self {
            Self::Memory(_) => "memory",
            Self::File(_) => "json_file",
        }
    }

    fn inner(&self) -> &dyn TalentRepository {
        match self {
            Self::Memory(store) => store,
            Self::File(store) => store,
        }
    }
}

impl TalentRepository for ConfiguredStore {
    fn insert_employee(&self, employee: Employee) -> Result<Employee, RepositoryError> {
        self.inner().insert_employee(employee)
    }

    fn employee(&self, id: &EmployeeId) -> Result<Option<Employee>, RepositoryError> {
        self.inner().employee(id)
    }

    fn employees(&self) -> Result<Vec<Employee>, RepositoryError> {
        self.inner().employees()
    }

    fn insert_template(
        &self,
        template: EvaluationTemplate,
    ) -> Result<EvaluationTemplate, RepositoryError> {
        self.inner().insert_template(template)
    }

    fn update_template(&self, template: EvaluationTemplate) -> Result<(), RepositoryError> {
        self.inner().update_template(template)
    }

    fn template(&self, id: &TemplateId) -> Result<Option<EvaluationTemplate>, RepositoryError> {
        self.inner().template(id)
    }

    fn insert_evaluation(
        &self,
        evaluation: EvaluationResult,
    ) -> Result<EvaluationResult, RepositoryError> {
        self.inner().insert_evaluation(evaluation)
    }

    fn evaluation(&self, id: &EvaluationId) -> Result<Option<EvaluationResult>, RepositoryError> {
        self.inner().evaluation(id)
    }

    fn evaluations(&self) -> Result<Vec<EvaluationResult>, RepositoryError> {
        self.inner().evaluations()
    }

    fn level_thresholds(&self) -> Result<Option<Vec<LevelThreshold>>, RepositoryError> {
        self.inner().level_thresholds()
    }

    fn save_level_thresholds(
        &self,
        thresholds: Vec<LevelThreshold>,
    ) -> Result<(), RepositoryError> {
        self.inner().save_level_thresholds(thresholds)
    }
}

/// Template-based narrative built from the factor scores of a submission.
///
/// Names the strongest and weakest factor; the rigor mode sets the tone.
#[derive(Debug, Default, Clone, Copy)]
pub(crate) struct NarrativeFeedback;

impl FeedbackGenerator for NarrativeFeedback {
    fn generate(&self, request: FeedbackRequest<'_>) -> Result<String, FeedbackError> {
        let calculated = aggregate(request.scores, request.criteria);
        let by_score = |a: &&CalculatedFactorScore, b: &&CalculatedFactorScore| {
            a.score.total_cmp(&b.score)
        };
        let strongest = calculated
            .factors
            .iter()
            .max_by(by_score)
            .ok_or(FeedbackError::Empty)?;
        let weakest = calculated
            .factors
            .iter()
            .min_by(by_score)
            .ok_or(FeedbackError::Empty)?;

        let name = &request.employee.name;
        let text = match request.rigor {
            RigorMode::Lenient => format!(
                "{name} is doing well, especially in {} ({:.1}). There is room to grow in {} ({:.1}).",
                strongest.factor_name, strongest.score, weakest.factor_name, weakest.score
            ),
            RigorMode::Balanced => format!(
                "{name} scored {:.1} overall. Strongest factor: {} ({:.1}). Development focus: {} ({:.1}).",
                calculated.overall,
                strongest.factor_name,
                strongest.score,
                weakest.factor_name,
                weakest.score
            ),
            RigorMode::Demanding => format!(
                "{name} scored {:.1} overall. {} ({:.1}) is below expectations and needs a concrete improvement plan; {} ({:.1}) must be sustained.",
                calculated.overall,
                weakest.factor_name,
                weakest.score,
                strongest.factor_name,
                strongest.score
            ),
        };
        Ok(text)
    }
}

pub(crate) fn parse_date(raw: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|err| format!("failed to parse '{raw}' as YYYY-MM-DD ({err})"))
}
