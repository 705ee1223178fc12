use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

macro_rules! string_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub String);

        impl $name {
            pub fn new(value: impl Into<String>) -> Self {
                Self(value.into())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(&self.0)
            }
        }
    };
}

string_id!(
    /// Identifier of a scorable trait inside a factor.
    CharacteristicId
);
string_id!(
    /// Identifier of a factor (top-level grouping of characteristics).
    FactorId
);
string_id!(EmployeeId);
string_id!(TemplateId);
string_id!(
    /// Identifier assigned to a completed evaluation.
    EvaluationId
);

/// A scoring dimension with a relative importance weight.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Characteristic {
    pub id: CharacteristicId,
    pub name: String,
    pub weight: f64,
}

/// Named group of characteristics. Its weight is the sum of its characteristics' weights.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Factor {
    pub id: FactorId,
    pub name: String,
    #[serde(default)]
    pub characteristics: Vec<Characteristic>,
}

/// One raw rating for a characteristic, as entered by a rater.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvaluationScore {
    pub characteristic_id: CharacteristicId,
    pub score: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalculatedFactorScore {
    pub factor_id: FactorId,
    pub factor_name: String,
    pub score: f64,
}

/// Aggregate for one evaluation. Always recomputed from scores and criteria.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalculatedScores {
    pub overall: f64,
    pub factors: Vec<CalculatedFactorScore>,
}

/// Qualitative performance bucket derived from the overall score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum PerformanceLevel {
    #[serde(rename = "Bajo")]
    Low,
    #[serde(rename = "Medio")]
    Medium,
    #[serde(rename = "Alto")]
    High,
    /// Score above every configured threshold.
    #[serde(rename = "Indeterminado")]
    Indeterminate,
}

impl PerformanceLevel {
    pub const fn label(self) -> &'static str {
        match self {
            PerformanceLevel::Low => "Bajo",
            PerformanceLevel::Medium => "Medio",
            PerformanceLevel::High => "Alto",
            PerformanceLevel::Indeterminate => "Indeterminado",
        }
    }

    /// Levels a threshold may be configured for, lowest first.
    pub const fn ranked() -> [PerformanceLevel; 3] {
        [
            PerformanceLevel::Low,
            PerformanceLevel::Medium,
            PerformanceLevel::High,
        ]
    }
}

/// Inclusive upper bound for a level.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LevelThreshold {
    pub name: PerformanceLevel,
    pub threshold: f64,
}

impl LevelThreshold {
    pub fn new(name: PerformanceLevel, threshold: f64) -> Self {
        Self { name, threshold }
    }
}

/// Manually assigned growth potential used alongside the performance level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum PotentialRating {
    #[serde(rename = "Bajo")]
    Low,
    #[serde(rename = "Medio")]
    Medium,
    #[serde(rename = "Alto")]
    High,
}

impl PotentialRating {
    pub const fn label(self) -> &'static str {
        match self {
            PotentialRating::Low => "Bajo",
            PotentialRating::Medium => "Medio",
            PotentialRating::High => "Alto",
        }
    }
}

/// Tone requested from the narrative feedback generator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RigorMode {
    Lenient,
    #[default]
    Balanced,
    Demanding,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Employee {
    pub id: EmployeeId,
    pub name: String,
    pub department: String,
    pub position: String,
}

/// Authored criteria tree. Copied into every evaluation that uses it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvaluationTemplate {
    pub id: TemplateId,
    pub name: String,
    pub criteria: Vec<Factor>,
}

impl EvaluationTemplate {
    pub fn characteristics(&self) -> impl Iterator<Item = &Characteristic> {
        self.criteria
            .iter()
            .flat_map(|factor| factor.characteristics.iter())
    }
}

/// Request to complete an evaluation of one employee against a template.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvaluationSubmission {
    pub employee_id: EmployeeId,
    pub template_id: TemplateId,
    pub evaluated_on: NaiveDate,
    pub scores: Vec<EvaluationScore>,
    pub potential: PotentialRating,
    #[serde(default)]
    pub rigor: RigorMode,
}

/// Immutable record of a completed evaluation, including its criteria snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvaluationResult {
    pub id: EvaluationId,
    pub employee_id: EmployeeId,
    pub template_id: TemplateId,
    pub template_name: String,
    pub evaluated_on: NaiveDate,
    pub criteria: Vec<Factor>,
    pub scores: Vec<EvaluationScore>,
    pub calculated: CalculatedScores,
    pub level: PerformanceLevel,
    pub potential: PotentialRating,
    pub rigor: RigorMode,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub feedback: Option<String>,
}

impl EvaluationResult {
    /// Ordering key for "most recent": date first, then the later-issued id.
    ///
    /// Ids compare by their numeric suffix so `eval-1000000` follows
    /// `eval-999999`; ids without one fall back to plain string order.
    pub(crate) fn recency_key(&self) -> (NaiveDate, Option<u64>, &str) {
        (self.evaluated_on, self.id.sequence(), self.id.as_str())
    }
}

impl EvaluationId {
    /// Trailing number of a sequential id such as `eval-000042`.
    pub fn sequence(&self) -> Option<u64> {
        self.0
            .rsplit_once('-')
            .and_then(|(_, suffix)| suffix.parse().ok())
    }
}
