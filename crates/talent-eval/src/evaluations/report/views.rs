use chrono::NaiveDate;
use serde::Serialize;

use super::super::domain::{EmployeeId, EvaluationId, PerformanceLevel, PotentialRating};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LevelCount {
    pub level: PerformanceLevel,
    pub level_label: &'static str,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DepartmentSummary {
    pub department: String,
    pub evaluated: usize,
    pub average_overall: f64,
    pub levels: Vec<LevelCount>,
}

impl DepartmentSummary {
    pub fn count_for(&self, level: PerformanceLevel) -> usize {
        self.levels
            .iter()
            .find(|entry| entry.level == level)
            .map(|entry| entry.count)
            .unwrap_or(0)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PromotionCandidate {
    pub rank: usize,
    pub employee_id: EmployeeId,
    pub name: String,
    pub department: String,
    pub position: String,
    pub evaluation_id: EvaluationId,
    pub evaluated_on: NaiveDate,
    pub overall: f64,
    pub level: PerformanceLevel,
    pub potential: PotentialRating,
}
