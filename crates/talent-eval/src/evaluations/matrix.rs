//! 9-box talent matrix: performance level against manually rated potential.

use serde::Serialize;

use super::domain::{Employee, EmployeeId, EvaluationResult, PerformanceLevel, PotentialRating};
use super::report::latest_with_employees;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TalentBox {
    Star,
    HighPerformer,
    TrustedProfessional,
    HighPotential,
    CorePlayer,
    Effective,
    RoughDiamond,
    InconsistentPlayer,
    Underperformer,
}

impl TalentBox {
    /// `None` for `Indeterminate`, which has no row in the grid.
    pub fn place(level: PerformanceLevel, potential: PotentialRating) -> Option<Self> {
        use PerformanceLevel as P;
        use PotentialRating as R;

        let cell = match (level, potential) {
            (P::High, R::High) => Self::Star,
            (P::High, R::Medium) => Self::HighPerformer,
            (P::High, R::Low) => Self::TrustedProfessional,
            (P::Medium, R::High) => Self::HighPotential,
            (P::Medium, R::Medium) => Self::CorePlayer,
            (P::Medium, R::Low) => Self::Effective,
            (P::Low, R::High) => Self::RoughDiamond,
            (P::Low, R::Medium) => Self::InconsistentPlayer,
            (P::Low, R::Low) => Self::Underperformer,
            (P::Indeterminate, _) => return None,
        };
        Some(cell)
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Star => "Star",
            Self::HighPerformer => "High Performer",
            Self::TrustedProfessional => "Trusted Professional",
            Self::HighPotential => "High Potential",
            Self::CorePlayer => "Core Player",
            Self::Effective => "Effective",
            Self::RoughDiamond => "Rough Diamond",
            Self::InconsistentPlayer => "Inconsistent Player",
            Self::Underperformer => "Underperformer",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MatrixEntry {
    pub employee_id: EmployeeId,
    pub name: String,
    pub department: String,
    pub overall: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MatrixCell {
    pub performance: PerformanceLevel,
    pub potential: PotentialRating,
    pub category: TalentBox,
    pub label: &'static str,
    pub employees: Vec<MatrixEntry>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TalentMatrix {
    /// Always nine cells: performance high to low, potential high to low.
    pub cells: Vec<MatrixCell>,
    /// Employees whose latest level is indeterminate.
    pub unplaced: Vec<MatrixEntry>,
}

impl TalentMatrix {
    pub fn cell(&self, category: TalentBox) -> Option<&MatrixCell> {
        self.cells.iter().find(|cell| cell.category == category)
    }

    pub fn placed(&self) -> usize {
        self.cells.iter().map(|cell| cell.employees.len()).sum()
    }
}

/// Place each employee's latest evaluation, optionally restricted to one department.
pub fn build_talent_matrix(
    employees: &[Employee],
    evaluations: &[EvaluationResult],
    department: Option<&str>,
) -> TalentMatrix {
    let mut cells: Vec<MatrixCell> = [
        PerformanceLevel::High,
        PerformanceLevel::Medium,
        PerformanceLevel::Low,
    ]
    .into_iter()
    .flat_map(|performance| {
        [
            PotentialRating::High,
            PotentialRating::Medium,
            PotentialRating::Low,
        ]
        .into_iter()
        .filter_map(move |potential| {
            TalentBox::place(performance, potential).map(|category| MatrixCell {
                performance,
                potential,
                category,
                label: category.label(),
                employees: Vec::new(),
            })
        })
    })
    .collect();

    let mut unplaced = Vec::new();

    for (employee, evaluation) in latest_with_employees(employees, evaluations) {
        if department.is_some_and(|wanted| !employee.department.eq_ignore_ascii_case(wanted)) {
            continue;
        }

        let entry = MatrixEntry {
            employee_id: employee.id.clone(),
            name: employee.name.clone(),
            department: employee.department.clone(),
            overall: evaluation.calculated.overall,
        };

        match TalentBox::place(evaluation.level, evaluation.potential) {
            Some(category) => {
                if let Some(cell) = cells.iter_mut().find(|cell| cell.category == category) {
                    cell.employees.push(entry);
                }
            }
            None => unplaced.push(entry),
        }
    }

    for cell in &mut cells {
        cell.employees.sort_by(|a, b| {
            b.overall
                .partial_cmp(&a.overall)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then_with(|| a.name.cmp(&b.name))
        });
    }

    TalentMatrix { cells, unplaced }
}
