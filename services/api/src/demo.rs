use crate::infra::{ConfiguredStore, NarrativeFeedback};
use chrono::{Local, NaiveDate};
use clap::Args;
use std::path::PathBuf;
use std::sync::Arc;
use talent_eval::config::StorageConfig;
use talent_eval::error::AppError;
use talent_eval::evaluations::{
    Characteristic, CharacteristicId, DepartmentSummary, Employee, EmployeeId, EvaluationScore,
    EvaluationService, EvaluationServiceError, EvaluationSubmission, EvaluationTemplate, Factor,
    FactorId, FeedbackGenerator, PerformanceLevel, PotentialRating, PromotionCandidate,
    RepositoryError, RigorMode, ScoringConfig, TalentMatrix, TalentRepository, TemplateId,
};

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Evaluation date for the seeded reviews (YYYY-MM-DD). Defaults to today.
    #[arg(long, value_parser = crate::infra::parse_date)]
    pub(crate) evaluated_on: Option<NaiveDate>,
    /// Restrict the talent matrix to one department.
    #[arg(long)]
    pub(crate) department: Option<String>,
    /// Persist the demo data to this JSON file instead of memory.
    #[arg(long)]
    pub(crate) data_path: Option<PathBuf>,
    /// Tone of the generated feedback.
    #[arg(long, value_enum, default_value_t = DemoRigor::Balanced)]
    pub(crate) rigor: DemoRigor,
}

#[derive(clap::ValueEnum, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) enum DemoRigor {
    Lenient,
    #[default]
    Balanced,
    Demanding,
}

impl From<DemoRigor> for RigorMode {
    fn from(value: DemoRigor) -> Self {
        match value {
            DemoRigor::Lenient => RigorMode::Lenient,
            DemoRigor::Balanced => RigorMode::Balanced,
            DemoRigor::Demanding => RigorMode::Demanding,
        }
    }
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let DemoArgs {
        evaluated_on,
        department,
        data_path,
        rigor,
    } = args;

    let evaluated_on = evaluated_on.unwrap_or_else(|| Local::now().date_naive());
    let store = ConfiguredStore::from_config(&StorageConfig { data_path })?;
    let service = EvaluationService::new(
        Arc::new(store),
        Arc::new(NarrativeFeedback),
        ScoringConfig::default(),
    );

    println!("Talent evaluation demo");
    seed_team(&service, evaluated_on, rigor.into())?;

    let matrix = service.talent_matrix(department.as_deref())?;
    render_matrix(&matrix, department.as_deref());

    let summaries = service.department_summaries()?;
    render_department_summaries(&summaries);

    let ranking = service.promotion_ranking(Some(5))?;
    render_promotions(&ranking);

    Ok(())
}

fn characteristic(id: &str, name: &str, weight: f64) -> Characteristic {
    Characteristic {
        id: CharacteristicId::new(id),
        name: name.to_string(),
        weight,
    }
}

pub(crate) fn sample_template() -> EvaluationTemplate {
    EvaluationTemplate {
        id: TemplateId::new("tpl-annual"),
        name: "Annual performance review".to_string(),
        criteria: vec![
            Factor {
                id: FactorId::new("knowledge"),
                name: "Technical Knowledge".to_string(),
                characteristics: vec![
                    characteristic("domain", "Domain expertise", 1.0),
                    characteristic("tooling", "Tooling", 1.0),
                ],
            },
            Factor {
                id: FactorId::new("teamwork"),
                name: "Teamwork".to_string(),
                characteristics: vec![
                    characteristic("collaboration", "Collaboration", 1.5),
                    characteristic("communication", "Communication", 1.0),
                ],
            },
            Factor {
                id: FactorId::new("results"),
                name: "Results".to_string(),
                characteristics: vec![characteristic("delivery", "Delivery", 2.0)],
            },
        ],
    }
}

/// Name, department, position, scores in template order, potential.
const SAMPLE_TEAM: [(&str, &str, &str, [f64; 5], PotentialRating); 6] = [
    (
        "Ana Torres",
        "Engineering",
        "Backend Engineer",
        [9.0, 8.5, 9.0, 8.0, 9.5],
        PotentialRating::High,
    ),
    (
        "Bruno Diaz",
        "Engineering",
        "QA Analyst",
        [6.0, 7.0, 6.5, 6.0, 5.5],
        PotentialRating::Medium,
    ),
    (
        "Carla Mendez",
        "Engineering",
        "Frontend Engineer",
        [8.0, 9.0, 7.5, 8.0, 9.0],
        PotentialRating::Medium,
    ),
    (
        "Diego Rojas",
        "Sales",
        "Account Executive",
        [3.0, 4.0, 5.0, 4.0, 3.5],
        PotentialRating::High,
    ),
    (
        "Elena Castro",
        "Sales",
        "Sales Lead",
        [8.5, 8.0, 9.0, 9.5, 9.0],
        PotentialRating::Low,
    ),
    (
        "Fabian Ortiz",
        "Sales",
        "Sales Associate",
        [5.0, 6.0, 7.0, 6.5, 6.0],
        PotentialRating::Low,
    ),
];

const SCORED_CHARACTERISTICS: [&str; 5] =
    ["domain", "tooling", "collaboration", "communication", "delivery"];

fn is_missing(err: &EvaluationServiceError) -> bool {
    matches!(
        err,
        EvaluationServiceError::Repository(RepositoryError::NotFound)
    )
}

fn seed_team<R, F>(
    service: &EvaluationService<R, F>,
    evaluated_on: NaiveDate,
    rigor: RigorMode,
) -> Result<(), AppError>
where
    R: TalentRepository + 'static,
    F: FeedbackGenerator + 'static,
{
    let template = match service.template(&TemplateId::new("tpl-annual")) {
        Ok(existing) => existing,
        Err(err) if is_missing(&err) => service.create_template(sample_template())?,
        Err(err) => return Err(err.into()),
    };

    for (index, (name, department, position, values, potential)) in
        SAMPLE_TEAM.iter().enumerate()
    {
        let employee_id = EmployeeId::new(format!("emp-{:03}", index + 1));
        match service.employee(&employee_id) {
            Ok(_) => {}
            Err(err) if is_missing(&err) => {
                service.register_employee(Employee {
                    id: employee_id.clone(),
                    name: name.to_string(),
                    department: department.to_string(),
                    position: position.to_string(),
                })?;
            }
            Err(err) => return Err(err.into()),
        }

        let scores = SCORED_CHARACTERISTICS
            .iter()
            .zip(values.iter())
            .map(|(id, score)| EvaluationScore {
                characteristic_id: CharacteristicId::new(*id),
                score: *score,
            })
            .collect();

        let record = service.complete_evaluation(EvaluationSubmission {
            employee_id,
            template_id: template.id.clone(),
            evaluated_on,
            scores,
            potential: *potential,
            rigor,
        })?;

        println!(
            "- {} ({}): {:.2} {}",
            name,
            department,
            record.calculated.overall,
            record.level.label()
        );
        if let Some(feedback) = &record.feedback {
            println!("  {}", feedback);
        }
    }

    Ok(())
}

fn render_matrix(matrix: &TalentMatrix, department: Option<&str>) {
    match department {
        Some(department) => println!("\nTalent matrix ({department})"),
        None => println!("\nTalent matrix"),
    }

    for cell in &matrix.cells {
        if cell.employees.is_empty() {
            continue;
        }
        let names: Vec<&str> = cell
            .employees
            .iter()
            .map(|entry| entry.name.as_str())
            .collect();
        println!(
            "- {} [{} / {}]: {}",
            cell.label,
            cell.performance.label(),
            cell.potential.label(),
            names.join(", ")
        );
    }

    if !matrix.unplaced.is_empty() {
        println!(
            "- {}: {} employee(s) outside the grid",
            PerformanceLevel::Indeterminate.label(),
            matrix.unplaced.len()
        );
    }
}

fn render_department_summaries(summaries: &[DepartmentSummary]) {
    println!("\nDepartment summaries");
    for summary in summaries {
        let distribution: Vec<String> = summary
            .levels
            .iter()
            .filter(|entry| entry.count > 0)
            .map(|entry| format!("{} {}", entry.level_label, entry.count))
            .collect();
        println!(
            "- {}: {} evaluated, average {:.2} ({})",
            summary.department,
            summary.evaluated,
            summary.average_overall,
            distribution.join(", ")
        );
    }
}

fn render_promotions(ranking: &[PromotionCandidate]) {
    if ranking.is_empty() {
        println!("\nPromotion candidates: none");
        return;
    }

    println!("\nPromotion candidates");
    for candidate in ranking {
        println!(
            "{}. {} ({}, {}) overall {:.2}, potential {}",
            candidate.rank,
            candidate.name,
            candidate.position,
            candidate.department,
            candidate.overall,
            candidate.potential.label()
        );
    }
}
