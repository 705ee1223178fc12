use clap::Args;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use talent_eval::error::AppError;
use talent_eval::evaluations::{
    check_thresholds, default_thresholds, score, CalculatedScores, EvaluationScore,
    EvaluationServiceError, Factor, LevelThreshold, PerformanceLevel,
};

#[derive(Args, Debug)]
pub(crate) struct ScoreArgs {
    /// JSON file holding `criteria`, `scores` and optional `thresholds`
    #[arg(long)]
    pub(crate) input: PathBuf,
    /// Print a human-readable table instead of JSON
    #[arg(long)]
    pub(crate) table: bool,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ScoreRequest {
    pub(crate) criteria: Vec<Factor>,
    #[serde(default)]
    pub(crate) scores: Vec<EvaluationScore>,
    #[serde(default)]
    pub(crate) thresholds: Option<Vec<LevelThreshold>>,
}

#[derive(Debug, Serialize)]
pub(crate) struct ScoreResponse {
    pub(crate) calculated: CalculatedScores,
    pub(crate) level: PerformanceLevel,
    pub(crate) level_label: &'static str,
}

pub(crate) fn run_score(args: ScoreArgs) -> Result<(), AppError> {
    let raw = std::fs::read_to_string(&args.input)?;
    let request: ScoreRequest = serde_json::from_str(&raw)?;
    let response = evaluate_request(request)?;

    if args.table {
        render_score(&response);
    } else {
        println!("{}", serde_json::to_string_pretty(&response)?);
    }
    Ok(())
}

pub(crate) fn evaluate_request(request: ScoreRequest) -> Result<ScoreResponse, AppError> {
    let thresholds = match request.thresholds {
        Some(thresholds) => {
            check_thresholds(&thresholds).map_err(EvaluationServiceError::from)?;
            thresholds
        }
        None => default_thresholds(),
    };

    let outcome = score(&request.scores, &request.criteria, &thresholds);
    Ok(ScoreResponse {
        level_label: outcome.level.label(),
        calculated: outcome.calculated,
        level: outcome.level,
    })
}

fn render_score(response: &ScoreResponse) {
    println!("Factor scores");
    for factor in &response.calculated.factors {
        println!("- {}: {:.2}", factor.factor_name, factor.score);
    }
    println!(
        "\nOverall: {:.2} ({})",
        response.calculated.overall, response.level_label
    );
}
