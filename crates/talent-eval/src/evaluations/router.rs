use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post, put},
    Json, Router,
};
use serde::Deserialize;

use super::domain::{
    Employee, EmployeeId, EvaluationId, EvaluationScore, EvaluationSubmission,
    EvaluationTemplate, Factor, LevelThreshold, TemplateId,
};
use super::repository::{FeedbackGenerator, TalentRepository};
use super::service::{EvaluationService, EvaluationServiceError};
use crate::error::AppError;

type SharedService<R, F> = State<Arc<EvaluationService<R, F>>>;

/// Router builder exposing the evaluation workflow over HTTP.
pub fn evaluation_router<R, F>(service: Arc<EvaluationService<R, F>>) -> Router
where
    R: TalentRepository + 'static,
    F: FeedbackGenerator + 'static,
{
    Router::new()
        .route("/api/v1/employees", post(register_employee_handler::<R, F>))
        .route(
            "/api/v1/employees/:employee_id/evaluations",
            get(employee_evaluations_handler::<R, F>),
        )
        .route("/api/v1/templates", post(create_template_handler::<R, F>))
        .route(
            "/api/v1/templates/:template_id",
            put(update_template_handler::<R, F>),
        )
        .route(
            "/api/v1/evaluations",
            post(complete_evaluation_handler::<R, F>),
        )
        .route(
            "/api/v1/evaluations/:evaluation_id",
            get(evaluation_handler::<R, F>),
        )
        .route("/api/v1/scoring/preview", post(preview_handler::<R, F>))
        .route(
            "/api/v1/settings/levels",
            get(levels_handler::<R, F>).put(update_levels_handler::<R, F>),
        )
        .route("/api/v1/talent-matrix", get(talent_matrix_handler::<R, F>))
        .route(
            "/api/v1/reports/departments",
            get(department_report_handler::<R, F>),
        )
        .route(
            "/api/v1/reports/promotions",
            get(promotion_report_handler::<R, F>),
        )
        .with_state(service)
}

fn error_response(error: EvaluationServiceError) -> Response {
    AppError::from(error).into_response()
}

fn respond<T: serde::Serialize>(
    status: StatusCode,
    result: Result<T, EvaluationServiceError>,
) -> Response {
    match result {
        Ok(body) => (status, Json(body)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn register_employee_handler<R, F>(
    State(service): SharedService<R, F>,
    Json(employee): Json<Employee>,
) -> Response
where
    R: TalentRepository + 'static,
    F: FeedbackGenerator + 'static,
{
    respond(StatusCode::CREATED, service.register_employee(employee))
}

pub(crate) async fn employee_evaluations_handler<R, F>(
    State(service): SharedService<R, F>,
    Path(employee_id): Path<String>,
) -> Response
where
    R: TalentRepository + 'static,
    F: FeedbackGenerator + 'static,
{
    let id = EmployeeId(employee_id);
    let result = service.employee(&id).and_then(|_| {
        service.evaluations_for(&id).map(|evaluations| {
            evaluations
                .iter()
                .map(|evaluation| evaluation.summary_view())
                .collect::<Vec<_>>()
        })
    });
    respond(StatusCode::OK, result)
}

pub(crate) async fn create_template_handler<R, F>(
    State(service): SharedService<R, F>,
    Json(template): Json<EvaluationTemplate>,
) -> Response
where
    R: TalentRepository + 'static,
    F: FeedbackGenerator + 'static,
{
    respond(StatusCode::CREATED, service.create_template(template))
}

pub(crate) async fn update_template_handler<R, F>(
    State(service): SharedService<R, F>,
    Path(template_id): Path<String>,
    Json(mut template): Json<EvaluationTemplate>,
) -> Response
where
    R: TalentRepository + 'static,
    F: FeedbackGenerator + 'static,
{
    template.id = TemplateId(template_id);
    respond(StatusCode::OK, service.update_template(template))
}

pub(crate) async fn complete_evaluation_handler<R, F>(
    State(service): SharedService<R, F>,
    Json(submission): Json<EvaluationSubmission>,
) -> Response
where
    R: TalentRepository + 'static,
    F: FeedbackGenerator + 'static,
{
    respond(StatusCode::CREATED, service.complete_evaluation(submission))
}

pub(crate) async fn evaluation_handler<R, F>(
    State(service): SharedService<R, F>,
    Path(evaluation_id): Path<String>,
) -> Response
where
    R: TalentRepository + 'static,
    F: FeedbackGenerator + 'static,
{
    respond(
        StatusCode::OK,
        service.evaluation(&EvaluationId(evaluation_id)),
    )
}

#[derive(Debug, Deserialize)]
pub(crate) struct PreviewRequest {
    pub(crate) criteria: Vec<Factor>,
    #[serde(default)]
    pub(crate) scores: Vec<EvaluationScore>,
}

pub(crate) async fn preview_handler<R, F>(
    State(service): SharedService<R, F>,
    Json(request): Json<PreviewRequest>,
) -> Response
where
    R: TalentRepository + 'static,
    F: FeedbackGenerator + 'static,
{
    respond(
        StatusCode::OK,
        service.preview(&request.scores, &request.criteria),
    )
}

pub(crate) async fn levels_handler<R, F>(State(service): SharedService<R, F>) -> Response
where
    R: TalentRepository + 'static,
    F: FeedbackGenerator + 'static,
{
    respond(StatusCode::OK, service.level_thresholds())
}

pub(crate) async fn update_levels_handler<R, F>(
    State(service): SharedService<R, F>,
    Json(thresholds): Json<Vec<LevelThreshold>>,
) -> Response
where
    R: TalentRepository + 'static,
    F: FeedbackGenerator + 'static,
{
    respond(StatusCode::OK, service.update_level_thresholds(thresholds))
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct MatrixQuery {
    pub(crate) department: Option<String>,
}

pub(crate) async fn talent_matrix_handler<R, F>(
    State(service): SharedService<R, F>,
    Query(query): Query<MatrixQuery>,
) -> Response
where
    R: TalentRepository + 'static,
    F: FeedbackGenerator + 'static,
{
    respond(
        StatusCode::OK,
        service.talent_matrix(query.department.as_deref()),
    )
}

pub(crate) async fn department_report_handler<R, F>(
    State(service): SharedService<R, F>,
) -> Response
where
    R: TalentRepository + 'static,
    F: FeedbackGenerator + 'static,
{
    respond(StatusCode::OK, service.department_summaries())
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct PromotionQuery {
    pub(crate) limit: Option<usize>,
}

pub(crate) async fn promotion_report_handler<R, F>(
    State(service): SharedService<R, F>,
    Query(query): Query<PromotionQuery>,
) -> Response
where
    R: TalentRepository + 'static,
    F: FeedbackGenerator + 'static,
{
    respond(StatusCode::OK, service.promotion_ranking(query.limit))
}
