use crate::cli::ServeArgs;
use crate::infra::{AppState, ConfiguredStore, NarrativeFeedback};
use crate::routes::with_evaluation_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use talent_eval::config::AppConfig;
use talent_eval::error::AppError;
use talent_eval::evaluations::EvaluationService;
use talent_eval::telemetry;
use tracing::info;

pub(crate) async fn run(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }

    telemetry::init(&config.telemetry)?;

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let store = ConfiguredStore::from_config(&config.storage)?;
    let backend = store.backend();
    let evaluation_service = Arc::new(EvaluationService::new(
        Arc::new(store),
        Arc::new(NarrativeFeedback),
        config.scoring.clone(),
    ));

    let app = with_evaluation_routes(evaluation_service)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, backend, "talent evaluation service ready");

    axum::serve(listener, app).await?;
    Ok(())
}
