use crate::cli::ServeArgs;
use crate::infra::{AppState, EvaluatorSet};
use crate::routes::portal_router;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use campus_portal::config::AppConfig;
use campus_portal::error::AppError;
use campus_portal::telemetry;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
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

    let evaluators = Arc::new(EvaluatorSet::from_config(&config.portal));

    let app = portal_router(evaluators)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(
        ?config.environment,
        %addr,
        default_policy = config.portal.default_policy.label(),
        "campus portal evaluators ready"
    );

    axum::serve(listener, app).await?;
    Ok(())
}
