use crate::cli::ServeArgs;
use crate::infra::AppState;
use crate::routes::with_scoring_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use capability_scoring::assessment::{parse_question_types, AssessmentScorer};
use capability_scoring::config::AppConfig;
use capability_scoring::error::AppError;
use capability_scoring::telemetry;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use tracing::{info, warn};

pub(crate) async fn run(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }

    telemetry::init(&config.telemetry)?;

    let default_question_types = config.scoring.default_question_types()?;
    match (
        &config.scoring.question_types_path,
        parse_question_types(&default_question_types),
    ) {
        (Some(path), Some(types)) => {
            info!(path = %path.display(), types = types.len(), "loaded default question types");
        }
        (Some(path), None) => {
            warn!(
                path = %path.display(),
                "default question types are unusable; weighting disabled unless requests supply them"
            );
        }
        (None, _) => {}
    }

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(std::sync::atomic::AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let scorer = Arc::new(AssessmentScorer::new(default_question_types));

    let app = with_scoring_routes(scorer)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, "capability scoring service ready");

    axum::serve(listener, app).await?;
    Ok(())
}
