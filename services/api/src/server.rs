use crate::cli::ServeArgs;
use crate::infra::{build_category_averages, build_profile_store, AppState};
use crate::routes::with_service_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use tracing::info;
use upi_recommender::config::AppConfig;
use upi_recommender::error::AppError;
use upi_recommender::recommender::scoring::ScoringEngine;
use upi_recommender::recommender::service::RecommendationService;
use upi_recommender::recommender::store::ProfileStore;
use upi_recommender::telemetry;

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
    let readiness_flag = Arc::new(std::sync::atomic::AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let store = Arc::new(build_profile_store(&config.data)?);
    let averages = build_category_averages(&config.data)?;
    info!(
        profiles = store.len(),
        categories = averages.len(),
        "reference tables loaded"
    );

    let service = Arc::new(RecommendationService::new(
        store,
        averages,
        ScoringEngine::default(),
    ));

    let app = with_service_routes(service)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, "amount recommendation service ready");

    axum::serve(listener, app).await?;
    Ok(())
}
