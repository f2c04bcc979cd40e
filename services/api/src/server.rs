use crate::cli::ServeArgs;
use crate::infra::{catalog_config, load_engine, AppState};
use crate::routes::risk_routes;
use axum_prometheus::PrometheusMetricLayer;
use risk_coach::config::AppConfig;
use risk_coach::error::AppError;
use risk_coach::telemetry;
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
    config.catalog = catalog_config(args.data_dir.take(), config.catalog);

    telemetry::init(&config.telemetry)?;

    let engine = load_engine(&config.catalog)?;

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
        engine,
    };

    let app = risk_routes(app_state).layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, data_dir = %config.catalog.data_dir.display(), "risk coach service ready");

    axum::serve(listener, app).await?;
    Ok(())
}
