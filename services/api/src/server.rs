use crate::cli::ServeArgs;
use crate::infra::{memory_service, AppState};
use crate::routes::with_service_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use process_match::catalog::CatalogImporter;
use process_match::config::AppConfig;
use process_match::error::AppError;
use process_match::telemetry;
use std::sync::atomic::Ordering;
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
    let readiness_flag = Arc::new(std::sync::atomic::AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let placement_service = memory_service();
    if let Some(path) = config.catalog.preload.as_deref() {
        let catalog = CatalogImporter::from_path(path)?;
        placement_service.install_catalog(catalog)?;
        info!(path = %path.display(), "process catalog preloaded");
    }

    let app = with_service_routes(placement_service)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, "process matching service ready");

    axum::serve(listener, app).await?;
    Ok(())
}
