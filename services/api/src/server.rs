use crate::cli::ServeArgs;
use crate::infra::{AppState, InMemoryApplicationRepository};
use crate::routes::with_application_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use talentgate::auth::TokenValidator;
use talentgate::config::AppConfig;
use talentgate::error::AppError;
use talentgate::realtime::NotificationHub;
use talentgate::recruiting::RecruitingService;
use talentgate::telemetry;
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
    let hub = Arc::new(NotificationHub::new());
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
        hub: hub.clone(),
        tokens: Arc::new(TokenValidator::new(&config.auth)),
    };

    let repository = Arc::new(InMemoryApplicationRepository::default());
    let recruiting_service = Arc::new(RecruitingService::new(repository, hub));

    let app = with_application_routes(recruiting_service)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, "talentgate recruiting backend ready");

    axum::serve(listener, app).await?;
    Ok(())
}
