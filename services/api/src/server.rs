use crate::cli::ServeArgs;
use crate::infra::{AppState, InMemoryConfigurationRepository, JsonFileConfigurationRepository};
use crate::routes::with_assessment_routes;
use assessment_engine::assessment::{AssessmentService, ConfigurationRepository};
use assessment_engine::config::AppConfig;
use assessment_engine::error::AppError;
use assessment_engine::telemetry;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
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

    match config.storage.configuration_path.clone() {
        Some(path) => {
            info!(path = %path.display(), "persisting assessment configuration to disk");
            serve(config, Arc::new(JsonFileConfigurationRepository::new(path))).await
        }
        None => {
            info!("serving the sample assessment configuration from memory");
            serve(config, Arc::new(InMemoryConfigurationRepository::default())).await
        }
    }
}

async fn serve<R>(config: AppConfig, repository: Arc<R>) -> Result<(), AppError>
where
    R: ConfigurationRepository + 'static,
{
    let service = Arc::new(AssessmentService::new(repository));
    let issues = service.audit()?;
    if !issues.is_empty() {
        info!(count = issues.len(), "stored configuration has integrity issues");
    }

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let app = with_assessment_routes(service)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, "assessment engine ready");

    axum::serve(listener, app).await?;
    Ok(())
}
