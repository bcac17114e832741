use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use axum_prometheus::PrometheusMetricLayer;
use tracing::info;

use super::{router, AppState};
use crate::config::{AppConfig, RegistryConfig};
use crate::efiling::{InMemorySubmissionRepository, UploadPolicy};
use crate::error::AppError;
use crate::wizard::{LocationDirectory, RegistryError};

/// Court locations from the configured CSV, or the built-in directory.
pub fn load_locations(config: &RegistryConfig) -> Result<LocationDirectory, RegistryError> {
    match &config.locations_csv {
        Some(path) => {
            let directory = LocationDirectory::from_path(path)?;
            info!(path = %path.display(), count = directory.locations().len(), "loaded court locations");
            Ok(directory)
        }
        None => Ok(LocationDirectory::standard()),
    }
}

/// Binds the configured address and serves until the listener fails.
/// Telemetry must already be initialised.
pub async fn run(config: AppConfig) -> Result<(), AppError> {
    let locations = Arc::new(load_locations(&config.registry)?);

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(AtomicBool::new(false));
    let state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
        locations,
        upload_policy: UploadPolicy::new(config.efiling.max_upload_bytes),
        submissions: Arc::new(InMemorySubmissionRepository::new()),
    };

    let app = router(state).layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, "family law forms wizard ready");

    axum::serve(listener, app).await?;
    Ok(())
}
