//! HTTP surface over the wizard engine and e-filing packaging.

mod routes;
mod server;

use std::sync::atomic::AtomicBool;
use std::sync::Arc;

use metrics_exporter_prometheus::PrometheusHandle;

use crate::efiling::{SubmissionRepository, UploadPolicy};
use crate::wizard::LocationDirectory;

pub use routes::router;
pub use server::{load_locations, run};

/// Shared handles every route can reach.
#[derive(Clone)]
pub struct AppState {
    pub readiness: Arc<AtomicBool>,
    pub metrics: Arc<PrometheusHandle>,
    pub locations: Arc<LocationDirectory>,
    pub upload_policy: UploadPolicy,
    pub submissions: Arc<dyn SubmissionRepository>,
}
