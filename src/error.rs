use crate::config::ConfigError;
use crate::efiling::{FilingError, SubmissionRepositoryError};
use crate::telemetry::TelemetryError;
use crate::wizard::RegistryError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use std::fmt;

#[derive(Debug)]
pub enum AppError {
    Config(ConfigError),
    Telemetry(TelemetryError),
    Io(std::io::Error),
    Registry(RegistryError),
    State(serde_json::Error),
    Filing(FilingError),
    Submission(SubmissionRepositoryError),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Config(err) => write!(f, "configuration error: {}", err),
            AppError::Telemetry(err) => write!(f, "telemetry error: {}", err),
            AppError::Io(err) => write!(f, "io error: {}", err),
            AppError::Registry(err) => write!(f, "registry error: {}", err),
            AppError::State(err) => write!(f, "invalid wizard state: {}", err),
            AppError::Filing(err) => write!(f, "{}", err),
            AppError::Submission(err) => write!(f, "submission error: {}", err),
        }
    }
}

impl std::error::Error for AppError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AppError::Config(err) => Some(err),
            AppError::Telemetry(err) => Some(err),
            AppError::Io(err) => Some(err),
            AppError::Registry(err) => Some(err),
            AppError::State(err) => Some(err),
            AppError::Filing(err) => Some(err),
            AppError::Submission(err) => Some(err),
        }
    }
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::State(_) | AppError::Filing(_) => StatusCode::BAD_REQUEST,
            AppError::Submission(SubmissionRepositoryError::NotFound) => StatusCode::NOT_FOUND,
            AppError::Submission(SubmissionRepositoryError::Conflict) => StatusCode::CONFLICT,
            AppError::Config(_)
            | AppError::Telemetry(_)
            | AppError::Io(_)
            | AppError::Registry(_)
            | AppError::Submission(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = Json(json!({ "error": self.to_string() }));
        (status, body).into_response()
    }
}

impl From<ConfigError> for AppError {
    fn from(value: ConfigError) -> Self {
        Self::Config(value)
    }
}

impl From<TelemetryError> for AppError {
    fn from(value: TelemetryError) -> Self {
        Self::Telemetry(value)
    }
}

impl From<std::io::Error> for AppError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<RegistryError> for AppError {
    fn from(value: RegistryError) -> Self {
        Self::Registry(value)
    }
}

impl From<serde_json::Error> for AppError {
    fn from(value: serde_json::Error) -> Self {
        Self::State(value)
    }
}

impl From<FilingError> for AppError {
    fn from(value: FilingError) -> Self {
        Self::Filing(value)
    }
}

impl From<SubmissionRepositoryError> for AppError {
    fn from(value: SubmissionRepositoryError) -> Self {
        Self::Submission(value)
    }
}
