use std::sync::atomic::Ordering;

use axum::extract::{Path, State};
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::routing::{get, post, put};
use axum::{Json, Router};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::info;

use super::AppState;
use crate::efiling::{
    PackageCallback, PackageRequest, SubmissionPackage, SubmissionRecord,
    SubmissionRepositoryError, UploadAcknowledgement,
};
use crate::error::AppError;
use crate::FORMS_VERSION;
use crate::wizard::{
    AnswerSnapshot, DocumentSet, PageSubmission, Pathway, PathwayType, PathwayTypeCatalog,
    RequiredDocuments, SurveyResult, WizardSession, WizardState,
};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(healthcheck))
        .route("/ready", get(readiness_endpoint))
        .route("/metrics", get(metrics_endpoint))
        .route("/api/v1/pathway-types", get(pathway_types_endpoint))
        .route("/api/v1/documents", post(documents_endpoint))
        .route("/api/v1/survey-page", post(survey_page_endpoint))
        .route("/api/v1/survey-changed", post(survey_changed_endpoint))
        .route("/api/v1/efiling/package", post(package_endpoint))
        .route(
            "/api/v1/efiling/:transaction_id/upload",
            put(upload_acknowledgement_endpoint),
        )
        .route(
            "/api/v1/efiling/:transaction_id/package",
            put(package_callback_endpoint),
        )
        .with_state(state)
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct DocumentsRequest {
    #[serde(default)]
    pub(crate) state: WizardState,
    pub(crate) set: DocumentSet,
    /// Defaults to the answers stored in the set's wizard step.
    #[serde(default)]
    pub(crate) answers: Option<AnswerSnapshot>,
    #[serde(default)]
    pub(crate) apply_case_management_fallback: bool,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct DocumentsResponse {
    pub(crate) documents: RequiredDocuments,
    pub(crate) state: WizardState,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct SurveyPageRequest {
    #[serde(default)]
    pub(crate) state: WizardState,
    pub(crate) page: PageSubmission,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct SurveyPageResponse {
    pub(crate) result: SurveyResult,
    pub(crate) state: WizardState,
}

/// `{"pathway": "childReloc"}` or `"allExceptProtectionOrder"`.
#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) enum ChangeScope {
    Pathway(Pathway),
    AllExceptProtectionOrder,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct SurveyChangedRequest {
    #[serde(default)]
    pub(crate) state: WizardState,
    pub(crate) scope: ChangeScope,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct PackageEndpointRequest {
    pub(crate) application_id: String,
    #[serde(flatten)]
    pub(crate) package: PackageRequest,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct PackageEndpointResponse {
    pub(crate) submission: SubmissionRecord,
    pub(crate) package: SubmissionPackage,
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok", "formsVersion": FORMS_VERSION }))
}

pub(crate) async fn readiness_endpoint(State(state): State<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(State(state): State<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}

pub(crate) async fn pathway_types_endpoint() -> Json<Vec<PathwayType>> {
    Json(PathwayTypeCatalog::standard().types().to_vec())
}

pub(crate) async fn documents_endpoint(
    State(app): State<AppState>,
    Json(request): Json<DocumentsRequest>,
) -> Json<DocumentsResponse> {
    let DocumentsRequest {
        state,
        set,
        answers,
        apply_case_management_fallback,
    } = request;

    let answers = answers.unwrap_or_else(|| state.pathway_answers(set.pathway()));
    let mut session = WizardSession::new(state, app.locations.clone());
    session.compute_required_documents(set, &answers);
    if apply_case_management_fallback && set == DocumentSet::FamilyLawMatter {
        session.apply_case_management_fallback();
    }

    let state = session.into_state();
    let documents = state.required_documents(set).cloned().unwrap_or_default();
    Json(DocumentsResponse { documents, state })
}

pub(crate) async fn survey_page_endpoint(
    State(app): State<AppState>,
    Json(request): Json<SurveyPageRequest>,
) -> Json<SurveyPageResponse> {
    let mut session = WizardSession::new(request.state, app.locations.clone());
    let result = session.record_survey_page(&request.page);
    Json(SurveyPageResponse {
        result,
        state: session.into_state(),
    })
}

pub(crate) async fn survey_changed_endpoint(
    State(app): State<AppState>,
    Json(request): Json<SurveyChangedRequest>,
) -> Json<WizardState> {
    let mut session = WizardSession::new(request.state, app.locations.clone());
    match request.scope {
        ChangeScope::Pathway(pathway) => session.survey_changed(pathway),
        ChangeScope::AllExceptProtectionOrder => {
            session.survey_changed_all_except_protection_order()
        }
    }
    Json(session.into_state())
}

pub(crate) async fn package_endpoint(
    State(app): State<AppState>,
    Json(request): Json<PackageEndpointRequest>,
) -> Result<(StatusCode, Json<PackageEndpointResponse>), AppError> {
    let package = SubmissionPackage::assemble(&app.upload_policy, &request.package)?;
    let submission = app
        .submissions
        .insert(SubmissionRecord::open(request.application_id, Utc::now()))?;

    info!(
        transaction_id = %submission.transaction_id,
        documents = package.documents.len(),
        conversions = package.conversions(),
        "e-filing package prepared"
    );

    Ok((
        StatusCode::CREATED,
        Json(PackageEndpointResponse {
            submission,
            package,
        }),
    ))
}

fn stored_submission(app: &AppState, transaction_id: &str) -> Result<SubmissionRecord, AppError> {
    Ok(app
        .submissions
        .fetch(transaction_id)?
        .ok_or(SubmissionRepositoryError::NotFound)?)
}

pub(crate) async fn upload_acknowledgement_endpoint(
    State(app): State<AppState>,
    Path(transaction_id): Path<String>,
    Json(ack): Json<UploadAcknowledgement>,
) -> Result<StatusCode, AppError> {
    let mut record = stored_submission(&app, &transaction_id)?;
    record.mark_uploaded(ack.submission_id, Utc::now());
    app.submissions.update(record)?;
    info!(%transaction_id, "e-filing upload acknowledged");
    Ok(StatusCode::NO_CONTENT)
}

pub(crate) async fn package_callback_endpoint(
    State(app): State<AppState>,
    Path(transaction_id): Path<String>,
    Json(callback): Json<PackageCallback>,
) -> Result<StatusCode, AppError> {
    let mut record = stored_submission(&app, &transaction_id)?;
    record.record_package(callback, Utc::now());
    app.submissions.update(record)?;
    Ok(StatusCode::NO_CONTENT)
}
