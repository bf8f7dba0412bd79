//! Axum route handlers for the Applications API.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::Serialize;

use crate::errors::AppError;
use crate::models::{Application, ApplicationPatch, Job, NewApplication};
use crate::state::AppState;
use crate::store::ApplicationQuery;

#[derive(Debug, Serialize)]
pub struct ApplicationDetailResponse {
    pub application: Application,
    pub job: Option<Job>,
}

fn validate_new(request: &NewApplication) -> Result<(), AppError> {
    if request.full_name.trim().is_empty() || request.cv_text.trim().is_empty() {
        return Err(AppError::Validation(
            "fullName and cvText cannot be empty".to_string(),
        ));
    }
    Ok(())
}

fn not_found(id: &str) -> AppError {
    AppError::NotFound(format!("Application {id} not found"))
}

/// GET /api/v1/applications?jobId=&status=&search=&sort=
pub async fn handle_list_applications(
    State(state): State<AppState>,
    Query(query): Query<ApplicationQuery>,
) -> Json<Vec<Application>> {
    Json(state.store.applications(&query).await)
}

/// POST /api/v1/applications
///
/// Creates the application without analyzing it.
pub async fn handle_create_application(
    State(state): State<AppState>,
    Json(request): Json<NewApplication>,
) -> Result<(StatusCode, Json<Application>), AppError> {
    validate_new(&request)?;
    let application = state.store.create_application(request).await?;
    Ok((StatusCode::CREATED, Json(application)))
}

/// POST /api/v1/applications/submit
///
/// Create + analyze in one call. Responds once the analysis has been merged.
pub async fn handle_submit_application(
    State(state): State<AppState>,
    Json(request): Json<NewApplication>,
) -> Result<(StatusCode, Json<Application>), AppError> {
    validate_new(&request)?;
    let store = state.store.clone();
    let application = run_detached(async move { store.submit_application(request).await })
        .await??
        .ok_or_else(|| {
            AppError::NotFound("Application was deleted before analysis completed".to_string())
        })?;
    Ok((StatusCode::CREATED, Json(application)))
}

/// GET /api/v1/applications/:id
///
/// Returns the application with its linked job, if that job still exists.
pub async fn handle_get_application(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ApplicationDetailResponse>, AppError> {
    let application = state
        .store
        .get_application(&id)
        .await
        .ok_or_else(|| not_found(&id))?;
    let job = match application.job_id.as_deref() {
        Some(job_id) => state.store.get_job(job_id).await,
        None => None,
    };
    Ok(Json(ApplicationDetailResponse { application, job }))
}

/// PATCH /api/v1/applications/:id
///
/// `analyzed` cannot be set by hand; it is only reached through analysis.
pub async fn handle_update_application(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(patch): Json<ApplicationPatch>,
) -> Result<Json<Application>, AppError> {
    if patch.status.is_some_and(|s| !s.is_manual()) {
        return Err(AppError::Validation(
            "status 'analyzed' is set by analysis only".to_string(),
        ));
    }
    state
        .store
        .update_application(&id, patch)
        .await?
        .map(Json)
        .ok_or_else(|| not_found(&id))
}

/// DELETE /api/v1/applications/:id
pub async fn handle_delete_application(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    if state.store.delete_application(&id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(not_found(&id))
    }
}

/// POST /api/v1/applications/:id/analyze
pub async fn handle_analyze_application(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Application>, AppError> {
    let store = state.store.clone();
    let task_id = id.clone();
    let analyzed = run_detached(async move { store.analyze(&task_id).await }).await??;
    analyzed.map(Json).ok_or_else(|| not_found(&id))
}

/// Spawns the work so it runs to completion even if the client disconnects.
async fn run_detached<T, F>(work: F) -> Result<T, AppError>
where
    F: std::future::Future<Output = T> + Send + 'static,
    T: Send + 'static,
{
    tokio::spawn(work)
        .await
        .map_err(|e| AppError::Internal(anyhow::anyhow!("analysis task failed: {e}")))
}
