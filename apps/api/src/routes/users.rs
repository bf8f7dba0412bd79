use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use crate::errors::AppError;
use crate::models::{NewUser, User, UserPatch};
use crate::state::AppState;

/// GET /api/v1/users
pub async fn handle_list_users(State(state): State<AppState>) -> Json<Vec<User>> {
    Json(state.store.users().await)
}

/// POST /api/v1/users
pub async fn handle_create_user(
    State(state): State<AppState>,
    Json(request): Json<NewUser>,
) -> Result<(StatusCode, Json<User>), AppError> {
    if request.name.trim().is_empty() || request.email.trim().is_empty() {
        return Err(AppError::Validation(
            "name and email cannot be empty".to_string(),
        ));
    }
    let user = state.store.create_user(request).await?;
    Ok((StatusCode::CREATED, Json(user)))
}

/// GET /api/v1/users/:id
pub async fn handle_get_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<User>, AppError> {
    state
        .store
        .get_user(&id)
        .await
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("User {id} not found")))
}

/// PATCH /api/v1/users/:id
pub async fn handle_update_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(patch): Json<UserPatch>,
) -> Result<Json<User>, AppError> {
    state
        .store
        .update_user(&id, patch)
        .await?
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("User {id} not found")))
}

/// DELETE /api/v1/users/:id
pub async fn handle_delete_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    if state.store.delete_user(&id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::NotFound(format!("User {id} not found")))
    }
}
