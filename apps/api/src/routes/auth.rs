use axum::Json;

use crate::auth::{login, LoginRequest, Session};

/// POST /api/v1/auth/login
///
/// Stub login: any credentials succeed.
pub async fn handle_login(Json(request): Json<LoginRequest>) -> Json<Session> {
    Json(login(&request))
}
