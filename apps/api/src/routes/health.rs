use axum::{extract::State, Json};
use serde_json::{json, Value};

use crate::state::AppState;

/// GET /health
/// Returns service version, scorer backend and collection sizes.
pub async fn health_handler(State(state): State<AppState>) -> Json<Value> {
    let snapshot = state.store.snapshot().await;
    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
        "service": "recruiter-api",
        "scorer": state.store.scorer_backend(),
        "counts": {
            "users": snapshot.users.len(),
            "jobs": snapshot.jobs.len(),
            "applications": snapshot.applications.len()
        }
    }))
}
