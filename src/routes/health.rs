use axum::{extract::State, http::StatusCode, Json};
use serde_json::{json, Value};

use crate::AppState;

/// GET /health — reports whether the announcement store answers.
pub async fn health_check(State(state): State<AppState>) -> (StatusCode, Json<Value>) {
    if let Err(e) = state.announcements.ping().await {
        tracing::warn!(error = %e, "Health check failed");
        return (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(json!({ "status": "error", "db": e.to_string() })),
        );
    }
    (StatusCode::OK, Json(json!({ "status": "ok", "db": "connected" })))
}
