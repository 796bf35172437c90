use axum::{extract::State, http::StatusCode, Json};
use serde_json::{json, Value};

use super::AppState;
use crate::backend::Backend;

pub async fn root() -> &'static str {
    "Welcome to the school API"
}

pub async fn health(State(backend): State<AppState>) -> (StatusCode, Json<Value>) {
    match backend.health_check().await {
        Ok(()) => (StatusCode::OK, Json(json!({ "status": "ok" }))),
        Err(e) => {
            tracing::error!(error = %e, "health check failed");
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(json!({ "status": "error", "message": "Database unavailable" })),
            )
        }
    }
}
