use axum::{extract::State, response::Json};
use serde_json::{json, Value};

use crate::state::AppState;

pub async fn root_handler() -> &'static str {
    "🗄️ Archive API"
}

pub async fn health_check() -> Json<Value> {
    Json(json!({
        "status": "healthy",
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}

pub async fn api_health_check(State(state): State<AppState>) -> Json<Value> {
    let storage_status = match state.archive_service.ping().await {
        Ok(()) => "connected",
        Err(e) => {
            tracing::warn!("Storage ping failed: {}", e);
            "disconnected"
        }
    };

    Json(json!({
        "status": "healthy",
        "storage": storage_status,
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}
