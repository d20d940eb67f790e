use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde_json::json;

use crate::utils::time;
use crate::AppState;

#[axum::debug_handler]
pub async fn health(State(state): State<AppState>) -> impl IntoResponse {
    let total = match state.store.list_all().await {
        Ok(listing) => listing.records.len(),
        Err(_) => 0,
    };
    let body = json!({
        "status": "healthy",
        "timestamp": time::to_rfc3339(time::now()),
        "data_directory": state.store.data_dir().display().to_string(),
        "total_assessments": total,
        "features": ["response_timing", "cursor_tracking", "detailed_analytics"],
    });
    (StatusCode::OK, Json(body))
}
