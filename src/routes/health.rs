use axum::{response::IntoResponse, Json};
use serde_json::json;

#[axum::debug_handler]
pub async fn health() -> impl IntoResponse {
    Json(json!({ "status": "ok" }))
}
