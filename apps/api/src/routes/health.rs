use axum::Json;
use serde_json::{json, Value};

/// GET /
/// Returns a simple status object so the editor can probe availability.
pub async fn health_handler() -> Json<Value> {
    Json(json!({
        "message": "Resume Editor API is running!",
        "status": "healthy"
    }))
}
