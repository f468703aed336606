use axum::response::Json;
use serde_json::json;

/// Health check endpoint handler.
///
/// # Route
/// - **Method**: GET
/// - **Path**: `/ping`
/// - **Response**: `{"status":"pong"}` with 200 OK
///
/// Used by load balancers and liveness probes to verify the server is up.
pub async fn ping() -> Json<serde_json::Value> {
    Json(json!({ "status": "pong" }))
}
