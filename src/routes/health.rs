use axum::Json;
use chrono::Utc;
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct PingResponse {
    pub status: &'static str,
    pub message: &'static str,
    pub utc_time: String,
}

/// GET /ping
pub async fn ping() -> Json<PingResponse> {
    Json(PingResponse {
        status: "ok",
        message: "API is alive",
        utc_time: Utc::now().to_rfc3339(),
    })
}
