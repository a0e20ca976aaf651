use axum::body::Bytes;
use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::response::IntoResponse;
use axum::Json;
use serde_json::json;

use crate::error::AppError;
use crate::extractor::PeerAddr;
use crate::state::SharedState;
use crate::submission::pipeline;

/// POST /v1/survey
pub async fn submit(
    State(state): State<SharedState>,
    PeerAddr(peer_addr): PeerAddr,
    headers: HeaderMap,
    body: Bytes,
) -> Result<impl IntoResponse, AppError> {
    let record = pipeline::run(&state, &headers, peer_addr, &body).await?;

    tracing::info!(received_at = %record.received_at, "Survey submission stored");

    Ok((StatusCode::CREATED, Json(json!({ "status": "ok" }))))
}
