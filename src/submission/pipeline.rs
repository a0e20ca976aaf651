use std::net::IpAddr;

use axum::http::HeaderMap;
use chrono::Utc;

use crate::crypto;
use crate::error::AppError;
use crate::models::{StoredSurveyRecord, SurveySubmission};
use crate::state::SharedState;

use super::fields;
use super::metadata;
use super::parser;

/// Parse, validate, hash and persist one survey submission.
///
/// Nothing is written unless every step before the append succeeds.
pub async fn run(
    state: &SharedState,
    headers: &HeaderMap,
    peer_addr: Option<IpAddr>,
    body: &[u8],
) -> Result<StoredSurveyRecord, AppError> {
    let content_type = headers
        .get("content-type")
        .and_then(|v| v.to_str().ok());

    let payload = parser::parse_body(content_type, body).map_err(AppError::InvalidJson)?;

    let submission = fields::validate(&payload).map_err(|errors| {
        tracing::debug!("Rejected submission with {} field error(s)", errors.len());
        AppError::Validation(errors)
    })?;

    let record = to_record(submission, metadata::client_ip(headers, peer_addr));

    state.store.append(&record).await?;

    Ok(record)
}

/// Build the persisted form of a submission. The email is replaced by its digest.
pub fn to_record(submission: SurveySubmission, ip: String) -> StoredSurveyRecord {
    StoredSurveyRecord {
        email: crypto::sha256_hex(&submission.email),
        age: submission.age,
        rating: submission.rating,
        comments: submission.comments,
        received_at: Utc::now(),
        ip,
    }
}
