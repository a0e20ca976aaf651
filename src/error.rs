use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use uuid::Uuid;

use crate::submission::fields::FieldError;

pub const INVALID_JSON_DETAIL: &str = "Body must be application/json";

#[derive(Debug)]
pub enum AppError {
    InvalidJson(String),
    Validation(Vec<FieldError>),
    Storage(std::io::Error),
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AppError::InvalidJson(msg) => write!(f, "Invalid JSON: {msg}"),
            AppError::Validation(errors) => {
                write!(f, "Validation failed: {} field error(s)", errors.len())
            }
            AppError::Storage(err) => write!(f, "Storage Error: {err}"),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            AppError::InvalidJson(msg) => {
                tracing::debug!("Rejected body: {msg}");
                (
                    StatusCode::BAD_REQUEST,
                    json!({ "error": "invalid_json", "detail": INVALID_JSON_DETAIL }),
                )
            }
            AppError::Validation(errors) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                json!({ "error": "validation_error", "detail": errors }),
            ),
            AppError::Storage(err) => {
                let error_id = Uuid::now_v7();
                tracing::error!(%error_id, "Failed to persist submission: {err}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({ "error": "storage_error", "error_id": error_id }),
                )
            }
        };

        (status, axum::Json(body)).into_response()
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::Storage(err)
    }
}
