use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A survey submission that has passed validation. Only lives for one request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SurveySubmission {
    pub email: String,
    pub age: i64,
    pub rating: Option<i64>,
    pub comments: Option<String>,
}

/// One line of the survey log. `email` holds the SHA-256 hex digest, never the raw address.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoredSurveyRecord {
    pub email: String,
    pub age: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comments: Option<String>,
    pub received_at: DateTime<Utc>,
    pub ip: String,
}
