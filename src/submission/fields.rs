use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;
use serde_json::{Map, Value};

use crate::models::SurveySubmission;

pub const MIN_AGE: i64 = 13;
pub const MAX_AGE: i64 = 120;
pub const MIN_RATING: i64 = 1;
pub const MAX_RATING: i64 = 5;
pub const MAX_COMMENTS_CHARS: usize = 1000;
const MAX_EMAIL_LEN: usize = 254;

static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^[A-Za-z0-9.!#$%&'*+/=?^_`{|}~-]+@[A-Za-z0-9](?:[A-Za-z0-9-]{0,61}[A-Za-z0-9])?(?:\.[A-Za-z0-9](?:[A-Za-z0-9-]{0,61}[A-Za-z0-9])?)+$",
    )
    .unwrap()
});

/// A single validation failure, serialized as `{"loc": [...], "type": ..., "msg": ...}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub loc: Vec<String>,
    #[serde(rename = "type")]
    pub kind: String,
    pub msg: String,
}

impl FieldError {
    fn new(field: &str, kind: &str, msg: impl Into<String>) -> Self {
        let loc = if field.is_empty() {
            Vec::new()
        } else {
            vec![field.to_string()]
        };
        Self {
            loc,
            kind: kind.to_string(),
            msg: msg.into(),
        }
    }
}

/// Validate a parsed JSON payload into a [`SurveySubmission`].
///
/// Every field is checked, in declaration order, and all failures are
/// returned together. Keys the survey does not define are ignored.
pub fn validate(payload: &Value) -> Result<SurveySubmission, Vec<FieldError>> {
    let Some(obj) = payload.as_object() else {
        return Err(vec![FieldError::new(
            "",
            "model_type",
            "Input should be an object",
        )]);
    };

    let mut errors = Vec::new();

    let email = required(obj, "email", &mut errors)
        .and_then(|v| string_field("email", v, &mut errors))
        .and_then(|s| check_email(s, &mut errors));

    let age = required(obj, "age", &mut errors)
        .and_then(|v| int_field("age", v, &mut errors))
        .and_then(|n| check_range("age", n, MIN_AGE, MAX_AGE, &mut errors));

    let rating = match optional(obj, "rating") {
        Some(v) => int_field("rating", v, &mut errors)
            .and_then(|n| check_range("rating", n, MIN_RATING, MAX_RATING, &mut errors)),
        None => None,
    };

    let comments = match optional(obj, "comments") {
        Some(v) => string_field("comments", v, &mut errors)
            .and_then(|s| check_length("comments", s, MAX_COMMENTS_CHARS, &mut errors)),
        None => None,
    };

    let (Some(email), Some(age)) = (email, age) else {
        return Err(errors);
    };
    if !errors.is_empty() {
        return Err(errors);
    }

    Ok(SurveySubmission {
        email: email.to_string(),
        age,
        rating,
        comments: comments.map(str::to_string),
    })
}

fn required<'a>(
    obj: &'a Map<String, Value>,
    field: &str,
    errors: &mut Vec<FieldError>,
) -> Option<&'a Value> {
    let value = obj.get(field);
    if value.is_none() {
        errors.push(FieldError::new(field, "missing", "Field required"));
    }
    value
}

/// Optional fields treat an explicit `null` the same as absence.
fn optional<'a>(obj: &'a Map<String, Value>, field: &str) -> Option<&'a Value> {
    obj.get(field).filter(|v| !v.is_null())
}

fn string_field<'a>(field: &str, value: &'a Value, errors: &mut Vec<FieldError>) -> Option<&'a str> {
    let s = value.as_str();
    if s.is_none() {
        errors.push(FieldError::new(
            field,
            "string_type",
            "Input should be a valid string",
        ));
    }
    s
}

/// Only JSON integers pass. Whole-number floats and numeric strings are not coerced.
fn int_field(field: &str, value: &Value, errors: &mut Vec<FieldError>) -> Option<i64> {
    let n = value.as_i64();
    if n.is_none() {
        errors.push(FieldError::new(
            field,
            "int_type",
            "Input should be a valid integer",
        ));
    }
    n
}

fn check_range(
    field: &str,
    n: i64,
    min: i64,
    max: i64,
    errors: &mut Vec<FieldError>,
) -> Option<i64> {
    if n < min {
        errors.push(FieldError::new(
            field,
            "greater_than_equal",
            format!("Input should be greater than or equal to {min}"),
        ));
        None
    } else if n > max {
        errors.push(FieldError::new(
            field,
            "less_than_equal",
            format!("Input should be less than or equal to {max}"),
        ));
        None
    } else {
        Some(n)
    }
}

fn check_length<'a>(
    field: &str,
    s: &'a str,
    max: usize,
    errors: &mut Vec<FieldError>,
) -> Option<&'a str> {
    if s.chars().count() > max {
        errors.push(FieldError::new(
            field,
            "string_too_long",
            format!("String should have at most {max} characters"),
        ));
        None
    } else {
        Some(s)
    }
}

fn check_email<'a>(s: &'a str, errors: &mut Vec<FieldError>) -> Option<&'a str> {
    if s.len() <= MAX_EMAIL_LEN && EMAIL_RE.is_match(s) {
        Some(s)
    } else {
        errors.push(FieldError::new(
            "email",
            "value_error",
            "value is not a valid email address",
        ));
        None
    }
}
