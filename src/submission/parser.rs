use serde_json::Value;

/// Parse a request body as JSON.
///
/// The request must declare `application/json` or a `+json` suffix type; a
/// missing `Content-Type` is rejected. An empty body and a bare `null` are
/// rejected because neither carries a payload.
pub fn parse_body(content_type: Option<&str>, body: &[u8]) -> Result<Value, String> {
    let Some(ct) = content_type else {
        return Err("Missing content type".to_string());
    };
    if !is_json_media_type(ct) {
        return Err(format!("Unsupported content type: {ct}"));
    }

    if body.iter().all(u8::is_ascii_whitespace) {
        return Err("Empty body".to_string());
    }

    match serde_json::from_slice(body) {
        Ok(Value::Null) => Err("Body is null".to_string()),
        Ok(value) => Ok(value),
        Err(e) => Err(format!("Invalid JSON: {e}")),
    }
}

fn is_json_media_type(content_type: &str) -> bool {
    let essence = content_type
        .split(';')
        .next()
        .unwrap_or("")
        .trim()
        .to_ascii_lowercase();
    essence == "application/json" || (essence.starts_with("application/") && essence.ends_with("+json"))
}
