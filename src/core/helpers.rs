use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{Map, Value};
use spin_sdk::http::Response;
use uuid::Uuid;

use crate::core::errors::ApiError;

pub fn now_iso() -> String {
    chrono::Utc::now().to_rfc3339()
}

pub fn new_id() -> String {
    Uuid::new_v4().to_string()
}

pub fn json_response<T: Serialize>(status: u16, body: &T) -> anyhow::Result<Response> {
    Ok(Response::builder()
        .status(status)
        .header("Content-Type", "application/json")
        .body(serde_json::to_vec(body)?)
        .build())
}

pub fn no_content() -> Response {
    Response::builder().status(204).body(Vec::new()).build()
}

/// Percent-decodes a single path segment, e.g. `Old%20Faithful`.
pub fn decode_segment(segment: &str) -> Result<String, ApiError> {
    urlencoding::decode(segment)
        .map(|s| s.into_owned())
        .map_err(|_| ApiError::BadRequest(format!("Invalid path segment: {}", segment)))
}

/// Pulls the wrapper object out of a body like `{"park": {...}}`.
pub fn body_object(body: &[u8], wrapper: &str) -> Result<Map<String, Value>, ApiError> {
    let mut value: Value = serde_json::from_slice(body)
        .map_err(|e| ApiError::BadRequest(format!("Malformed JSON body: {}", e)))?;

    match value.get_mut(wrapper).map(Value::take) {
        Some(Value::Object(map)) => Ok(map),
        _ => Err(ApiError::BadRequest(format!(
            "Request body must contain a `{}` object",
            wrapper
        ))),
    }
}

/// Types the fields of a wrapper object. A field of the wrong JSON type is a
/// validation failure, not a malformed request.
pub fn from_object<T: DeserializeOwned>(map: Map<String, Value>) -> Result<T, ApiError> {
    serde_json::from_value(Value::Object(map))
        .map_err(|e| ApiError::Validation(format!("Cast failed: {}", e)))
}

/// Drops every field whose value is the empty string.
pub fn remove_blanks(map: &mut Map<String, Value>) {
    map.retain(|_, value| value.as_str() != Some(""));
}

/// Rejects a mutation when the document records an owner other than the caller.
///
/// Documents without an owner are open to everyone, and no caller identity
/// is currently threaded through the router, so parks always pass.
pub fn require_ownership(caller: Option<&str>, owner: Option<&str>) -> Result<(), ApiError> {
    match owner {
        None => Ok(()),
        Some(owner) if caller == Some(owner) => Ok(()),
        Some(_) => Err(ApiError::Unauthorized),
    }
}
