//! Response normalization and error message extraction.

use bytes::Bytes;
use reqwest::header::CONTENT_TYPE;
use reqwest::{Response, StatusCode};
use serde_json::Value;

use filehub_core::error::{AppError, ErrorKind};
use filehub_core::result::AppResult;

/// Fallback prefix for failed executor calls.
pub const REQUEST_FAILED: &str = "Request failed";

/// A normalized successful response.
#[derive(Debug, Clone, PartialEq)]
pub enum Payload {
    /// The server answered `204 No Content`.
    NoContent,
    /// A JSON body.
    Json(Value),
    /// A `text/*` body.
    Text(String),
    /// Any other body, as raw bytes.
    Binary(Bytes),
}

impl Payload {
    /// Whether this is the explicit no-content result.
    pub fn is_no_content(&self) -> bool {
        matches!(self, Self::NoContent)
    }

    /// Borrow the JSON value, if this is a JSON payload.
    pub fn as_json(&self) -> Option<&Value> {
        match self {
            Self::Json(value) => Some(value),
            _ => None,
        }
    }

    /// Convert into a JSON value for callers that expect one.
    ///
    /// No content becomes `null`; text is parsed as JSON when possible and
    /// kept as a JSON string otherwise. Binary bodies are a parse error.
    pub fn into_json(self) -> AppResult<Value> {
        match self {
            Self::NoContent => Ok(Value::Null),
            Self::Json(value) => Ok(value),
            Self::Text(text) => Ok(serde_json::from_str(&text).unwrap_or(Value::String(text))),
            Self::Binary(bytes) => Err(AppError::parse(format!(
                "Expected a JSON response, got {} bytes of binary data",
                bytes.len()
            ))),
        }
    }
}

/// Turn a successful response into a [`Payload`] based on its status and
/// content type.
pub async fn normalize(response: Response) -> AppResult<Payload> {
    if response.status() == StatusCode::NO_CONTENT {
        return Ok(Payload::NoContent);
    }

    let content_type = response
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string();

    if content_type.contains("application/json") {
        let body = response.bytes().await?;
        let value = serde_json::from_slice(&body).map_err(|e| {
            AppError::with_source(ErrorKind::Parse, format!("Malformed JSON response: {e}"), e)
        })?;
        return Ok(Payload::Json(value));
    }

    if content_type.contains("text/") {
        return Ok(Payload::Text(response.text().await?));
    }

    Ok(Payload::Binary(response.bytes().await?))
}

/// Build the normalized error for a non-2xx response, consuming its body.
pub async fn error_from_response(response: Response, prefix: &str) -> AppError {
    let status = response.status().as_u16();
    let body = response.text().await.unwrap_or_default();
    AppError::http(status, error_message(&body, &format!("{prefix}: {status}")))
}

/// Extract a human-readable message from an error body.
///
/// A JSON body yields its non-empty string `message` field, or `fallback`
/// when there is none. A literal `null` and any other non-empty body are
/// used verbatim.
pub fn error_message(body: &str, fallback: &str) -> String {
    match serde_json::from_str::<Value>(body) {
        Ok(Value::Null) => body.to_string(),
        Ok(json) => json
            .get("message")
            .and_then(Value::as_str)
            .filter(|m| !m.is_empty())
            .unwrap_or(fallback)
            .to_string(),
        Err(_) if !body.is_empty() => body.to_string(),
        Err(_) => fallback.to_string(),
    }
}
