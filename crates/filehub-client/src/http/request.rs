//! Per-call request descriptions.

use reqwest::Method;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use serde::Serialize;
use serde_json::Value;

use filehub_core::error::AppError;
use filehub_core::result::AppResult;
use filehub_core::types::QueryParams;

/// Everything needed to issue one call through the executor.
#[derive(Debug, Clone)]
pub struct RequestDescriptor {
    /// Endpoint path appended to the base origin, e.g. `/api/files`.
    pub endpoint: String,
    /// HTTP verb.
    pub method: Method,
    /// JSON body, if any.
    pub body: Option<Value>,
    /// Query parameters; `null` entries are dropped.
    pub params: QueryParams,
    /// Caller headers; these override the executor's defaults.
    pub headers: HeaderMap,
}

impl RequestDescriptor {
    /// Describe a call with no body, parameters, or extra headers.
    pub fn new(method: Method, endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            method,
            body: None,
            params: QueryParams::new(),
            headers: HeaderMap::new(),
        }
    }

    /// Describe a `GET` call.
    pub fn get(endpoint: impl Into<String>) -> Self {
        Self::new(Method::GET, endpoint)
    }

    /// Describe a `POST` call.
    pub fn post(endpoint: impl Into<String>) -> Self {
        Self::new(Method::POST, endpoint)
    }

    /// Describe a `PATCH` call.
    pub fn patch(endpoint: impl Into<String>) -> Self {
        Self::new(Method::PATCH, endpoint)
    }

    /// Describe a `DELETE` call.
    pub fn delete(endpoint: impl Into<String>) -> Self {
        Self::new(Method::DELETE, endpoint)
    }

    /// Attach a JSON body.
    pub fn json<B: Serialize + ?Sized>(mut self, body: &B) -> AppResult<Self> {
        self.body = Some(serde_json::to_value(body)?);
        Ok(self)
    }

    /// Attach query parameters, replacing any previous ones.
    pub fn params(mut self, params: QueryParams) -> Self {
        self.params = params;
        self
    }

    /// Attach a caller header.
    pub fn header(mut self, name: &str, value: &str) -> AppResult<Self> {
        let name = HeaderName::from_bytes(name.as_bytes())
            .map_err(|e| AppError::validation(format!("Invalid header name '{name}': {e}")))?;
        let value = HeaderValue::from_str(value)
            .map_err(|e| AppError::validation(format!("Invalid header value: {e}")))?;
        self.headers.insert(name, value);
        Ok(self)
    }
}
