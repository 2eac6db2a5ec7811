//! Login and registration payloads.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Credentials sent to the login and register endpoints.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthRequest {
    /// Login name.
    pub username: String,
    /// Plain-text password, sent over the transport as-is.
    pub password: String,
    /// Email address, used on registration.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

impl AuthRequest {
    /// Create credentials without an email address.
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
            email: None,
        }
    }

    /// Attach an email address.
    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    /// The body sent to the login endpoint: username and password only.
    pub fn login_body(&self) -> Value {
        serde_json::json!({
            "username": self.username,
            "password": self.password,
        })
    }
}

/// Response of the login and register endpoints.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct JwtResponse {
    /// Bearer token, when the server issued one.
    #[serde(default)]
    pub token: Option<String>,
    /// Any other fields the server returned.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_login_body_omits_email() {
        let request = AuthRequest::new("ana", "pw").with_email("ana@example.com");
        assert_eq!(request.login_body(), json!({ "username": "ana", "password": "pw" }));

        let register = serde_json::to_value(&request).unwrap();
        assert_eq!(register["email"], "ana@example.com");
    }

    #[test]
    fn test_jwt_response_keeps_extra_fields() {
        let response: JwtResponse =
            serde_json::from_value(json!({ "token": "a.b.c", "type": "Bearer" })).unwrap();
        assert_eq!(response.token.as_deref(), Some("a.b.c"));
        assert_eq!(response.extra["type"], "Bearer");

        let empty: JwtResponse = serde_json::from_value(json!({})).unwrap();
        assert!(empty.token.is_none());
    }
}
