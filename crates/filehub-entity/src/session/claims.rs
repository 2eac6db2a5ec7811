//! Claims read from the payload segment of a bearer token.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::user::UserRole;

/// Claims payload of a FileHub bearer token.
///
/// The client never verifies signatures; these claims only drive local
/// decisions (is the session still usable, should admin commands be
/// offered). Every claim is optional.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TokenClaims {
    /// Subject, usually the username or user ID.
    pub sub: Option<String>,
    /// Username, when the issuer embeds one.
    pub username: Option<String>,
    /// Role claim; only `"admin"` is meaningful to the client.
    pub role: Option<String>,
    /// Issued-at timestamp (seconds since epoch).
    pub iat: Option<f64>,
    /// Expiration timestamp (seconds since epoch).
    pub exp: Option<f64>,
}

impl TokenClaims {
    /// Read claims from a decoded payload object. Claims of the wrong type
    /// are treated as absent.
    pub fn from_value(payload: &Value) -> Self {
        let text = |key: &str| payload.get(key).and_then(Value::as_str).map(str::to_string);
        let number = |key: &str| payload.get(key).and_then(Value::as_f64);

        Self {
            sub: text("sub"),
            username: text("username"),
            role: text("role"),
            iat: number("iat"),
            exp: number("exp"),
        }
    }

    /// Whether the token is still valid at `now`: `exp` must be present and
    /// strictly greater than the current time.
    pub fn is_valid_at(&self, now: DateTime<Utc>) -> bool {
        let now_seconds = now.timestamp_millis() as f64 / 1000.0;
        matches!(self.exp, Some(exp) if exp > now_seconds)
    }

    /// Returns the expiration as a `DateTime<Utc>`.
    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        self.exp
            .and_then(|exp| DateTime::from_timestamp_millis((exp * 1000.0) as i64))
    }

    /// Whether the role claim is exactly `"admin"`.
    pub fn is_admin(&self) -> bool {
        self.role().is_admin()
    }

    /// The role claim mapped to a [`UserRole`].
    pub fn role(&self) -> UserRole {
        UserRole::from_claim(self.role.as_deref())
    }
}

#[cfg(test)]
mod tests {
    use chrono::Duration;
    use serde_json::json;

    use super::*;

    #[test]
    fn test_expiry_is_strict() {
        let now = DateTime::from_timestamp(1_700_000_000, 0).unwrap();
        let at = |exp: f64| TokenClaims {
            exp: Some(exp),
            ..Default::default()
        };

        assert!(at(1_700_000_001.0).is_valid_at(now));
        assert!(!at(1_700_000_000.0).is_valid_at(now));
        assert!(!at(1_699_999_999.0).is_valid_at(now));
        assert!(!TokenClaims::default().is_valid_at(now));
        assert!(at(1_700_000_000.5).is_valid_at(now));
        assert!(!at(1_700_000_000.5).is_valid_at(now + Duration::seconds(1)));
    }

    #[test]
    fn test_from_value_ignores_mistyped_claims() {
        let claims = TokenClaims::from_value(&json!({
            "sub": "ana", "role": 1, "exp": "soon", "iat": 10
        }));
        assert_eq!(claims.sub.as_deref(), Some("ana"));
        assert_eq!(claims.role, None);
        assert_eq!(claims.exp, None);
        assert_eq!(claims.iat, Some(10.0));
        assert!(!claims.is_admin());
    }

    #[test]
    fn test_admin_role() {
        let claims = TokenClaims::from_value(&json!({ "role": "admin", "exp": 1 }));
        assert!(claims.is_admin());
        assert_eq!(claims.expires_at(), DateTime::from_timestamp(1, 0));
    }
}
