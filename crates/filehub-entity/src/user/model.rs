//! User record as returned by the account and search endpoints.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::json;

/// A FileHub user as seen by the client.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct UserDto {
    /// User identifier; `None` when the server omitted it.
    pub id: Option<String>,
    /// Login name; empty when absent.
    pub username: String,
    /// Email address; empty when absent.
    pub email: String,
}

impl UserDto {
    /// Build a user record from server JSON, applying field fallbacks.
    pub fn from_api_response(data: &Value) -> Self {
        Self {
            id: json::optional_id(data, "id"),
            username: json::string_or_default(data, "username"),
            email: json::string_or_default(data, "email"),
        }
    }

    /// Name to show for this user: username, then email, then a placeholder.
    pub fn display_name(&self) -> &str {
        if !self.username.is_empty() {
            &self.username
        } else if !self.email.is_empty() {
            &self.email
        } else {
            "Unknown User"
        }
    }
}

impl<'de> Deserialize<'de> for UserDto {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        Ok(Self::from_api_response(&value))
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_defaults_for_missing_fields() {
        let user = UserDto::from_api_response(&json!({}));
        assert_eq!(user.id, None);
        assert_eq!(user.username, "");
        assert_eq!(user.email, "");
        assert_eq!(user.display_name(), "Unknown User");
    }

    #[test]
    fn test_display_name_prefers_username() {
        let user = UserDto::from_api_response(&json!({
            "id": 3, "username": "ana", "email": "ana@example.com"
        }));
        assert_eq!(user.id.as_deref(), Some("3"));
        assert_eq!(user.display_name(), "ana");

        let email_only = UserDto::from_api_response(&json!({ "email": "bo@example.com" }));
        assert_eq!(email_only.display_name(), "bo@example.com");
    }

    #[test]
    fn test_deserialize_is_lenient() {
        let users: Vec<UserDto> =
            serde_json::from_value(json!([{ "username": 5 }, null])).unwrap();
        assert_eq!(users[0].username, "5");
        assert_eq!(users[1], UserDto::default());
    }
}
