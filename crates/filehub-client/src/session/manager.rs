//! Session holding the current bearer token.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use tracing::{debug, warn};

use filehub_core::traits::KeyValueStore;
use filehub_entity::session::TokenClaims;

use super::decoder::decode_claims;
use crate::storage::MemoryStore;

/// Durable-store key of the bearer token.
pub const TOKEN_KEY: &str = "jwt_token";

/// Session-scoped key of the admin view preference, cleared at logout.
pub const ADMIN_VIEW_MODE_KEY: &str = "adminViewMode";

/// The client's authentication session.
///
/// The in-memory token is the source of truth once loaded; the durable
/// store is a cache written through on every change. Storage failures are
/// logged and never surfaced: they degrade to an unauthenticated session.
pub struct Session {
    token: RwLock<Option<String>>,
    /// Survives restarts.
    durable: Arc<dyn KeyValueStore>,
    /// Lives as long as the process.
    scoped: Arc<dyn KeyValueStore>,
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("has_token", &self.token.read().is_some())
            .field("durable", &self.durable)
            .finish()
    }
}

impl Session {
    /// Create an empty session over the given stores.
    pub fn new(durable: Arc<dyn KeyValueStore>, scoped: Arc<dyn KeyValueStore>) -> Self {
        Self {
            token: RwLock::new(None),
            durable,
            scoped,
        }
    }

    /// Create an empty session whose stores live only in memory.
    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemoryStore::new()), Arc::new(MemoryStore::new()))
    }

    /// Replace the in-memory token with the persisted one, if any.
    ///
    /// An empty or unreadable store leaves the session without a token.
    pub fn load(&self) {
        let saved = match self.durable.get(TOKEN_KEY) {
            Ok(saved) => saved,
            Err(e) => {
                warn!(error = %e, "Failed to read persisted token, starting unauthenticated");
                None
            }
        };
        debug!(found = saved.is_some(), "Loaded persisted token");
        *self.token.write() = saved;
    }

    /// Store a new token in memory and persist it.
    pub fn set(&self, token: impl Into<String>) {
        let token = token.into();
        if let Err(e) = self.durable.set(TOKEN_KEY, &token) {
            warn!(error = %e, "Failed to persist token");
        }
        *self.token.write() = Some(token);
    }

    /// Clear the token from memory and storage, along with session-scoped
    /// preferences.
    pub fn remove(&self) {
        *self.token.write() = None;
        if let Err(e) = self.durable.remove(TOKEN_KEY) {
            warn!(error = %e, "Failed to remove persisted token");
        }
        if let Err(e) = self.scoped.remove(ADMIN_VIEW_MODE_KEY) {
            warn!(error = %e, "Failed to clear admin view mode");
        }
    }

    /// The raw token to attach as a bearer credential. Expiry is not checked.
    pub fn bearer_token(&self) -> Option<String> {
        self.token
            .read()
            .as_ref()
            .filter(|token| !token.is_empty())
            .cloned()
    }

    /// Decoded claims of the current token, if it decodes.
    pub fn claims(&self) -> Option<TokenClaims> {
        self.bearer_token().as_deref().and_then(decode_claims)
    }

    /// Whether the current token decodes and has not expired.
    ///
    /// Evaluated against the wall clock on every call.
    pub fn is_authenticated(&self) -> bool {
        self.is_authenticated_at(Utc::now())
    }

    /// Whether the current token decodes and expires strictly after `now`.
    pub fn is_authenticated_at(&self, now: DateTime<Utc>) -> bool {
        self.claims().is_some_and(|claims| claims.is_valid_at(now))
    }

    /// Whether the current token carries the `admin` role claim.
    pub fn is_admin(&self) -> bool {
        self.claims().is_some_and(|claims| claims.is_admin())
    }

    /// Remember whether the admin views should be shown for this session.
    pub fn set_admin_view_mode(&self, enabled: bool) {
        let value = if enabled { "true" } else { "false" };
        if let Err(e) = self.scoped.set(ADMIN_VIEW_MODE_KEY, value) {
            warn!(error = %e, "Failed to store admin view mode");
        }
    }

    /// The admin view preference; off unless explicitly enabled.
    pub fn admin_view_mode(&self) -> bool {
        matches!(self.scoped.get(ADMIN_VIEW_MODE_KEY), Ok(Some(v)) if v == "true")
    }
}

#[cfg(test)]
mod tests {
    use base64::Engine;
    use base64::engine::general_purpose::URL_SAFE_NO_PAD;
    use chrono::Duration;
    use serde_json::json;

    use super::*;

    fn token(claims: serde_json::Value) -> String {
        let payload = URL_SAFE_NO_PAD.encode(serde_json::to_vec(&claims).unwrap());
        format!("eyJhbGciOiJIUzI1NiJ9.{payload}.c2ln")
    }

    fn token_expiring_in(offset: Duration, role: &str) -> String {
        let exp = (Utc::now() + offset).timestamp();
        token(json!({ "sub": "ana", "role": role, "exp": exp }))
    }

    #[test]
    fn test_empty_session_is_unauthenticated() {
        let session = Session::in_memory();
        assert!(!session.is_authenticated());
        assert!(!session.is_admin());
        assert!(session.bearer_token().is_none());
    }

    #[test]
    fn test_future_expiry_is_authenticated() {
        let session = Session::in_memory();
        session.set(token_expiring_in(Duration::hours(1), "user"));
        assert!(session.is_authenticated());
        assert!(!session.is_admin());
    }

    #[test]
    fn test_past_or_equal_expiry_is_not_authenticated() {
        let session = Session::in_memory();
        session.set(token_expiring_in(-Duration::seconds(1), "admin"));
        assert!(!session.is_authenticated());
        assert!(session.is_admin());

        let now = DateTime::from_timestamp(1_700_000_000, 0).unwrap();
        session.set(token(json!({ "exp": 1_700_000_000 })));
        assert!(!session.is_authenticated_at(now));
        assert!(session.is_authenticated_at(now - Duration::milliseconds(1)));
    }

    #[test]
    fn test_expiry_is_rechecked_on_every_call() {
        let session = Session::in_memory();
        session.set(token(json!({ "exp": 1_700_000_000 })));
        let before = DateTime::from_timestamp(1_699_999_990, 0).unwrap();
        let after = DateTime::from_timestamp(1_700_000_010, 0).unwrap();
        assert!(session.is_authenticated_at(before));
        assert!(!session.is_authenticated_at(after));
    }

    #[test]
    fn test_malformed_tokens_degrade_silently() {
        let session = Session::in_memory();
        for bad in ["garbage", "a.b", "a.%%%.c", "a.b.c.d"] {
            session.set(bad);
            assert!(!session.is_authenticated(), "{bad}");
            assert!(!session.is_admin(), "{bad}");
            assert_eq!(session.bearer_token().as_deref(), Some(bad));
        }
    }

    #[test]
    fn test_remove_clears_everything() {
        let durable = Arc::new(MemoryStore::new());
        let scoped = Arc::new(MemoryStore::new());
        let session = Session::new(durable.clone(), scoped.clone());

        session.set(token_expiring_in(Duration::hours(1), "admin"));
        session.set_admin_view_mode(true);
        assert!(session.admin_view_mode());

        session.remove();
        assert!(!session.is_authenticated());
        assert!(!session.admin_view_mode());
        assert!(durable.is_empty());
        assert!(scoped.is_empty());
    }

    #[test]
    fn test_load_restores_persisted_token() {
        let durable = Arc::new(MemoryStore::new());
        let token = token_expiring_in(Duration::hours(1), "user");
        durable.set(TOKEN_KEY, &token).unwrap();

        let session = Session::new(durable, Arc::new(MemoryStore::new()));
        assert!(!session.is_authenticated());
        session.load();
        assert!(session.is_authenticated());
        assert_eq!(session.bearer_token(), Some(token));
    }

    #[test]
    fn test_load_overwrites_memory_with_empty_store() {
        let session = Session::in_memory();
        session.set("a.b.c");
        session.durable.remove(TOKEN_KEY).unwrap();
        session.load();
        assert!(session.bearer_token().is_none());
    }
}
