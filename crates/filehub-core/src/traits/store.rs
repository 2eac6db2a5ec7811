//! Key/value store trait for persisted client state.

use crate::result::AppResult;

/// Trait for string key/value backends holding client-side state.
///
/// The durable backend keeps the bearer token across process restarts;
/// a process-scoped backend holds transient UI preference flags. Backends
/// are local, so the operations are synchronous.
pub trait KeyValueStore: Send + Sync + std::fmt::Debug + 'static {
    /// Get a value by key. Returns `None` if the key is not present.
    fn get(&self, key: &str) -> AppResult<Option<String>>;

    /// Set a value, overwriting any previous one.
    fn set(&self, key: &str, value: &str) -> AppResult<()>;

    /// Remove a key. Removing an absent key is not an error.
    fn remove(&self, key: &str) -> AppResult<()>;
}
