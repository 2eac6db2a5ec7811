//! Persisted session configuration.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Where the durable client state (the bearer token) is kept.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Path of the JSON file backing the durable key/value store.
    #[serde(default = "default_token_file")]
    pub token_file: PathBuf,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            token_file: default_token_file(),
        }
    }
}

fn default_token_file() -> PathBuf {
    directories::ProjectDirs::from("io", "filehub", "filehub")
        .map(|dirs| dirs.data_dir().join("session.json"))
        .unwrap_or_else(|| PathBuf::from(".filehub").join("session.json"))
}
