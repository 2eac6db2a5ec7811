//! Request bodies for file mutations.

use serde::{Deserialize, Serialize};

/// Body of `POST /api/files/{id}/share`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShareRequest {
    /// User to share the file with.
    pub username: String,
    /// Whether the recipient may only read the file.
    pub read_only: bool,
}

/// Body of `PATCH /api/files/{id}/rename`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RenameRequest {
    /// The new file name.
    pub new_file_name: String,
}
