//! File metadata record returned by the listing, search, and upload endpoints.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::json;
use crate::user::UserDto;

/// Extensions classified as images.
const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "gif", "svg", "webp"];

/// Units used by [`format_bytes`], in 1024 steps.
const SIZE_UNITS: &[&str] = &["Bytes", "KB", "MB", "GB", "TB"];

/// Metadata describing a stored file.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FileMetadata {
    /// File identifier; `None` when the server omitted it.
    pub id: Option<String>,
    /// File name including extension; empty when absent.
    pub filename: String,
    /// MIME type; empty when absent.
    pub content_type: String,
    /// Size of the file as uploaded, in bytes.
    pub original_file_size: u64,
    /// Size as stored by the backend, in bytes.
    pub size: u64,
    /// Backend storage path; empty when absent.
    pub storage_path: String,
    /// Upload time, if the server sent a parseable one.
    pub upload_date: Option<DateTime<Utc>>,
    /// Owner of the file, if embedded.
    pub user_dto: Option<UserDto>,
}

impl FileMetadata {
    /// Build a file record from server JSON, applying field fallbacks.
    pub fn from_api_response(data: &Value) -> Self {
        let user_dto = match data.get("userDto") {
            Some(user) if user.is_object() => Some(UserDto::from_api_response(user)),
            _ => None,
        };

        Self {
            id: json::optional_id(data, "id"),
            filename: json::string_or_default(data, "filename"),
            content_type: json::string_or_default(data, "contentType"),
            original_file_size: json::u64_or_zero(data, "originalFileSize"),
            size: json::u64_or_zero(data, "size"),
            storage_path: json::string_or_default(data, "storagePath"),
            upload_date: json::optional_timestamp(data, "uploadDate"),
            user_dto,
        }
    }

    /// Human-readable original size, e.g. `"1.5 KB"`.
    pub fn formatted_file_size(&self) -> String {
        format_bytes(self.original_file_size, 2)
    }

    /// Upload time formatted as `"Jan 5, 2024, 10:30 AM"` (UTC), or
    /// `"Unknown"` when absent.
    pub fn formatted_upload_date(&self) -> String {
        match self.upload_date {
            Some(date) => date.format("%b %-d, %Y, %I:%M %p").to_string(),
            None => "Unknown".to_string(),
        }
    }

    /// Lower-cased extension after the last dot, or empty if there is none.
    pub fn file_extension(&self) -> String {
        match self.filename.rsplit_once('.') {
            Some((_, ext)) => ext.to_lowercase(),
            None => String::new(),
        }
    }

    /// Whether the extension is a common image format.
    pub fn is_image(&self) -> bool {
        IMAGE_EXTENSIONS.contains(&self.file_extension().as_str())
    }

    /// Whether the content type is PDF.
    pub fn is_pdf(&self) -> bool {
        self.content_type == "application/pdf"
    }

    /// Whether the content type is JSON.
    pub fn is_json(&self) -> bool {
        self.content_type == "application/json"
    }

    /// Whether the content type is any `text/` type.
    pub fn is_text(&self) -> bool {
        self.content_type.starts_with("text/")
    }
}

impl<'de> Deserialize<'de> for FileMetadata {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        Ok(Self::from_api_response(&value))
    }
}

/// Format a byte count with 1024-based units.
///
/// At most `decimals` fractional digits are kept and trailing zeros are
/// dropped, so 1536 bytes is `"1.5 KB"` and 1024 bytes is `"1 KB"`.
pub fn format_bytes(bytes: u64, decimals: usize) -> String {
    if bytes == 0 {
        return "0 Bytes".to_string();
    }

    let mut unit = 0;
    let mut scale: u64 = 1;
    while unit + 1 < SIZE_UNITS.len() && bytes / scale >= 1024 {
        scale *= 1024;
        unit += 1;
    }

    let value = bytes as f64 / scale as f64;
    let rounded: f64 = format!("{value:.decimals$}").parse().unwrap_or(value);
    format!("{rounded} {}", SIZE_UNITS[unit])
}
