//! Downloaded file artifacts.

use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use bytes::Bytes;
use regex::Regex;
use tracing::info;

use filehub_core::result::AppResult;

/// Name used when the server does not suggest one.
pub const FALLBACK_FILENAME: &str = "download";

/// `filename[^;=\n]*=((['"]).*?\2|[^;\n]*)`, with the back-reference to the
/// opening quote spelled out as one alternative per quote character.
static FILENAME_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"filename[^;=\n]*=("(?:.*?)"|'(?:.*?)'|[^;\n]*)"#)
        .expect("filename pattern is a valid regex")
});

/// A file retrieved from the server, held in memory.
#[derive(Debug, Clone)]
pub struct DownloadedFile {
    /// Suggested file name.
    pub filename: String,
    /// Content type reported by the server.
    pub content_type: Option<String>,
    /// File content.
    pub bytes: Bytes,
}

impl DownloadedFile {
    /// Size of the content in bytes.
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// Whether the content is empty.
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Write the artifact into `dir` under its suggested name and return the
    /// written path. Only the final component of the name is used.
    pub async fn save_into(&self, dir: &Path) -> AppResult<PathBuf> {
        let name = Path::new(&self.filename)
            .file_name()
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(FALLBACK_FILENAME));
        let target = dir.join(name);

        tokio::fs::create_dir_all(dir).await?;
        tokio::fs::write(&target, &self.bytes).await?;

        info!(path = %target.display(), bytes = self.bytes.len(), "Saved download");
        Ok(target)
    }
}

/// Extract the suggested file name from a `Content-Disposition` value.
///
/// Quote characters are stripped from the match. Falls back to
/// [`FALLBACK_FILENAME`] when the header is absent or yields nothing.
pub fn filename_from_disposition(header: Option<&str>) -> String {
    header
        .and_then(|value| FILENAME_PATTERN.captures(value))
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().replace(['"', '\''], ""))
        .filter(|name| !name.is_empty())
        .unwrap_or_else(|| FALLBACK_FILENAME.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quoted_filename() {
        assert_eq!(
            filename_from_disposition(Some(r#"attachment; filename="report 2024.pdf""#)),
            "report 2024.pdf"
        );
        assert_eq!(
            filename_from_disposition(Some("attachment; filename='notes.txt'; size=3")),
            "notes.txt"
        );
    }

    #[test]
    fn test_unquoted_filename_stops_at_semicolon() {
        assert_eq!(
            filename_from_disposition(Some("attachment; filename=data.csv; size=10")),
            "data.csv"
        );
    }

    #[test]
    fn test_first_filename_parameter_wins() {
        assert_eq!(
            filename_from_disposition(Some(
                r#"attachment; filename="a.txt"; filename*=UTF-8''b.txt"#
            )),
            "a.txt"
        );
    }

    #[test]
    fn test_pattern_compiles() {
        assert!(FILENAME_PATTERN.is_match("attachment; filename=a.txt"));
        assert!(!FILENAME_PATTERN.is_match("inline"));
    }

    #[test]
    fn test_fallback() {
        assert_eq!(filename_from_disposition(None), "download");
        assert_eq!(filename_from_disposition(Some("inline")), "download");
        assert_eq!(filename_from_disposition(Some("attachment; filename=")), "download");
    }

    #[tokio::test]
    async fn test_save_into_strips_directories() {
        let dir = tempfile::tempdir().unwrap();
        let file = DownloadedFile {
            filename: "../../etc/passwd".to_string(),
            content_type: None,
            bytes: Bytes::from_static(b"x"),
        };

        let path = file.save_into(dir.path()).await.unwrap();
        assert_eq!(path, dir.path().join("passwd"));
        assert_eq!(std::fs::read(&path).unwrap(), b"x");
    }
}
