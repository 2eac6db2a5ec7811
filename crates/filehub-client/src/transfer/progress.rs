//! Upload progress events.

use filehub_core::error::AppError;
use filehub_entity::file::FileMetadata;

/// Bytes handed to the transport so far.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UploadProgress {
    /// Bytes sent so far.
    pub loaded: u64,
    /// Total bytes, when the transfer length is known.
    pub total: Option<u64>,
}

impl UploadProgress {
    /// Percent complete, only when the total is known.
    pub fn percent(&self) -> Option<f64> {
        progress_percent(self.loaded, self.total?)
    }
}

/// `loaded / total * 100`, or `None` for an empty transfer.
pub fn progress_percent(loaded: u64, total: u64) -> Option<f64> {
    if total == 0 {
        return None;
    }
    Some(loaded as f64 / total as f64 * 100.0)
}

/// One event of an upload's lifecycle.
///
/// Zero or more `Progress` events are followed by exactly one terminal
/// `Completed` or `Failed` event.
#[derive(Debug, Clone)]
pub enum UploadEvent {
    /// More of the body has been handed to the transport.
    Progress(UploadProgress),
    /// The server accepted the file.
    Completed(FileMetadata),
    /// The upload failed, was rejected, or was aborted.
    Failed(AppError),
}

impl UploadEvent {
    /// Whether this event ends the upload.
    pub fn is_terminal(&self) -> bool {
        !matches!(self, Self::Progress(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_percent() {
        assert_eq!(progress_percent(50, 200), Some(25.0));
        assert_eq!(progress_percent(200, 200), Some(100.0));
        assert_eq!(progress_percent(0, 0), None);
    }

    #[test]
    fn test_percent_requires_known_total() {
        let known = UploadProgress {
            loaded: 50,
            total: Some(200),
        };
        let unknown = UploadProgress {
            loaded: 50,
            total: None,
        };
        assert_eq!(known.percent(), Some(25.0));
        assert_eq!(unknown.percent(), None);
    }

    #[test]
    fn test_terminal_events() {
        let progress = UploadEvent::Progress(UploadProgress {
            loaded: 1,
            total: None,
        });
        assert!(!progress.is_terminal());
        assert!(UploadEvent::Completed(FileMetadata::default()).is_terminal());
        assert!(UploadEvent::Failed(AppError::aborted("x")).is_terminal());
    }
}
