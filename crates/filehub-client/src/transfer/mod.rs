//! File transfers that need more than the uniform executor: uploads with
//! progress and cancellation, and downloads that read response headers.

pub mod download;
pub mod progress;
pub mod upload;

pub use download::{DownloadedFile, filename_from_disposition};
pub use progress::{UploadEvent, UploadProgress, progress_percent};
pub use upload::{UploadHandle, UploadSource};
