//! Multipart uploads with progress reporting and cancellation.
//!
//! An upload bypasses the uniform executor: it carries only the bearer
//! header, streams the file in chunks so progress can be observed, and can
//! be aborted by the caller while in flight.

use std::convert::Infallible;
use std::path::Path;
use std::pin::Pin;
use std::task::{Context, Poll};

use bytes::Bytes;
use futures::{Stream, StreamExt, stream};
use reqwest::multipart::{Form, Part};
use reqwest::{Body, RequestBuilder};
use serde_json::Value;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, warn};

use filehub_core::error::{AppError, ErrorKind};
use filehub_core::result::AppResult;
use filehub_core::types::QueryParams;
use filehub_entity::file::FileMetadata;

use super::progress::{UploadEvent, UploadProgress};
use crate::http::ApiClient;
use crate::http::response;

/// Upload endpoint.
pub const UPLOAD_ENDPOINT: &str = "/api/files";

/// Multipart field carrying the file.
pub const FILE_FIELD: &str = "file";

const UPLOAD_FAILED: &str = "Upload failed";
const NO_TOKEN: &str = "No authentication token available";
const INVALID_RESPONSE: &str = "Invalid response format";
const NETWORK_ERROR: &str = "Network error during upload";
const ABORTED: &str = "Upload was aborted";

/// Body chunk size; one progress event is emitted per chunk.
const CHUNK_SIZE: usize = 64 * 1024;

const DEFAULT_CONTENT_TYPE: &str = "application/octet-stream";

/// A file to upload, held in memory.
#[derive(Debug, Clone)]
pub struct UploadSource {
    /// Name sent with the multipart part.
    pub file_name: String,
    /// MIME type of the part; guessed from the name when absent.
    pub content_type: Option<String>,
    /// File content.
    pub data: Bytes,
}

impl UploadSource {
    /// Create a source from in-memory content.
    pub fn from_bytes(file_name: impl Into<String>, data: impl Into<Bytes>) -> Self {
        Self {
            file_name: file_name.into(),
            content_type: None,
            data: data.into(),
        }
    }

    /// Read a source from disk, guessing its content type from the extension.
    pub async fn from_path(path: &Path) -> AppResult<Self> {
        let file_name = path
            .file_name()
            .and_then(|name| name.to_str())
            .ok_or_else(|| {
                AppError::validation(format!("'{}' has no usable file name", path.display()))
            })?
            .to_string();
        let data = tokio::fs::read(path).await?;
        let content_type = mime_guess::from_path(path).first_raw().map(str::to_string);

        Ok(Self {
            file_name,
            content_type,
            data: Bytes::from(data),
        })
    }

    /// Override the content type of the part.
    pub fn with_content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = Some(content_type.into());
        self
    }

    fn mime(&self) -> String {
        self.content_type
            .clone()
            .or_else(|| mime_guess::from_path(&self.file_name).first_raw().map(str::to_string))
            .unwrap_or_else(|| DEFAULT_CONTENT_TYPE.to_string())
    }

    /// Multipart form whose body reports each chunk as it is handed to the
    /// transport.
    fn into_form(self, events: UnboundedSender<UploadEvent>) -> AppResult<Form> {
        let mime = self.mime();
        let total = self.data.len() as u64;

        let chunks: Vec<Bytes> = (0..self.data.len())
            .step_by(CHUNK_SIZE)
            .map(|start| {
                let end = (start + CHUNK_SIZE).min(self.data.len());
                self.data.slice(start..end)
            })
            .collect();

        let mut loaded = 0u64;
        let body = stream::iter(chunks).map(move |chunk| {
            loaded += chunk.len() as u64;
            let _ = events.send(UploadEvent::Progress(UploadProgress {
                loaded,
                total: Some(total),
            }));
            Ok::<_, Infallible>(chunk)
        });

        let part = Part::stream_with_length(Body::wrap_stream(body), total)
            .file_name(self.file_name)
            .mime_str(&mime)
            .map_err(|e| AppError::validation(format!("Invalid content type '{mime}': {e}")))?;

        Ok(Form::new().part(FILE_FIELD, part))
    }
}

/// Start an upload in the background and return its handle.
///
/// Fails immediately, before any network activity, when the session holds
/// no token. Must be called within a Tokio runtime.
pub fn start(api: &ApiClient, source: UploadSource) -> AppResult<UploadHandle> {
    let token = api.session().bearer_token().ok_or_else(|| {
        warn!("Upload attempted without a token");
        AppError::auth_missing(NO_TOKEN)
    })?;
    let url = api.build_url(UPLOAD_ENDPOINT, &QueryParams::new())?;

    let (tx, rx) = mpsc::unbounded_channel();
    let file_name = source.file_name.clone();
    let size = source.data.len();
    let form = source.into_form(tx.clone())?;
    let request = api.http().post(url).bearer_auth(token).multipart(form);

    let cancel = CancellationToken::new();
    let guard = cancel.clone();

    debug!(file = %file_name, size, "Starting upload");

    tokio::spawn(async move {
        let result = tokio::select! {
            biased;
            _ = guard.cancelled() => Err(AppError::aborted(ABORTED)),
            result = run(request) => result,
        };

        let event = match result {
            Ok(metadata) => {
                info!(file = %file_name, id = ?metadata.id, "Upload completed");
                UploadEvent::Completed(metadata)
            }
            Err(e) => {
                error!(file = %file_name, error = %e, "Upload failed");
                UploadEvent::Failed(e)
            }
        };
        let _ = tx.send(event);
    });

    Ok(UploadHandle {
        events: rx,
        cancel,
        finished: false,
    })
}

async fn run(request: RequestBuilder) -> AppResult<FileMetadata> {
    let response = request
        .send()
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Network, NETWORK_ERROR, e))?;

    let status = response.status();
    if !status.is_success() {
        return Err(response::error_from_response(response, UPLOAD_FAILED).await);
    }

    let body = response
        .bytes()
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Network, NETWORK_ERROR, e))?;
    let value: Value = serde_json::from_slice(&body)
        .map_err(|e| AppError::with_source(ErrorKind::Parse, INVALID_RESPONSE, e))?;

    Ok(FileMetadata::from_api_response(&value))
}

/// A running upload.
///
/// As a [`Stream`] it yields progress events followed by exactly one
/// terminal event, then ends. Dropping the handle before the terminal event
/// aborts the upload.
#[derive(Debug)]
pub struct UploadHandle {
    events: UnboundedReceiver<UploadEvent>,
    cancel: CancellationToken,
    finished: bool,
}

impl UploadHandle {
    /// Abort the upload. The stream then ends with an
    /// [`ErrorKind::Aborted`] failure unless the upload already finished.
    pub fn cancel(&self) {
        self.cancel.cancel();
    }

    /// A token that aborts this upload when cancelled.
    pub fn cancellation_token(&self) -> CancellationToken {
        self.cancel.clone()
    }

    /// Wait for the terminal result, discarding progress.
    pub async fn finish(self) -> AppResult<FileMetadata> {
        self.finish_with(|_| {}).await
    }

    /// Wait for the terminal result, passing each progress event to
    /// `on_progress`.
    pub async fn finish_with<F>(mut self, mut on_progress: F) -> AppResult<FileMetadata>
    where
        F: FnMut(&UploadProgress),
    {
        while let Some(event) = self.next().await {
            match event {
                UploadEvent::Progress(progress) => on_progress(&progress),
                UploadEvent::Completed(metadata) => return Ok(metadata),
                UploadEvent::Failed(e) => return Err(e),
            }
        }
        Err(AppError::internal("Upload ended without a result"))
    }
}

impl Stream for UploadHandle {
    type Item = UploadEvent;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        if self.finished {
            return Poll::Ready(None);
        }

        match self.events.poll_recv(cx) {
            Poll::Ready(Some(event)) => {
                if event.is_terminal() {
                    self.finished = true;
                }
                Poll::Ready(Some(event))
            }
            Poll::Ready(None) => {
                self.finished = true;
                Poll::Ready(None)
            }
            Poll::Pending => Poll::Pending,
        }
    }
}

impl Drop for UploadHandle {
    fn drop(&mut self) {
        if !self.finished {
            self.cancel.cancel();
        }
    }
}
