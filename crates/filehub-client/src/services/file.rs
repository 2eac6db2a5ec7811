//! File listing, search, transfer, and mutation endpoints.

use reqwest::header::{CONTENT_DISPOSITION, CONTENT_TYPE};
use serde_json::Value;
use tracing::{debug, info};

use filehub_core::error::AppError;
use filehub_core::result::AppResult;
use filehub_core::types::{PageQuery, QueryParams};
use filehub_entity::file::FileMetadata;
use filehub_entity::share::{RenameRequest, ShareRequest};

use crate::http::{ApiClient, Payload, RequestDescriptor};
use crate::transfer::{self, DownloadedFile, UploadHandle, UploadSource};

/// Number of recent files fetched when the caller does not say.
pub const DEFAULT_RECENT_LIMIT: u32 = 4;

/// File endpoints.
#[derive(Debug, Clone)]
pub struct FileClient {
    api: ApiClient,
}

impl FileClient {
    /// Creates a new file client.
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    /// The most recently uploaded files, four by default.
    pub async fn recent_files(&self, limit: Option<u32>) -> AppResult<Vec<FileMetadata>> {
        let limit = limit.unwrap_or(DEFAULT_RECENT_LIMIT);
        let request = RequestDescriptor::get("/api/files/recent")
            .params(QueryParams::new().insert("limit", limit));

        match self.api.execute(request).await?.into_json()? {
            Value::Array(items) => Ok(items.iter().map(FileMetadata::from_api_response).collect()),
            other => Err(AppError::parse(format!(
                "Expected a list of recent files, got {other}"
            ))),
        }
    }

    /// One page of the signed-in user's files. The envelope is returned as
    /// sent by the server.
    pub async fn paginated_files(&self, page: u64, size: u64) -> AppResult<Value> {
        let request = RequestDescriptor::get("/api/files/paginated")
            .params(PageQuery::new(page, size).to_params());
        self.api.execute(request).await?.into_json()
    }

    /// Search the signed-in user's files.
    pub async fn search_files(&self, query: &PageQuery) -> AppResult<Value> {
        let request =
            RequestDescriptor::get("/api/files/paginated-search").params(query.to_params());
        self.api.execute(request).await?.into_json()
    }

    /// Search files other users shared with the signed-in user.
    pub async fn search_shared_files(&self, query: &PageQuery) -> AppResult<Value> {
        let request = RequestDescriptor::get("/api/files/paginated-search-shared")
            .params(query.to_params());
        self.api.execute(request).await?.into_json()
    }

    /// Start uploading a file. See [`UploadHandle`] for progress and
    /// cancellation.
    pub fn upload(&self, source: UploadSource) -> AppResult<UploadHandle> {
        transfer::upload::start(&self.api, source)
    }

    /// Download a file's content along with its suggested name.
    pub async fn download(&self, file_id: &str) -> AppResult<DownloadedFile> {
        let response = self
            .api
            .send(RequestDescriptor::get(format!("/api/files/{file_id}/download")))
            .await?;

        let headers = response.headers();
        let filename = transfer::filename_from_disposition(
            headers
                .get(CONTENT_DISPOSITION)
                .and_then(|v| v.to_str().ok()),
        );
        let content_type = headers
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);

        let bytes = response.bytes().await?;
        debug!(file_id, filename = %filename, bytes = bytes.len(), "Downloaded file");

        Ok(DownloadedFile {
            filename,
            content_type,
            bytes,
        })
    }

    /// Delete a file.
    pub async fn delete_file(&self, file_id: &str) -> AppResult<Payload> {
        let payload = self
            .api
            .execute(RequestDescriptor::delete(format!("/api/files/{file_id}")))
            .await?;
        info!(file_id, "Deleted file");
        Ok(payload)
    }

    /// Rename a file.
    pub async fn rename_file(&self, file_id: &str, new_name: &str) -> AppResult<Payload> {
        let body = RenameRequest {
            new_file_name: new_name.to_string(),
        };
        let request =
            RequestDescriptor::patch(format!("/api/files/{file_id}/rename")).json(&body)?;
        self.api.execute(request).await
    }

    /// Share a file with another user, read-only by default.
    ///
    /// Returns `None` when the server answers with no content.
    pub async fn share_file(
        &self,
        file_id: &str,
        username: &str,
        read_only: Option<bool>,
    ) -> AppResult<Option<Value>> {
        let body = ShareRequest {
            username: username.to_string(),
            read_only: read_only.unwrap_or(true),
        };
        let request =
            RequestDescriptor::post(format!("/api/files/{file_id}/share")).json(&body)?;

        match self.api.execute(request).await? {
            Payload::NoContent => Ok(None),
            payload => payload.into_json().map(Some),
        }
    }
}
