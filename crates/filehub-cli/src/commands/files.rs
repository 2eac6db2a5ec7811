//! File CLI commands.

use std::io::Write;
use std::path::PathBuf;

use clap::{Args, Subcommand};
use tracing::{debug, info};

use crate::output::{self, FileRow, OutputFormat};
use filehub_client::{FileHubClient, UploadSource};
use filehub_core::error::AppError;
use filehub_core::types::PageQuery;
use filehub_core::types::pagination::{DEFAULT_PAGE, DEFAULT_PAGE_SIZE};
use filehub_entity::file::FileMetadata;

/// Arguments for file commands
#[derive(Debug, Args)]
pub struct FilesArgs {
    /// File subcommand
    #[command(subcommand)]
    pub command: FilesCommand,
}

/// Paging options shared by listing commands
#[derive(Debug, Args)]
pub struct PageArgs {
    /// Page number
    #[arg(long, default_value_t = DEFAULT_PAGE)]
    pub page: u64,
    /// Page size
    #[arg(long, default_value_t = DEFAULT_PAGE_SIZE)]
    pub size: u64,
}

/// File subcommands
#[derive(Debug, Subcommand)]
pub enum FilesCommand {
    /// Most recently uploaded files
    Recent {
        /// Number of files
        #[arg(short, long)]
        limit: Option<u32>,
    },
    /// List your files page by page
    List {
        #[command(flatten)]
        page: PageArgs,
    },
    /// Search your files
    Search {
        /// Search keyword
        keyword: Option<String>,
        #[command(flatten)]
        page: PageArgs,
    },
    /// Search files shared with you
    Shared {
        /// Search keyword
        keyword: Option<String>,
        #[command(flatten)]
        page: PageArgs,
    },
    /// Upload a file
    Upload {
        /// Local file path
        path: PathBuf,
    },
    /// Download a file
    Download {
        /// File ID
        id: String,
        /// Directory to save into
        #[arg(short, long, default_value = ".")]
        output: PathBuf,
    },
    /// Delete a file
    Delete {
        /// File ID
        id: String,
    },
    /// Rename a file
    Rename {
        /// File ID
        id: String,
        /// New file name
        new_name: String,
    },
    /// Share a file with another user
    Share {
        /// File ID
        id: String,
        /// Recipient username
        username: String,
        /// Allow the recipient to modify the file
        #[arg(long)]
        writable: bool,
    },
}

/// Execute file commands
pub async fn execute(
    client: &FileHubClient,
    args: &FilesArgs,
    format: OutputFormat,
) -> Result<(), AppError> {
    let files = client.files();

    match &args.command {
        FilesCommand::Recent { limit } => {
            let recent = files.recent_files(*limit).await?;
            let rows: Vec<FileRow> = recent.iter().map(FileRow::from).collect();
            output::print_list(&rows, format);
        }
        FilesCommand::List { page } => {
            let envelope = files.paginated_files(page.page, page.size).await?;
            output::print_page(&envelope, format, file_row);
        }
        FilesCommand::Search { keyword, page } => {
            let envelope = files.search_files(&page_query(page, keyword)).await?;
            output::print_page(&envelope, format, file_row);
        }
        FilesCommand::Shared { keyword, page } => {
            let envelope = files.search_shared_files(&page_query(page, keyword)).await?;
            output::print_page(&envelope, format, file_row);
        }
        FilesCommand::Upload { path } => {
            let source = UploadSource::from_path(path).await?;
            let name = source.file_name.clone();
            debug!(path = %path.display(), size = source.data.len(), "Uploading file");

            let uploaded = files
                .upload(source)?
                .finish_with(|progress| {
                    if let Some(percent) = progress.percent() {
                        eprint!("\rUploading {}: {:>3.0}%", name, percent);
                        let _ = std::io::stderr().flush();
                    }
                })
                .await;
            eprintln!();

            let metadata = uploaded?;
            info!(file = %metadata.filename, id = ?metadata.id, "Upload finished");
            match format {
                OutputFormat::Json => output::print_list(&[FileRow::from(&metadata)], format),
                OutputFormat::Table => output::print_success(&format!(
                    "Uploaded '{}' ({}, id: {})",
                    metadata.filename,
                    metadata.formatted_file_size(),
                    metadata.id.as_deref().unwrap_or("-")
                )),
            }
        }
        FilesCommand::Download { id, output: dir } => {
            let file = files.download(id).await?;
            let path = file.save_into(dir).await?;
            info!(id = %id, path = %path.display(), "Download saved");
            output::print_success(&format!(
                "Saved '{}' ({} bytes) to {}",
                file.filename,
                file.len(),
                path.display()
            ));
        }
        FilesCommand::Delete { id } => {
            files.delete_file(id).await?;
            output::print_success(&format!("File {} deleted", id));
        }
        FilesCommand::Rename { id, new_name } => {
            files.rename_file(id, new_name).await?;
            output::print_success(&format!("File {} renamed to '{}'", id, new_name));
        }
        FilesCommand::Share {
            id,
            username,
            writable,
        } => {
            let shared = files.share_file(id, username, Some(!writable)).await?;
            if let (OutputFormat::Json, Some(body)) = (format, &shared) {
                output::print_json(body);
            } else {
                let access = if *writable { "read-write" } else { "read-only" };
                output::print_success(&format!(
                    "File {} shared with '{}' ({})",
                    id, username, access
                ));
            }
        }
    }

    Ok(())
}

fn page_query(page: &PageArgs, keyword: &Option<String>) -> PageQuery {
    let query = PageQuery::new(page.page, page.size);
    match keyword {
        Some(k) => query.with_keyword(k.clone()),
        None => query,
    }
}

fn file_row(value: &serde_json::Value) -> FileRow {
    FileRow::from(&FileMetadata::from_api_response(value))
}
