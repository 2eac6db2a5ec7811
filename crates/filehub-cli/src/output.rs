//! Table and JSON output formatting for CLI commands.

use serde::Serialize;
use serde_json::Value;
use tabled::{Table, Tabled};

use filehub_entity::file::FileMetadata;
use filehub_entity::file::metadata::format_bytes;
use filehub_entity::user::UserDto;

/// Output format selection
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Human-readable table
    #[default]
    Table,
    /// JSON output
    Json,
}

/// File display row for table output
#[derive(Debug, Serialize, Tabled)]
pub struct FileRow {
    /// File ID
    id: String,
    /// Name
    filename: String,
    /// Content type
    #[tabled(rename = "type")]
    content_type: String,
    /// Size
    size: String,
    /// Uploaded
    uploaded: String,
}

impl From<&FileMetadata> for FileRow {
    fn from(file: &FileMetadata) -> Self {
        Self {
            id: file.id.clone().unwrap_or_default(),
            filename: file.filename.clone(),
            content_type: file.content_type.clone(),
            size: file.formatted_file_size(),
            uploaded: file.formatted_upload_date(),
        }
    }
}

/// User display row for table output
#[derive(Debug, Serialize, Tabled)]
pub struct UserRow {
    /// User ID
    id: String,
    /// Username
    username: String,
    /// Email
    email: String,
}

impl From<&UserDto> for UserRow {
    fn from(user: &UserDto) -> Self {
        Self {
            id: user.id.clone().unwrap_or_default(),
            username: user.display_name().to_string(),
            email: user.email.clone(),
        }
    }
}

/// Print a list of items in the selected format
pub fn print_list<T: Serialize + Tabled>(items: &[T], format: OutputFormat) {
    match format {
        OutputFormat::Table => {
            if items.is_empty() {
                println!("No results found.");
            } else {
                let table = Table::new(items).to_string();
                println!("{}", table);
            }
        }
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(items).unwrap_or_else(|_| "[]".to_string());
            println!("{}", json);
        }
    }
}

/// Print a raw JSON value
pub fn print_json(value: &Value) {
    let json = serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string());
    println!("{}", json);
}

/// Print a paginated envelope.
///
/// Tables show the `content` array as rows built by `row`, followed by the
/// page position when the envelope carries one. JSON output is the envelope
/// exactly as the server sent it.
pub fn print_page<T, F>(envelope: &Value, format: OutputFormat, row: F)
where
    T: Serialize + Tabled,
    F: Fn(&Value) -> T,
{
    if format == OutputFormat::Json {
        print_json(envelope);
        return;
    }

    let Some(items) = envelope.get("content").and_then(Value::as_array) else {
        print_json(envelope);
        return;
    };

    let rows: Vec<T> = items.iter().map(row).collect();
    print_list(&rows, format);

    let page = envelope.get("number").and_then(Value::as_u64);
    let pages = envelope.get("totalPages").and_then(Value::as_u64);
    if let (Some(page), Some(pages)) = (page, pages) {
        print_kv("Page", &format!("{} of {}", page + 1, pages.max(1)));
    }
    if let Some(total) = envelope.get("totalElements").and_then(Value::as_u64) {
        print_kv("Total", &total.to_string());
    }
}

/// Render a storage figure; numbers are shown as byte sizes.
pub fn storage_value(value: &Value) -> String {
    match value.as_u64() {
        Some(bytes) => format_bytes(bytes, 2),
        None => match value {
            Value::String(s) => s.clone(),
            other => other.to_string(),
        },
    }
}

/// Print a success message
pub fn print_success(msg: &str) {
    println!("✓ {}", msg);
}

/// Print a warning message
pub fn print_warning(msg: &str) {
    println!("⚠ {}", msg);
}

/// Print an error message
pub fn print_error(msg: &str) {
    eprintln!("Error: {}", msg);
}

/// Print a key-value pair
pub fn print_kv(key: &str, value: &str) {
    println!("  {:<24} {}", format!("{}:", key), value);
}
