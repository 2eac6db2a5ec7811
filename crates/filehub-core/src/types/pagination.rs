//! Pagination parameters for list and search endpoints.

use serde::{Deserialize, Serialize};

use super::query::QueryParams;

/// Default page number used by the listing endpoints.
pub const DEFAULT_PAGE: u64 = 0;
/// Default number of items per page.
pub const DEFAULT_PAGE_SIZE: u64 = 5;

/// Parameters for a paginated query.
///
/// Values are passed to the server unvalidated. The page origin differs
/// between backend endpoints, so the caller decides what `page` means.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageQuery {
    /// Page number, in the origin the target endpoint expects.
    #[serde(default = "default_page")]
    pub page: u64,
    /// Number of items per page.
    #[serde(default = "default_page_size")]
    pub size: u64,
    /// Optional search keyword; omitted from the request when `None`.
    #[serde(default)]
    pub keyword: Option<String>,
}

impl PageQuery {
    /// Create a page query without a keyword.
    pub fn new(page: u64, size: u64) -> Self {
        Self {
            page,
            size,
            keyword: None,
        }
    }

    /// Attach a search keyword.
    pub fn with_keyword(mut self, keyword: impl Into<String>) -> Self {
        self.keyword = Some(keyword.into());
        self
    }

    /// Render as query parameters (`page`, `size`, `keyword`).
    pub fn to_params(&self) -> QueryParams {
        QueryParams::new()
            .insert("page", self.page)
            .insert("size", self.size)
            .insert_opt("keyword", self.keyword.clone())
    }
}

impl Default for PageQuery {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE, DEFAULT_PAGE_SIZE)
    }
}

fn default_page() -> u64 {
    DEFAULT_PAGE
}

fn default_page_size() -> u64 {
    DEFAULT_PAGE_SIZE
}
