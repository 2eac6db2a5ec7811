//! Shared request types.

pub mod pagination;
pub mod query;

pub use pagination::PageQuery;
pub use query::QueryParams;
