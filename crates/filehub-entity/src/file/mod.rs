//! File records.

pub mod metadata;

pub use metadata::FileMetadata;
