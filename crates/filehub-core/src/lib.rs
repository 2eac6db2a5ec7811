//! # filehub-core
//!
//! Core crate for the FileHub client. Contains configuration schemas,
//! the key/value storage trait used for persisted client state, the
//! pass-through pagination and query parameter types, and the unified
//! error system.
//!
//! This crate has **no** internal dependencies on other FileHub crates.

pub mod config;
pub mod error;
pub mod result;
pub mod traits;
pub mod types;

pub use error::{AppError, ErrorKind};
pub use result::AppResult;
