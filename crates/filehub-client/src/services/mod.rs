//! Typed resource clients.
//!
//! Each client wraps a shared [`ApiClient`](crate::http::ApiClient) and maps
//! one method to one backend call.

pub mod admin;
pub mod auth;
pub mod file;
pub mod user;

pub use admin::AdminClient;
pub use auth::AuthClient;
pub use file::FileClient;
pub use user::UserClient;
