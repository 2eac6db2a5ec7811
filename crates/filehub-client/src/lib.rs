//! # filehub-client
//!
//! Client for the FileHub REST backend. The crate is layered leaf first:
//!
//! - [`storage`]: key/value backends for persisted client state.
//! - [`session`]: the token store, deciding whether the current bearer
//!   token is usable and whether it carries the admin role.
//! - [`http`]: the request executor that builds URLs, attaches headers and
//!   normalizes responses and errors.
//! - [`transfer`]: uploads with progress events and cancellation, and
//!   downloads exposed as in-memory artifacts.
//! - [`services`]: typed resource clients for auth, files, users and admin.
//!
//! [`FileHubClient`] wires all of them together from a [`ClientConfig`].
//!
//! [`ClientConfig`]: filehub_core::config::ClientConfig

pub mod hub;
pub mod http;
pub mod services;
pub mod session;
pub mod storage;
pub mod transfer;

pub use hub::FileHubClient;
pub use http::{ApiClient, Payload, RequestDescriptor};
pub use services::{AdminClient, AuthClient, FileClient, UserClient};
pub use session::Session;
pub use transfer::{DownloadedFile, UploadEvent, UploadHandle, UploadProgress, UploadSource};
