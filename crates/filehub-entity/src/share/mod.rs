//! Share and rename request bodies.

pub mod request;

pub use request::{RenameRequest, ShareRequest};
