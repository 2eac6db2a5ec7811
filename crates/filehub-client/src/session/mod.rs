//! Token store: the bearer token, its persistence, and local checks on
//! its claims.

pub mod decoder;
pub mod manager;

pub use decoder::decode_claims;
pub use manager::{ADMIN_VIEW_MODE_KEY, Session, TOKEN_KEY};
