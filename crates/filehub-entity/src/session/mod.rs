//! Authentication session records.

pub mod claims;
pub mod token;

pub use claims::TokenClaims;
pub use token::{AuthRequest, JwtResponse};
