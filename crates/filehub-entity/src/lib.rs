//! # filehub-entity
//!
//! Resource records exchanged with the FileHub backend. Records are built
//! from arbitrary server JSON: every field has a documented fallback, so a
//! missing or mistyped field never fails the surrounding call. Derived
//! attributes (formatted sizes, extension classification) are computed from
//! stored fields and never sent back to the server.

pub mod file;
pub mod json;
pub mod session;
pub mod share;
pub mod user;
