//! User records.

pub mod model;
pub mod role;

pub use model::UserDto;
pub use role::UserRole;
