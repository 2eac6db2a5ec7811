//! Request executor.

pub mod client;
pub mod request;
pub mod response;

pub use client::ApiClient;
pub use request::RequestDescriptor;
pub use response::Payload;
