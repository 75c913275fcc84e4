//! Shared primitives for the sideload adapters.
//!
//! Both the server-side serializer crate and the client-side store crate
//! depend on this crate, and on nothing of each other:
//! - [`coerce_id`]: stable string identity for numeric or string ids
//! - [`inflect`]: singular/plural and case conversions used for root names
//! - [`demodulize`] / [`type_for_root`] / [`type_key_for`]: root name and
//!   type tag resolution
//! - [`payload`]: shape checks over root-keyed JSON documents

mod id;
pub mod inflect;
pub mod payload;

pub use id::{coerce_id, coerce_optional_id, record_id};
pub use inflect::{demodulize, type_for_root, type_key_for};

/// A JSON object, in document order.
pub type Hash = serde_json::Map<String, serde_json::Value>;

/// Result type alias using the crate's error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while inspecting payloads.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("malformed payload: {0}")]
    MalformedPayload(String),
}
