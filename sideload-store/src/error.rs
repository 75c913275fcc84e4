//! Error types for payload extraction and the record store.

use thiserror::Error;

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Errors that can occur while extracting payloads into the store.
#[derive(Debug, Error)]
pub enum StoreError {
    /// No model is registered under this type name.
    #[error("no model was found for `{0}`")]
    UnknownModel(String),

    /// A record was pushed without an id.
    #[error("cannot push a `{0}` record without an id")]
    MissingId(String),

    /// Configuration JSON could not be parsed.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Payload shape error from the shared types crate.
    #[error(transparent)]
    Types(#[from] sideload_types::Error),
}
