//! Error types for serializer definitions.

use thiserror::Error;

/// Result type for serializer operations.
pub type SerializerResult<T> = Result<T, SerializerError>;

/// Errors that can occur while defining or loading serializers.
#[derive(Debug, Error)]
pub enum SerializerError {
    /// Definition JSON could not be parsed.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Definition is structurally invalid (empty root, duplicate keys).
    #[error("invalid serializer definition: {0}")]
    InvalidDefinition(String),

    /// Payload-level error from the shared types crate.
    #[error(transparent)]
    Types(#[from] sideload_types::Error),
}
