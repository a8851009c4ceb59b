//! Data model error types.

use thiserror::Error;

/// Result type for data model operations.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Errors that can occur while decoding pipeline documents and status sources.
#[derive(Debug, Error)]
pub enum Error {
    /// A JSON document did not match the expected shape.
    #[error("failed to decode {document}: {source}")]
    Decode {
        /// Kind of document being decoded.
        document: &'static str,
        /// Underlying decoding error.
        #[source]
        source: serde_json::Error,
    },

    /// The pipeline schema version is not a valid semantic version.
    #[error("invalid pipeline schema version {version:?}: {source}")]
    SchemaVersion {
        /// The raw version string.
        version: String,
        /// Underlying parse error.
        #[source]
        source: semver::Error,
    },
}

impl Error {
    /// Creates a decode error for the given document kind.
    pub(crate) fn decode(document: &'static str, source: serde_json::Error) -> Self {
        Self::Decode { document, source }
    }
}
