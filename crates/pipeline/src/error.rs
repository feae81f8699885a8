//! Error types for the thumbnail pipeline

use std::path::PathBuf;
use thiserror::Error;
use thumbnailer_image::ImageError;

/// Result type alias for pipeline operations
pub type Result<T> = std::result::Result<T, PipelineError>;

/// Fatal pipeline errors.
///
/// An unsupported extension is not represented here; it completes as
/// [`crate::Completion::Skipped`].
#[derive(Error, Debug)]
pub enum PipelineError {
    /// Source reference could not be parsed
    #[error("Invalid source reference {reference:?}: {reason}")]
    InvalidReference {
        /// The raw reference
        reference: String,
        /// Why it was rejected
        reason: String,
    },

    /// Event payload could not be parsed
    #[error("Invalid event payload: {0}")]
    InvalidEvent(#[from] serde_json::Error),

    /// Decoding, resizing or encoding failed
    #[error(transparent)]
    Image(#[from] ImageError),

    /// Fetch or store failed
    #[error(transparent)]
    Transport(#[from] TransportError),
}

impl PipelineError {
    pub(crate) fn invalid_reference(reference: &str, reason: impl Into<String>) -> Self {
        Self::InvalidReference {
            reference: reference.to_string(),
            reason: reason.into(),
        }
    }
}

/// Errors raised by a [`crate::BlobTransport`]
#[derive(Error, Debug)]
pub enum TransportError {
    /// Storage connection credential is empty
    #[error("Storage connection is not configured")]
    MissingConnection,

    /// Storage connection credential is unusable
    #[error("Invalid storage connection: {0}")]
    InvalidConnection(String),

    /// Destination container name is empty
    #[error("Destination container is not configured")]
    MissingContainer,

    /// Blob name would escape the storage root
    #[error("Blob name {0:?} is not a valid storage path")]
    InvalidBlobName(String),

    /// Source object does not exist
    #[error("Object not found: {0}")]
    NotFound(String),

    /// Filesystem operation failed
    #[error("IO error on {}: {source}", .path.display())]
    Io {
        /// Path being read or written
        path: PathBuf,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },

    /// Injected or adapter-specific failure
    #[error("{0}")]
    Other(String),
}

impl TransportError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        let path = path.into();
        if source.kind() == std::io::ErrorKind::NotFound {
            return Self::NotFound(path.display().to_string());
        }
        Self::Io { path, source }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_io_not_found_maps_to_not_found() {
        let err = TransportError::io(
            "/missing/file.png",
            std::io::Error::from(std::io::ErrorKind::NotFound),
        );
        assert!(matches!(err, TransportError::NotFound(ref p) if p.ends_with("file.png")));
    }

    #[test]
    fn test_transport_error_is_transparent() {
        let err = PipelineError::from(TransportError::MissingContainer);
        assert_eq!(err.to_string(), "Destination container is not configured");
    }
}
