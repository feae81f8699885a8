//! Error types for the image crate.

use thiserror::Error;

/// Result type alias for image operations.
pub type Result<T> = std::result::Result<T, ImageError>;

/// Errors that can occur while producing a thumbnail.
#[derive(Debug, Error)]
pub enum ImageError {
    /// Source bytes could not be decoded as an image
    #[error("Decode failure: {0}")]
    Decode(#[source] image::ImageError),

    /// Computed output dimensions are unusable
    #[error("Encode failure: invalid thumbnail dimensions {width}x{height}")]
    InvalidDimensions {
        /// Output width
        width: u32,
        /// Output height
        height: u32,
    },

    /// Codec rejected the pixel buffer
    #[error("Encode failure: {0}")]
    Encode(#[source] image::ImageError),
}

impl ImageError {
    /// Returns true for errors raised while decoding the source.
    pub fn is_decode(&self) -> bool {
        matches!(self, ImageError::Decode(_))
    }
}
