//! Thumbnail image core.
//!
//! This crate provides:
//! - Extension to codec and content-type resolution
//! - Thumbnail dimension calculation
//! - Decode, resize and encode of a single source image

#![warn(missing_docs)]

mod dimensions;
mod engine;
mod error;
mod format;

pub use dimensions::{compute_target_dimensions, divisor, resize_spec, ResizeSpec, THUMBNAIL_WIDTH};
pub use engine::{decode, encode, process, resize, EncodedResult, Outcome, JPEG_QUALITY};
pub use error::{ImageError, Result};
pub use format::{
    formats, normalize_extension, resolve_codec, resolve_content_type, Codec, FormatDescriptor,
    DEFAULT_EXTENSION, FALLBACK_CONTENT_TYPE, MAX_EXTENSION_LEN,
};
