//! Decode, resize and encode with the image crate.

use crate::dimensions::{resize_spec, ResizeSpec, THUMBNAIL_WIDTH};
use crate::format::{resolve_codec, resolve_content_type, Codec};
use crate::{ImageError, Result};
use image::imageops::FilterType;
use image::{DynamicImage, ImageOutputFormat, RgbaImage};
use std::io::Cursor;

/// JPEG quality used for thumbnails.
pub const JPEG_QUALITY: u8 = 75;

/// Resampling filter for every resize.
const FILTER: FilterType = FilterType::Lanczos3;

/// An encoded thumbnail ready to be stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedResult {
    /// Encoded image bytes
    pub bytes: Vec<u8>,
    /// MIME type for the stored object
    pub content_type: &'static str,
    /// Codec the bytes were encoded with
    pub codec: Codec,
    /// Dimensions the thumbnail was resized to
    pub spec: ResizeSpec,
}

/// Result of running the engine on one source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// A thumbnail was produced
    Processed(EncodedResult),
    /// No codec for the extension; nothing was encoded
    Skipped {
        /// Content type the extension resolves to, for logging
        content_type: &'static str,
    },
}

impl Outcome {
    /// Returns true for the no-op outcome.
    pub fn is_skipped(&self) -> bool {
        matches!(self, Outcome::Skipped { .. })
    }
}

/// Decode image bytes into an RGBA8 buffer.
pub fn decode(data: &[u8]) -> Result<RgbaImage> {
    let img = image::load_from_memory(data).map_err(ImageError::Decode)?;
    Ok(img.into_rgba8())
}

/// Produce a thumbnail for `data`, choosing the codec from `extension`.
///
/// The source is decoded before the codec is resolved, so malformed bytes
/// fail even when the extension is unsupported.
///
/// # Arguments
/// * `data` - Source image bytes
/// * `extension` - Source extension, with or without the leading dot
///
/// # Returns
/// [`Outcome::Processed`] with the encoded thumbnail, or
/// [`Outcome::Skipped`] if the extension has no codec
pub fn process(data: &[u8], extension: Option<&str>) -> Result<Outcome> {
    let source = decode(data)?;

    let Some(descriptor) = resolve_codec(extension) else {
        let content_type = resolve_content_type(extension);
        tracing::info!(
            extension = extension.unwrap_or_default(),
            content_type,
            "No encoder support for extension"
        );
        return Ok(Outcome::Skipped { content_type });
    };

    tracing::info!(encoder = %descriptor.codec, "Resolved encoder");
    tracing::info!(
        width = source.width(),
        height = source.height(),
        thumbnail_width = THUMBNAIL_WIDTH,
        "Decoded source image"
    );

    let spec = resize_spec(source.width(), source.height(), THUMBNAIL_WIDTH);
    tracing::info!(divisor = spec.divisor, height = spec.computed_height, "Computed thumbnail size");

    let resized = resize(source, &spec)?;
    let bytes = encode(resized, descriptor.codec)?;

    Ok(Outcome::Processed(EncodedResult {
        bytes,
        content_type: resolve_content_type(extension),
        codec: descriptor.codec,
        spec,
    }))
}

/// Resize a buffer to `spec`. Consumes the source so only one full-size
/// buffer is alive at a time.
pub fn resize(source: RgbaImage, spec: &ResizeSpec) -> Result<RgbaImage> {
    if spec.is_degenerate() {
        return Err(ImageError::InvalidDimensions {
            width: spec.target_width,
            height: spec.computed_height,
        });
    }

    Ok(image::imageops::resize(&source, spec.target_width, spec.computed_height, FILTER))
}

/// Encode an RGBA buffer with `codec`.
pub fn encode(buffer: RgbaImage, codec: Codec) -> Result<Vec<u8>> {
    let mut output = Cursor::new(Vec::new());

    let (img, format) = match codec {
        Codec::Png => (DynamicImage::ImageRgba8(buffer), ImageOutputFormat::Png),
        // JPEG has no alpha channel.
        Codec::Jpeg => (
            DynamicImage::ImageRgb8(DynamicImage::ImageRgba8(buffer).into_rgb8()),
            ImageOutputFormat::Jpeg(JPEG_QUALITY),
        ),
        Codec::Gif => (DynamicImage::ImageRgba8(buffer), ImageOutputFormat::Gif),
    };

    img.write_to(&mut output, format).map_err(ImageError::Encode)?;
    Ok(output.into_inner())
}
