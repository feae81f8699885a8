//! Extension-based format resolution.
//!
//! Two lookups share the same normalization but differ in how they fail:
//! [`resolve_codec`] may report a format as unsupported, while
//! [`resolve_content_type`] always produces a MIME type (falling back to
//! `application/octet-stream`). Callers rely on that asymmetry to log a
//! content type even when no thumbnail is produced.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

/// Extension substituted when the input is missing, empty, or too long.
pub const DEFAULT_EXTENSION: &str = "PNG";

/// Extensions longer than this are treated as missing.
pub const MAX_EXTENSION_LEN: usize = 10;

/// Content type used for any extension outside the table.
pub const FALLBACK_CONTENT_TYPE: &str = "application/octet-stream";

static SUPPORTED_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)gif|png|jpe?g").expect("static pattern is valid"));

/// Codecs the thumbnail pipeline can encode to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Codec {
    /// PNG image
    Png,
    /// JPEG image
    Jpeg,
    /// GIF image
    Gif,
}

impl Codec {
    /// MIME type written alongside encoded output.
    pub fn mime_type(&self) -> &'static str {
        match self {
            Codec::Png => "image/png",
            Codec::Jpeg => "image/jpeg",
            Codec::Gif => "image/gif",
        }
    }
}

impl std::fmt::Display for Codec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Codec::Png => "PngEncoder",
            Codec::Jpeg => "JpegEncoder",
            Codec::Gif => "GifEncoder",
        };
        f.write_str(name)
    }
}

/// One row of the static extension table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FormatDescriptor {
    /// Lowercase extension without the leading dot
    pub extension: &'static str,
    /// Codec used to encode this extension
    pub codec: Codec,
    /// MIME type for stored output
    pub content_type: &'static str,
}

static FORMATS: [FormatDescriptor; 4] = [
    FormatDescriptor { extension: "png", codec: Codec::Png, content_type: "image/png" },
    FormatDescriptor { extension: "jpg", codec: Codec::Jpeg, content_type: "image/jpeg" },
    FormatDescriptor { extension: "jpeg", codec: Codec::Jpeg, content_type: "image/jpeg" },
    FormatDescriptor { extension: "gif", codec: Codec::Gif, content_type: "image/gif" },
];

/// The full extension table.
pub fn formats() -> &'static [FormatDescriptor] {
    &FORMATS
}

/// Normalize a raw extension as the resolver sees it.
///
/// A single leading `.` is stripped. Missing, empty, or over-long
/// extensions become [`DEFAULT_EXTENSION`]. Case is preserved.
///
/// # Example
/// ```
/// use thumbnailer_image::normalize_extension;
///
/// assert_eq!(normalize_extension(Some(".jpg")), "jpg");
/// assert_eq!(normalize_extension(Some("")), "PNG");
/// assert_eq!(normalize_extension(None), "PNG");
/// ```
pub fn normalize_extension(extension: Option<&str>) -> &str {
    let trimmed = extension
        .map(|ext| ext.strip_prefix('.').unwrap_or(ext))
        .unwrap_or_default();

    if trimmed.is_empty() || trimmed.chars().count() > MAX_EXTENSION_LEN {
        DEFAULT_EXTENSION
    } else {
        trimmed
    }
}

fn lookup(normalized: &str) -> Option<&'static FormatDescriptor> {
    FORMATS
        .iter()
        .find(|desc| desc.extension.eq_ignore_ascii_case(normalized))
}

/// Resolve the codec for an extension, or `None` if it is unsupported.
///
/// # Example
/// ```
/// use thumbnailer_image::{resolve_codec, Codec};
///
/// assert_eq!(resolve_codec(Some(".JPEG")).map(|d| d.codec), Some(Codec::Jpeg));
/// assert!(resolve_codec(Some(".bmp")).is_none());
/// ```
pub fn resolve_codec(extension: Option<&str>) -> Option<&'static FormatDescriptor> {
    let normalized = normalize_extension(extension);

    if !SUPPORTED_PATTERN.is_match(normalized) {
        return None;
    }

    lookup(normalized)
}

/// Resolve the content type for an extension. Never fails.
pub fn resolve_content_type(extension: Option<&str>) -> &'static str {
    lookup(normalize_extension(extension))
        .map(|desc| desc.content_type)
        .unwrap_or(FALLBACK_CONTENT_TYPE)
}
