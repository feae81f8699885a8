//! Source references and destination naming.

use crate::config::StorageConfig;
use crate::error::{PipelineError, Result};
use std::fmt;
use url::Url;

/// Locator for an uploaded blob.
///
/// The first path segment is the container; everything after it is the blob
/// name. `https://acct.blob.core.windows.net/images/2024/cat.JPG` has
/// container `images`, blob name `2024/cat.JPG` and extension `.JPG`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceReference {
    url: Url,
    container: String,
    blob_name: String,
    extension: Option<String>,
}

impl SourceReference {
    /// Parse a blob URL.
    pub fn parse(raw: &str) -> Result<Self> {
        let url = Url::parse(raw).map_err(|e| PipelineError::invalid_reference(raw, e.to_string()))?;

        let segments: Vec<String> = url
            .path_segments()
            .ok_or_else(|| PipelineError::invalid_reference(raw, "URL has no path"))?
            .map(decode_segment)
            .collect();

        let Some((container, blob)) = segments.split_first() else {
            return Err(PipelineError::invalid_reference(raw, "missing container"));
        };
        if container.is_empty() {
            return Err(PipelineError::invalid_reference(raw, "missing container"));
        }

        let blob_name = blob.join("/");
        let file_name = blob.last().map(String::as_str).unwrap_or_default();
        if file_name.is_empty() {
            return Err(PipelineError::invalid_reference(raw, "missing blob name"));
        }

        Ok(Self {
            extension: extension_of(file_name).map(str::to_string),
            container: container.clone(),
            blob_name,
            url,
        })
    }

    /// The full source URL
    pub fn url(&self) -> &Url {
        &self.url
    }

    /// Container holding the source blob
    pub fn container(&self) -> &str {
        &self.container
    }

    /// Blob name below the container, percent-decoded
    pub fn blob_name(&self) -> &str {
        &self.blob_name
    }

    /// Extension of the final path segment including the dot, if any
    pub fn extension(&self) -> Option<&str> {
        self.extension.as_deref()
    }
}

impl fmt::Display for SourceReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.url, f)
    }
}

fn decode_segment(segment: &str) -> String {
    urlencoding::decode(segment)
        .map(|s| s.into_owned())
        .unwrap_or_else(|_| segment.to_string())
}

fn extension_of(file_name: &str) -> Option<&str> {
    file_name.rfind('.').map(|idx| &file_name[idx..])
}

/// Where a thumbnail is written.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct Destination {
    /// Destination container from configuration
    pub container: String,
    /// Same blob name as the source
    pub blob_name: String,
}

impl Destination {
    /// Destination for `source` in the configured container.
    pub fn for_source(config: &StorageConfig, source: &SourceReference) -> Self {
        Self {
            container: config.container.clone(),
            blob_name: source.blob_name().to_string(),
        }
    }
}

impl fmt::Display for Destination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.container, self.blob_name)
    }
}
