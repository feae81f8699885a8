//! Transport backed by a local directory.
//!
//! The connection credential names the storage root, either as a plain path
//! or a `file://` URL. Containers are subdirectories of the root.

use super::BlobTransport;
use crate::error::TransportError;
use crate::reference::{Destination, SourceReference};
use std::fs;
use std::path::{Component, Path, PathBuf};
use url::Url;

/// Suffix of the file holding a stored blob's content type
pub const CONTENT_TYPE_SUFFIX: &str = ".content-type";

/// Reads and writes blobs under a local directory
#[derive(Debug, Clone)]
pub struct FilesystemTransport {
    connection: String,
}

impl FilesystemTransport {
    /// Create a transport. The connection is not checked until first use.
    pub fn new(connection: impl Into<String>) -> Self {
        Self {
            connection: connection.into(),
        }
    }

    /// Resolve the storage root from the connection credential
    pub fn root(&self) -> Result<PathBuf, TransportError> {
        let raw = self.connection.trim();
        if raw.is_empty() {
            return Err(TransportError::MissingConnection);
        }

        let root = if raw.starts_with("file:") {
            Url::parse(raw)
                .ok()
                .and_then(|url| url.to_file_path().ok())
                .ok_or_else(|| TransportError::InvalidConnection(format!("{raw} is not a file URL")))?
        } else {
            PathBuf::from(raw)
        };

        if !root.is_dir() {
            return Err(TransportError::InvalidConnection(format!(
                "{} is not a directory",
                root.display()
            )));
        }

        Ok(root)
    }

    fn blob_path(&self, container: &str, blob_name: &str) -> Result<PathBuf, TransportError> {
        let mut path = self.root()?;
        path.push(checked_relative(container)?);
        path.push(checked_relative(blob_name)?);
        Ok(path)
    }
}

/// Reject names that would leave the container directory.
fn checked_relative(name: &str) -> Result<&Path, TransportError> {
    let path = Path::new(name);
    let escapes = path
        .components()
        .any(|c| !matches!(c, Component::Normal(_)));

    if name.is_empty() || escapes {
        return Err(TransportError::InvalidBlobName(name.to_string()));
    }
    Ok(path)
}

fn sidecar_path(path: &Path) -> PathBuf {
    let mut name = path.as_os_str().to_owned();
    name.push(CONTENT_TYPE_SUFFIX);
    PathBuf::from(name)
}

impl BlobTransport for FilesystemTransport {
    fn fetch(&self, source: &SourceReference) -> Result<Vec<u8>, TransportError> {
        let path = self.blob_path(source.container(), source.blob_name())?;
        tracing::debug!(path = %path.display(), "Reading source blob");
        fs::read(&path).map_err(|e| TransportError::io(&path, e))
    }

    fn store(
        &self,
        destination: &Destination,
        bytes: &[u8],
        content_type: &str,
    ) -> Result<(), TransportError> {
        if destination.container.trim().is_empty() {
            return Err(TransportError::MissingContainer);
        }

        let path = self.blob_path(&destination.container, &destination.blob_name)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| TransportError::io(parent, e))?;
        }

        fs::write(&path, bytes).map_err(|e| TransportError::io(&path, e))?;

        let sidecar = sidecar_path(&path);
        fs::write(&sidecar, content_type).map_err(|e| TransportError::io(&sidecar, e))?;

        tracing::debug!(path = %path.display(), bytes = bytes.len(), "Wrote thumbnail blob");
        Ok(())
    }
}
