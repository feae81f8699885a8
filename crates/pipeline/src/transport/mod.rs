//! Storage transport adapters
//!
//! The pipeline only needs two operations from storage: read the source
//! blob and write the thumbnail with its content type.

mod filesystem;
mod memory;

pub use filesystem::FilesystemTransport;
pub use memory::{MemoryTransport, StoredObject};

use crate::error::TransportError;
use crate::reference::{Destination, SourceReference};

/// Blob read/write used by the pipeline.
///
/// Implementations must be safe to share across concurrent invocations.
pub trait BlobTransport: Send + Sync {
    /// Read the raw bytes of the source blob
    fn fetch(&self, source: &SourceReference) -> Result<Vec<u8>, TransportError>;

    /// Write `bytes` to `destination`, tagged with `content_type`
    fn store(
        &self,
        destination: &Destination,
        bytes: &[u8],
        content_type: &str,
    ) -> Result<(), TransportError>;
}

impl<T: BlobTransport + ?Sized> BlobTransport for &T {
    fn fetch(&self, source: &SourceReference) -> Result<Vec<u8>, TransportError> {
        (**self).fetch(source)
    }

    fn store(
        &self,
        destination: &Destination,
        bytes: &[u8],
        content_type: &str,
    ) -> Result<(), TransportError> {
        (**self).store(destination, bytes, content_type)
    }
}
