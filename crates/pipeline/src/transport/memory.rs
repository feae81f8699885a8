//! In-process transport for tests and dry runs.

use super::BlobTransport;
use crate::error::TransportError;
use crate::reference::{Destination, SourceReference};
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::RwLock;

/// A blob written through [`MemoryTransport::store`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredObject {
    /// Where the blob was written
    pub destination: Destination,
    /// Blob contents
    pub bytes: Vec<u8>,
    /// Content type passed to `store`
    pub content_type: String,
}

/// Transport holding blobs in memory, keyed by `container/blob name`
#[derive(Debug, Default)]
pub struct MemoryTransport {
    sources: RwLock<HashMap<String, Vec<u8>>>,
    stored: RwLock<Vec<StoredObject>>,
    store_calls: AtomicUsize,
    fail_fetch: AtomicBool,
    fail_store: AtomicBool,
}

impl MemoryTransport {
    /// Empty transport with no injected failures
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a source blob
    pub fn insert(&self, container: &str, blob_name: &str, bytes: Vec<u8>) {
        let mut sources = self.sources.write().unwrap_or_else(|e| e.into_inner());
        sources.insert(format!("{container}/{blob_name}"), bytes);
    }

    /// Make every fetch fail
    pub fn fail_fetches(&self, fail: bool) {
        self.fail_fetch.store(fail, Ordering::SeqCst);
    }

    /// Make every store fail
    pub fn fail_stores(&self, fail: bool) {
        self.fail_store.store(fail, Ordering::SeqCst);
    }

    /// Number of store attempts, including failed ones
    pub fn store_calls(&self) -> usize {
        self.store_calls.load(Ordering::SeqCst)
    }

    /// Blobs written so far
    pub fn stored(&self) -> Vec<StoredObject> {
        self.stored.read().unwrap_or_else(|e| e.into_inner()).clone()
    }
}

impl BlobTransport for MemoryTransport {
    fn fetch(&self, source: &SourceReference) -> Result<Vec<u8>, TransportError> {
        if self.fail_fetch.load(Ordering::SeqCst) {
            return Err(TransportError::Other(format!("injected fetch failure for {source}")));
        }

        let key = format!("{}/{}", source.container(), source.blob_name());
        let sources = self.sources.read().unwrap_or_else(|e| e.into_inner());
        sources.get(&key).cloned().ok_or(TransportError::NotFound(key))
    }

    fn store(
        &self,
        destination: &Destination,
        bytes: &[u8],
        content_type: &str,
    ) -> Result<(), TransportError> {
        self.store_calls.fetch_add(1, Ordering::SeqCst);

        if self.fail_store.load(Ordering::SeqCst) {
            return Err(TransportError::Other(format!("injected store failure for {destination}")));
        }
        if destination.container.trim().is_empty() {
            return Err(TransportError::MissingContainer);
        }

        let mut stored = self.stored.write().unwrap_or_else(|e| e.into_inner());
        stored.push(StoredObject {
            destination: destination.clone(),
            bytes: bytes.to_vec(),
            content_type: content_type.to_string(),
        });
        Ok(())
    }
}
