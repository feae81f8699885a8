//! Event-triggered thumbnail pipeline
//!
//! Ties the image core to storage:
//!
//! - **Events**: blob-created deliveries in the Event Grid schema
//! - **References**: container, blob name and extension from a blob URL
//! - **Configuration**: destination container and storage credential
//! - **Transports**: the fetch/store seam, with filesystem and in-memory adapters
//! - **Pipeline**: fetch, decode, resize, encode, store
//!
//! # Example
//!
//! ```rust,no_run
//! use thumbnailer_pipeline::{FilesystemTransport, Pipeline, SourceReference, StorageConfig};
//!
//! let config = StorageConfig::from_env();
//! let transport = FilesystemTransport::new(config.connection.clone());
//! let pipeline = Pipeline::new(transport, config);
//!
//! let source = SourceReference::parse("https://acct.blob.core.windows.net/images/cat.jpg")?;
//! let completion = pipeline.run(&source)?;
//! println!("{completion:?}");
//! # Ok::<(), thumbnailer_pipeline::PipelineError>(())
//! ```

#![warn(missing_docs)]

pub mod config;
pub mod error;
pub mod event;
pub mod pipeline;
pub mod reference;
pub mod transport;

pub use config::StorageConfig;
pub use error::{PipelineError, Result, TransportError};
pub use event::{parse_events, BlobCreatedData, StorageEvent, BLOB_CREATED};
pub use pipeline::{Completion, Pipeline};
pub use reference::{Destination, SourceReference};
pub use transport::{BlobTransport, FilesystemTransport, MemoryTransport, StoredObject};
