//! Storage configuration
//!
//! Read once at start-up and injected into the transport. Values are not
//! validated here; an empty or malformed value surfaces as a transport
//! error the first time it is used.

use serde::{Deserialize, Serialize};
use std::env;
use std::fmt;

/// Environment variable naming the destination container
pub const CONTAINER_ENV: &str = "THUMBNAIL_CONTAINER_NAME";

/// Environment variable holding the storage connection credential
pub const CONNECTION_ENV: &str = "AzureWebJobsStorage";

/// Destination container and storage credential
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Container thumbnails are written to
    pub container: String,
    /// Opaque connection credential for the transport
    pub connection: String,
}

impl StorageConfig {
    /// Create configuration from explicit values
    pub fn new(container: impl Into<String>, connection: impl Into<String>) -> Self {
        Self {
            container: container.into(),
            connection: connection.into(),
        }
    }

    /// Create configuration from environment variables
    ///
    /// Reads `THUMBNAIL_CONTAINER_NAME` and `AzureWebJobsStorage`. Missing
    /// variables become empty strings.
    pub fn from_env() -> Self {
        Self {
            container: env::var(CONTAINER_ENV).unwrap_or_default(),
            connection: env::var(CONNECTION_ENV).unwrap_or_default(),
        }
    }

    /// Replace values that were given explicitly
    #[must_use]
    pub fn with_overrides(mut self, container: Option<String>, connection: Option<String>) -> Self {
        if let Some(container) = container {
            self.container = container;
        }
        if let Some(connection) = connection {
            self.connection = connection;
        }
        self
    }
}

impl fmt::Debug for StorageConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StorageConfig")
            .field("container", &self.container)
            .field("connection", &if self.connection.is_empty() { "" } else { "<redacted>" })
            .finish()
    }
}
