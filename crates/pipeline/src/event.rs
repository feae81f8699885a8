//! Storage events in the Event Grid schema.
//!
//! Deliveries can mix event types, and only blob-created events carry a blob
//! URL, so `data` stays untyped until the event type has been checked.

use crate::error::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Event type that triggers thumbnail generation
pub const BLOB_CREATED: &str = "Microsoft.Storage.BlobCreated";

/// A storage event delivered by the trigger.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StorageEvent {
    /// Unique event id
    #[serde(default)]
    pub id: String,
    /// Event type, e.g. [`BLOB_CREATED`]
    pub event_type: String,
    /// Publisher-defined path to the event subject
    #[serde(default)]
    pub subject: String,
    /// When the publisher raised the event
    #[serde(default)]
    pub event_time: Option<DateTime<Utc>>,
    /// Event-type specific payload, decoded on demand
    #[serde(default)]
    pub data: Value,
}

/// Payload of a blob-created event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlobCreatedData {
    /// URL of the new blob
    pub url: String,
    /// Storage operation that created the blob, e.g. `PutBlob`
    #[serde(default)]
    pub api: Option<String>,
    /// Content type recorded on the blob
    #[serde(default)]
    pub content_type: Option<String>,
    /// Blob size in bytes
    #[serde(default)]
    pub content_length: Option<u64>,
}

impl StorageEvent {
    /// Returns true if this event should produce a thumbnail
    pub fn is_blob_created(&self) -> bool {
        self.event_type == BLOB_CREATED
    }

    /// Decode `data` as a blob-created payload.
    pub fn blob_data(&self) -> Result<BlobCreatedData> {
        Ok(BlobCreatedData::deserialize(&self.data)?)
    }

    /// The `data.url` field, when present
    pub fn url(&self) -> Option<&str> {
        self.data.get("url").and_then(Value::as_str)
    }
}

/// Parse a delivery payload holding one event or an array of events.
pub fn parse_events(payload: &str) -> Result<Vec<StorageEvent>> {
    if payload.trim_start().starts_with('[') {
        return Ok(serde_json::from_str(payload)?);
    }
    Ok(vec![serde_json::from_str(payload)?])
}
