//! One thumbnail invocation: fetch, process, store.

use crate::config::StorageConfig;
use crate::error::Result;
use crate::event::StorageEvent;
use crate::reference::{Destination, SourceReference};
use crate::transport::BlobTransport;
use serde::Serialize;
use thumbnailer_image::{process, Outcome};
use thumbnailer_telemetry::{metrics, names, Timer};

/// Terminal state of a successful invocation
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum Completion {
    /// Thumbnail written to the destination
    Stored {
        /// Where the thumbnail was written
        destination: Destination,
        /// Content type recorded with the thumbnail
        content_type: &'static str,
        /// Thumbnail width in pixels
        width: u32,
        /// Thumbnail height in pixels
        height: u32,
        /// Encoded size
        bytes: usize,
    },
    /// No encoder for the source extension
    Skipped {
        /// Content type the extension resolves to
        content_type: &'static str,
    },
}

/// Runs the thumbnail pipeline against a transport.
///
/// Holds no mutable state; one instance can serve concurrent invocations.
#[derive(Debug)]
pub struct Pipeline<T> {
    transport: T,
    config: StorageConfig,
}

impl<T: BlobTransport> Pipeline<T> {
    /// Create a pipeline writing to `config.container` through `transport`.
    pub fn new(transport: T, config: StorageConfig) -> Self {
        Self { transport, config }
    }

    /// The underlying transport
    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Storage settings this pipeline was built with
    pub fn config(&self) -> &StorageConfig {
        &self.config
    }

    /// Handle one trigger event.
    ///
    /// Returns `Ok(None)` for event types other than blob-created. Their
    /// payload is never decoded.
    pub fn handle_event(&self, event: &StorageEvent) -> Result<Option<Completion>> {
        if !event.is_blob_created() {
            tracing::debug!(event_type = %event.event_type, id = %event.id, "Ignoring event");
            return Ok(None);
        }

        let source = event
            .blob_data()
            .and_then(|data| SourceReference::parse(&data.url))
            .inspect_err(|e| {
                tracing::error!(error = %e, id = %event.id, "Thumbnail generation failed");
                metrics().increment(names::FAILED);
            })?;

        self.run(&source).map(Some)
    }

    /// Produce and store the thumbnail for `source`.
    ///
    /// Fatal errors are logged and returned unchanged.
    pub fn run(&self, source: &SourceReference) -> Result<Completion> {
        let span = tracing::info_span!("thumbnail", url = %source);
        let _enter = span.enter();
        let _timer = Timer::start(names::DURATION);

        match self.execute(source) {
            Ok(completion) => {
                let counter = match completion {
                    Completion::Stored { .. } => names::STORED,
                    Completion::Skipped { .. } => names::SKIPPED,
                };
                metrics().increment(counter);
                Ok(completion)
            }
            Err(e) => {
                tracing::error!(error = %e, "Thumbnail generation failed");
                metrics().increment(names::FAILED);
                Err(e)
            }
        }
    }

    fn execute(&self, source: &SourceReference) -> Result<Completion> {
        let data = self.transport.fetch(source)?;
        let outcome = process(&data, source.extension())?;
        drop(data);

        let result = match outcome {
            Outcome::Skipped { content_type } => {
                tracing::info!(content_type, "No encoder support for: {}", source);
                return Ok(Completion::Skipped { content_type });
            }
            Outcome::Processed(result) => result,
        };

        let destination = Destination::for_source(&self.config, source);
        self.transport
            .store(&destination, &result.bytes, result.content_type)?;

        tracing::info!(
            content_type = result.content_type,
            destination = %destination,
            "Stored thumbnail"
        );

        Ok(Completion::Stored {
            destination,
            content_type: result.content_type,
            width: result.spec.target_width,
            height: result.spec.computed_height,
            bytes: result.bytes.len(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::BLOB_CREATED;
    use crate::transport::MemoryTransport;

    #[test]
    fn test_ignores_other_event_types() {
        let pipeline = Pipeline::new(MemoryTransport::new(), StorageConfig::new("thumbs", ""));
        let event: StorageEvent = serde_json::from_value(serde_json::json!({
            "eventType": "Microsoft.Storage.BlobDeleted",
            "data": { "url": "https://acct.blob.core.windows.net/images/cat.png" }
        }))
        .unwrap();

        assert_eq!(pipeline.handle_event(&event).unwrap(), None);
        assert_eq!(pipeline.transport().store_calls(), 0);
    }

    #[test]
    fn test_ignores_event_without_url() {
        let pipeline = Pipeline::new(MemoryTransport::new(), StorageConfig::new("thumbs", ""));
        let event: StorageEvent = serde_json::from_value(serde_json::json!({
            "eventType": "Microsoft.EventGrid.SubscriptionValidationEvent",
            "data": { "validationCode": "512d38b6" }
        }))
        .unwrap();

        assert_eq!(pipeline.handle_event(&event).unwrap(), None);
        assert_eq!(pipeline.transport().store_calls(), 0);
    }

    #[test]
    fn test_blob_created_without_url_fails() {
        let pipeline = Pipeline::new(MemoryTransport::new(), StorageConfig::new("thumbs", ""));
        let event: StorageEvent = serde_json::from_value(serde_json::json!({
            "eventType": BLOB_CREATED,
            "data": { "api": "PutBlob" }
        }))
        .unwrap();

        let err = pipeline.handle_event(&event).unwrap_err();
        assert!(matches!(err, crate::PipelineError::InvalidEvent(_)));
        assert_eq!(pipeline.transport().store_calls(), 0);
    }

    #[test]
    fn test_completion_serializes_with_status() {
        let completion = Completion::Skipped { content_type: "application/octet-stream" };
        let json = serde_json::to_value(&completion).unwrap();

        assert_eq!(json["status"], "skipped");
        assert_eq!(json["content_type"], "application/octet-stream");
    }
}
