//! thumbnailer: generate thumbnails for blob-created storage events.

use anyhow::Context;
use clap::{Parser, Subcommand};
use owo_colors::OwoColorize;
use std::io::Read;
use std::path::PathBuf;
use thumbnailer_image::{
    normalize_extension, resize_spec, resolve_codec, resolve_content_type, THUMBNAIL_WIDTH,
};
use thumbnailer_pipeline::{
    parse_events, BlobTransport, Completion, FilesystemTransport, Pipeline, StorageConfig,
    StorageEvent,
};
use thumbnailer_telemetry::TelemetryConfig;

#[derive(Parser)]
#[command(name = "thumbnailer")]
#[command(about = "Generate thumbnails for blob-created storage events")]
#[command(version)]
struct Cli {
    /// Log level filter (overridden by RUST_LOG)
    #[arg(long, global = true, env = "THUMBNAILER_LOG_LEVEL", default_value = "info")]
    log_level: String,

    /// Emit logs as JSON
    #[arg(long, global = true)]
    json_logs: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the pipeline for an event payload
    Handle {
        /// Event payload file (reads stdin when omitted)
        #[arg(long)]
        event: Option<PathBuf>,
        /// Destination container (defaults to THUMBNAIL_CONTAINER_NAME)
        #[arg(long)]
        container: Option<String>,
        /// Storage root path or file:// URL (defaults to AzureWebJobsStorage)
        #[arg(long)]
        connection: Option<String>,
        /// Print a JSON summary
        #[arg(long)]
        json: bool,
        /// Print collected metrics after processing
        #[arg(long)]
        metrics: bool,
    },
    /// Show the codec and content type for a file extension
    Resolve {
        /// Extension, with or without the leading dot
        #[arg(allow_hyphen_values = true)]
        extension: String,
    },
    /// Show the thumbnail size for a source size
    Dimensions {
        /// Source width
        width: u32,
        /// Source height
        height: u32,
        /// Thumbnail width
        #[arg(long, default_value_t = THUMBNAIL_WIDTH)]
        target: u32,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    thumbnailer_telemetry::init_with_config(TelemetryConfig {
        log_level: cli.log_level.clone(),
        json: cli.json_logs,
        ..TelemetryConfig::default()
    })?;

    match cli.command {
        Commands::Handle { event, container, connection, json, metrics } => {
            let payload = read_payload(event.as_ref()).inspect_err(|e| {
                tracing::error!(error = %format!("{e:#}"), "Failed to read event payload")
            })?;
            let events = parse_events(&payload)
                .inspect_err(|e| tracing::error!(error = %e, "Failed to parse event payload"))?;

            let config = StorageConfig::from_env().with_overrides(container, connection);
            let transport = FilesystemTransport::new(config.connection.clone());
            let pipeline = Pipeline::new(transport, config);

            let mut summary = Vec::new();
            let outcome = handle_events(&pipeline, &events, json, &mut summary);

            // A failed batch still reports the events that completed before it.
            if json {
                println!("{}", serde_json::to_string_pretty(&summary)?);
            }

            if metrics {
                let export = thumbnailer_telemetry::metrics().export_json();
                println!("{}", serde_json::to_string_pretty(&export)?);
            }

            outcome?;
        }

        Commands::Resolve { extension } => {
            let normalized = normalize_extension(Some(&extension));
            match resolve_codec(Some(&extension)) {
                Some(desc) => println!("Codec: {}", desc.codec),
                None => println!("Codec: unsupported"),
            }
            println!("Normalized: {}", normalized);
            println!("Content-Type: {}", resolve_content_type(Some(&extension)));
        }

        Commands::Dimensions { width, height, target } => {
            let spec = resize_spec(width, height, target);
            println!("Divisor: {}", spec.divisor);
            println!("Thumbnail: {}x{}", spec.target_width, spec.computed_height);
        }
    }

    Ok(())
}

fn handle_events<T: BlobTransport>(
    pipeline: &Pipeline<T>,
    events: &[StorageEvent],
    json: bool,
    summary: &mut Vec<serde_json::Value>,
) -> thumbnailer_pipeline::Result<()> {
    for event in events {
        let url = event.url().unwrap_or_default();
        match pipeline.handle_event(event)? {
            Some(completion) => {
                if !json {
                    print_completion(url, &completion);
                }
                summary.push(serde_json::json!({ "url": url, "result": completion }));
            }
            None => {
                if !json {
                    println!("{} ignored {} event {}", "·".dimmed(), event.event_type, event.id);
                }
                summary.push(serde_json::json!({
                    "id": event.id,
                    "event_type": event.event_type,
                    "result": { "status": "ignored" }
                }));
            }
        }
    }
    Ok(())
}

fn read_payload(path: Option<&PathBuf>) -> anyhow::Result<String> {
    match path {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read event payload {}", path.display())),
        None => {
            let mut payload = String::new();
            std::io::stdin()
                .read_to_string(&mut payload)
                .context("Failed to read event payload from stdin")?;
            Ok(payload)
        }
    }
}

fn print_completion(url: &str, completion: &Completion) {
    match completion {
        Completion::Stored { destination, content_type, width, height, bytes } => {
            println!(
                "{} stored {} ({}x{}, {}, {} bytes)",
                "✓".green(),
                destination,
                width,
                height,
                content_type,
                bytes
            );
        }
        Completion::Skipped { content_type } => {
            println!(
                "{} skipped {} (no encoder, content type {})",
                "-".yellow(),
                url,
                content_type
            );
        }
    }
}
