//! Command-line behavior of the thumbnailer binary.

use assert_cmd::Command;
use image::{ImageOutputFormat, Rgb, RgbImage};
use predicates::prelude::*;
use std::io::Cursor;

fn thumbnailer() -> Command {
    let mut cmd = Command::cargo_bin("thumbnailer").unwrap();
    cmd.env_remove("THUMBNAIL_CONTAINER_NAME")
        .env_remove("AzureWebJobsStorage")
        .env_remove("RUST_LOG")
        .env_remove("THUMBNAILER_LOG_LEVEL")
        .env("NO_COLOR", "1");
    cmd
}

fn write_png(path: &std::path::Path, width: u32, height: u32) {
    let mut out = Cursor::new(Vec::new());
    image::DynamicImage::ImageRgb8(RgbImage::from_pixel(width, height, Rgb([10, 20, 30])))
        .write_to(&mut out, ImageOutputFormat::Png)
        .unwrap();
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    std::fs::write(path, out.into_inner()).unwrap();
}

fn event(url: &str) -> String {
    format!(r#"{{"eventType": "Microsoft.Storage.BlobCreated", "data": {{"url": "{url}"}}}}"#)
}

#[test]
fn resolve_supported_extension() {
    thumbnailer()
        .args(["resolve", ".JPG"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Codec: JpegEncoder"))
        .stdout(predicate::str::contains("Content-Type: image/jpeg"));
}

#[test]
fn resolve_unsupported_extension() {
    thumbnailer()
        .args(["resolve", ".bmp"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Codec: unsupported"))
        .stdout(predicate::str::contains("Content-Type: application/octet-stream"));
}

#[test]
fn dimensions_command() {
    thumbnailer()
        .args(["dimensions", "1000", "500"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Divisor: 10"))
        .stdout(predicate::str::contains("Thumbnail: 100x50"));
}

#[test]
fn dimensions_with_custom_target() {
    thumbnailer()
        .args(["dimensions", "1000", "500", "--target", "50"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Divisor: 20"))
        .stdout(predicate::str::contains("Thumbnail: 50x25"));
}

#[test]
fn handle_event_from_stdin() {
    let dir = tempfile::tempdir().unwrap();
    write_png(&dir.path().join("images/cat.png"), 400, 200);

    thumbnailer()
        .args(["handle", "--container", "thumbnails", "--connection"])
        .arg(dir.path())
        .write_stdin(event("https://acct.blob.core.windows.net/images/cat.png"))
        .assert()
        .success()
        .stdout(predicate::str::contains("stored thumbnails/cat.png (100x50, image/png"));

    assert!(dir.path().join("thumbnails/cat.png").is_file());
}

#[test]
fn handle_json_summary_reports_skipped() {
    let dir = tempfile::tempdir().unwrap();
    write_png(&dir.path().join("images/scan.bmp"), 50, 50);
    let payload = dir.path().join("event.json");
    std::fs::write(&payload, event("https://acct.blob.core.windows.net/images/scan.bmp")).unwrap();

    thumbnailer()
        .args(["handle", "--json", "--container", "thumbnails", "--connection"])
        .arg(dir.path())
        .arg("--event")
        .arg(&payload)
        .assert()
        .success()
        .stdout(predicate::str::contains(r#""status": "skipped""#));

    assert!(!dir.path().join("thumbnails").exists());
}

#[test]
fn handle_fails_without_connection() {
    thumbnailer()
        .args(["handle", "--container", "thumbnails"])
        .write_stdin(event("https://acct.blob.core.windows.net/images/cat.png"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("Storage connection is not configured"));
}

#[test]
fn handle_rejects_malformed_payload() {
    thumbnailer()
        .args(["handle", "--container", "thumbnails", "--connection", "."])
        .write_stdin("not an event")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to parse event payload"))
        .stderr(predicate::str::contains("Invalid event payload"));
}

#[test]
fn handle_prints_metrics() {
    let dir = tempfile::tempdir().unwrap();
    write_png(&dir.path().join("images/cat.png"), 300, 300);

    thumbnailer()
        .args(["handle", "--metrics", "--container", "thumbnails", "--connection"])
        .arg(dir.path())
        .write_stdin(event("https://acct.blob.core.windows.net/images/cat.png"))
        .assert()
        .success()
        .stdout(predicate::str::contains(r#""thumbnails.stored": 1"#))
        .stdout(predicate::str::contains("thumbnails.duration_ms"))
        .stdout(predicate::str::contains("session_id"));
}

#[test]
fn json_logs_are_emitted_on_stderr() {
    let dir = tempfile::tempdir().unwrap();
    write_png(&dir.path().join("images/cat.png"), 200, 100);

    thumbnailer()
        .args(["--json-logs", "handle", "--container", "thumbnails", "--connection"])
        .arg(dir.path())
        .write_stdin(event("https://acct.blob.core.windows.net/images/cat.png"))
        .assert()
        .success()
        .stderr(predicate::str::contains(r#""level":"INFO""#))
        .stderr(predicate::str::contains(r#""message":"Stored thumbnail""#));
}

#[test]
fn handle_batch_ignores_events_without_url() {
    let dir = tempfile::tempdir().unwrap();
    write_png(&dir.path().join("images/cat.png"), 200, 100);
    let validation = r#"{"id": "v1", "eventType": "Microsoft.EventGrid.SubscriptionValidationEvent", "data": {"validationCode": "abc"}}"#;
    let payload = format!(
        "[{validation}, {}]",
        event("https://acct.blob.core.windows.net/images/cat.png")
    );

    thumbnailer()
        .args(["handle", "--container", "thumbnails", "--connection"])
        .arg(dir.path())
        .write_stdin(payload)
        .assert()
        .success()
        .stdout(predicate::str::contains("ignored Microsoft.EventGrid.SubscriptionValidationEvent"))
        .stdout(predicate::str::contains("stored thumbnails/cat.png"));

    assert!(dir.path().join("thumbnails/cat.png").is_file());
}

#[test]
fn failed_batch_keeps_partial_json_summary() {
    let dir = tempfile::tempdir().unwrap();
    write_png(&dir.path().join("images/first.png"), 200, 100);
    let payload = format!(
        "[{}, {}]",
        event("https://acct.blob.core.windows.net/images/first.png"),
        event("https://acct.blob.core.windows.net/images/missing.png")
    );

    thumbnailer()
        .args(["handle", "--json", "--container", "thumbnails", "--connection"])
        .arg(dir.path())
        .write_stdin(payload)
        .assert()
        .failure()
        .stdout(predicate::str::contains(r#""status": "stored""#))
        .stdout(predicate::str::contains("first.png"))
        .stderr(predicate::str::contains("Object not found"));

    assert!(dir.path().join("thumbnails/first.png").is_file());
}
