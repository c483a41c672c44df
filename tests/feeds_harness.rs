//! Record source integration harness.
//!
//! # What this covers
//!
//! - **File source**: envelope and bare-array files, missing files, reload.
//! - **HTTP source** against an in-process `axum` fake of the listings
//!   backend: bearer token handling, 403 → `Forbidden`, other failures →
//!   `Status`, background reloads delivered over the update channel.
//! - **Watch**: rewriting a watched file signals a change.
//!
//! # Running
//!
//! ```sh
//! cargo test --test feeds_harness
//! ```

mod common;

use axum::http::StatusCode;
use common::fake_backend::FakeBackend;
use common::*;
use flatsearch_core::{Document, Listing};
use flatsearch_feeds::{spawn_reload, FeedError, FeedUpdate, HttpSource, Source};
use pretty_assertions::assert_eq;
use serde_json::json;
use std::io::Write;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;

fn listing_ids(listings: &[Listing]) -> Vec<i64> {
    ids(listings.iter().map(Document::document))
}

fn write_temp(body: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(body.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}

// ---------------------------------------------------------------------------
// File source
// ---------------------------------------------------------------------------

#[tokio::test]
async fn file_envelope_loads_typed_flats() {
    let file = write_temp(&sample_envelope_json());
    let listings = Source::File(file.path().to_path_buf()).load().await.unwrap();

    assert_eq!(listing_ids(&listings), vec![1, 2, 3, 4, 5]);
    // Garden Studio has no house, so it is not a complete flat.
    let typed: Vec<bool> = listings.iter().map(|l| l.flat().is_some()).collect();
    assert_eq!(typed, vec![true, true, true, false, true]);
}

#[tokio::test]
async fn file_bare_array_loads() {
    let file = write_temp(&json!(sample_flats()).to_string());
    let listings = Source::File(file.path().to_path_buf()).load().await.unwrap();
    assert_eq!(listings.len(), 5);
}

#[tokio::test]
async fn missing_file_names_the_path() {
    let err = Source::File("/nonexistent/flats.json".into())
        .load()
        .await
        .unwrap_err();
    assert!(matches!(err, FeedError::File { .. }));
    assert!(err.to_string().contains("/nonexistent/flats.json"));
}

#[tokio::test]
async fn wrong_top_level_shape_is_rejected() {
    let file = write_temp(r#""just a string""#);
    let err = Source::File(file.path().to_path_buf()).load().await.unwrap_err();
    assert!(matches!(err, FeedError::Shape("a string")));
}

#[tokio::test]
async fn file_reload_sees_new_contents() {
    let mut file = write_temp(r#"[{"id":1}]"#);
    let source = Source::File(file.path().to_path_buf());
    assert_eq!(source.load().await.unwrap().len(), 1);

    file.as_file_mut().set_len(0).unwrap();
    std::fs::write(file.path(), r#"{"flats":[{"id":1},{"id":2}]}"#).unwrap();
    assert_eq!(source.reload().await.unwrap().len(), 2);
}

// ---------------------------------------------------------------------------
// HTTP source
// ---------------------------------------------------------------------------

#[tokio::test]
async fn http_sends_bearer_token() {
    let backend = FakeBackend::start(sample_envelope()).await.unwrap();
    backend.require_token("s3cret").await;

    let source = HttpSource::new(&backend.base_url(), Some("s3cret".to_string())).unwrap();
    let listings = source.read().await.unwrap();

    assert_eq!(listing_ids(&listings), vec![1, 2, 3, 4, 5]);
    assert_eq!(backend.seen_auth().await, vec![Some("Bearer s3cret".to_string())]);
}

#[tokio::test]
async fn http_without_token_sends_no_header() {
    let backend = FakeBackend::start(json!([])).await.unwrap();
    let source = HttpSource::new(&backend.base_url(), None).unwrap();
    assert!(source.read().await.unwrap().is_empty());
    assert_eq!(backend.seen_auth().await, vec![None]);
}

#[tokio::test]
async fn http_403_is_forbidden() {
    let backend = FakeBackend::start(sample_envelope()).await.unwrap();
    backend.require_token("s3cret").await;

    let source = HttpSource::new(&backend.base_url(), Some("stale".to_string())).unwrap();
    assert!(matches!(source.read().await, Err(FeedError::Forbidden)));
}

#[tokio::test]
async fn http_server_error_keeps_status() {
    let backend = FakeBackend::start(sample_envelope()).await.unwrap();
    backend.fail_with(StatusCode::INTERNAL_SERVER_ERROR).await;

    let source = HttpSource::new(&backend.base_url(), None).unwrap();
    assert!(matches!(source.read().await, Err(FeedError::Status(500))));
}

#[tokio::test]
async fn http_envelope_with_null_flats_is_empty() {
    let backend = FakeBackend::start(json!({ "flats": null })).await.unwrap();
    let source = HttpSource::new(&backend.base_url(), None).unwrap();
    assert!(source.read().await.unwrap().is_empty());
}

#[tokio::test]
async fn unreachable_backend_is_a_transport_error() {
    // Bind and drop to get a port nothing listens on.
    let port = std::net::TcpListener::bind("127.0.0.1:0")
        .unwrap()
        .local_addr()
        .unwrap()
        .port();
    let source = HttpSource::new(&format!("http://127.0.0.1:{port}/api"), None).unwrap();
    assert!(matches!(source.read().await, Err(FeedError::Http(_))));
}

#[tokio::test]
async fn background_reload_reports_each_outcome() {
    let backend = FakeBackend::start(sample_envelope()).await.unwrap();
    let source = Arc::new(Source::Http(
        HttpSource::new(&backend.base_url(), None).unwrap(),
    ));
    let (tx, mut rx) = mpsc::unbounded_channel();
    let handle = tokio::runtime::Handle::current();

    spawn_reload(&handle, Arc::clone(&source), tx.clone());
    match rx.recv().await {
        Some(FeedUpdate::Loaded(listings)) => assert_eq!(listings.len(), 5),
        other => panic!("expected loaded update, got {other:?}"),
    }

    backend.fail_with(StatusCode::FORBIDDEN).await;
    spawn_reload(&handle, source, tx);
    match rx.recv().await {
        Some(FeedUpdate::Failed(FeedError::Forbidden)) => {}
        other => panic!("expected forbidden update, got {other:?}"),
    }
}

// ---------------------------------------------------------------------------
// Watch
// ---------------------------------------------------------------------------

#[tokio::test]
async fn rewriting_a_watched_file_signals_a_change() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("flats.json");
    std::fs::write(&path, "[]").unwrap();

    let source = Source::File(path.clone());
    let (tx, mut rx) = mpsc::unbounded_channel();
    let _watcher = source.watch(tx).unwrap().expect("file sources are watchable");

    // Unrelated files in the same directory are ignored.
    std::fs::write(dir.path().join("other.json"), "[]").unwrap();
    std::fs::write(&path, sample_envelope_json()).unwrap();

    tokio::time::timeout(Duration::from_secs(5), rx.recv())
        .await
        .expect("change notification within 5s")
        .expect("watcher alive");
    assert_eq!(source.reload().await.unwrap().len(), 5);
}
