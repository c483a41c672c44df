//! JSON file source, plus change notification for `--watch`.
//!
//! The watcher observes the file's parent directory rather than the file
//! itself, so editors that save by writing a new file and renaming it over
//! the old one still trigger a reload.

use crate::{payload, FeedError};
use flatsearch_core::Listing;
use notify::{EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use std::path::{Path, PathBuf};
use tokio::sync::mpsc;

pub async fn read(path: &Path) -> Result<Vec<Listing>, FeedError> {
    let bytes = tokio::fs::read(path).await.map_err(|source| FeedError::File {
        path: path.to_path_buf(),
        source,
    })?;
    let listings = payload::decode(&bytes)?;
    tracing::debug!(path = %path.display(), count = listings.len(), "file: loaded");
    Ok(listings)
}

/// Send `()` on `tx` whenever `path` is created or modified.
///
/// The returned watcher must be kept alive for as long as notifications are
/// wanted; dropping it stops the watch.
pub fn watch(path: &Path, tx: mpsc::UnboundedSender<()>) -> Result<RecommendedWatcher, FeedError> {
    let target = path.to_path_buf();
    let dir = watch_dir(path);
    let watch_err = |source| FeedError::Watch {
        path: path.to_path_buf(),
        source,
    };

    let mut watcher = notify::recommended_watcher(move |res: notify::Result<notify::Event>| {
        match res {
            Ok(event) if is_change(&event.kind) && touches(&event.paths, &target) => {
                tracing::debug!(path = %target.display(), kind = ?event.kind, "file: changed");
                let _ = tx.send(());
            }
            Ok(_) => {}
            Err(e) => tracing::warn!(error = %e, "file: watch error"),
        }
    })
    .map_err(watch_err)?;

    watcher
        .watch(&dir, RecursiveMode::NonRecursive)
        .map_err(watch_err)?;
    tracing::debug!(dir = %dir.display(), "file: watching");
    Ok(watcher)
}

fn watch_dir(path: &Path) -> PathBuf {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    }
}

fn is_change(kind: &EventKind) -> bool {
    kind.is_create() || kind.is_modify()
}

fn touches(paths: &[PathBuf], target: &Path) -> bool {
    paths
        .iter()
        .any(|p| p.file_name().is_some() && p.file_name() == target.file_name())
}
