//! flatsearch-feeds: record sources for flatsearch.
//!
//! Each source produces the full, unfiltered collection of
//! [`Listing`](flatsearch_core::Listing)s in one go. Sources are async; the
//! TUI runs reloads on background tasks and receives the outcome as a
//! [`FeedUpdate`] over a `tokio` channel.

pub mod error;
pub mod file;
pub mod http;
pub mod payload;
pub mod stdin;

pub use error::FeedError;
pub use http::HttpSource;
pub use notify::RecommendedWatcher as FileWatcher;

use flatsearch_core::Listing;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::mpsc;

/// Where the record collection comes from.
#[derive(Debug, Clone)]
pub enum Source {
    File(PathBuf),
    Stdin,
    Http(HttpSource),
}

impl Source {
    /// Load the full collection.
    pub async fn load(&self) -> Result<Vec<Listing>, FeedError> {
        match self {
            Source::File(path) => file::read(path).await,
            Source::Stdin => stdin::read().await,
            Source::Http(source) => source.read().await,
        }
    }

    /// Load again after the initial load. Stdin can only be consumed once.
    pub async fn reload(&self) -> Result<Vec<Listing>, FeedError> {
        if !self.is_reloadable() {
            return Err(FeedError::NotReloadable(self.to_string()));
        }
        self.load().await
    }

    pub fn is_reloadable(&self) -> bool {
        !matches!(self, Source::Stdin)
    }

    /// Watch the source for changes, sending `()` on `tx` for each one.
    /// Only file sources can be watched; others return `Ok(None)`.
    pub fn watch(&self, tx: mpsc::UnboundedSender<()>) -> Result<Option<FileWatcher>, FeedError> {
        match self {
            Source::File(path) => file::watch(path, tx).map(Some),
            Source::Stdin | Source::Http(_) => Ok(None),
        }
    }
}

impl std::fmt::Display for Source {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Source::File(path) => write!(f, "{}", path.display()),
            Source::Stdin => write!(f, "stdin"),
            Source::Http(source) => write!(f, "{}", source.uri()),
        }
    }
}

/// Outcome of a background load.
#[derive(Debug)]
pub enum FeedUpdate {
    Loaded(Vec<Listing>),
    Failed(FeedError),
}

impl From<Result<Vec<Listing>, FeedError>> for FeedUpdate {
    fn from(result: Result<Vec<Listing>, FeedError>) -> Self {
        match result {
            Ok(listings) => FeedUpdate::Loaded(listings),
            Err(e) => FeedUpdate::Failed(e),
        }
    }
}

/// Reload `source` on the runtime behind `handle` and send the outcome on
/// `tx`. A closed receiver is ignored.
pub fn spawn_reload(
    handle: &tokio::runtime::Handle,
    source: Arc<Source>,
    tx: mpsc::UnboundedSender<FeedUpdate>,
) {
    handle.spawn(async move {
        let update = FeedUpdate::from(source.reload().await);
        if let FeedUpdate::Failed(ref e) = update {
            tracing::warn!(source = %source, error = %e, "reload failed");
        }
        let _ = tx.send(update);
    });
}
