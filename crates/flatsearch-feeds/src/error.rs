use std::path::PathBuf;
use thiserror::Error;

/// Failure to produce a record collection from a [`Source`](crate::Source).
#[derive(Debug, Error)]
pub enum FeedError {
    #[error("failed to read {path}: {source}")]
    File {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to read stdin: {0}")]
    Stdin(#[source] std::io::Error),
    #[error("payload is not valid JSON: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("expected an array of flats or an object with a `flats` array, got {0}")]
    Shape(&'static str),
    #[error("invalid backend url {0:?}: only http:// urls are supported")]
    InvalidUrl(String),
    #[error("failed to build request: {0}")]
    Request(#[from] hyper::http::Error),
    #[error("request failed: {0}")]
    Http(#[from] hyper_util::client::legacy::Error),
    #[error("failed to read response body: {0}")]
    Body(#[from] hyper::Error),
    #[error("access denied (403): the session token is missing or expired")]
    Forbidden,
    #[error("backend answered with status {0}")]
    Status(u16),
    #[error("{0} cannot be reloaded")]
    NotReloadable(String),
    #[error("failed to watch {path}: {source}")]
    Watch {
        path: PathBuf,
        #[source]
        source: notify::Error,
    },
}
