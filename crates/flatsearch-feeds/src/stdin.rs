//! Stdin source: the whole of stdin is one payload, read to EOF.

use crate::{payload, FeedError};
use flatsearch_core::Listing;
use tokio::io::{AsyncRead, AsyncReadExt};

pub async fn read() -> Result<Vec<Listing>, FeedError> {
    read_from(tokio::io::stdin()).await
}

pub async fn read_from<R: AsyncRead + Unpin>(mut reader: R) -> Result<Vec<Listing>, FeedError> {
    let mut bytes = Vec::new();
    reader
        .read_to_end(&mut bytes)
        .await
        .map_err(FeedError::Stdin)?;
    let listings = payload::decode(&bytes)?;
    tracing::debug!(count = listings.len(), "stdin: loaded");
    Ok(listings)
}
