//! Listings backend source: `GET {base}/flats/flat-list`.
//!
//! Requests carry `Authorization: Bearer <token>` when a token is configured.
//! A 403 means the session is gone and maps to [`FeedError::Forbidden`] so
//! callers can tell the user to sign in again instead of showing a generic
//! status error.

use crate::{payload, FeedError};
use flatsearch_core::Listing;
use http_body_util::{BodyExt, Empty};
use hyper::body::Bytes;
use hyper::header::{ACCEPT, AUTHORIZATION};
use hyper::{Request, StatusCode, Uri};
use hyper_util::client::legacy::{connect::HttpConnector, Client};
use hyper_util::rt::TokioExecutor;

/// Path of the flat list endpoint, relative to the backend base URL.
pub const FLAT_LIST_PATH: &str = "/flats/flat-list";

#[derive(Debug, Clone)]
pub struct HttpSource {
    uri: Uri,
    token: Option<String>,
}

impl HttpSource {
    /// `base_url` is the API root, e.g. `http://localhost:8080/api`.
    pub fn new(base_url: &str, token: Option<String>) -> Result<Self, FeedError> {
        let invalid = || FeedError::InvalidUrl(base_url.to_string());
        let uri: Uri = format!("{}{}", base_url.trim_end_matches('/'), FLAT_LIST_PATH)
            .parse()
            .map_err(|_| invalid())?;
        if uri.scheme_str() != Some("http") || uri.host().is_none() {
            return Err(invalid());
        }
        Ok(Self {
            uri,
            token: token.filter(|t| !t.is_empty()),
        })
    }

    /// Full endpoint URI.
    pub fn uri(&self) -> &Uri {
        &self.uri
    }

    pub async fn read(&self) -> Result<Vec<Listing>, FeedError> {
        let client: Client<HttpConnector, Empty<Bytes>> =
            Client::builder(TokioExecutor::new()).build_http();

        let mut request = Request::get(self.uri.clone()).header(ACCEPT, "application/json");
        if let Some(token) = &self.token {
            request = request.header(AUTHORIZATION, format!("Bearer {token}"));
        }
        let request = request.body(Empty::<Bytes>::new())?;

        tracing::debug!(uri = %self.uri, auth = self.token.is_some(), "http: fetching");
        let response = client.request(request).await?;
        match response.status() {
            StatusCode::FORBIDDEN => return Err(FeedError::Forbidden),
            status if !status.is_success() => return Err(FeedError::Status(status.as_u16())),
            _ => {}
        }

        let body = response.into_body().collect().await?.to_bytes();
        let listings = payload::decode(&body)?;
        tracing::debug!(uri = %self.uri, count = listings.len(), "http: loaded");
        Ok(listings)
    }
}
