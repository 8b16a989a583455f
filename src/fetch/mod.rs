//! Fetching of raw resource content
//!
//! The crawl engine only depends on the [`Fetcher`] trait; [`HttpFetcher`]
//! is the default HTTP implementation. Fetch failures are classified into
//! [`FetchError`] kinds so the engine can report them without retrying.

mod http;

pub use http::{build_http_client, HttpFetcher};

use crate::url::ResourceId;
use async_trait::async_trait;
use std::borrow::Cow;
use thiserror::Error;

/// Immutable payload of a fetched resource.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Content(Vec<u8>);

impl Content {
    pub fn new(bytes: Vec<u8>) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Lossy text view of the payload, for link extraction.
    pub fn text(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.0)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<Vec<u8>> for Content {
    fn from(bytes: Vec<u8>) -> Self {
        Self(bytes)
    }
}

impl From<&str> for Content {
    fn from(text: &str) -> Self {
        Self(text.as_bytes().to_vec())
    }
}

/// Errors raised while fetching a resource
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("HTTP status {status} for {url}")]
    Status { url: String, status: u16 },

    #[error("Request timeout for {url}")]
    Timeout { url: String },

    #[error("Connection failed for {url}")]
    Connect { url: String },

    #[error("Transport error for {url}: {source}")]
    Transport { url: String, source: reqwest::Error },

    #[error("HTTP client error: {0}")]
    Client(#[from] reqwest::Error),
}

/// Retrieves raw content for a resource identifier.
///
/// Implementations decide their own retry policy; the crawl engine never
/// retries a failed fetch.
#[async_trait]
pub trait Fetcher: Send + Sync {
    async fn fetch(&self, id: &ResourceId) -> Result<Content, FetchError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_content_text_view() {
        let content = Content::from("hello");
        assert_eq!(content.text(), "hello");
        assert_eq!(content.as_bytes(), b"hello");
        assert_eq!(content.len(), 5);
        assert!(!content.is_empty());
    }

    #[test]
    fn test_content_lossy_text() {
        let content = Content::new(vec![0x68, 0x69, 0xff]);
        assert!(content.text().starts_with("hi"));
    }
}
