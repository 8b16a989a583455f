//! HTTP fetcher implementation
//!
//! Issues a single GET per resource and classifies failures into
//! [`FetchError`] kinds. Redirects are followed by the client; retry policy
//! is deliberately absent here.

use crate::fetch::{Content, FetchError, Fetcher};
use crate::url::ResourceId;
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;

/// Default user agent when none is configured
const DEFAULT_USER_AGENT: &str = concat!("spindrift/", env!("CARGO_PKG_VERSION"));

/// Builds an HTTP client with the crawler's standard configuration
///
/// # Arguments
///
/// * `user_agent` - The user agent string to present
///
/// # Returns
///
/// * `Ok(Client)` - Successfully built HTTP client
/// * `Err(reqwest::Error)` - Failed to build client
pub fn build_http_client(user_agent: &str) -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(user_agent)
        .timeout(Duration::from_secs(30))
        .connect_timeout(Duration::from_secs(10))
        .gzip(true)
        .brotli(true)
        .build()
}

/// HTTP-backed [`Fetcher`]
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    /// Creates a fetcher with the given user agent.
    pub fn new(user_agent: &str) -> Result<Self, FetchError> {
        Ok(Self {
            client: build_http_client(user_agent)?,
        })
    }

    /// Creates a fetcher with the crate's default user agent.
    pub fn with_defaults() -> Result<Self, FetchError> {
        Self::new(DEFAULT_USER_AGENT)
    }

    /// Wraps an existing client, e.g. one shared with other subsystems.
    pub fn from_client(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Fetcher for HttpFetcher {
    async fn fetch(&self, id: &ResourceId) -> Result<Content, FetchError> {
        let url = id.as_str();
        tracing::debug!("Fetching {}", url);

        let response = self
            .client
            .get(id.as_url().clone())
            .send()
            .await
            .map_err(|e| classify(url, e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let body = response.bytes().await.map_err(|e| classify(url, e))?;
        tracing::trace!("Fetched {} ({} bytes)", url, body.len());

        Ok(Content::new(body.to_vec()))
    }
}

/// Maps a reqwest error onto a fetch error kind
fn classify(url: &str, error: reqwest::Error) -> FetchError {
    if error.is_timeout() {
        FetchError::Timeout {
            url: url.to_string(),
        }
    } else if error.is_connect() {
        FetchError::Connect {
            url: url.to_string(),
        }
    } else {
        FetchError::Transport {
            url: url.to_string(),
            source: error,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_http_client() {
        assert!(build_http_client("TestAgent/1.0").is_ok());
    }

    #[test]
    fn test_fetcher_with_defaults() {
        assert!(HttpFetcher::with_defaults().is_ok());
    }

    #[tokio::test]
    async fn test_fetch_classifies_status() {
        use wiremock::matchers::{method, path};
        use wiremock::{Mock, MockServer, ResponseTemplate};

        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/missing"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let fetcher = HttpFetcher::with_defaults().unwrap();
        let id = ResourceId::parse(&format!("{}/missing", server.uri())).unwrap();

        match fetcher.fetch(&id).await {
            Err(FetchError::Status { status, .. }) => assert_eq!(status, 404),
            other => panic!("expected status error, got {:?}", other.map(|c| c.len())),
        }
    }

    #[tokio::test]
    async fn test_fetch_returns_body() {
        use wiremock::matchers::{method, path};
        use wiremock::{Mock, MockServer, ResponseTemplate};

        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/page"))
            .respond_with(ResponseTemplate::new(200).set_body_string("payload"))
            .mount(&server)
            .await;

        let fetcher = HttpFetcher::with_defaults().unwrap();
        let id = ResourceId::parse(&format!("{}/page", server.uri())).unwrap();

        let content = fetcher.fetch(&id).await.unwrap();
        assert_eq!(content.text(), "payload");
    }
}
