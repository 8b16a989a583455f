//! Spindrift: a concurrent, deduplicated link crawler
//!
//! This crate implements a depth-bounded recursive crawler that memoizes
//! fetched content on disk and guarantees each resource is fetched at most
//! once per run, even when concurrent branches discover it simultaneously.

pub mod config;
pub mod engine;
pub mod extract;
pub mod fetch;
pub mod store;
pub mod url;
pub mod visited;

use thiserror::Error;

/// Main error type for spindrift operations
#[derive(Debug, Error)]
pub enum SpindriftError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Fetch error: {0}")]
    Fetch(#[from] fetch::FetchError),

    #[error("Store error: {0}")]
    Store(#[from] store::StoreError),

    #[error("Extraction error: {0}")]
    Extract(#[from] extract::ExtractError),

    #[error("URL error: {0}")]
    Url(#[from] UrlError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid seed URL in config: {0}")]
    InvalidSeed(String),
}

/// URL-specific errors
#[derive(Debug, Error)]
pub enum UrlError {
    #[error("Failed to parse URL: {0}")]
    Parse(String),

    #[error("Invalid URL scheme: {0}")]
    InvalidScheme(String),

    #[error("Missing host in URL")]
    MissingHost,
}

/// Result type alias for spindrift operations
pub type Result<T> = std::result::Result<T, SpindriftError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

/// Result type alias for URL operations
pub type UrlResult<T> = std::result::Result<T, UrlError>;

// Re-export commonly used types
pub use config::Config;
pub use engine::{CrawlEngine, CrawlOutcome, CrawlReport, EngineOptions, SkipReason};
pub use extract::{HtmlLinkExtractor, LinkExtractor};
pub use fetch::{Content, Fetcher, HttpFetcher};
pub use store::{FsStore, MemoryStore, ResourceStore, SqliteStore};
pub use url::ResourceId;
pub use visited::{Claim, VisitedTracker};
