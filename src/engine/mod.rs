//! Crawl engine and reporting
//!
//! This module contains the traversal core:
//! - Atomic claim-or-skip admission per identifier
//! - Read-through cache access with uniform deferred completion
//! - Concurrent fork-join dispatch of child crawls
//! - Aggregation of per-identifier outcomes into a subtree report

mod crawl;
mod report;

pub use crawl::{CrawlEngine, EngineOptions};
pub use report::{CrawlOutcome, CrawlReport, SkipReason};

use crate::config::{Config, StorageBackend};
use crate::extract::HtmlLinkExtractor;
use crate::fetch::HttpFetcher;
use crate::store::{FsStore, ResourceStore, SqliteStore};
use crate::SpindriftError;
use std::path::Path;
use std::sync::Arc;

/// Wires up an engine from a configuration: HTTP fetcher, HTML link
/// extractor, and the configured store backend.
pub fn build_engine(config: &Config) -> Result<CrawlEngine, SpindriftError> {
    let fetcher = HttpFetcher::new(&config.fetch.user_agent)?;
    let extractor = HtmlLinkExtractor::new()?;

    let store: Arc<dyn ResourceStore> = match config.storage.backend {
        StorageBackend::Fs => Arc::new(FsStore::new(Path::new(&config.storage.cache_dir))?),
        StorageBackend::Sqlite => {
            Arc::new(SqliteStore::new(Path::new(&config.storage.database_path))?)
        }
    };

    let options = EngineOptions {
        max_concurrent_fetches: config.crawler.max_concurrent_fetches,
        max_pages: config.crawler.max_pages,
    };

    Ok(CrawlEngine::with_options(
        Arc::new(fetcher),
        Arc::new(extractor),
        store,
        options,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_build_engine_fs_backend() {
        let dir = TempDir::new().unwrap();
        let mut config = Config::default();
        config.storage.cache_dir = dir.path().join("cache").display().to_string();

        assert!(build_engine(&config).is_ok());
    }

    #[test]
    fn test_build_engine_sqlite_backend() {
        let dir = TempDir::new().unwrap();
        let mut config = Config::default();
        config.storage.backend = StorageBackend::Sqlite;
        config.storage.database_path = dir.path().join("cache.db").display().to_string();

        assert!(build_engine(&config).is_ok());
    }
}
