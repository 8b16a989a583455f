//! Resource stores
//!
//! A [`ResourceStore`] maps resource identifiers to previously fetched
//! content. Within one crawl run the visited tracker guarantees at most one
//! writer per identifier, so implementations only need to tolerate
//! concurrent writes to *different* identifiers.

mod fs;
mod memory;
mod sqlite;

pub use fs::FsStore;
pub use memory::MemoryStore;
pub use sqlite::SqliteStore;

use crate::fetch::Content;
use crate::url::ResourceId;
use thiserror::Error;

/// Errors that can occur during store operations
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("No stored content for {key}")]
    NotFound { key: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),
}

/// Result type for store operations
pub type StoreResult<T> = Result<T, StoreError>;

/// Write-once cache of fetched content, keyed by resource identifier.
///
/// Write failures are reported, never retried.
pub trait ResourceStore: Send + Sync {
    /// Checks whether content for this identifier has been persisted.
    fn exists(&self, id: &ResourceId) -> StoreResult<bool>;

    /// Reads previously persisted content.
    fn read(&self, id: &ResourceId) -> StoreResult<Content>;

    /// Persists content for this identifier.
    fn write(&self, id: &ResourceId, content: &Content) -> StoreResult<()>;
}
