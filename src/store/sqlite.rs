//! SQLite store
//!
//! Persists all resources in a single-table SQLite database. Useful when a
//! crawl should land in one artifact instead of a directory tree.

use crate::fetch::Content;
use crate::store::{ResourceStore, StoreError, StoreResult};
use crate::url::ResourceId;
use chrono::Utc;
use rusqlite::{params, Connection, OptionalExtension};
use std::path::Path;
use std::sync::Mutex;

/// SQLite-backed [`ResourceStore`]
pub struct SqliteStore {
    conn: Mutex<Connection>,
}

impl SqliteStore {
    /// Opens or creates a store at the given database path.
    pub fn new(path: &Path) -> StoreResult<Self> {
        let conn = Connection::open(path)?;

        conn.execute_batch(
            "
            PRAGMA journal_mode = WAL;
            PRAGMA synchronous = NORMAL;
            PRAGMA temp_store = MEMORY;
        ",
        )?;

        Self::from_connection(conn)
    }

    /// Creates an in-memory store (for testing)
    #[cfg(test)]
    pub fn new_in_memory() -> StoreResult<Self> {
        Self::from_connection(Connection::open_in_memory()?)
    }

    fn from_connection(conn: Connection) -> StoreResult<Self> {
        conn.execute(
            "CREATE TABLE IF NOT EXISTS resources (
                key        TEXT PRIMARY KEY,
                url        TEXT NOT NULL,
                body       BLOB NOT NULL,
                fetched_at TEXT NOT NULL
            )",
            [],
        )?;

        Ok(Self {
            conn: Mutex::new(conn),
        })
    }
}

impl ResourceStore for SqliteStore {
    fn exists(&self, id: &ResourceId) -> StoreResult<bool> {
        let conn = self.conn.lock().unwrap();
        let found: Option<i64> = conn
            .query_row(
                "SELECT 1 FROM resources WHERE key = ?1",
                params![id.storage_key()],
                |row| row.get(0),
            )
            .optional()?;
        Ok(found.is_some())
    }

    fn read(&self, id: &ResourceId) -> StoreResult<Content> {
        let conn = self.conn.lock().unwrap();
        let body: Option<Vec<u8>> = conn
            .query_row(
                "SELECT body FROM resources WHERE key = ?1",
                params![id.storage_key()],
                |row| row.get(0),
            )
            .optional()?;

        match body {
            Some(bytes) => Ok(Content::new(bytes)),
            None => Err(StoreError::NotFound {
                key: id.storage_key(),
            }),
        }
    }

    fn write(&self, id: &ResourceId, content: &Content) -> StoreResult<()> {
        let conn = self.conn.lock().unwrap();
        conn.execute(
            "INSERT OR REPLACE INTO resources (key, url, body, fetched_at)
             VALUES (?1, ?2, ?3, ?4)",
            params![
                id.storage_key(),
                id.as_str(),
                content.as_bytes(),
                Utc::now().to_rfc3339(),
            ],
        )?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(path: &str) -> ResourceId {
        ResourceId::parse(&format!("https://example.com{}", path)).unwrap()
    }

    #[test]
    fn test_roundtrip() {
        let store = SqliteStore::new_in_memory().unwrap();

        let id = id("/page");
        assert!(!store.exists(&id).unwrap());

        store.write(&id, &Content::from("body")).unwrap();
        assert!(store.exists(&id).unwrap());
        assert_eq!(store.read(&id).unwrap().text(), "body");
    }

    #[test]
    fn test_read_missing_is_not_found() {
        let store = SqliteStore::new_in_memory().unwrap();
        assert!(matches!(
            store.read(&id("/absent")),
            Err(StoreError::NotFound { .. })
        ));
    }

    #[test]
    fn test_open_on_disk() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("cache.db");

        {
            let store = SqliteStore::new(&path).unwrap();
            store.write(&id("/page"), &Content::from("persisted")).unwrap();
        }

        // Reopen and confirm the entry survived.
        let store = SqliteStore::new(&path).unwrap();
        assert_eq!(store.read(&id("/page")).unwrap().text(), "persisted");
    }
}
