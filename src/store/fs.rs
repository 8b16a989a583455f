//! Filesystem store
//!
//! Persists each resource as one file under a cache directory, named by the
//! identifier's injective storage key.

use crate::fetch::Content;
use crate::store::{ResourceStore, StoreError, StoreResult};
use crate::url::ResourceId;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// File-per-resource [`ResourceStore`]
pub struct FsStore {
    root: PathBuf,
}

impl FsStore {
    /// Opens a store rooted at `root`, creating the directory if needed.
    pub fn new(root: &Path) -> StoreResult<Self> {
        fs::create_dir_all(root)?;
        Ok(Self {
            root: root.to_path_buf(),
        })
    }

    fn entry_path(&self, id: &ResourceId) -> PathBuf {
        self.root.join(id.storage_key())
    }
}

impl ResourceStore for FsStore {
    fn exists(&self, id: &ResourceId) -> StoreResult<bool> {
        Ok(self.entry_path(id).is_file())
    }

    fn read(&self, id: &ResourceId) -> StoreResult<Content> {
        match fs::read(self.entry_path(id)) {
            Ok(bytes) => Ok(Content::new(bytes)),
            Err(e) if e.kind() == ErrorKind::NotFound => Err(StoreError::NotFound {
                key: id.storage_key(),
            }),
            Err(e) => Err(e.into()),
        }
    }

    fn write(&self, id: &ResourceId, content: &Content) -> StoreResult<()> {
        fs::write(self.entry_path(id), content.as_bytes())?;
        tracing::trace!("Stored {} ({} bytes)", id, content.len());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn id(path: &str) -> ResourceId {
        ResourceId::parse(&format!("https://example.com{}", path)).unwrap()
    }

    #[test]
    fn test_roundtrip() {
        let dir = TempDir::new().unwrap();
        let store = FsStore::new(dir.path()).unwrap();

        let id = id("/page");
        assert!(!store.exists(&id).unwrap());

        store.write(&id, &Content::from("body")).unwrap();
        assert!(store.exists(&id).unwrap());
        assert_eq!(store.read(&id).unwrap().text(), "body");
    }

    #[test]
    fn test_read_missing_is_not_found() {
        let dir = TempDir::new().unwrap();
        let store = FsStore::new(dir.path()).unwrap();

        assert!(matches!(
            store.read(&id("/absent")),
            Err(StoreError::NotFound { .. })
        ));
    }

    #[test]
    fn test_distinct_ids_distinct_files() {
        let dir = TempDir::new().unwrap();
        let store = FsStore::new(dir.path()).unwrap();

        store.write(&id("/a"), &Content::from("a")).unwrap();
        store.write(&id("/b"), &Content::from("b")).unwrap();

        assert_eq!(store.read(&id("/a")).unwrap().text(), "a");
        assert_eq!(store.read(&id("/b")).unwrap().text(), "b");
    }

    #[test]
    fn test_creates_missing_root() {
        let dir = TempDir::new().unwrap();
        let nested = dir.path().join("cache").join("deep");
        let store = FsStore::new(&nested).unwrap();
        store.write(&id("/page"), &Content::from("x")).unwrap();
        assert!(nested.exists());
    }
}
