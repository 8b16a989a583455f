//! In-memory store, for tests and short-lived embedded use

use crate::fetch::Content;
use crate::store::{ResourceStore, StoreError, StoreResult};
use crate::url::ResourceId;
use std::collections::HashMap;
use std::sync::Mutex;

/// [`ResourceStore`] backed by a plain map, with no persistence.
#[derive(Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<String, Content>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored entries.
    pub fn len(&self) -> usize {
        self.entries.lock().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl ResourceStore for MemoryStore {
    fn exists(&self, id: &ResourceId) -> StoreResult<bool> {
        Ok(self.entries.lock().unwrap().contains_key(&id.storage_key()))
    }

    fn read(&self, id: &ResourceId) -> StoreResult<Content> {
        self.entries
            .lock()
            .unwrap()
            .get(&id.storage_key())
            .cloned()
            .ok_or_else(|| StoreError::NotFound {
                key: id.storage_key(),
            })
    }

    fn write(&self, id: &ResourceId, content: &Content) -> StoreResult<()> {
        self.entries
            .lock()
            .unwrap()
            .insert(id.storage_key(), content.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_roundtrip() {
        let store = MemoryStore::new();
        let id = ResourceId::parse("https://example.com/page").unwrap();

        assert!(!store.exists(&id).unwrap());
        store.write(&id, &Content::from("body")).unwrap();
        assert!(store.exists(&id).unwrap());
        assert_eq!(store.read(&id).unwrap().text(), "body");
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_read_missing_is_not_found() {
        let store = MemoryStore::new();
        let id = ResourceId::parse("https://example.com/absent").unwrap();
        assert!(matches!(
            store.read(&id),
            Err(StoreError::NotFound { .. })
        ));
    }
}
