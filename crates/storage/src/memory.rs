//! In-memory contact store
//!
//! No files, no fsync. All contacts are lost when the store is dropped.
//! Measures the harness and codec cost with storage overhead close to zero.

use dashmap::DashMap;
use tracing::debug;
use xport_core::{ContactId, ContactRecord};

use crate::error::{StoreError, StoreResult};
use crate::traits::ContactStore;

/// DashMap-backed store, advertised as `"memory"`
///
/// # Example
///
/// ```
/// use xport_core::ContactRecord;
/// use xport_storage::{ContactStore, MemoryStore};
///
/// let store = MemoryStore::new();
/// let ids = store.save_all(&[ContactRecord::default()]).unwrap();
/// assert_eq!(store.fetch_by_ids(&ids).unwrap().len(), 1);
/// store.delete_all(&ids).unwrap();
/// assert!(store.is_empty().unwrap());
/// ```
#[derive(Debug, Default)]
pub struct MemoryStore {
    contacts: DashMap<ContactId, ContactRecord>,
}

impl MemoryStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }
}

impl ContactStore for MemoryStore {
    fn backend_name(&self) -> &'static str {
        "memory"
    }

    fn save_all(&self, records: &[ContactRecord]) -> StoreResult<Vec<ContactId>> {
        let ids: Vec<ContactId> = records
            .iter()
            .map(|record| {
                let id = ContactId::new();
                self.contacts.insert(id, record.clone());
                id
            })
            .collect();
        debug!(target: "xport::store", backend = "memory", count = ids.len(), "saved contacts");
        Ok(ids)
    }

    fn fetch_by_ids(&self, ids: &[ContactId]) -> StoreResult<Vec<ContactRecord>> {
        ids.iter()
            .map(|id| {
                self.contacts
                    .get(id)
                    .map(|entry| entry.value().clone())
                    .ok_or(StoreError::NotFound(*id))
            })
            .collect()
    }

    fn delete_all(&self, ids: &[ContactId]) -> StoreResult<()> {
        if let Some(missing) = ids.iter().find(|id| !self.contacts.contains_key(*id)) {
            return Err(StoreError::NotFound(*missing));
        }
        for id in ids {
            self.contacts.remove(id);
        }
        debug!(target: "xport::store", backend = "memory", count = ids.len(), "deleted contacts");
        Ok(())
    }

    fn len(&self) -> StoreResult<usize> {
        Ok(self.contacts.len())
    }

    fn is_persistent(&self) -> bool {
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use xport_core::Name;

    fn named(first: &str) -> ContactRecord {
        ContactRecord {
            name: Name {
                first: first.to_string(),
                last: "x".to_string(),
            },
            ..ContactRecord::default()
        }
    }

    #[test]
    fn test_save_returns_one_id_per_record() {
        let store = MemoryStore::new();
        let ids = store.save_all(&[named("a"), named("b"), named("c")]).unwrap();
        assert_eq!(ids.len(), 3);
        assert_eq!(store.len().unwrap(), 3);
    }

    #[test]
    fn test_fetch_preserves_id_order() {
        let store = MemoryStore::new();
        let mut ids = store.save_all(&[named("a"), named("b"), named("c")]).unwrap();
        ids.reverse();
        let firsts: Vec<String> = store
            .fetch_by_ids(&ids)
            .unwrap()
            .into_iter()
            .map(|r| r.name.first)
            .collect();
        assert_eq!(firsts, vec!["c", "b", "a"]);
    }

    #[test]
    fn test_fetch_missing_fails_as_unit() {
        let store = MemoryStore::new();
        let mut ids = store.save_all(&[named("a")]).unwrap();
        let missing = ContactId::new();
        ids.push(missing);
        let err = store.fetch_by_ids(&ids).unwrap_err();
        assert!(matches!(err, StoreError::NotFound(id) if id == missing));
    }

    #[test]
    fn test_delete_is_all_or_nothing() {
        let store = MemoryStore::new();
        let mut ids = store.save_all(&[named("a"), named("b")]).unwrap();
        ids.push(ContactId::new());
        assert!(store.delete_all(&ids).is_err());
        assert_eq!(store.len().unwrap(), 2);

        ids.pop();
        store.delete_all(&ids).unwrap();
        assert!(store.is_empty().unwrap());
    }

    #[test]
    fn test_empty_batches() {
        let store = MemoryStore::new();
        assert!(store.save_all(&[]).unwrap().is_empty());
        assert!(store.fetch_by_ids(&[]).unwrap().is_empty());
        store.delete_all(&[]).unwrap();
    }

    #[test]
    fn test_memory_not_persistent() {
        let store = MemoryStore::new();
        assert!(!store.is_persistent());
        assert_eq!(store.backend_name(), "memory");
    }
}
