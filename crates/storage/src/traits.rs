//! Backend abstraction for contact storage
//!
//! Every backend implements `ContactStore`. The harness holds exactly one
//! store for a whole run and calls it from a single thread, but stores are
//! `Send + Sync` and take `&self` so they can be shared like the engine's
//! durability modes.
//!
//! ```text
//! Import:  save_all(records)   -> [id; n]
//! Export:  fetch_by_ids(ids)   -> [record; n]
//! Delete:  delete_all(ids)
//! ```

use xport_core::{ContactId, ContactRecord};

use crate::error::StoreResult;

/// Contact storage contract
pub trait ContactStore: Send + Sync {
    /// Backend name as advertised by `available_backends`
    fn backend_name(&self) -> &'static str;

    /// Save every record, returning the assigned ids in input order
    ///
    /// # Errors
    ///
    /// Returns an error if any record cannot be stored. Records saved before
    /// the failure may remain in the store.
    fn save_all(&self, records: &[ContactRecord]) -> StoreResult<Vec<ContactId>>;

    /// Fetch records by id, in the order of `ids`
    ///
    /// # Errors
    ///
    /// Returns `StoreError::NotFound` if any id is missing; no partial
    /// result is returned.
    fn fetch_by_ids(&self, ids: &[ContactId]) -> StoreResult<Vec<ContactRecord>>;

    /// Delete every id
    ///
    /// # Errors
    ///
    /// Returns `StoreError::NotFound` without deleting anything if any id
    /// is missing.
    fn delete_all(&self, ids: &[ContactId]) -> StoreResult<()>;

    /// Number of stored contacts
    fn len(&self) -> StoreResult<usize>;

    /// Whether the store holds no contacts
    fn is_empty(&self) -> StoreResult<bool> {
        Ok(self.len()? == 0)
    }

    /// Whether stored contacts survive the process
    fn is_persistent(&self) -> bool;
}

impl<T: ContactStore + ?Sized> ContactStore for &T {
    fn backend_name(&self) -> &'static str {
        (**self).backend_name()
    }

    fn save_all(&self, records: &[ContactRecord]) -> StoreResult<Vec<ContactId>> {
        (**self).save_all(records)
    }

    fn fetch_by_ids(&self, ids: &[ContactId]) -> StoreResult<Vec<ContactRecord>> {
        (**self).fetch_by_ids(ids)
    }

    fn delete_all(&self, ids: &[ContactId]) -> StoreResult<()> {
        (**self).delete_all(ids)
    }

    fn len(&self) -> StoreResult<usize> {
        (**self).len()
    }

    fn is_persistent(&self) -> bool {
        (**self).is_persistent()
    }
}
