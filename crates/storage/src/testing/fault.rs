//! Fault-injecting store wrapper

use std::sync::atomic::{AtomicUsize, Ordering};

use xport_core::{ContactId, ContactRecord};

use crate::error::{StoreError, StoreResult};
use crate::traits::ContactStore;

/// Operation that a `FaultyStore` fails
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FailPoint {
    /// Never fail (baseline)
    Never,
    /// Fail `save_all`
    Save,
    /// Fail `fetch_by_ids`
    Fetch,
    /// Fail `delete_all`
    Delete,
}

impl FailPoint {
    /// Get all injection points that actually fail
    pub fn all() -> Vec<FailPoint> {
        vec![FailPoint::Save, FailPoint::Fetch, FailPoint::Delete]
    }

    /// Operation name used in `StoreError::Injected`
    pub fn operation(&self) -> &'static str {
        match self {
            FailPoint::Never => "nothing",
            FailPoint::Save => "save_all",
            FailPoint::Fetch => "fetch_by_ids",
            FailPoint::Delete => "delete_all",
        }
    }
}

/// Store wrapper that fails one operation and counts calls to each
///
/// Calls that are not injected are forwarded to the inner store.
#[derive(Debug)]
pub struct FaultyStore<S> {
    inner: S,
    fail_at: FailPoint,
    saves: AtomicUsize,
    fetches: AtomicUsize,
    deletes: AtomicUsize,
}

impl<S: ContactStore> FaultyStore<S> {
    /// Wrap `inner`, failing at `fail_at`
    pub fn new(inner: S, fail_at: FailPoint) -> Self {
        Self {
            inner,
            fail_at,
            saves: AtomicUsize::new(0),
            fetches: AtomicUsize::new(0),
            deletes: AtomicUsize::new(0),
        }
    }

    /// Wrapped store
    pub fn inner(&self) -> &S {
        &self.inner
    }

    /// Number of calls made to the operation behind `point`
    pub fn calls(&self, point: FailPoint) -> usize {
        match point {
            FailPoint::Never => 0,
            FailPoint::Save => self.saves.load(Ordering::Relaxed),
            FailPoint::Fetch => self.fetches.load(Ordering::Relaxed),
            FailPoint::Delete => self.deletes.load(Ordering::Relaxed),
        }
    }

    fn check(&self, point: FailPoint) -> StoreResult<()> {
        if self.fail_at == point {
            Err(StoreError::Injected(point.operation()))
        } else {
            Ok(())
        }
    }
}

impl<S: ContactStore> ContactStore for FaultyStore<S> {
    fn backend_name(&self) -> &'static str {
        self.inner.backend_name()
    }

    fn save_all(&self, records: &[ContactRecord]) -> StoreResult<Vec<ContactId>> {
        self.saves.fetch_add(1, Ordering::Relaxed);
        self.check(FailPoint::Save)?;
        self.inner.save_all(records)
    }

    fn fetch_by_ids(&self, ids: &[ContactId]) -> StoreResult<Vec<ContactRecord>> {
        self.fetches.fetch_add(1, Ordering::Relaxed);
        self.check(FailPoint::Fetch)?;
        self.inner.fetch_by_ids(ids)
    }

    fn delete_all(&self, ids: &[ContactId]) -> StoreResult<()> {
        self.deletes.fetch_add(1, Ordering::Relaxed);
        self.check(FailPoint::Delete)?;
        self.inner.delete_all(ids)
    }

    fn len(&self) -> StoreResult<usize> {
        self.inner.len()
    }

    fn is_persistent(&self) -> bool {
        self.inner.is_persistent()
    }
}
