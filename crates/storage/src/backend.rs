//! Backend selection by name
//!
//! Backend names are resolved to a `BackendKind` once, at startup. From
//! then on the harness talks to a `Backend`, which dispatches statically to
//! the concrete store.
//!
//! | Name | Store | Persistent |
//! |------|-------|------------|
//! | `memory` | `MemoryStore` | no |
//! | `directory` | `DirectoryStore` | yes |

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use xport_core::{ContactId, ContactRecord};

use crate::directory::DirectoryStore;
use crate::error::{StoreError, StoreResult};
use crate::memory::MemoryStore;
use crate::traits::ContactStore;

/// Backend used when no name is given
pub const DEFAULT_BACKEND: BackendKind = BackendKind::Memory;

/// Directory name used by the directory backend when no location is configured
pub const DEFAULT_STORE_DIR_NAME: &str = "vcard-xport-perf.store";

/// Names of every backend this build can open
pub fn available_backends() -> Vec<&'static str> {
    BackendKind::ALL.iter().map(|k| k.name()).collect()
}

/// Kind of backend, resolved from its advertised name
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BackendKind {
    /// `MemoryStore`
    Memory,
    /// `DirectoryStore`
    Directory,
}

impl BackendKind {
    /// All kinds, in advertised order
    pub const ALL: [BackendKind; 2] = [BackendKind::Memory, BackendKind::Directory];

    /// Advertised name
    pub fn name(&self) -> &'static str {
        match self {
            BackendKind::Memory => "memory",
            BackendKind::Directory => "directory",
        }
    }

    /// Resolve a name; an empty name selects `DEFAULT_BACKEND`
    pub fn resolve(name: &str) -> StoreResult<Self> {
        if name.is_empty() {
            return Ok(DEFAULT_BACKEND);
        }
        name.parse()
    }
}

impl fmt::Display for BackendKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for BackendKind {
    type Err = StoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        BackendKind::ALL
            .into_iter()
            .find(|k| k.name() == s)
            .ok_or_else(|| StoreError::UnknownBackend {
                name: s.to_string(),
                available: available_backends().join(", "),
            })
    }
}

/// Options consumed when opening a backend
#[derive(Debug, Clone, Default)]
pub struct BackendOptions {
    /// Directory backend location; defaults to
    /// `<system temp dir>/vcard-xport-perf.store`
    pub store_dir: Option<PathBuf>,
}

impl BackendOptions {
    /// Set the directory backend location
    pub fn with_store_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.store_dir = Some(dir.into());
        self
    }

    fn resolved_store_dir(&self) -> PathBuf {
        self.store_dir
            .clone()
            .unwrap_or_else(|| std::env::temp_dir().join(DEFAULT_STORE_DIR_NAME))
    }
}

/// An opened backend
#[derive(Debug)]
pub enum Backend {
    /// In-memory store
    Memory(MemoryStore),
    /// Directory store
    Directory(DirectoryStore),
}

impl Backend {
    /// Open a backend of the given kind
    ///
    /// # Errors
    ///
    /// Returns an error if the backend's resources cannot be acquired
    /// (e.g. the directory backend cannot create its store directory).
    pub fn open(kind: BackendKind, options: &BackendOptions) -> StoreResult<Self> {
        match kind {
            BackendKind::Memory => Ok(Backend::Memory(MemoryStore::new())),
            BackendKind::Directory => Ok(Backend::Directory(DirectoryStore::open(
                options.resolved_store_dir(),
            )?)),
        }
    }

    /// Kind of this backend
    pub fn kind(&self) -> BackendKind {
        match self {
            Backend::Memory(_) => BackendKind::Memory,
            Backend::Directory(_) => BackendKind::Directory,
        }
    }

    fn store(&self) -> &dyn ContactStore {
        match self {
            Backend::Memory(store) => store as &dyn ContactStore,
            Backend::Directory(store) => store as &dyn ContactStore,
        }
    }
}

impl ContactStore for Backend {
    fn backend_name(&self) -> &'static str {
        self.kind().name()
    }

    fn save_all(&self, records: &[ContactRecord]) -> StoreResult<Vec<ContactId>> {
        self.store().save_all(records)
    }

    fn fetch_by_ids(&self, ids: &[ContactId]) -> StoreResult<Vec<ContactRecord>> {
        self.store().fetch_by_ids(ids)
    }

    fn delete_all(&self, ids: &[ContactId]) -> StoreResult<()> {
        self.store().delete_all(ids)
    }

    fn len(&self) -> StoreResult<usize> {
        self.store().len()
    }

    fn is_persistent(&self) -> bool {
        self.store().is_persistent()
    }
}
