//! Contact storage backends
//!
//! This crate implements the backend side of a benchmark run:
//! - ContactStore: save / fetch-by-id / delete contract every backend implements
//! - MemoryStore: DashMap-backed, nothing persisted (`"memory"`)
//! - DirectoryStore: one JSON document per contact, fsynced (`"directory"`)
//! - Backend: statically dispatched union of the above, resolved by name
//!
//! # Backend Contract
//!
//! | Operation | Ordering | Failure |
//! |-----------|----------|---------|
//! | save_all | ids in input order | nothing guaranteed about partial saves |
//! | fetch_by_ids | records in id order | any missing id fails the whole call |
//! | delete_all | — | any missing id fails before anything is deleted |

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod backend;
pub mod directory;
pub mod error;
pub mod memory;
#[cfg(any(test, feature = "testing"))]
pub mod testing;
pub mod traits;

pub use backend::{
    available_backends, Backend, BackendKind, BackendOptions, DEFAULT_BACKEND,
    DEFAULT_STORE_DIR_NAME,
};
pub use directory::DirectoryStore;
pub use error::{StoreError, StoreResult};
pub use memory::MemoryStore;
pub use traits::ContactStore;
