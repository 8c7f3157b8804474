//! Testing utilities for backend failure paths
//!
//! - **FaultyStore**: wraps any store and fails a chosen operation
//!
//! # Example
//!
//! ```ignore
//! use xport_storage::testing::{FailPoint, FaultyStore};
//! use xport_storage::MemoryStore;
//!
//! let store = FaultyStore::new(MemoryStore::new(), FailPoint::Fetch);
//! // save_all succeeds, fetch_by_ids returns StoreError::Injected
//! ```

mod fault;

pub use fault::{FailPoint, FaultyStore};
