//! Shared helpers for the integration test suites.
//!
//! Import via `#[path = "../common/mod.rs"] mod common;` from a suite's main.rs.

#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

use tempfile::TempDir;
pub use vcard_xport_perf::{
    contact_file_name, CollectingReporter, ContactId, ContactRecord, Harness, HarnessConfig,
    HarnessError, Metric, Phase, ALL_CONTACTS_FILE, WORKDIR_NAME,
};
pub use xport_storage::testing::{FailPoint, FaultyStore};
pub use xport_storage::{
    ContactStore, MemoryStore, StoreError, StoreResult, DEFAULT_STORE_DIR_NAME,
};

/// Seed used by every test run, so failures reproduce
pub const TEST_SEED: u64 = 0x5eed;

/// An isolated temp prefix for one benchmark run
pub struct TestRun {
    pub prefix: TempDir,
}

impl TestRun {
    pub fn new() -> Self {
        let prefix = tempfile::tempdir().expect("Failed to create temp dir");
        TestRun { prefix }
    }

    /// Config for `count` contacts against `backend`, seeded
    pub fn config(&self, backend: &str, count: usize) -> HarnessConfig {
        let mut config = HarnessConfig::new(backend, self.prefix.path(), count);
        config.seed = Some(TEST_SEED);
        config
    }

    /// Harness collecting every measurement
    pub fn harness(&self, backend: &str, count: usize) -> Harness<CollectingReporter> {
        Harness::with_reporter(self.config(backend, count), CollectingReporter::new())
    }

    /// Harness that keeps the working directory after the run
    pub fn retaining_harness(&self, backend: &str, count: usize) -> Harness<CollectingReporter> {
        let mut config = self.config(backend, count);
        config.no_cleanup = true;
        Harness::with_reporter(config, CollectingReporter::new())
    }

    pub fn workdir(&self) -> PathBuf {
        self.prefix.path().join(WORKDIR_NAME)
    }

    /// Sorted entry names in the working directory; empty if it is gone
    pub fn workdir_entries(&self) -> Vec<String> {
        entries(&self.workdir())
    }

    /// Sorted entry names directly under the prefix
    pub fn prefix_entries(&self) -> Vec<String> {
        entries(self.prefix.path())
    }
}

fn entries(dir: &Path) -> Vec<String> {
    let Ok(read) = fs::read_dir(dir) else {
        return Vec::new();
    };
    let mut names: Vec<String> = read
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    names
}

/// Memory store that puts a directory where an export file will go
///
/// The directory appears during `fetch_by_ids`, after the working directory
/// has been emptied, so writing that export file fails.
pub struct BlockedExportStore {
    inner: MemoryStore,
    blocked: PathBuf,
}

impl BlockedExportStore {
    pub fn new(blocked: PathBuf) -> Self {
        BlockedExportStore {
            inner: MemoryStore::new(),
            blocked,
        }
    }
}

impl ContactStore for BlockedExportStore {
    fn backend_name(&self) -> &'static str {
        "blocked-export"
    }

    fn save_all(&self, records: &[ContactRecord]) -> StoreResult<Vec<ContactId>> {
        self.inner.save_all(records)
    }

    fn fetch_by_ids(&self, ids: &[ContactId]) -> StoreResult<Vec<ContactRecord>> {
        fs::create_dir(&self.blocked)?;
        self.inner.fetch_by_ids(ids)
    }

    fn delete_all(&self, ids: &[ContactId]) -> StoreResult<()> {
        self.inner.delete_all(ids)
    }

    fn len(&self) -> StoreResult<usize> {
        self.inner.len()
    }

    fn is_persistent(&self) -> bool {
        false
    }
}

/// Assert that exactly the five metrics were reported, in order, with sane values
pub fn assert_all_metrics(reporter: &CollectingReporter) {
    let expected: Vec<&str> = Metric::ALL.iter().map(|m| m.name()).collect();
    assert_eq!(reporter.tags(), expected);
    for m in reporter.measurements() {
        assert_eq!(m.unit, "s");
        assert!(m.value.is_finite() && m.value >= 0.0, "{}", m);
    }
}
