//! vcard-xport-perf - vCard import/export/delete benchmark for contact storage
//!
//! Generates synthetic contacts, round-trips them through vCard files and a
//! storage backend, and reports how long each step took.
//!
//! # Quick Start
//!
//! ```no_run
//! // Ten contacts against the in-memory backend, working under /tmp
//! let ok = vcard_xport_perf::run("memory", "/tmp", 10);
//! assert!(ok);
//! ```
//!
//! # Architecture
//!
//! | Crate | Role |
//! |-------|------|
//! | `xport-core` | contact record types and field limits |
//! | `xport-vcard` | vCard 3.0 reader and writer |
//! | `xport-storage` | backend contract and the `memory` / `directory` stores |
//! | `xport-harness` | generator, timer, reporters, working directory, orchestrator |
//!
//! Everything a caller needs is re-exported here.

pub use xport_core::{ContactId, ContactRecord, Gender, PhoneKind};
pub use xport_harness::{
    contact_file_name, run, CollectingReporter, ConsoleReporter, ContactGenerator, Harness, HarnessConfig,
    HarnessError, Measurement, Metric, OutputMode, Phase, Reporter, RunSummary, TracingReporter,
    WorkingDirectory, ALL_CONTACTS_FILE, WORKDIR_NAME,
};
pub use xport_storage::{available_backends, Backend, BackendKind, ContactStore, StoreError};

/// vCard codec
pub mod vcard {
    pub use xport_vcard::{decode, encode, VCardError, VCardReader, VCardWriter};
}
