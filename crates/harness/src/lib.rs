//! Import/export/delete benchmark harness
//!
//! Drives one benchmark run against a contact storage backend:
//!
//! ```text
//! Init → Import → Export → Delete → Cleanup
//!   │       │        │        │        ▲
//!   └───────┴────────┴────────┴────────┘  (any failure jumps to cleanup)
//! ```
//!
//! - Import: generate → vCard file → (timed) read back → (timed) save
//! - Export: (timed) fetch by id → (timed) one vCard file per contact
//! - Delete: (timed) delete every id
//!
//! Each timed block emits one `Measurement` in seconds. The working
//! directory is an RAII guard, so cleanup runs on every exit path.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod cache;
pub mod config;
pub mod error;
pub mod generator;
pub mod harness;
pub mod report;
pub mod timer;
pub mod workdir;

pub use config::{HarnessConfig, CONFIG_NO_CLEANUP_ENV, LEGACY_NO_CLEANUP_ENV};
pub use error::{HarnessError, Phase, PhaseError, Result};
pub use generator::ContactGenerator;
pub use harness::{contact_file_name, run, Harness, RunSummary, ALL_CONTACTS_FILE};
pub use report::{
    CollectingReporter, ConsoleReporter, Measurement, Metric, OutputMode, Reporter, Tee,
    TracingReporter,
};
pub use timer::PhaseTimer;
pub use workdir::{WorkingDirectory, WORKDIR_NAME};
