//! Error types for a benchmark run
//!
//! Errors fall into four groups, in the order a run can hit them:
//!
//! | Group | Variant | Cleanup |
//! |-------|---------|---------|
//! | Configuration | `UnknownBackend`, `InvalidConfig` | none (nothing created) |
//! | Setup | `Setup` | none (working directory unusable) |
//! | Phase | `Phase` | best-effort, then the run fails |
//! | Cleanup | logged as warnings only | — |

use std::fmt;
use std::io;
use std::path::PathBuf;
use thiserror::Error;
use xport_storage::StoreError;
use xport_vcard::VCardError;

/// Result type alias for harness operations
pub type Result<T> = std::result::Result<T, HarnessError>;

/// Timed phase of a run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Phase {
    /// Generate, write, read back and save
    Import,
    /// Fetch and write one file per contact
    Export,
    /// Delete every saved contact
    Delete,
}

impl Phase {
    /// All phases in execution order
    pub const ALL: [Phase; 3] = [Phase::Import, Phase::Export, Phase::Delete];

    /// Lowercase phase name
    pub fn name(&self) -> &'static str {
        match self {
            Phase::Import => "import",
            Phase::Export => "export",
            Phase::Delete => "delete",
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Failure inside a phase
#[derive(Debug, Error)]
pub enum PhaseError {
    /// File I/O
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// vCard encoding or decoding
    #[error("vCard error: {0}")]
    Codec(#[from] VCardError),

    /// Backend call
    #[error("backend error: {0}")]
    Store(#[from] StoreError),

    /// A step returned a different number of items than it was given
    #[error("expected {expected} items, got {actual}")]
    CountMismatch {
        /// Items handed to the step
        expected: usize,
        /// Items the step returned
        actual: usize,
    },
}

/// Errors that fail a run
#[derive(Debug, Error)]
pub enum HarnessError {
    /// Backend name not among the available backends
    #[error("backend not available: '{name}' (available: {available})")]
    UnknownBackend {
        /// Requested name
        name: String,
        /// Comma-separated available names
        available: String,
    },

    /// Configuration value out of range or unreadable
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// Working directory could not be created or emptied
    #[error("failed to prepare working directory '{path}': {source}")]
    Setup {
        /// Working directory path
        path: PathBuf,
        /// Underlying I/O failure
        #[source]
        source: io::Error,
    },

    /// A phase failed; later phases did not run
    #[error("{phase} phase failed: {operation}: {source}")]
    Phase {
        /// Phase that failed
        phase: Phase,
        /// Operation that failed within the phase
        operation: &'static str,
        /// Underlying failure
        #[source]
        source: PhaseError,
    },
}

impl HarnessError {
    /// Phase that failed, if this is a phase error
    pub fn phase(&self) -> Option<Phase> {
        match self {
            HarnessError::Phase { phase, .. } => Some(*phase),
            _ => None,
        }
    }

    /// Whether the error was detected before any resource was created
    pub fn is_config_error(&self) -> bool {
        matches!(
            self,
            HarnessError::UnknownBackend { .. } | HarnessError::InvalidConfig(_)
        )
    }
}

impl From<StoreError> for HarnessError {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::UnknownBackend { name, available } => {
                HarnessError::UnknownBackend { name, available }
            }
            other => HarnessError::InvalidConfig(other.to_string()),
        }
    }
}

/// Attach phase and operation context to a fallible call
pub(crate) trait PhaseContext<T> {
    fn during(self, phase: Phase, operation: &'static str) -> Result<T>;
}

impl<T, E: Into<PhaseError>> PhaseContext<T> for std::result::Result<T, E> {
    fn during(self, phase: Phase, operation: &'static str) -> Result<T> {
        self.map_err(|e| HarnessError::Phase {
            phase,
            operation,
            source: e.into(),
        })
    }
}
