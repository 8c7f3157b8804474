//! Run configuration
//!
//! Sources, lowest to highest precedence: built-in defaults, an optional
//! TOML file, command-line flags, then the no-cleanup environment override.
//! The CLI merges flags itself; this module handles the rest.

use serde::{Deserialize, Serialize};
use std::ffi::OsString;
use std::path::{Path, PathBuf};

use xport_core::limits::MAX_BACKEND_NAME_LEN;
use xport_storage::{BackendOptions, DEFAULT_STORE_DIR_NAME};

use crate::error::{HarnessError, Result};

/// Environment variable that, when present with any value, keeps the
/// working directory after the run
pub const CONFIG_NO_CLEANUP_ENV: &str = "VCARD_XPORT_PERF_NO_CLEANUP";

/// Older spelling of [`CONFIG_NO_CLEANUP_ENV`], still honoured
pub const LEGACY_NO_CLEANUP_ENV: &str = "BLTS_VCARD_XPORT_PERF_NO_CLEANUP";

/// Configuration for one benchmark run.
///
/// # Example
///
/// ```toml
/// backend = "directory"
/// tmp_dir = "/var/tmp"
/// count = 1000
/// seed = 42
/// store_dir = "/var/tmp/contacts"
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HarnessConfig {
    /// Backend name; empty selects the default backend
    pub backend: String,
    /// Prefix under which the working directory is created
    pub tmp_dir: PathBuf,
    /// Number of contacts to generate
    pub count: usize,
    /// Keep the working directory after the run
    pub no_cleanup: bool,
    /// Generator seed; `None` seeds from the clock
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
    /// Location of the directory backend's store; defaults to
    /// `<tmp_dir>/vcard-xport-perf.store`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub store_dir: Option<PathBuf>,
}

impl Default for HarnessConfig {
    fn default() -> Self {
        Self {
            backend: xport_storage::DEFAULT_BACKEND.name().to_string(),
            tmp_dir: std::env::temp_dir(),
            count: 100,
            no_cleanup: false,
            seed: None,
            store_dir: None,
        }
    }
}

impl HarnessConfig {
    /// Config with the three required settings and defaults elsewhere
    pub fn new(backend: impl Into<String>, tmp_dir: impl Into<PathBuf>, count: usize) -> Self {
        Self {
            backend: backend.into(),
            tmp_dir: tmp_dir.into(),
            count,
            ..Self::default()
        }
    }

    /// Parse config from TOML text
    pub fn from_toml_str(text: &str) -> Result<Self> {
        toml::from_str(text)
            .map_err(|e| HarnessError::InvalidConfig(format!("failed to parse config: {}", e)))
    }

    /// Read and parse a TOML config file
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` if the file cannot be read or parsed.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            HarnessError::InvalidConfig(format!(
                "failed to read config file '{}': {}",
                path.display(),
                e
            ))
        })?;
        toml::from_str(&content).map_err(|e| {
            HarnessError::InvalidConfig(format!(
                "failed to parse config file '{}': {}",
                path.display(),
                e
            ))
        })
    }

    /// Apply the no-cleanup override from the process environment
    ///
    /// Either `VCARD_XPORT_PERF_NO_CLEANUP` or
    /// `BLTS_VCARD_XPORT_PERF_NO_CLEANUP` being set keeps the working
    /// directory.
    pub fn with_env_overrides(self) -> Self {
        self.with_no_cleanup_from(|name| std::env::var_os(name))
    }

    fn with_no_cleanup_from(mut self, lookup: impl Fn(&str) -> Option<OsString>) -> Self {
        let set = [CONFIG_NO_CLEANUP_ENV, LEGACY_NO_CLEANUP_ENV]
            .iter()
            .any(|name| lookup(name).is_some());
        if set {
            self.no_cleanup = true;
        }
        self
    }

    /// Check the settings a command-line run requires
    ///
    /// The library accepts an empty backend name and a zero count; a
    /// command-line run does not.
    pub fn validate(&self) -> Result<()> {
        if self.backend.is_empty() {
            return Err(HarnessError::InvalidConfig(
                "backend name must not be empty".to_string(),
            ));
        }
        if self.backend.len() > MAX_BACKEND_NAME_LEN {
            return Err(HarnessError::InvalidConfig(format!(
                "backend name is {} bytes, limit is {}",
                self.backend.len(),
                MAX_BACKEND_NAME_LEN
            )));
        }
        if self.tmp_dir.as_os_str().is_empty() {
            return Err(HarnessError::InvalidConfig(
                "temp directory must not be empty".to_string(),
            ));
        }
        if self.count == 0 {
            return Err(HarnessError::InvalidConfig(
                "contact count must be positive".to_string(),
            ));
        }
        Ok(())
    }

    /// Options for opening the configured backend
    ///
    /// Without an explicit `store_dir` the directory backend keeps its
    /// store under `tmp_dir`, next to the working directory.
    pub fn backend_options(&self) -> BackendOptions {
        let store_dir = self
            .store_dir
            .clone()
            .unwrap_or_else(|| self.tmp_dir.join(DEFAULT_STORE_DIR_NAME));
        BackendOptions::default().with_store_dir(store_dir)
    }
}
