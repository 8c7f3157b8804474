//! Working directory guard
//!
//! Every file a run creates lives in `<prefix>/vcard-xport-perf.tmp`. The
//! guard empties the directory when it is prepared and cleans it up again
//! when dropped, so an early return from any phase still removes the run's
//! files. `retain()` keeps everything on disk for inspection.
//!
//! Cleanup is best-effort: individual failures are logged at `warn!` and
//! never reach the caller as errors.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

use crate::error::{HarnessError, Result};

/// Name of the per-run subdirectory created under the temp prefix
pub const WORKDIR_NAME: &str = "vcard-xport-perf.tmp";

/// Scoped working directory for one run
#[derive(Debug)]
pub struct WorkingDirectory {
    path: PathBuf,
    retain: bool,
}

impl WorkingDirectory {
    /// Create `<prefix>/vcard-xport-perf.tmp`, removing anything already in it
    ///
    /// # Errors
    ///
    /// Returns `HarnessError::Setup` if the directory cannot be created or
    /// an existing entry cannot be removed.
    pub fn prepare(prefix: impl AsRef<Path>) -> Result<Self> {
        let path = prefix.as_ref().join(WORKDIR_NAME);
        let setup = |source: io::Error| HarnessError::Setup {
            path: path.clone(),
            source,
        };

        fs::create_dir_all(&path).map_err(setup)?;
        for entry in fs::read_dir(&path).map_err(setup)? {
            let entry = entry.map_err(setup)?;
            remove_entry(&entry.path()).map_err(setup)?;
        }
        debug!(target: "xport::workdir", path = %path.display(), "working directory ready");

        Ok(Self {
            path,
            retain: false,
        })
    }

    /// Directory path
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Path of `name` inside the directory
    pub fn join(&self, name: impl AsRef<Path>) -> PathBuf {
        self.path.join(name)
    }

    /// Keep the directory and its contents when the guard is dropped
    pub fn retain(&mut self) {
        self.retain = true;
    }

    /// Set whether the contents are kept on drop
    pub fn set_retain(&mut self, retain: bool) {
        self.retain = retain;
    }

    /// Whether the contents will be kept on drop
    pub fn is_retained(&self) -> bool {
        self.retain
    }

    /// Remove every entry, then the directory itself if it is empty
    ///
    /// Safe to call any number of times; a missing directory is already
    /// clean. Returns `true` if the directory is gone afterwards.
    pub fn cleanup(&self) -> bool {
        clean_dir(&self.path)
    }
}

impl Drop for WorkingDirectory {
    fn drop(&mut self) {
        if self.retain {
            debug!(target: "xport::workdir", path = %self.path.display(), "retaining working directory");
            return;
        }
        clean_dir(&self.path);
    }
}

fn remove_entry(path: &Path) -> io::Result<()> {
    if fs::symlink_metadata(path)?.is_dir() {
        fs::remove_dir_all(path)
    } else {
        fs::remove_file(path)
    }
}

fn clean_dir(path: &Path) -> bool {
    let entries = match fs::read_dir(path) {
        Ok(entries) => entries,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return true,
        Err(e) => {
            warn!(target: "xport::workdir", path = %path.display(), error = %e, "cannot list working directory");
            return false;
        }
    };

    for entry in entries {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                warn!(target: "xport::workdir", path = %path.display(), error = %e, "cannot read directory entry");
                continue;
            }
        };
        let entry_path = entry.path();
        if let Err(e) = remove_entry(&entry_path) {
            warn!(target: "xport::workdir", path = %entry_path.display(), error = %e, "failed to remove file");
        }
    }

    match fs::remove_dir(path) {
        Ok(()) => true,
        Err(e) if e.kind() == io::ErrorKind::NotFound => true,
        Err(e) => {
            warn!(target: "xport::workdir", path = %path.display(), error = %e, "failed to remove working directory");
            false
        }
    }
}
