//! Benchmark orchestration
//!
//! A run resolves the backend name, prepares the working directory, opens
//! the store and then executes the three phases in order. The first
//! failure ends the run; the working directory guard cleans up on the way
//! out whether the run succeeded or not.

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fs::{File, OpenOptions};
use std::io::{BufReader, BufWriter, Seek, SeekFrom};
use std::path::Path;
use tracing::{debug, error, info};

use xport_core::{ContactId, ContactRecord};
use xport_storage::{Backend, BackendKind, ContactStore, StoreResult};
use xport_vcard::{VCardReader, VCardWriter};

use crate::cache;
use crate::config::HarnessConfig;
use crate::error::{Phase, PhaseContext, PhaseError, Result};
use crate::generator::ContactGenerator;
use crate::report::{CollectingReporter, Measurement, Metric, Reporter, Tee, TracingReporter};
use crate::timer::PhaseTimer;
use crate::workdir::WorkingDirectory;

/// Combined import document written inside the working directory
pub const ALL_CONTACTS_FILE: &str = "all_contacts.vcf";

/// Export document name for the contact at `index`
pub fn contact_file_name(index: usize) -> String {
    format!("contact_{}.vcf", index)
}

/// Outcome of a successful run
#[derive(Debug, Clone, Serialize)]
pub struct RunSummary {
    /// Wall-clock start of the run
    pub started_at: DateTime<Utc>,
    /// Backend the run executed against
    pub backend: String,
    /// Generator seed
    pub seed: u64,
    /// Contacts generated
    pub records: usize,
    /// Ids returned by the backend on save
    pub ids: usize,
    /// Per-contact export files written
    pub files_exported: usize,
    /// Measurements in the order they were reported
    pub measurements: Vec<Measurement>,
}

/// Runs the import/export/delete benchmark
pub struct Harness<R: Reporter = TracingReporter> {
    config: HarnessConfig,
    generator: ContactGenerator,
    reporter: R,
}

impl Harness<TracingReporter> {
    /// Harness that logs measurements through `tracing`
    pub fn new(config: HarnessConfig) -> Self {
        Self::with_reporter(config, TracingReporter)
    }
}

impl<R: Reporter> Harness<R> {
    /// Harness forwarding measurements to `reporter`
    pub fn with_reporter(config: HarnessConfig, reporter: R) -> Self {
        let generator = match config.seed {
            Some(seed) => ContactGenerator::with_seed(seed),
            None => ContactGenerator::from_time(),
        };
        Self {
            config,
            generator,
            reporter,
        }
    }

    /// Replace the contact generator
    pub fn with_generator(mut self, generator: ContactGenerator) -> Self {
        self.generator = generator;
        self
    }

    /// Run configuration
    pub fn config(&self) -> &HarnessConfig {
        &self.config
    }

    /// Measurement reporter
    pub fn reporter(&self) -> &R {
        &self.reporter
    }

    /// Give back the reporter
    pub fn into_reporter(self) -> R {
        self.reporter
    }

    /// Run the benchmark; `true` only if every phase completed
    pub fn run(&mut self) -> bool {
        self.try_run().is_ok()
    }

    /// Run the benchmark against the configured backend
    ///
    /// # Errors
    ///
    /// - `UnknownBackend` before anything is created
    /// - `Setup` if the working directory cannot be prepared
    /// - `Phase` for the first failure inside import, export or delete
    pub fn try_run(&mut self) -> Result<RunSummary> {
        let kind = BackendKind::resolve(&self.config.backend).map_err(|e| {
            error!(target: "xport::harness", backend = %self.config.backend, error = %e, "backend not available");
            e
        })?;
        let options = self.config.backend_options();
        self.run_against(|| Backend::open(kind, &options))
    }

    /// Run the benchmark against the store returned by `open`
    ///
    /// `open` is called once, after the working directory is ready. Opening
    /// failures count as import failures.
    pub fn run_against<S, F>(&mut self, open: F) -> Result<RunSummary>
    where
        S: ContactStore,
        F: FnOnce() -> StoreResult<S>,
    {
        let result = self.execute(open);
        match &result {
            Ok(summary) => info!(
                target: "xport::harness",
                backend = %summary.backend,
                records = summary.records,
                files = summary.files_exported,
                "benchmark run completed"
            ),
            Err(e) => error!(target: "xport::harness", error = %e, "benchmark run failed"),
        }
        result
    }

    fn execute<S, F>(&mut self, open: F) -> Result<RunSummary>
    where
        S: ContactStore,
        F: FnOnce() -> StoreResult<S>,
    {
        let Self {
            config,
            generator,
            reporter,
        } = self;
        let started_at = Utc::now();

        let mut workdir = WorkingDirectory::prepare(&config.tmp_dir)?;
        workdir.set_retain(config.no_cleanup);

        let store = open().during(Phase::Import, "open backend")?;
        info!(
            target: "xport::harness",
            backend = store.backend_name(),
            count = config.count,
            seed = generator.seed(),
            workdir = %workdir.path().display(),
            "starting benchmark run"
        );

        let mut collected = CollectingReporter::new();
        let mut timer = PhaseTimer::new(Tee(reporter, &mut collected));

        let records = generator.generate(config.count);
        let ids = import(&records, &store, &workdir, &mut timer)?;
        let files_exported = export(&ids, &store, &workdir, &mut timer)?;
        delete(&ids, &store, &mut timer)?;
        drop(timer);

        if workdir.is_retained() {
            info!(target: "xport::harness", path = %workdir.path().display(), "keeping working directory");
        }

        Ok(RunSummary {
            started_at,
            backend: store.backend_name().to_string(),
            seed: generator.seed(),
            records: records.len(),
            ids: ids.len(),
            files_exported,
            measurements: collected.into_measurements(),
        })
    }
}

/// Run the benchmark with defaults for everything but the three required
/// settings; honours the no-cleanup environment override
pub fn run(backend_name: &str, tmp_dir_prefix: impl AsRef<Path>, count: usize) -> bool {
    let config =
        HarnessConfig::new(backend_name, tmp_dir_prefix.as_ref(), count).with_env_overrides();
    Harness::new(config).run()
}

/// Write every record to the combined file, read it back (timed) and save
/// the decoded records to the backend (timed)
fn import<S: ContactStore, R: Reporter>(
    records: &[ContactRecord],
    store: &S,
    workdir: &WorkingDirectory,
    timer: &mut PhaseTimer<R>,
) -> Result<Vec<ContactId>> {
    let path = workdir.join(ALL_CONTACTS_FILE);
    let mut file = OpenOptions::new()
        .read(true)
        .write(true)
        .create(true)
        .truncate(true)
        .open(&path)
        .during(Phase::Import, "open import file")?;

    write_import_file(&mut file, records).during(Phase::Import, "write import file")?;
    debug!(target: "xport::harness", path = %path.display(), records = records.len(), "import file written");
    bypass_page_cache(&mut file)?;

    let decoded = read_import_file(&file, records.len(), timer)?;

    let ids = timer
        .try_time_block(Metric::ImportSaveToBackend, || store.save_all(&decoded))
        .during(Phase::Import, "save to backend")?;
    expect_count(decoded.len(), ids.len()).during(Phase::Import, "save to backend")?;

    Ok(ids)
}

/// Encode `records` into `file` and push it to disk
fn write_import_file(file: &mut File, records: &[ContactRecord]) -> std::result::Result<(), PhaseError> {
    let mut writer = VCardWriter::new(BufWriter::new(&mut *file));
    writer.write_all(records)?;
    drop(writer.finish()?);
    file.sync_data()?;
    Ok(())
}

/// Drop `file` from the page cache and rewind it, so the timed read comes
/// from disk; a rejected hint fails the import
fn bypass_page_cache(file: &mut File) -> Result<()> {
    cache::advise_dont_need(file).during(Phase::Import, "drop page cache")?;
    file.seek(SeekFrom::Start(0)).during(Phase::Import, "rewind import file")?;
    cache::advise_normal(file).during(Phase::Import, "restore page caching")
}

/// Decode the import file (timed); every written record must come back
fn read_import_file<R: Reporter>(
    file: &File,
    expected: usize,
    timer: &mut PhaseTimer<R>,
) -> Result<Vec<ContactRecord>> {
    let decoded = timer
        .try_time_block(Metric::ImportReadFromFile, || {
            VCardReader::new(BufReader::new(file)).read_all()
        })
        .during(Phase::Import, "read import file")?;
    expect_count(expected, decoded.len()).during(Phase::Import, "read import file")?;
    Ok(decoded)
}

/// Fetch every saved record (timed) and write one file per record (timed)
fn export<S: ContactStore, R: Reporter>(
    ids: &[ContactId],
    store: &S,
    workdir: &WorkingDirectory,
    timer: &mut PhaseTimer<R>,
) -> Result<usize> {
    let records = timer
        .try_time_block(Metric::ExportLoadFromBackend, || store.fetch_by_ids(ids))
        .during(Phase::Export, "load from backend")?;
    expect_count(ids.len(), records.len()).during(Phase::Export, "load from backend")?;

    timer
        .try_time_block(Metric::ExportWriteToFiles, || write_contact_files(workdir, &records))
        .during(Phase::Export, "write contact files")
}

fn write_contact_files(
    workdir: &WorkingDirectory,
    records: &[ContactRecord],
) -> std::result::Result<usize, PhaseError> {
    for (index, record) in records.iter().enumerate() {
        let path = workdir.join(contact_file_name(index));
        write_contact_file(&path, record).map_err(|e| {
            error!(target: "xport::harness", path = %path.display(), error = %e, "failed to write contact file");
            e
        })?;
    }
    Ok(records.len())
}

fn write_contact_file(path: &Path, record: &ContactRecord) -> std::result::Result<(), PhaseError> {
    let file = File::create(path)?;
    let mut writer = VCardWriter::new(BufWriter::new(file));
    writer.write_contact(record)?;
    writer.finish()?;
    Ok(())
}

/// Delete every saved record (timed)
fn delete<S: ContactStore, R: Reporter>(
    ids: &[ContactId],
    store: &S,
    timer: &mut PhaseTimer<R>,
) -> Result<()> {
    timer
        .try_time_block(Metric::Remove, || store.delete_all(ids))
        .during(Phase::Delete, "remove from backend")
}

fn expect_count(expected: usize, actual: usize) -> std::result::Result<(), PhaseError> {
    if expected == actual {
        Ok(())
    } else {
        Err(PhaseError::CountMismatch { expected, actual })
    }
}
