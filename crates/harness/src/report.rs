//! Measurements and where they go
//!
//! A run emits one `Measurement` per timed block, immediately after the
//! block finishes. Reporters forward them somewhere: stdout, the tracing
//! log, or an in-memory list.
//!
//! # Metric Names
//!
//! | Metric | Timed work |
//! |--------|------------|
//! | `import.read-from-file.elapsed` | decode the combined vCard file |
//! | `import.save-to-backend.elapsed` | backend `save_all` |
//! | `export.load-from-backend.elapsed` | backend `fetch_by_ids` |
//! | `export.write-to-files.elapsed` | one vCard file per contact |
//! | `remove.elapsed` | backend `delete_all` |

use serde::{Deserialize, Serialize};
use std::fmt;
use std::io::{self, Write};
use tracing::{info, warn};

/// Unit of every harness measurement
pub const SECONDS: &str = "s";

/// The five timed blocks of a run, in execution order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Metric {
    /// Decode the combined import document
    ImportReadFromFile,
    /// Save decoded contacts to the backend
    ImportSaveToBackend,
    /// Fetch saved contacts by id
    ExportLoadFromBackend,
    /// Write one document per fetched contact
    ExportWriteToFiles,
    /// Delete every saved contact
    Remove,
}

impl Metric {
    /// All metrics in execution order
    pub const ALL: [Metric; 5] = [
        Metric::ImportReadFromFile,
        Metric::ImportSaveToBackend,
        Metric::ExportLoadFromBackend,
        Metric::ExportWriteToFiles,
        Metric::Remove,
    ];

    /// Reported metric name
    pub fn name(&self) -> &'static str {
        match self {
            Metric::ImportReadFromFile => "import.read-from-file.elapsed",
            Metric::ImportSaveToBackend => "import.save-to-backend.elapsed",
            Metric::ExportLoadFromBackend => "export.load-from-backend.elapsed",
            Metric::ExportWriteToFiles => "export.write-to-files.elapsed",
            Metric::Remove => "remove.elapsed",
        }
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One named, unit-tagged value
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Measurement {
    /// Metric name
    pub tag: String,
    /// Value in `unit`
    pub value: f64,
    /// Unit (`"s"` for every harness metric)
    pub unit: String,
}

impl Measurement {
    /// Elapsed seconds for `metric`
    pub fn seconds(metric: Metric, value: f64) -> Self {
        Self {
            tag: metric.name().to_string(),
            value,
            unit: SECONDS.to_string(),
        }
    }
}

impl fmt::Display for Measurement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {:.6} {}", self.tag, self.value, self.unit)
    }
}

/// Sink for measurements
pub trait Reporter {
    /// Forward one measurement
    fn report(&mut self, measurement: &Measurement);
}

impl<R: Reporter + ?Sized> Reporter for &mut R {
    fn report(&mut self, measurement: &Measurement) {
        (**self).report(measurement)
    }
}

impl<R: Reporter + ?Sized> Reporter for Box<R> {
    fn report(&mut self, measurement: &Measurement) {
        (**self).report(measurement)
    }
}

/// Forwards every measurement to two reporters, in order
#[derive(Debug, Clone, Default)]
pub struct Tee<A, B>(pub A, pub B);

impl<A: Reporter, B: Reporter> Reporter for Tee<A, B> {
    fn report(&mut self, measurement: &Measurement) {
        self.0.report(measurement);
        self.1.report(measurement);
    }
}

/// Logs measurements at info level under `xport::report`
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingReporter;

impl Reporter for TracingReporter {
    fn report(&mut self, m: &Measurement) {
        info!(target: "xport::report", tag = %m.tag, value = m.value, unit = %m.unit, "measurement");
    }
}

/// Keeps every measurement in memory
#[derive(Debug, Clone, Default)]
pub struct CollectingReporter {
    measurements: Vec<Measurement>,
}

impl CollectingReporter {
    /// Create an empty collector
    pub fn new() -> Self {
        Self::default()
    }

    /// Measurements in the order reported
    pub fn measurements(&self) -> &[Measurement] {
        &self.measurements
    }

    /// Reported tags in order
    pub fn tags(&self) -> Vec<&str> {
        self.measurements.iter().map(|m| m.tag.as_str()).collect()
    }

    /// Value reported for `metric`, if any
    pub fn value(&self, metric: Metric) -> Option<f64> {
        self.measurements
            .iter()
            .find(|m| m.tag == metric.name())
            .map(|m| m.value)
    }

    /// Take the collected measurements
    pub fn into_measurements(self) -> Vec<Measurement> {
        self.measurements
    }
}

impl Reporter for CollectingReporter {
    fn report(&mut self, measurement: &Measurement) {
        self.measurements.push(measurement.clone());
    }
}

/// Measurement output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputMode {
    /// `tag: value unit`
    #[default]
    Human,
    /// One JSON object per line
    Json,
}

/// Writes measurements to an `io::Write` (stdout by default)
///
/// Write failures are logged and otherwise ignored: a broken output pipe
/// must not change the outcome of a run.
pub struct ConsoleReporter<W: Write = io::Stdout> {
    out: W,
    mode: OutputMode,
}

impl ConsoleReporter {
    /// Reporter writing to stdout
    pub fn stdout(mode: OutputMode) -> Self {
        Self::new(io::stdout(), mode)
    }
}

impl<W: Write> ConsoleReporter<W> {
    /// Reporter writing to `out`
    pub fn new(out: W, mode: OutputMode) -> Self {
        Self { out, mode }
    }

    /// Underlying writer
    pub fn into_inner(self) -> W {
        self.out
    }

    fn write_measurement(&mut self, m: &Measurement) -> io::Result<()> {
        match self.mode {
            OutputMode::Human => writeln!(self.out, "{}", m)?,
            OutputMode::Json => {
                serde_json::to_writer(&mut self.out, m)?;
                writeln!(self.out)?;
            }
        }
        self.out.flush()
    }
}

impl<W: Write> Reporter for ConsoleReporter<W> {
    fn report(&mut self, measurement: &Measurement) {
        if let Err(e) = self.write_measurement(measurement) {
            warn!(target: "xport::report", error = %e, tag = %measurement.tag, "failed to write measurement");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metric_names_in_order() {
        let names: Vec<&str> = Metric::ALL.iter().map(|m| m.name()).collect();
        assert_eq!(
            names,
            vec![
                "import.read-from-file.elapsed",
                "import.save-to-backend.elapsed",
                "export.load-from-backend.elapsed",
                "export.write-to-files.elapsed",
                "remove.elapsed",
            ]
        );
    }

    #[test]
    fn test_measurement_seconds() {
        let m = Measurement::seconds(Metric::Remove, 0.25);
        assert_eq!(m.tag, "remove.elapsed");
        assert_eq!(m.unit, "s");
        assert_eq!(m.to_string(), "remove.elapsed: 0.250000 s");
    }

    #[test]
    fn test_collecting_reporter() {
        let mut reporter = CollectingReporter::new();
        reporter.report(&Measurement::seconds(Metric::ImportReadFromFile, 1.0));
        reporter.report(&Measurement::seconds(Metric::Remove, 2.0));
        assert_eq!(
            reporter.tags(),
            vec!["import.read-from-file.elapsed", "remove.elapsed"]
        );
        assert_eq!(reporter.value(Metric::Remove), Some(2.0));
        assert_eq!(reporter.value(Metric::ExportWriteToFiles), None);
    }

    #[test]
    fn test_console_reporter_human() {
        let mut reporter = ConsoleReporter::new(Vec::new(), OutputMode::Human);
        reporter.report(&Measurement::seconds(Metric::ExportWriteToFiles, 0.5));
        let text = String::from_utf8(reporter.into_inner()).unwrap();
        assert_eq!(text, "export.write-to-files.elapsed: 0.500000 s\n");
    }

    #[test]
    fn test_console_reporter_json_lines() {
        let mut reporter = ConsoleReporter::new(Vec::new(), OutputMode::Json);
        reporter.report(&Measurement::seconds(Metric::ImportSaveToBackend, 0.5));
        reporter.report(&Measurement::seconds(Metric::Remove, 0.125));
        let text = String::from_utf8(reporter.into_inner()).unwrap();
        let parsed: Vec<Measurement> = text
            .lines()
            .map(|line| serde_json::from_str(line).unwrap())
            .collect();
        assert_eq!(parsed.len(), 2);
        assert_eq!(parsed[1], Measurement::seconds(Metric::Remove, 0.125));
    }

    #[test]
    fn test_tee_fans_out() {
        let mut pair = Tee(CollectingReporter::new(), CollectingReporter::new());
        pair.report(&Measurement::seconds(Metric::Remove, 1.0));
        assert_eq!(pair.0.measurements().len(), 1);
        assert_eq!(pair.1.measurements().len(), 1);
    }
}
