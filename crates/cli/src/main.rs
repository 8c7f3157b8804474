//! vcard-xport-perf: time vCard import, export and delete against a
//! contact storage backend.
//!
//! ```text
//! vcard-xport-perf -m memory -d /tmp -n 1000
//! vcard-xport-perf --config run.toml --json
//! vcard-xport-perf --list-backends
//! ```
//!
//! Exit status: 0 when every phase completed, 1 when the run failed, 2 for
//! usage and configuration errors.

mod commands;
mod format;
mod parse;

use std::fs::OpenOptions;
use std::path::Path;
use std::process;
use std::sync::Mutex;

use anyhow::Context;
use tracing::info;
use tracing_subscriber::EnvFilter;
use xport_harness::{ConsoleReporter, Harness, HarnessConfig, OutputMode, Tee, TracingReporter};

use commands::build_cli;
use format::{format_backends, format_error, format_summary};
use parse::{log_file, matches_to_action, output_mode, CliAction};

const EXIT_SUCCESS: i32 = 0;
const EXIT_FAILURE: i32 = 1;
const EXIT_USAGE: i32 = 2;

fn main() {
    let matches = build_cli().get_matches();
    let mode = output_mode(&matches);

    if let Err(e) = init_logging(log_file(&matches).as_deref()) {
        eprintln!("{}", format_error(&format!("{:#}", e), mode));
        process::exit(EXIT_USAGE);
    }

    let action = match matches_to_action(&matches) {
        Ok(action) => action,
        Err(e) => {
            eprintln!("{}", format_error(&e, mode));
            process::exit(EXIT_USAGE);
        }
    };

    let code = match action {
        CliAction::ListBackends => {
            println!("{}", format_backends(&xport_storage::available_backends(), mode));
            EXIT_SUCCESS
        }
        CliAction::Run(config) => run_benchmark(config, mode),
    };
    process::exit(code);
}

fn run_benchmark(config: HarnessConfig, mode: OutputMode) -> i32 {
    log_resolved_config(&config);
    let reporter = Tee(ConsoleReporter::stdout(mode), TracingReporter);
    let mut harness = Harness::with_reporter(config, reporter);

    match harness.try_run() {
        Ok(summary) => {
            println!("{}", format_summary(&summary, mode));
            EXIT_SUCCESS
        }
        Err(e) => {
            eprintln!("{}", format_error(&e, mode));
            if e.is_config_error() {
                EXIT_USAGE
            } else {
                EXIT_FAILURE
            }
        }
    }
}

/// Log the settings after file, flags and environment were merged
fn log_resolved_config(config: &HarnessConfig) {
    info!(
        target: "xport::cli",
        backend = %config.backend,
        tmp_dir = %config.tmp_dir.display(),
        count = config.count,
        no_cleanup = config.no_cleanup,
        seed = ?config.seed,
        "resolved configuration"
    );
}

/// Install the fmt subscriber; `RUST_LOG` overrides the default `info` level.
fn init_logging(log_file: Option<&Path>) -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    match log_file {
        Some(path) => {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("cannot open log file '{}'", path.display()))?;
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .init();
        }
        None => {
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(std::io::stderr)
                .init();
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{self, Write};
    use std::sync::Arc;

    #[derive(Clone, Default)]
    struct Captured(Arc<Mutex<Vec<u8>>>);

    impl Write for Captured {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_resolved_config_is_logged() {
        let captured = Captured::default();
        let writer = captured.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_ansi(false)
            .with_writer(move || writer.clone())
            .finish();

        let mut config = HarnessConfig::new("directory", "/var/tmp", 25);
        config.no_cleanup = true;
        tracing::subscriber::with_default(subscriber, || log_resolved_config(&config));

        let text = String::from_utf8(captured.0.lock().unwrap().clone()).unwrap();
        assert!(text.contains("resolved configuration"), "{}", text);
        assert!(text.contains("xport::cli"), "{}", text);
        assert!(text.contains("backend=directory"), "{}", text);
        assert!(text.contains("count=25"), "{}", text);
        assert!(text.contains("no_cleanup=true"), "{}", text);
    }
}
