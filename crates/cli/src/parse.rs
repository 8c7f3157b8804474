//! ArgMatches → CliAction conversion.
//!
//! Settings are merged lowest to highest: defaults, the `--config` file,
//! command-line flags, then the no-cleanup environment variable.

use std::path::PathBuf;

use clap::ArgMatches;
use xport_harness::{HarnessConfig, HarnessError, OutputMode};

/// What the command line asked for.
#[derive(Debug)]
pub enum CliAction {
    /// Print the available backends.
    ListBackends,
    /// Run the benchmark.
    Run(HarnessConfig),
}

/// Output mode selected by `--json`.
pub fn output_mode(matches: &ArgMatches) -> OutputMode {
    if matches.get_flag("json") {
        OutputMode::Json
    } else {
        OutputMode::Human
    }
}

/// Log destination selected by `--log-file`.
pub fn log_file(matches: &ArgMatches) -> Option<PathBuf> {
    matches.get_one::<PathBuf>("log-file").cloned()
}

/// Convert parsed arguments into an action.
///
/// # Errors
///
/// Returns a configuration error if the config file cannot be loaded or
/// the merged settings are invalid.
pub fn matches_to_action(matches: &ArgMatches) -> Result<CliAction, HarnessError> {
    if matches.get_flag("list-backends") {
        return Ok(CliAction::ListBackends);
    }

    let mut config = match matches.get_one::<PathBuf>("config") {
        Some(path) => HarnessConfig::from_file(path)?,
        None => HarnessConfig::default(),
    };
    apply_flags(&mut config, matches)?;

    let config = config.with_env_overrides();
    config.validate()?;
    Ok(CliAction::Run(config))
}

fn apply_flags(config: &mut HarnessConfig, matches: &ArgMatches) -> Result<(), HarnessError> {
    if let Some(name) = matches.get_one::<String>("manager") {
        config.backend = name.clone();
    }
    if let Some(dir) = matches.get_one::<PathBuf>("tmp-dir") {
        config.tmp_dir = dir.clone();
    }
    if let Some(&count) = matches.get_one::<u64>("count") {
        config.count = usize::try_from(count).map_err(|_| {
            HarnessError::InvalidConfig(format!("contact count {} is too large", count))
        })?;
    }
    if let Some(&seed) = matches.get_one::<u64>("seed") {
        config.seed = Some(seed);
    }
    if let Some(dir) = matches.get_one::<PathBuf>("store-dir") {
        config.store_dir = Some(dir.clone());
    }
    if matches.get_flag("no-cleanup") {
        config.no_cleanup = true;
    }
    Ok(())
}
