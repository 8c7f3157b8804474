//! Clap command definition.

use clap::{value_parser, Arg, ArgAction, Command};

/// Build the command-line interface.
pub fn build_cli() -> Command {
    Command::new("vcard-xport-perf")
        .about("Time vCard import, export and delete against a contact storage backend")
        .version(clap::crate_version!())
        .arg(
            Arg::new("manager")
                .short('m')
                .long("manager")
                .visible_alias("backend")
                .value_name("NAME")
                .help("Storage backend to benchmark (see --list-backends)")
                .required_unless_present_any(["config", "list-backends"]),
        )
        .arg(
            Arg::new("tmp-dir")
                .short('d')
                .long("tmp-dir")
                .value_name("PATH")
                .help("Directory under which the working directory is created")
                .value_parser(value_parser!(std::path::PathBuf))
                .required_unless_present_any(["config", "list-backends"]),
        )
        .arg(
            Arg::new("count")
                .short('n')
                .long("count")
                .value_name("N")
                .help("Number of contacts to generate")
                .value_parser(value_parser!(u64).range(1..))
                .required_unless_present_any(["config", "list-backends"]),
        )
        .arg(
            Arg::new("config")
                .long("config")
                .value_name("FILE")
                .help("TOML file with run settings; flags override it")
                .value_parser(value_parser!(std::path::PathBuf)),
        )
        .arg(
            Arg::new("seed")
                .long("seed")
                .value_name("N")
                .help("Seed the contact generator for a reproducible run")
                .value_parser(value_parser!(u64)),
        )
        .arg(
            Arg::new("store-dir")
                .long("store-dir")
                .value_name("PATH")
                .help(
                    "Store location for the directory backend \
                     [default: <tmp-dir>/vcard-xport-perf.store, kept across runs]",
                )
                .value_parser(value_parser!(std::path::PathBuf)),
        )
        .arg(
            Arg::new("no-cleanup")
                .long("no-cleanup")
                .help("Keep the working directory after the run")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("json")
                .long("json")
                .help("Print measurements as JSON lines")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("log-file")
                .long("log-file")
                .value_name("PATH")
                .help("Write the log to a file instead of stderr")
                .value_parser(value_parser!(std::path::PathBuf)),
        )
        .arg(
            Arg::new("list-backends")
                .long("list-backends")
                .help("List available backends and exit")
                .action(ArgAction::SetTrue)
                .exclusive(true),
        )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_is_well_formed() {
        build_cli().debug_assert();
    }

    #[test]
    fn test_short_flags() {
        let matches = build_cli()
            .try_get_matches_from(["vcard-xport-perf", "-m", "memory", "-d", "/tmp", "-n", "10"])
            .unwrap();
        assert_eq!(matches.get_one::<String>("manager").unwrap(), "memory");
        assert_eq!(*matches.get_one::<u64>("count").unwrap(), 10);
    }

    #[test]
    fn test_backend_alias() {
        let matches = build_cli()
            .try_get_matches_from([
                "vcard-xport-perf",
                "--backend",
                "directory",
                "--tmp-dir",
                "/tmp",
                "--count",
                "1",
            ])
            .unwrap();
        assert_eq!(matches.get_one::<String>("manager").unwrap(), "directory");
    }

    #[test]
    fn test_missing_required_flags() {
        let err = build_cli()
            .try_get_matches_from(["vcard-xport-perf", "-m", "memory"])
            .unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::MissingRequiredArgument);
    }

    #[test]
    fn test_store_dir_help_names_default() {
        let help = build_cli().render_help().to_string();
        assert!(help.contains("<tmp-dir>/vcard-xport-perf.store"), "{}", help);
    }

    #[test]
    fn test_zero_count_rejected() {
        let err = build_cli()
            .try_get_matches_from(["vcard-xport-perf", "-m", "memory", "-d", "/tmp", "-n", "0"])
            .unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::ValueValidation);
    }

    #[test]
    fn test_list_backends_alone() {
        let matches = build_cli()
            .try_get_matches_from(["vcard-xport-perf", "--list-backends"])
            .unwrap();
        assert!(matches.get_flag("list-backends"));
    }

    #[test]
    fn test_config_replaces_required_flags() {
        assert!(build_cli()
            .try_get_matches_from(["vcard-xport-perf", "--config", "run.toml"])
            .is_ok());
    }
}
