//! Healthy runs and configuration failures

use crate::common::*;

#[test]
fn memory_run_reports_five_metrics() {
    let run = TestRun::new();
    let mut harness = run.harness("memory", 10);

    let summary = harness.try_run().unwrap();
    assert_eq!(summary.records, 10);
    assert_eq!(summary.ids, 10);
    assert_eq!(summary.files_exported, 10);
    assert_eq!(summary.measurements.len(), 5);

    assert_all_metrics(harness.reporter());
    assert!(run.workdir_entries().is_empty());
    assert!(!run.workdir().exists());
}

#[test]
fn free_function_run_succeeds() {
    let run = TestRun::new();
    assert!(vcard_xport_perf::run("memory", run.prefix.path(), 10));
}

#[test]
fn unknown_backend_fails_before_creating_anything() {
    let run = TestRun::new();
    let mut harness = run.harness("does-not-exist", 5);

    assert!(!harness.run());
    assert!(harness.reporter().measurements().is_empty());
    assert!(run.prefix_entries().is_empty());
}

#[test]
fn unknown_backend_error_lists_available_backends() {
    let run = TestRun::new();
    match run.harness("does-not-exist", 5).try_run() {
        Err(HarnessError::UnknownBackend { name, available }) => {
            assert_eq!(name, "does-not-exist");
            assert_eq!(available, "memory, directory");
        }
        other => panic!("expected UnknownBackend, got {:?}", other),
    }
}

#[test]
fn directory_backend_run_leaves_store_empty() {
    let run = TestRun::new();
    let store_dir = run.prefix.path().join("store");
    let mut config = run.config("directory", 8);
    config.store_dir = Some(store_dir.clone());
    let mut harness = Harness::with_reporter(config, CollectingReporter::new());

    let summary = harness.try_run().unwrap();
    assert_eq!(summary.backend, "directory");
    assert_all_metrics(harness.reporter());
    assert_eq!(std::fs::read_dir(&store_dir).unwrap().count(), 0);
}

#[test]
fn directory_backend_store_defaults_under_prefix() {
    let run = TestRun::new();
    let summary = run.harness("directory", 4).try_run().unwrap();

    assert_eq!(summary.backend, "directory");
    assert_eq!(run.prefix_entries(), vec![DEFAULT_STORE_DIR_NAME]);
    let store_dir = run.prefix.path().join(DEFAULT_STORE_DIR_NAME);
    assert_eq!(std::fs::read_dir(store_dir).unwrap().count(), 0);
}

#[test]
fn stale_working_directory_is_emptied_first() {
    let run = TestRun::new();
    std::fs::create_dir_all(run.workdir()).unwrap();
    std::fs::write(run.workdir().join("contact_999.vcf"), b"stale").unwrap();

    let mut harness = run.retaining_harness("memory", 2);
    harness.try_run().unwrap();
    assert_eq!(
        run.workdir_entries(),
        vec![ALL_CONTACTS_FILE, "contact_0.vcf", "contact_1.vcf"]
    );
}

#[test]
fn same_seed_writes_same_import_file() {
    let first = TestRun::new();
    let second = TestRun::new();
    first.retaining_harness("memory", 5).try_run().unwrap();
    second.retaining_harness("memory", 5).try_run().unwrap();

    let a = std::fs::read(first.workdir().join(ALL_CONTACTS_FILE)).unwrap();
    let b = std::fs::read(second.workdir().join(ALL_CONTACTS_FILE)).unwrap();
    assert_eq!(a, b);
}
