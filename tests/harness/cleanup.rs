//! The working directory is cleaned on every exit path

use crate::common::*;
use vcard_xport_perf::WorkingDirectory;

fn open_failure() -> StoreResult<MemoryStore> {
    Err(StoreError::Injected("open"))
}

#[test]
fn cleaned_after_every_injected_failure() {
    for point in FailPoint::all() {
        let run = TestRun::new();
        let store = FaultyStore::new(MemoryStore::new(), point);
        let mut harness = run.harness("memory", 4);
        assert!(harness.run_against(|| Ok(&store)).is_err());
        assert!(!run.workdir().exists(), "{:?} left {:?}", point, run.workdir_entries());
    }
}

#[test]
fn cleaned_after_open_failure() {
    let run = TestRun::new();
    let mut harness = run.harness("memory", 4);
    let err = harness.run_against(open_failure).unwrap_err();
    assert_eq!(err.phase(), Some(Phase::Import));
    assert!(!run.workdir().exists());
}

#[test]
fn nothing_to_clean_after_unknown_backend() {
    let run = TestRun::new();
    assert!(!run.harness("nope", 4).run());
    assert!(run.prefix_entries().is_empty());
}

#[test]
fn no_cleanup_keeps_files_up_to_failure() {
    let cases = [
        (FailPoint::Save, vec![ALL_CONTACTS_FILE]),
        (FailPoint::Fetch, vec![ALL_CONTACTS_FILE]),
        (
            FailPoint::Delete,
            vec![ALL_CONTACTS_FILE, "contact_0.vcf", "contact_1.vcf"],
        ),
    ];
    for (point, expected) in cases {
        let run = TestRun::new();
        let store = FaultyStore::new(MemoryStore::new(), point);
        let mut harness = run.retaining_harness("memory", 2);
        assert!(harness.run_against(|| Ok(&store)).is_err());
        assert_eq!(run.workdir_entries(), expected, "{:?}", point);
    }
}

#[test]
fn no_cleanup_keeps_files_up_to_failed_export_write() {
    let run = TestRun::new();
    let store = BlockedExportStore::new(run.workdir().join(contact_file_name(1)));
    let mut harness = run.retaining_harness("memory", 3);
    assert!(harness.run_against(|| Ok(&store)).is_err());

    assert_eq!(
        run.workdir_entries(),
        vec![ALL_CONTACTS_FILE, "contact_0.vcf", "contact_1.vcf"]
    );
    assert!(run.workdir().join(contact_file_name(1)).is_dir());
}

#[test]
fn no_cleanup_keeps_successful_run_output() {
    let run = TestRun::new();
    run.retaining_harness("memory", 3).try_run().unwrap();
    assert_eq!(run.workdir_entries().len(), 4);
}

#[test]
fn cleanup_twice_is_a_no_op() {
    let run = TestRun::new();
    let workdir = WorkingDirectory::prepare(run.prefix.path()).unwrap();
    assert!(workdir.cleanup());
    assert!(workdir.cleanup());
    drop(workdir);
    assert!(run.prefix_entries().is_empty());
}
