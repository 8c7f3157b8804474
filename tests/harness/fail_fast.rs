//! A backend failure stops the run at the failing phase

use crate::common::*;

fn run_with(point: FailPoint, count: usize) -> (TestRun, FaultyStore<MemoryStore>, Harness<CollectingReporter>, HarnessError) {
    let run = TestRun::new();
    let store = FaultyStore::new(MemoryStore::new(), point);
    let mut harness = run.harness("memory", count);
    let err = harness.run_against(|| Ok(&store)).unwrap_err();
    (run, store, harness, err)
}

#[test]
fn save_failure_skips_export_and_delete() {
    let (_run, store, harness, err) = run_with(FailPoint::Save, 6);

    assert_eq!(err.phase(), Some(Phase::Import));
    assert_eq!(store.calls(FailPoint::Save), 1);
    assert_eq!(store.calls(FailPoint::Fetch), 0);
    assert_eq!(store.calls(FailPoint::Delete), 0);

    let tags = harness.reporter().tags();
    assert!(tags.iter().all(|t| !t.starts_with("export.") && !t.starts_with("remove.")));
    assert_eq!(tags, vec!["import.read-from-file.elapsed"]);
}

#[test]
fn fetch_failure_keeps_import_metrics() {
    let (_run, store, harness, err) = run_with(FailPoint::Fetch, 6);

    assert_eq!(err.phase(), Some(Phase::Export));
    assert_eq!(store.calls(FailPoint::Delete), 0);
    assert_eq!(
        harness.reporter().tags(),
        vec!["import.read-from-file.elapsed", "import.save-to-backend.elapsed"]
    );
    assert!(harness.reporter().value(Metric::Remove).is_none());
    // Saved contacts stay in the store; there is no rollback
    assert_eq!(store.inner().len().unwrap(), 6);
}

#[test]
fn delete_failure_reports_everything_but_remove() {
    let (_run, _store, harness, err) = run_with(FailPoint::Delete, 3);

    assert_eq!(err.phase(), Some(Phase::Delete));
    assert_eq!(harness.reporter().measurements().len(), 4);
    assert!(harness.reporter().value(Metric::ExportWriteToFiles).is_some());
    assert!(harness.reporter().value(Metric::Remove).is_none());
}

#[test]
fn contact_file_write_failure_stops_export() {
    let run = TestRun::new();
    let store = BlockedExportStore::new(run.workdir().join(contact_file_name(1)));
    let mut harness = run.harness("memory", 3);
    let err = harness.run_against(|| Ok(&store)).unwrap_err();

    assert_eq!(err.phase(), Some(Phase::Export));
    assert!(err.to_string().contains("write contact files"), "{}", err);
    assert_eq!(
        harness.reporter().tags(),
        vec![
            "import.read-from-file.elapsed",
            "import.save-to-backend.elapsed",
            "export.load-from-backend.elapsed"
        ]
    );
    // Delete never ran
    assert_eq!(store.len().unwrap(), 3);
    assert!(!run.workdir().exists());
}

#[test]
fn import_file_open_failure_stops_import() {
    let run = TestRun::new();
    let mut harness = run.harness("memory", 3);
    let import_file = run.workdir().join(ALL_CONTACTS_FILE);
    let err = harness
        .run_against(|| {
            std::fs::create_dir(&import_file)?;
            Ok(MemoryStore::new())
        })
        .unwrap_err();

    assert_eq!(err.phase(), Some(Phase::Import));
    assert!(err.to_string().contains("open import file"), "{}", err);
    assert!(harness.reporter().measurements().is_empty());
    assert!(!run.workdir().exists());
}

#[test]
fn failure_message_names_operation() {
    let (_run, _store, _harness, err) = run_with(FailPoint::Fetch, 1);
    let message = err.to_string();
    assert!(message.contains("export phase failed"), "{}", message);
    assert!(message.contains("load from backend"), "{}", message);
    assert!(message.contains("fetch_by_ids"), "{}", message);
}

#[test]
fn run_returns_false_on_injected_failure() {
    for point in FailPoint::all() {
        let run = TestRun::new();
        let store = FaultyStore::new(MemoryStore::new(), point);
        let mut harness = run.harness("memory", 2);
        assert!(harness.run_against(|| Ok(&store)).is_err(), "{:?}", point);
    }
}
