use aura::attrs::{AttributeDiffEditor, FieldValue};
use aura::model::{Domain, TaskRecord, TaskStatus};
use aura::ops::{initialize_default_status, quick_add, save_action, set_completed};
use aura::store::{MemoryStore, Predicate, Query, StorageError, Store};
use chrono::{Duration, Utc};
use pretty_assertions::assert_eq;

/// Store that accepts nothing, for exercising failed-commit paths
struct OfflineStore;

impl Store for OfflineStore {
    fn save(&mut self, _record: &TaskRecord) -> Result<(), StorageError> {
        Err(StorageError::Unavailable("offline".into()))
    }

    fn delete(&mut self, _record: &TaskRecord) -> Result<(), StorageError> {
        Err(StorageError::Unavailable("offline".into()))
    }

    fn fetch(&self, _query: &Query) -> Vec<TaskRecord> {
        Vec::new()
    }
}

// ============================================================================
// Creation → edit → apply round trips
// ============================================================================

#[test]
fn quick_add_then_generic_edit_lands_in_store() {
    let mut store = MemoryStore::new();
    let mut record = quick_add(&mut store, "Draft budget #Finance", Some(Domain::Work)).unwrap();

    let mut editor = AttributeDiffEditor::load(&record);
    assert!(editor.changed_fields().is_empty());

    editor.set_field("priority", FieldValue::Str("High".into()));
    editor.set_field("notes", FieldValue::Str("ask accounting for numbers".into()));
    assert_eq!(editor.changed_fields(), ["priority", "notes"]);

    editor.apply(&mut record, &mut store).unwrap();

    let stored = store.get(record.id).unwrap();
    assert_eq!(stored.priority.map(|p| p.as_str()), Some("High"));
    assert_eq!(stored.notes.as_deref(), Some("ask accounting for numbers"));
    assert_eq!(stored.project.as_deref(), Some("Finance"));
}

#[test]
fn moving_due_date_into_the_past_flips_status_to_overdue() {
    let mut store = MemoryStore::new();
    let mut record = quick_add(&mut store, "File taxes", None).unwrap();
    assert_eq!(record.status, Some(TaskStatus::Inbox));

    let mut editor = AttributeDiffEditor::load(&record);
    editor.set_field(
        "due_date",
        FieldValue::Date(Utc::now() - Duration::days(10)),
    );
    editor.apply(&mut record, &mut store).unwrap();

    assert_eq!(record.status, Some(TaskStatus::Overdue));
    assert_eq!(
        store.get(record.id).unwrap().status,
        Some(TaskStatus::Overdue)
    );
}

#[test]
fn failed_commit_keeps_the_changed_set_for_retry() {
    let mut good_store = MemoryStore::new();
    let mut record = quick_add(&mut good_store, "Sync notes", None).unwrap();

    let mut editor = AttributeDiffEditor::load(&record);
    editor.set_field("title", FieldValue::Str("Sync notes v2".into()));

    let mut offline = OfflineStore;
    let err = editor.apply(&mut record, &mut offline).unwrap_err();
    assert!(matches!(err, StorageError::Unavailable(_)));

    // The snapshot did not advance: a retry sees the same diff
    assert_eq!(editor.changed_fields(), ["title"]);

    editor.apply(&mut record, &mut good_store).unwrap();
    assert!(editor.changed_fields().is_empty());
    assert_eq!(good_store.get(record.id).unwrap().title, "Sync notes v2");
}

// ============================================================================
// Lifecycle scenarios
// ============================================================================

#[test]
fn new_record_due_today_initializes_to_inbox() {
    let mut record = TaskRecord::new("Fresh");
    initialize_default_status(&mut record, Utc::now());
    assert_eq!(record.status, Some(TaskStatus::Inbox));
    assert!(record.created_at.is_some());
}

#[test]
fn completing_then_saving_round_trips_through_store() {
    let mut store = MemoryStore::new();
    let mut record = quick_add(&mut store, "Ship release", None).unwrap();
    let today = Utc::now().date_naive();

    set_completed(&mut record, true, today);
    save_action(&mut store, &mut record, today).unwrap();

    let stored = store.get(record.id).unwrap();
    assert!(stored.is_completed);
    assert_eq!(stored.status, Some(TaskStatus::Completed));
}

#[test]
fn label_edits_survive_a_store_round_trip_normalized() {
    let mut store = MemoryStore::new();
    let mut record = quick_add(&mut store, "Sort garage", None).unwrap();
    record.set_labels(["Weekend", " weekend ", "chores"]);
    save_action(&mut store, &mut record, Utc::now().date_naive()).unwrap();

    let stored = store.get(record.id).unwrap();
    assert_eq!(stored.labels(), ["chores", "Weekend"]);
}

// ============================================================================
// Fetch surface
// ============================================================================

#[test]
fn domain_filter_partitions_actions() {
    let mut store = MemoryStore::new();
    quick_add(&mut store, "Standup", Some(Domain::Work)).unwrap();
    quick_add(&mut store, "Groceries", Some(Domain::Personal)).unwrap();
    quick_add(&mut store, "Rust book", Some(Domain::Learning)).unwrap();

    let work = store.fetch(&Query::filtered(
        "domain",
        Predicate::Equals(FieldValue::Str("Work".into())),
    ));
    assert_eq!(work.len(), 1);
    assert_eq!(work[0].title, "Standup");
}
