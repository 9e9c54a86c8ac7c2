use chrono::{NaiveDate, Utc};

use crate::model::task::{Domain, TaskRecord, TaskStatus};
use crate::ops::status::auto_update_status;
use crate::parse::parse_quick_add;
use crate::store::{Predicate, Query, StorageError, Store};

/// Error type for task operations
#[derive(Debug, thiserror::Error)]
pub enum TaskError {
    #[error("title cannot be empty")]
    EmptyTitle,
    #[error(transparent)]
    Storage(#[from] StorageError),
}

// ---------------------------------------------------------------------------
// Creation
// ---------------------------------------------------------------------------

/// Create an action from a quick-add line and persist it. The line may carry
/// a `#project` token and a date word; whatever remains becomes the title.
/// Returns the saved record.
pub fn quick_add<S: Store>(
    store: &mut S,
    input: &str,
    domain: Option<Domain>,
) -> Result<TaskRecord, TaskError> {
    let parsed = parse_quick_add(input);
    if parsed.title.is_empty() {
        return Err(TaskError::EmptyTitle);
    }

    let mut record = TaskRecord::new(parsed.title);
    record.status = Some(TaskStatus::Inbox);
    record.created_at = Some(Utc::now());
    record.project = parsed.project;
    record.due_date = parsed.due;
    record.domain = domain;

    store.save(&record)?;
    Ok(record)
}

// ---------------------------------------------------------------------------
// Editing
// ---------------------------------------------------------------------------

/// The full editor's commit: trim the title (empty is a validation error),
/// collapse blank project/notes to absent, stamp `created_at` if this is the
/// first save, recompute the status, and persist.
pub fn save_action<S: Store>(
    store: &mut S,
    record: &mut TaskRecord,
    today: NaiveDate,
) -> Result<(), TaskError> {
    let title = record.title.trim();
    if title.is_empty() {
        return Err(TaskError::EmptyTitle);
    }
    record.title = title.to_string();

    record.project = record
        .project
        .take()
        .filter(|p| !p.trim().is_empty());
    record.notes = record.notes.take().filter(|n| !n.trim().is_empty());

    record.ensure_created_at();
    auto_update_status(record, today);
    store.save(record)?;
    Ok(())
}

/// Toggle completion and reconcile the status with it
pub fn set_completed(record: &mut TaskRecord, done: bool, today: NaiveDate) {
    record.is_completed = done;
    auto_update_status(record, today);
}

/// Remove an action from the store. Terminal: there is no archive.
pub fn delete_action<S: Store>(store: &mut S, record: &TaskRecord) -> Result<(), TaskError> {
    store.delete(record)?;
    Ok(())
}

// ---------------------------------------------------------------------------
// Queries
// ---------------------------------------------------------------------------

/// Project names seen on recently created actions, for the project picker:
/// newest first within the fetch window, then deduped and CI-sorted,
/// truncated to `limit`.
pub fn recent_projects<S: Store>(store: &S, limit: usize) -> Vec<String> {
    let query = Query::filtered("project", Predicate::NotEmpty)
        .sorted_by("created_at", false)
        .limited(40);

    let mut names: Vec<String> = Vec::new();
    for record in store.fetch(&query) {
        if let Some(project) = record.project {
            if !names
                .iter()
                .any(|n| n.eq_ignore_ascii_case(&project))
            {
                names.push(project);
            }
        }
    }
    names.sort_by_key(|n| n.to_lowercase());
    names.truncate(limit);
    names
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
