use chrono::{DateTime, NaiveDate, Utc};

use crate::model::task::{TaskRecord, TaskStatus};

/// Compute an action's next status from its current fields. Total function:
/// every input combination yields a status, never an error.
///
/// Rule order matters and is part of the contract:
///
/// 1. An absent due date is treated as falling on `today` for comparisons.
/// 2. An absent (or unrecognized, which parses to absent) current status
///    resets to inbox, before the completion check — see
///    `initialize_default_status`, which checks completion first. The two
///    orderings intentionally differ; callers that care route through the
///    right entry point.
/// 3. A completed action is `Completed`, regardless of dates.
/// 4. A due day strictly before `today` is `Overdue` — this outranks the
///    in-progress preservation below.
/// 5. With `preserve_progress_states`, `InProgress` and `NeedsReview` are
///    kept as-is.
/// 6. An inbox action stays in the inbox while due today, otherwise it
///    graduates to `Todo`.
/// 7. An overdue action whose due day is no longer past graduates to `Todo`.
/// 8. Anything else is left unchanged.
pub fn compute_next_status(
    current: Option<TaskStatus>,
    is_completed: bool,
    due_date: Option<DateTime<Utc>>,
    today: NaiveDate,
    preserve_progress_states: bool,
) -> TaskStatus {
    let due_day = due_date.map(|d| d.date_naive()).unwrap_or(today);

    let Some(current) = current else {
        return TaskStatus::Inbox;
    };

    if is_completed {
        return TaskStatus::Completed;
    }

    if due_day < today {
        return TaskStatus::Overdue;
    }

    if preserve_progress_states
        && matches!(current, TaskStatus::InProgress | TaskStatus::NeedsReview)
    {
        return current;
    }

    match current {
        TaskStatus::Inbox => {
            if due_day == today {
                TaskStatus::Inbox
            } else {
                TaskStatus::Todo
            }
        }
        TaskStatus::Overdue => TaskStatus::Todo,
        other => other,
    }
}

/// Recompute and assign a record's status in place, with progress-state
/// preservation on. `today` is the caller's calendar day.
pub fn auto_update_status(record: &mut TaskRecord, today: NaiveDate) {
    record.status = Some(compute_next_status(
        record.status,
        record.is_completed,
        record.due_date,
        today,
        true,
    ));
}

/// Creation-time defaulting, applied once when a record is first set up and
/// never on later edits: stamp `created_at`, default the due date, and seed
/// the status (completed wins, otherwise an unset status starts in the inbox).
pub fn initialize_default_status(record: &mut TaskRecord, default_due_date: DateTime<Utc>) {
    record.ensure_created_at();
    if record.due_date.is_none() {
        record.due_date = Some(default_due_date);
    }
    if record.is_completed {
        record.status = Some(TaskStatus::Completed);
    } else if record.status.is_none() {
        record.status = Some(TaskStatus::Inbox);
    }
}
