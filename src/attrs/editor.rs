use chrono::Utc;
use indexmap::IndexMap;

use crate::attrs::schema::{
    FieldKind, FieldValue, STANDARD_FIELDS, STATUS_RELEVANT_FIELDS, field_by_name, task_fields,
};
use crate::model::task::TaskRecord;
use crate::ops::status::auto_update_status;
use crate::store::{StorageError, Store};

/// Working-copy editor over every field the task schema exposes.
///
/// `load` snapshots the record into two maps; edits touch only `working`.
/// `apply` writes the changed set back through the schema setters, recomputes
/// the status when a status-relevant field moved, and commits. A failed
/// commit leaves the snapshot untouched so a retry sees the same changed set.
#[derive(Debug, Clone)]
pub struct AttributeDiffEditor {
    working: IndexMap<&'static str, FieldValue>,
    original: IndexMap<&'static str, FieldValue>,
}

/// Presentation filters over editor rows. Pure: selecting rows never mutates
/// editor state.
#[derive(Debug, Clone, Copy)]
pub struct RowFilter {
    pub only_changed: bool,
    pub hide_standard: bool,
    pub show_empty: bool,
}

impl Default for RowFilter {
    fn default() -> Self {
        RowFilter {
            only_changed: false,
            hide_standard: false,
            show_empty: true,
        }
    }
}

/// One visible editor row
#[derive(Debug)]
pub struct Row<'a> {
    pub name: &'static str,
    pub kind: FieldKind,
    pub value: &'a FieldValue,
    pub edited: bool,
}

impl AttributeDiffEditor {
    /// Snapshot a record's current field values. The changed set starts empty.
    pub fn load(record: &TaskRecord) -> Self {
        let mut values = IndexMap::new();
        for field in task_fields() {
            values.insert(field.name, (field.get)(record));
        }
        AttributeDiffEditor {
            working: values.clone(),
            original: values,
        }
    }

    /// Edit one working value. The value is coerced to the field's declared
    /// kind (numeric widening only); writes to unknown field names are
    /// dropped. No validation happens at this layer.
    pub fn set_field(&mut self, name: &str, value: FieldValue) {
        let Some(field) = field_by_name(name) else {
            log::warn!("ignoring edit to unknown field `{}`", name);
            return;
        };
        self.working[field.name] = value.coerce(field.kind);
    }

    /// Current working value for a field
    pub fn get(&self, name: &str) -> Option<&FieldValue> {
        self.working.get(name)
    }

    /// Names of every field whose working value differs from the snapshot,
    /// in schema order.
    pub fn changed_fields(&self) -> Vec<&'static str> {
        self.working
            .iter()
            .filter_map(|(&name, value)| {
                if value.loose_eq(&self.original[name]) {
                    None
                } else {
                    Some(name)
                }
            })
            .collect()
    }

    pub fn has_changes(&self) -> bool {
        !self.changed_fields().is_empty()
    }

    /// Discard unsaved edits
    pub fn reset(&mut self) {
        self.working = self.original.clone();
    }

    /// Write every changed field into the record, recompute the status if a
    /// status-relevant field changed, and commit.
    ///
    /// Commit failure is returned unchanged and the snapshot is not advanced,
    /// so the same changed set applies on retry. On success the snapshot
    /// moves to the working values and a second apply is a no-op.
    pub fn apply<S: Store>(
        &mut self,
        record: &mut TaskRecord,
        store: &mut S,
    ) -> Result<(), StorageError> {
        let changed = self.changed_fields();
        let mut needs_status_recalc = false;

        for name in &changed {
            if let Some(field) = field_by_name(name) {
                (field.set)(record, self.working[*name].clone());
                if STATUS_RELEVANT_FIELDS.contains(name) {
                    needs_status_recalc = true;
                }
            }
        }

        if needs_status_recalc {
            auto_update_status(record, Utc::now().date_naive());
        }

        store.save(record)?;

        // Re-snapshot from the record rather than the working map: setters
        // may have normalized values (labels) or dropped writes (immutable
        // fields), and the recompute may have moved the status.
        *self = AttributeDiffEditor::load(record);
        Ok(())
    }

    /// Rows matching the given presentation filter, in schema order
    pub fn rows(&self, filter: &RowFilter) -> Vec<Row<'_>> {
        self.working
            .iter()
            .filter_map(|(&name, value)| {
                if filter.hide_standard && STANDARD_FIELDS.contains(&name) {
                    return None;
                }
                let edited = !value.loose_eq(&self.original[name]);
                if filter.only_changed && !edited {
                    return None;
                }
                if !filter.show_empty && value.is_empty() {
                    return None;
                }
                let kind = field_by_name(name).map(|f| f.kind)?;
                Some(Row {
                    name,
                    kind,
                    value,
                    edited,
                })
            })
            .collect()
    }
}
