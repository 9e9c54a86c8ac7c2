use std::cmp::Ordering;

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::model::labels::{decode_labels, encode_labels};
use crate::model::task::{Domain, Priority, TaskRecord, TaskStatus};

/// Declared kind of a schema field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Str,
    Bool,
    Date,
    Int,
    Float,
    Id,
    Binary,
}

impl FieldKind {
    /// Short display label for a kind badge
    pub fn label(self) -> &'static str {
        match self {
            FieldKind::Str => "String",
            FieldKind::Bool => "Bool",
            FieldKind::Date => "Date",
            FieldKind::Int => "Int",
            FieldKind::Float => "Number",
            FieldKind::Id => "Id",
            FieldKind::Binary => "Binary",
        }
    }
}

/// A field's value as seen by the generic editor. The tagged union replaces
/// an untyped value bag: equality and coercion rules live here, enforced by
/// the type system.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Absent,
    Str(String),
    Bool(bool),
    Date(DateTime<Utc>),
    Int(i64),
    Float(f64),
    Id(Uuid),
    Binary(Vec<u8>),
}

impl FieldValue {
    fn from_opt_str(value: Option<&str>) -> FieldValue {
        match value {
            Some(s) => FieldValue::Str(s.to_string()),
            None => FieldValue::Absent,
        }
    }

    fn from_opt_date(value: Option<DateTime<Utc>>) -> FieldValue {
        match value {
            Some(d) => FieldValue::Date(d),
            None => FieldValue::Absent,
        }
    }

    /// The kind this value carries, `None` for absent
    pub fn kind(&self) -> Option<FieldKind> {
        match self {
            FieldValue::Absent => None,
            FieldValue::Str(_) => Some(FieldKind::Str),
            FieldValue::Bool(_) => Some(FieldKind::Bool),
            FieldValue::Date(_) => Some(FieldKind::Date),
            FieldValue::Int(_) => Some(FieldKind::Int),
            FieldValue::Float(_) => Some(FieldKind::Float),
            FieldValue::Id(_) => Some(FieldKind::Id),
            FieldValue::Binary(_) => Some(FieldKind::Binary),
        }
    }

    /// Kind-aware equality used for change detection and filters:
    /// absent == absent, exact equality within a kind except dates, which
    /// tolerate up to half a second of serialization rounding. Any variant
    /// mismatch (including absent vs present) is unequal.
    pub fn loose_eq(&self, other: &FieldValue) -> bool {
        match (self, other) {
            (FieldValue::Absent, FieldValue::Absent) => true,
            (FieldValue::Str(a), FieldValue::Str(b)) => a == b,
            (FieldValue::Bool(a), FieldValue::Bool(b)) => a == b,
            (FieldValue::Date(a), FieldValue::Date(b)) => {
                (a.timestamp_millis() - b.timestamp_millis()).abs() < 500
            }
            (FieldValue::Int(a), FieldValue::Int(b)) => a == b,
            (FieldValue::Float(a), FieldValue::Float(b)) => a == b,
            (FieldValue::Id(a), FieldValue::Id(b)) => a == b,
            (FieldValue::Binary(a), FieldValue::Binary(b)) => a == b,
            _ => false,
        }
    }

    /// Coerce toward a declared kind. Only numeric widening is performed;
    /// everything else passes through unchanged (a mismatch simply compares
    /// unequal and the setter ignores it).
    pub fn coerce(self, kind: FieldKind) -> FieldValue {
        match (self, kind) {
            (FieldValue::Int(i), FieldKind::Float) => FieldValue::Float(i as f64),
            (value, _) => value,
        }
    }

    /// Whether this value reads as empty in the editor ("hide empty" filter)
    pub fn is_empty(&self) -> bool {
        match self {
            FieldValue::Absent => true,
            FieldValue::Str(s) => s.is_empty(),
            FieldValue::Binary(b) => b.is_empty(),
            _ => false,
        }
    }

    /// Total ordering for sort keys; absent sorts first, kinds never mix in
    /// practice because a sort key addresses a single schema field.
    pub fn order(&self, other: &FieldValue) -> Ordering {
        match (self, other) {
            (FieldValue::Absent, FieldValue::Absent) => Ordering::Equal,
            (FieldValue::Absent, _) => Ordering::Less,
            (_, FieldValue::Absent) => Ordering::Greater,
            (FieldValue::Str(a), FieldValue::Str(b)) => a.cmp(b),
            (FieldValue::Bool(a), FieldValue::Bool(b)) => a.cmp(b),
            (FieldValue::Date(a), FieldValue::Date(b)) => a.cmp(b),
            (FieldValue::Int(a), FieldValue::Int(b)) => a.cmp(b),
            (FieldValue::Float(a), FieldValue::Float(b)) => {
                a.partial_cmp(b).unwrap_or(Ordering::Equal)
            }
            (FieldValue::Id(a), FieldValue::Id(b)) => a.cmp(b),
            (FieldValue::Binary(a), FieldValue::Binary(b)) => a.cmp(b),
            (a, b) => rank(a).cmp(&rank(b)),
        }
    }
}

fn rank(value: &FieldValue) -> u8 {
    match value {
        FieldValue::Absent => 0,
        FieldValue::Str(_) => 1,
        FieldValue::Bool(_) => 2,
        FieldValue::Date(_) => 3,
        FieldValue::Int(_) => 4,
        FieldValue::Float(_) => 5,
        FieldValue::Id(_) => 6,
        FieldValue::Binary(_) => 7,
    }
}

/// One schema entry: a named field with its declared kind and typed
/// accessor/mutator. Built once per record type instead of discovered by
/// runtime reflection.
#[derive(Clone, Copy)]
pub struct FieldDescriptor {
    pub name: &'static str,
    pub kind: FieldKind,
    pub get: fn(&TaskRecord) -> FieldValue,
    pub set: fn(&mut TaskRecord, FieldValue),
}

/// Fields the primary editor already covers; the "hide standard" filter
/// suppresses these.
pub const STANDARD_FIELDS: &[&str] = &[
    "title",
    "project",
    "notes",
    "due_date",
    "status",
    "domain",
    "created_at",
    "is_completed",
];

/// Fields whose change triggers a status recompute on apply
pub const STATUS_RELEVANT_FIELDS: &[&str] = &["due_date", "status", "is_completed"];

static TASK_SCHEMA: [FieldDescriptor; 11] = [
    FieldDescriptor {
        name: "id",
        kind: FieldKind::Id,
        get: |r| FieldValue::Id(r.id),
        // Immutable after creation; writes are dropped
        set: |_, _| log::debug!("ignoring write to immutable field `id`"),
    },
    FieldDescriptor {
        name: "title",
        kind: FieldKind::Str,
        get: |r| FieldValue::Str(r.title.clone()),
        set: |r, v| match v {
            FieldValue::Str(s) => r.title = s,
            FieldValue::Absent => r.title.clear(),
            _ => {}
        },
    },
    FieldDescriptor {
        name: "due_date",
        kind: FieldKind::Date,
        get: |r| FieldValue::from_opt_date(r.due_date),
        set: |r, v| match v {
            FieldValue::Date(d) => r.due_date = Some(d),
            FieldValue::Absent => r.due_date = None,
            _ => {}
        },
    },
    FieldDescriptor {
        name: "project",
        kind: FieldKind::Str,
        get: |r| FieldValue::from_opt_str(r.project.as_deref()),
        set: |r, v| match v {
            FieldValue::Str(s) => r.project = Some(s),
            FieldValue::Absent => r.project = None,
            _ => {}
        },
    },
    FieldDescriptor {
        name: "labels",
        kind: FieldKind::Binary,
        get: |r| {
            if r.labels().is_empty() {
                FieldValue::Absent
            } else {
                FieldValue::Binary(encode_labels(r.labels()))
            }
        },
        set: |r, v| match v {
            FieldValue::Binary(data) => r.set_labels(decode_labels(&data)),
            FieldValue::Absent => r.set_labels(Vec::<String>::new()),
            _ => {}
        },
    },
    FieldDescriptor {
        name: "priority",
        kind: FieldKind::Str,
        get: |r| FieldValue::from_opt_str(r.priority.map(Priority::as_str)),
        set: |r, v| match v {
            FieldValue::Str(s) => r.priority = Priority::parse(&s),
            FieldValue::Absent => r.priority = None,
            _ => {}
        },
    },
    FieldDescriptor {
        name: "domain",
        kind: FieldKind::Str,
        get: |r| FieldValue::from_opt_str(r.domain.map(Domain::as_str)),
        set: |r, v| match v {
            FieldValue::Str(s) => r.domain = Domain::parse(&s),
            FieldValue::Absent => r.domain = None,
            _ => {}
        },
    },
    FieldDescriptor {
        name: "is_completed",
        kind: FieldKind::Bool,
        get: |r| FieldValue::Bool(r.is_completed),
        set: |r, v| {
            if let FieldValue::Bool(b) = v {
                r.is_completed = b;
            }
        },
    },
    FieldDescriptor {
        name: "status",
        kind: FieldKind::Str,
        get: |r| FieldValue::from_opt_str(r.status.map(TaskStatus::as_str)),
        // Unknown raw values parse to absent; the status engine resets those
        set: |r, v| match v {
            FieldValue::Str(s) => r.status = TaskStatus::parse(&s),
            FieldValue::Absent => r.status = None,
            _ => {}
        },
    },
    FieldDescriptor {
        name: "created_at",
        kind: FieldKind::Date,
        get: |r| FieldValue::from_opt_date(r.created_at),
        // Set once at first persistence, never through the editor
        set: |_, _| log::debug!("ignoring write to immutable field `created_at`"),
    },
    FieldDescriptor {
        name: "notes",
        kind: FieldKind::Str,
        get: |r| FieldValue::from_opt_str(r.notes.as_deref()),
        set: |r, v| match v {
            FieldValue::Str(s) => r.notes = Some(s),
            FieldValue::Absent => r.notes = None,
            _ => {}
        },
    },
];

/// The full attribute schema for `TaskRecord`, in enumeration order
pub fn task_fields() -> &'static [FieldDescriptor] {
    &TASK_SCHEMA
}

/// Look up a single descriptor by field name
pub fn field_by_name(name: &str) -> Option<&'static FieldDescriptor> {
    TASK_SCHEMA.iter().find(|f| f.name == name)
}
