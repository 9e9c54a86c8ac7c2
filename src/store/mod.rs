pub mod memory;

pub use memory::MemoryStore;

use crate::attrs::schema::{FieldValue, field_by_name};
use crate::model::task::TaskRecord;
use uuid::Uuid;

/// Error type for the persistence collaborator. The domain layer propagates
/// these unchanged; it never interprets them beyond "the commit did not
/// happen".
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("record not found: {0}")]
    NotFound(Uuid),
    #[error("storage backend unavailable: {0}")]
    Unavailable(String),
}

/// Predicate over a single schema field
#[derive(Debug, Clone)]
pub enum Predicate {
    /// Kind-aware equality (same rules as editor change detection)
    Equals(FieldValue),
    /// Present and non-empty, e.g. `project != nil AND project != ''`
    NotEmpty,
}

/// Restrict a fetch to records where `field` satisfies `predicate`
#[derive(Debug, Clone)]
pub struct Filter {
    pub field: &'static str,
    pub predicate: Predicate,
}

/// One sort criterion; earlier keys take precedence
#[derive(Debug, Clone, Copy)]
pub struct SortKey {
    pub field: &'static str,
    pub ascending: bool,
}

/// A fetch request: optional filter, sort keys, and a result cap
#[derive(Debug, Clone, Default)]
pub struct Query {
    pub filter: Option<Filter>,
    pub sort: Vec<SortKey>,
    pub limit: Option<usize>,
}

impl Query {
    pub fn all() -> Self {
        Query::default()
    }

    pub fn filtered(field: &'static str, predicate: Predicate) -> Self {
        Query {
            filter: Some(Filter { field, predicate }),
            ..Query::default()
        }
    }

    pub fn sorted_by(mut self, field: &'static str, ascending: bool) -> Self {
        self.sort.push(SortKey { field, ascending });
        self
    }

    pub fn limited(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Whether a record passes this query's filter
    pub fn matches(&self, record: &TaskRecord) -> bool {
        let Some(filter) = &self.filter else {
            return true;
        };
        let Some(desc) = field_by_name(filter.field) else {
            log::warn!("filter on unknown field `{}` matches nothing", filter.field);
            return false;
        };
        let value = (desc.get)(record);
        match &filter.predicate {
            Predicate::Equals(expected) => value.loose_eq(expected),
            Predicate::NotEmpty => !value.is_empty(),
        }
    }
}

/// The persistence collaborator. The domain core computes values and hands
/// them here; it performs no I/O of its own. Last write wins on concurrent
/// saves of the same record.
pub trait Store {
    fn save(&mut self, record: &TaskRecord) -> Result<(), StorageError>;
    fn delete(&mut self, record: &TaskRecord) -> Result<(), StorageError>;
    fn fetch(&self, query: &Query) -> Vec<TaskRecord>;
}
