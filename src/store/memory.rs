use indexmap::IndexMap;
use uuid::Uuid;

use crate::attrs::schema::field_by_name;
use crate::model::task::TaskRecord;
use crate::store::{Query, StorageError, Store};

/// In-memory object store keyed by record id, in insertion order. Backs the
/// ops layer in tests and any host that has no durable store wired up.
#[derive(Debug, Default)]
pub struct MemoryStore {
    records: IndexMap<Uuid, TaskRecord>,
}

impl MemoryStore {
    pub fn new() -> Self {
        MemoryStore::default()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn get(&self, id: Uuid) -> Option<&TaskRecord> {
        self.records.get(&id)
    }
}

impl Store for MemoryStore {
    fn save(&mut self, record: &TaskRecord) -> Result<(), StorageError> {
        let mut record = record.clone();
        // created_at is set once at first persistence and never overwritten
        if let Some(existing) = self.records.get(&record.id) {
            if existing.created_at.is_some() {
                record.created_at = existing.created_at;
            }
        }
        log::debug!("saving record {}", record.id);
        self.records.insert(record.id, record);
        Ok(())
    }

    fn delete(&mut self, record: &TaskRecord) -> Result<(), StorageError> {
        // shift_remove keeps the remaining insertion order intact
        match self.records.shift_remove(&record.id) {
            Some(_) => {
                log::debug!("deleted record {}", record.id);
                Ok(())
            }
            None => Err(StorageError::NotFound(record.id)),
        }
    }

    fn fetch(&self, query: &Query) -> Vec<TaskRecord> {
        let mut results: Vec<TaskRecord> = self
            .records
            .values()
            .filter(|r| query.matches(r))
            .cloned()
            .collect();

        for key in query.sort.iter().rev() {
            let Some(desc) = field_by_name(key.field) else {
                log::warn!("ignoring sort on unknown field `{}`", key.field);
                continue;
            };
            // Stable sort per key, applied last-key-first, gives the usual
            // multi-key ordering
            results.sort_by(|a, b| {
                let ord = (desc.get)(a).order(&(desc.get)(b));
                if key.ascending { ord } else { ord.reverse() }
            });
        }

        if let Some(limit) = query.limit {
            results.truncate(limit);
        }
        results
    }
}
