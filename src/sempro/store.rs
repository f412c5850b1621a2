// Record store interface and an in-memory implementation
//
// The production store is the hosted database; this trait is the contract the
// workflow needs from it.

use chrono::Utc;
use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

use super::error::WorkflowError;
use super::types::{SemproRecord, Status, TransitionRecord};

/// Persistence operations the workflow depends on
pub trait RecordStore {
    /// Load a submission by id
    fn get(&self, id: u64) -> Result<SemproRecord, WorkflowError>;

    /// Store a new submission and return its assigned id
    fn insert(&self, record: SemproRecord) -> Result<u64, WorkflowError>;

    /// Write a new status only if the stored version still equals
    /// `expected_version`; appends `entry` to the history and bumps the version.
    fn update_status(
        &self,
        id: u64,
        expected_version: u64,
        status: Status,
        entry: TransitionRecord,
    ) -> Result<SemproRecord, WorkflowError>;
}

/// Thread-safe store backed by a `HashMap`
#[derive(Debug)]
pub struct InMemoryRecordStore {
    records: Mutex<HashMap<u64, SemproRecord>>,
    next_id: Mutex<u64>,
    history_limit: usize,
}

impl Default for InMemoryRecordStore {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryRecordStore {
    pub const DEFAULT_HISTORY_LIMIT: usize = 100;

    pub fn new() -> Self {
        Self::with_history_limit(Self::DEFAULT_HISTORY_LIMIT)
    }

    /// Keep at most `limit` history entries per record, dropping the oldest.
    /// A limit of zero disables history.
    pub fn with_history_limit(limit: usize) -> Self {
        Self {
            records: Mutex::new(HashMap::new()),
            next_id: Mutex::new(1),
            history_limit: limit,
        }
    }

    /// Number of stored submissions
    pub fn count(&self) -> Result<usize, WorkflowError> {
        Ok(self.lock_records()?.len())
    }

    fn lock_records(&self) -> Result<MutexGuard<'_, HashMap<u64, SemproRecord>>, WorkflowError> {
        self.records
            .lock()
            .map_err(|_| WorkflowError::Store("record map lock poisoned".to_string()))
    }
}

impl RecordStore for InMemoryRecordStore {
    fn get(&self, id: u64) -> Result<SemproRecord, WorkflowError> {
        self.lock_records()?
            .get(&id)
            .cloned()
            .ok_or(WorkflowError::NotFound(id))
    }

    fn insert(&self, mut record: SemproRecord) -> Result<u64, WorkflowError> {
        let id = {
            let mut next_id = self
                .next_id
                .lock()
                .map_err(|_| WorkflowError::Store("id counter lock poisoned".to_string()))?;
            let id = *next_id;
            *next_id += 1;
            id
        };

        record.id = id;
        self.lock_records()?.insert(id, record);
        tracing::debug!(record_id = id, "Submission stored");
        Ok(id)
    }

    fn update_status(
        &self,
        id: u64,
        expected_version: u64,
        status: Status,
        entry: TransitionRecord,
    ) -> Result<SemproRecord, WorkflowError> {
        let mut records = self.lock_records()?;
        let record = records.get_mut(&id).ok_or(WorkflowError::NotFound(id))?;

        if record.version != expected_version {
            return Err(WorkflowError::Conflict {
                id,
                expected: expected_version,
                actual: record.version,
            });
        }

        record.status = status;
        record.version += 1;
        record.updated_at = Utc::now();

        if self.history_limit > 0 {
            record.history.push(entry);
            let overflow = record.history.len().saturating_sub(self.history_limit);
            record.history.drain(..overflow);
        }

        Ok(record.clone())
    }
}
