//! Append-only record collections kept in local storage.

use super::record::{SubmissionKind, SubmissionRecord};
use super::RecordError;
use crate::content::Storage;
use std::sync::Arc;
use tracing::{debug, info};

#[derive(Clone)]
pub struct SubmissionStore {
    storage: Arc<dyn Storage>,
    kind: SubmissionKind,
}

impl SubmissionStore {
    pub fn new(storage: Arc<dyn Storage>, kind: SubmissionKind) -> Self {
        Self { storage, kind }
    }

    pub fn kind(&self) -> SubmissionKind {
        self.kind
    }

    pub fn list(&self) -> Result<Vec<SubmissionRecord>, RecordError> {
        match self.storage.get_item(self.kind.storage_key())? {
            Some(raw) => {
                serde_json::from_str(&raw).map_err(|e| RecordError::Corrupt(e.to_string()))
            }
            None => Ok(Vec::new()),
        }
    }

    pub fn append(&self, record: &SubmissionRecord) -> Result<(), RecordError> {
        let mut records = self.list()?;
        records.push(record.clone());

        let raw =
            serde_json::to_string(&records).map_err(|e| RecordError::Corrupt(e.to_string()))?;
        self.storage.set_item(self.kind.storage_key(), &raw)?;

        debug!(id = %record.id, total = records.len(), "Record stored");
        Ok(())
    }

    pub fn clear(&self) -> Result<(), RecordError> {
        self.storage.remove_item(self.kind.storage_key())?;
        info!(key = self.kind.storage_key(), "Stored records cleared");
        Ok(())
    }
}
