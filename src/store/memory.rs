//! In-memory record backend.
//!
//! Non-persistent storage for tests, demos and embedding. All records are
//! lost when the process exits.

use super::backend::RecordBackend;
use super::types::DiagnosisRecord;
use anyhow::Result;
use async_trait::async_trait;
use parking_lot::RwLock;
use std::sync::Arc;

/// In-memory record backend.
///
/// `Clone` shares the same underlying vector.
#[derive(Clone, Default)]
pub struct MemoryBackend {
    records: Arc<RwLock<Vec<DiagnosisRecord>>>,
}

impl MemoryBackend {
    /// Creates a new empty in-memory backend.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of stored records.
    pub fn len(&self) -> usize {
        self.records.read().len()
    }

    /// Returns true if nothing has been stored yet.
    pub fn is_empty(&self) -> bool {
        self.records.read().is_empty()
    }
}

#[async_trait]
impl RecordBackend for MemoryBackend {
    async fn insert(&self, record: DiagnosisRecord) -> Result<()> {
        self.records.write().push(record);
        Ok(())
    }

    async fn all(&self) -> Result<Vec<DiagnosisRecord>> {
        Ok(self.records.read().clone())
    }

    fn kind(&self) -> &'static str {
        "memory"
    }
}
