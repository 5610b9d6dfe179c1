//! Placeholder backend used when the store could not be reached at startup.
//!
//! The server keeps running; every operation fails with the original
//! connection error so each request reports it individually.

use super::backend::RecordBackend;
use super::types::DiagnosisRecord;
use anyhow::{Result, anyhow};
use async_trait::async_trait;

/// Backend whose every operation fails with a fixed reason.
#[derive(Debug, Clone)]
pub struct UnavailableBackend {
    reason: String,
}

impl UnavailableBackend {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }

    fn error(&self) -> anyhow::Error {
        anyhow!("record store unavailable: {}", self.reason)
    }
}

#[async_trait]
impl RecordBackend for UnavailableBackend {
    async fn insert(&self, _record: DiagnosisRecord) -> Result<()> {
        Err(self.error())
    }

    async fn all(&self) -> Result<Vec<DiagnosisRecord>> {
        Err(self.error())
    }

    fn kind(&self) -> &'static str {
        "unavailable"
    }
}
