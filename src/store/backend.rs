//! Backend trait for the diagnosis store.
//!
//! Defines the interface that all record storage backends must implement,
//! enabling pluggable persistence (redb, memory, or a remote document store).

use anyhow::Result;
use async_trait::async_trait;

use super::types::DiagnosisRecord;

/// Backend trait for diagnosis record storage.
///
/// All backends must be thread-safe (`Send + Sync`) for use with tokio.
/// Records are append-only: there is no update or delete.
#[async_trait]
pub trait RecordBackend: Send + Sync + 'static {
    /// Appends a fully stamped record.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying storage operation fails.
    async fn insert(&self, record: DiagnosisRecord) -> Result<()>;

    /// Returns every stored record in insertion order (oldest first).
    ///
    /// Ordering by upload time is applied by [`super::RecordStore`].
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying storage operation fails.
    async fn all(&self) -> Result<Vec<DiagnosisRecord>>;

    /// Short backend name for logs and the health endpoint.
    fn kind(&self) -> &'static str;
}
