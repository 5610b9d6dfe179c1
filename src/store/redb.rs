//! Redb-backed record storage.
//!
//! Persists records as JSON documents in an embedded redb database, keyed by
//! a monotonically increasing sequence number so iteration order matches
//! insertion order.

use super::backend::RecordBackend;
use super::types::DiagnosisRecord;
use anyhow::{Context, Result};
use async_trait::async_trait;
use redb::{Database, ReadableDatabase, ReadableTable, TableDefinition};
use std::path::Path;
use std::sync::Arc;

/// Table of records keyed by insertion sequence.
pub(crate) const RECORDS_TABLE: TableDefinition<'static, u64, &'static [u8]> =
    TableDefinition::new("diagnosis_records");

/// Redb-backed record backend.
///
/// `Clone` shares the same database handle.
#[derive(Clone)]
pub struct RedbBackend {
    db: Arc<Database>,
}

impl RedbBackend {
    /// Opens or creates a redb database at the given path.
    ///
    /// Creates parent directories if needed.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Parent directory cannot be created
    /// - Database file cannot be opened or created (permissions, disk full, etc.)
    /// - Initialization transaction fails to begin or commit
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create database directory: {}", parent.display())
            })?;
        }

        let db = Database::create(path)
            .with_context(|| format!("Failed to open record database: {}", path.display()))?;

        // Create the table up front so reads on a fresh file succeed
        let write_txn = db
            .begin_write()
            .context("Failed to begin initialization transaction")?;
        {
            let _table = write_txn
                .open_table(RECORDS_TABLE)
                .context("Failed to initialize records table")?;
        }
        write_txn
            .commit()
            .context("Failed to commit initialization transaction")?;

        Ok(Self { db: Arc::new(db) })
    }

    fn insert_sync(&self, record: &DiagnosisRecord) -> Result<()> {
        let json = serde_json::to_vec(record).context("Failed to serialize record to JSON")?;

        let write_txn = self
            .db
            .begin_write()
            .context("Failed to begin write transaction")?;
        {
            let mut table = write_txn
                .open_table(RECORDS_TABLE)
                .context("Failed to open records table")?;

            let next_seq = table
                .last()
                .context("Failed to read last record key")?
                .map_or(0, |(key, _)| key.value() + 1);

            table
                .insert(next_seq, json.as_slice())
                .with_context(|| format!("Failed to insert record '{}'", record.id))?;
        }
        write_txn
            .commit()
            .context("Failed to commit insert transaction")?;

        Ok(())
    }

    fn all_sync(&self) -> Result<Vec<DiagnosisRecord>> {
        let read_txn = self
            .db
            .begin_read()
            .context("Failed to begin read transaction")?;

        let table = read_txn
            .open_table(RECORDS_TABLE)
            .context("Failed to open records table")?;

        let mut records = Vec::new();
        for item in table.iter().context("Failed to iterate records table")? {
            let (key, value) = item.context("Failed to read record entry")?;
            let record: DiagnosisRecord = serde_json::from_slice(value.value())
                .with_context(|| format!("Failed to deserialize record #{}", key.value()))?;
            records.push(record);
        }

        Ok(records)
    }
}

#[async_trait]
impl RecordBackend for RedbBackend {
    async fn insert(&self, record: DiagnosisRecord) -> Result<()> {
        let backend = self.clone();
        tokio::task::spawn_blocking(move || backend.insert_sync(&record))
            .await
            .context("Task join error")?
    }

    async fn all(&self) -> Result<Vec<DiagnosisRecord>> {
        let backend = self.clone();
        tokio::task::spawn_blocking(move || backend.all_sync())
            .await
            .context("Task join error")?
    }

    fn kind(&self) -> &'static str {
        "redb"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::tests::sample_record;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_insert_preserves_order() {
        let tmp = TempDir::new().unwrap();
        let backend = RedbBackend::open(tmp.path().join("records.redb")).unwrap();

        for id in ["a", "b", "c"] {
            backend.insert(sample_record(id)).await.unwrap();
        }

        let ids: Vec<_> = backend
            .all()
            .await
            .unwrap()
            .into_iter()
            .map(|r| r.id)
            .collect();
        assert_eq!(ids, vec!["a", "b", "c"]);
    }

    #[tokio::test]
    async fn test_records_survive_reopen() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("nested").join("records.redb");

        {
            let backend = RedbBackend::open(&path).unwrap();
            backend.insert(sample_record("kept")).await.unwrap();
        }

        let backend = RedbBackend::open(&path).unwrap();
        let records = backend.all().await.unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0], sample_record("kept"));
    }

    #[tokio::test]
    async fn test_empty_database() {
        let tmp = TempDir::new().unwrap();
        let backend = RedbBackend::open(tmp.path().join("empty.redb")).unwrap();
        assert!(backend.all().await.unwrap().is_empty());
    }
}
