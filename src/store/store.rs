//! High-level `RecordStore` wrapper over backend implementations.

use super::backend::RecordBackend;
use super::memory::MemoryBackend;
use super::redb::RedbBackend;
use super::types::{DiagnosisRecord, NewRecord};
use super::unavailable::UnavailableBackend;
use anyhow::{Result, bail};
use chrono::Utc;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{error, info};
use url::Url;

/// Diagnosis record store.
///
/// Assigns ids and insert timestamps, and orders listings newest first.
/// `RecordStore` is `Clone` and meant to be injected into request handlers.
///
/// # Example
///
/// ```ignore
/// use plantscan::store::RecordStore;
///
/// let store = RecordStore::memory();
/// let record = store.create(new_record).await?;
/// let newest_first = store.find_all_sorted_by_date_desc().await?;
/// ```
#[derive(Clone)]
pub struct RecordStore {
    backend: Arc<dyn RecordBackend>,
}

impl std::fmt::Debug for RecordStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RecordStore").finish_non_exhaustive()
    }
}

impl RecordStore {
    /// Creates a store backed by a redb file.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or created.
    pub fn file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let backend = RedbBackend::open(path)?;
        Ok(Self::custom(backend))
    }

    /// Creates an in-memory store. All data is lost when the process exits.
    pub fn memory() -> Self {
        Self::custom(MemoryBackend::new())
    }

    /// Creates a store whose operations all fail with `reason`.
    pub fn unavailable(reason: impl Into<String>) -> Self {
        Self::custom(UnavailableBackend::new(reason))
    }

    /// Creates a store with a custom backend.
    pub fn custom<B: RecordBackend>(backend: B) -> Self {
        Self {
            backend: Arc::new(backend),
        }
    }

    /// Opens the store described by a connection string.
    ///
    /// Supported forms:
    /// - `memory://` - in-process store
    /// - `redb:///path/to/records.redb` or `redb://relative/path.redb`
    /// - a bare filesystem path to a redb file
    ///
    /// # Errors
    ///
    /// Returns an error for unknown schemes or when the database cannot be
    /// opened.
    pub fn open_url(database_url: &str) -> Result<Self> {
        match locate(database_url)? {
            Location::Memory => Ok(Self::memory()),
            Location::File(path) => Self::file(path),
        }
    }

    /// Opens the store, falling back to an unavailable store on failure.
    ///
    /// Startup never halts on a bad connection; the failure is logged and
    /// surfaces on each request instead.
    pub fn connect(database_url: &str) -> Self {
        match Self::open_url(database_url) {
            Ok(store) => {
                info!(backend = store.kind(), "Record store connected");
                store
            },
            Err(e) => {
                error!(error = %format!("{e:#}"), "Record store connection failed");
                Self::unavailable(format!("{e:#}"))
            },
        }
    }

    /// Persists a new record, assigning its id and upload timestamp.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying storage operation fails.
    pub async fn create(&self, new_record: NewRecord) -> Result<DiagnosisRecord> {
        let record = new_record.into_record(uuid::Uuid::new_v4().to_string(), Utc::now());
        self.backend.insert(record.clone()).await?;
        Ok(record)
    }

    /// Returns all records ordered by upload time, newest first.
    ///
    /// Records with equal timestamps keep reverse insertion order.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying storage operation fails.
    pub async fn find_all_sorted_by_date_desc(&self) -> Result<Vec<DiagnosisRecord>> {
        let mut records = self.backend.all().await?;
        records.reverse();
        // Stable sort keeps the reversed insertion order for ties
        records.sort_by(|a, b| b.upload_timestamp.cmp(&a.upload_timestamp));
        Ok(records)
    }

    /// Name of the active backend.
    pub fn kind(&self) -> &'static str {
        self.backend.kind()
    }
}

/// Where a connection string points.
#[derive(Debug, PartialEq, Eq)]
pub(super) enum Location {
    Memory,
    File(PathBuf),
}

/// Resolves a connection string without opening anything.
pub(super) fn locate(database_url: &str) -> Result<Location> {
    let url = match Url::parse(database_url) {
        Ok(url) => url,
        // Not a URL: treat it as a path
        Err(_) => return Ok(Location::File(PathBuf::from(database_url))),
    };

    match url.scheme() {
        "memory" => Ok(Location::Memory),
        "redb" => {
            // Host + path so `redb://data/records.redb` stays relative
            let path = format!("{}{}", url.host_str().unwrap_or_default(), url.path());
            if path.is_empty() {
                bail!("redb connection string has no path: {database_url}");
            }
            Ok(Location::File(PathBuf::from(path)))
        },
        // Windows drive letter, e.g. `C:\data\records.redb`
        scheme if scheme.len() == 1 => Ok(Location::File(PathBuf::from(database_url))),
        other => bail!("unsupported database scheme '{other}' in {database_url}"),
    }
}
