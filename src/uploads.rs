//! Where uploaded photo bytes go.
//!
//! The default keeps uploads in memory for the duration of the request only,
//! so records carry no storage filename. With an upload directory configured
//! each photo is written to disk under a generated name.

use anyhow::{Context, Result};
use bytes::Bytes;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

use crate::store::UploadMeta;

/// A photo received from the client, held fully in memory.
#[derive(Debug, Clone)]
pub struct Upload {
    pub original_name: String,
    pub mime_type: String,
    pub data: Bytes,
}

impl Upload {
    /// Record metadata for this upload, given the storage-assigned name.
    pub fn meta(&self, filename: Option<String>) -> UploadMeta {
        UploadMeta {
            filename,
            original_name: self.original_name.clone(),
            mime_type: self.mime_type.clone(),
            size_bytes: self.data.len() as u64,
        }
    }
}

/// Upload storage strategy.
#[derive(Debug, Clone, Default)]
pub enum UploadStorage {
    /// Keep bytes in memory only; no filename is assigned.
    #[default]
    Memory,
    /// Write each upload into `dir` as `<uuid>.<ext>`.
    Disk { dir: PathBuf },
}

impl UploadStorage {
    pub fn from_dir(dir: Option<&Path>) -> Self {
        dir.map_or(Self::Memory, |dir| Self::Disk {
            dir: dir.to_path_buf(),
        })
    }

    /// Stores the upload and returns the storage-assigned filename, if any.
    ///
    /// # Errors
    ///
    /// Returns an error if the upload directory cannot be created or the
    /// file cannot be written.
    pub async fn save(&self, upload: &Upload) -> Result<Option<String>> {
        let Self::Disk { dir } = self else {
            return Ok(None);
        };

        tokio::fs::create_dir_all(dir)
            .await
            .with_context(|| format!("Failed to create upload directory: {}", dir.display()))?;

        let filename = match extension_for(upload) {
            Some(ext) => format!("{}.{ext}", uuid::Uuid::new_v4()),
            None => uuid::Uuid::new_v4().to_string(),
        };
        let path = dir.join(&filename);

        tokio::fs::write(&path, &upload.data)
            .await
            .with_context(|| format!("Failed to write upload: {}", path.display()))?;

        debug!(path = %path.display(), bytes = upload.data.len(), "Upload written");
        Ok(Some(filename))
    }

    /// Best-effort removal of a stored upload whose record was never created.
    pub async fn discard(&self, filename: &str) {
        if let Self::Disk { dir } = self {
            let path = dir.join(filename);
            if let Err(e) = tokio::fs::remove_file(&path).await {
                warn!(path = %path.display(), error = %e, "Failed to remove orphaned upload");
            }
        }
    }
}

/// Picks a file extension: the client's own if it looks sane, otherwise one
/// guessed from the MIME type.
fn extension_for(upload: &Upload) -> Option<String> {
    let from_name = Path::new(&upload.original_name)
        .extension()
        .and_then(|e| e.to_str())
        .filter(|e| !e.is_empty() && e.len() <= 8 && e.chars().all(|c| c.is_ascii_alphanumeric()))
        .map(str::to_ascii_lowercase);

    from_name.or_else(|| {
        mime_guess::get_mime_extensions_str(&upload.mime_type)
            .and_then(|exts| exts.first())
            .map(|ext| (*ext).to_string())
    })
}
