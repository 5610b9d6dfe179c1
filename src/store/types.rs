//! Record types for the diagnosis store.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::diagnosis::Diagnosis;

/// A persisted diagnosis, one per analyzed upload.
///
/// Serialized with the field names the web frontend reads (`_id`,
/// `originalname`, `uploadDate`, ...).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiagnosisRecord {
    /// Identifier assigned by the store on insert.
    #[serde(rename = "_id")]
    pub id: String,
    /// Storage-assigned name of the uploaded file, if it was written anywhere.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filename: Option<String>,
    #[serde(rename = "originalname")]
    pub original_name: String,
    #[serde(rename = "mimetype")]
    pub mime_type: String,
    #[serde(rename = "size")]
    pub size_bytes: u64,
    #[serde(rename = "uploadDate")]
    pub upload_timestamp: DateTime<Utc>,
    #[serde(rename = "diagnosis")]
    pub diagnosis_label: String,
    pub treatment: String,
    pub confidence: String,
}

/// Upload metadata extracted from the request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadMeta {
    pub filename: Option<String>,
    pub original_name: String,
    pub mime_type: String,
    pub size_bytes: u64,
}

/// Everything needed to create a record except the store-assigned fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewRecord {
    pub upload: UploadMeta,
    pub diagnosis: Diagnosis,
}

impl NewRecord {
    pub fn new(upload: UploadMeta, diagnosis: Diagnosis) -> Self {
        Self { upload, diagnosis }
    }

    /// Stamps the record with its id and insert time.
    pub(crate) fn into_record(self, id: String, now: DateTime<Utc>) -> DiagnosisRecord {
        DiagnosisRecord {
            id,
            filename: self.upload.filename,
            original_name: self.upload.original_name,
            mime_type: self.upload.mime_type,
            size_bytes: self.upload.size_bytes,
            upload_timestamp: now,
            diagnosis_label: self.diagnosis.label,
            treatment: self.diagnosis.treatment,
            confidence: self.diagnosis.confidence,
        }
    }
}
