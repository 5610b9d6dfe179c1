//! Diagnosis record store with pluggable backends.
//!
//! Records are append-only: created once per analyzed upload and listed
//! newest first. Backends:
//!
//! - **RedbBackend**: Persistent storage in an embedded redb file
//! - **MemoryBackend**: Fast, non-persistent storage (testing/demos)
//! - **UnavailableBackend**: Stand-in when the startup connection failed
//!
//! # Custom Backends
//!
//! Implement the `RecordBackend` trait to use a different document store:
//!
//! ```ignore
//! use plantscan::store::{RecordBackend, RecordStore};
//!
//! struct MongoBackend { /* ... */ }
//! impl RecordBackend for MongoBackend { /* ... */ }
//!
//! let store = RecordStore::custom(MongoBackend::new());
//! ```

mod backend;
mod memory;
mod redb;
#[allow(clippy::module_inception)]
mod store;
mod types;
mod unavailable;


pub use backend::RecordBackend;
pub use memory::MemoryBackend;
pub use self::redb::RedbBackend;
pub use store::RecordStore;
pub use types::{DiagnosisRecord, NewRecord, UploadMeta};
pub use unavailable::UnavailableBackend;
