//! Record store: whole-collection persistence over a key-value backend.
//!
//! The unit of persistence is the entire patient collection, serialized as a
//! JSON array under a single named key. Every mutation reloads the
//! collection, applies the change, and overwrites the key; there are no
//! partial writes and no transaction log. Downstream views (filtered list,
//! statistics, charts) are recomputed from a fresh load after every save.

mod backend;
#[cfg(not(target_arch = "wasm32"))]
mod file;

pub use backend::*;
#[cfg(not(target_arch = "wasm32"))]
pub use file::*;

use log::debug;
use thiserror::Error;

use crate::models::{Patient, PatientDraft};

/// Store errors.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Storage backend error: {0}")]
    Backend(String),
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Store configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    /// Name of the key holding the serialized collection.
    pub storage_key: String,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            storage_key: "patients".into(),
        }
    }
}

/// Patient collection store over a pluggable key-value backend.
pub struct RecordStore<B> {
    backend: B,
    config: StoreConfig,
}

impl RecordStore<MemoryStorage> {
    /// Create a store over in-memory storage (for testing).
    pub fn open_in_memory() -> Self {
        Self::new(MemoryStorage::new())
    }
}

impl<B: StorageBackend> RecordStore<B> {
    /// Create a store over the given backend with the default key.
    pub fn new(backend: B) -> Self {
        Self::with_config(backend, StoreConfig::default())
    }

    /// Create a store with an explicit configuration.
    pub fn with_config(backend: B, config: StoreConfig) -> Self {
        Self { backend, config }
    }

    /// Load the full collection. An absent key is an empty collection.
    pub fn load(&self) -> StoreResult<Vec<Patient>> {
        match self.backend.read_key(&self.config.storage_key)? {
            Some(raw) => Ok(serde_json::from_str(&raw)?),
            None => Ok(Vec::new()),
        }
    }

    /// Overwrite the persisted collection with `patients`.
    ///
    /// Callers refresh derived views from a fresh [`load`](Self::load) after
    /// every save; nothing is cached between operations.
    pub fn save(&mut self, patients: &[Patient]) -> StoreResult<()> {
        let raw = serde_json::to_string(patients)?;
        self.backend.write_key(&self.config.storage_key, &raw)?;
        debug!("saved {} patient record(s)", patients.len());
        Ok(())
    }

    /// Append a new record, assigning the next free identifier.
    pub fn add(&mut self, draft: PatientDraft) -> StoreResult<Patient> {
        let mut patients = self.load()?;
        let patient = draft.into_patient(next_id(&patients));
        patients.push(patient.clone());
        self.save(&patients)?;
        Ok(patient)
    }

    /// Replace the record whose id matches `updated.id`.
    ///
    /// Returns `false` and leaves the collection unchanged when no record
    /// carries that id. Insertion order is preserved; an edit never reorders.
    pub fn edit(&mut self, updated: &Patient) -> StoreResult<bool> {
        let mut patients = self.load()?;
        let slot = patients.iter_mut().find(|p| p.id == updated.id);
        match slot {
            Some(existing) => {
                *existing = updated.clone();
                self.save(&patients)?;
                Ok(true)
            }
            None => {
                debug!("edit of absent id {} ignored", updated.id);
                Ok(false)
            }
        }
    }

    /// Remove the record with the given id.
    ///
    /// Returns `false` when no record carries that id; the collection is
    /// unchanged in that case.
    pub fn delete(&mut self, id: u32) -> StoreResult<bool> {
        let mut patients = self.load()?;
        let before = patients.len();
        patients.retain(|p| p.id != id);
        if patients.len() == before {
            return Ok(false);
        }
        self.save(&patients)?;
        Ok(true)
    }
}

/// Next identifier: one greater than the current maximum, or 1 when empty.
fn next_id(patients: &[Patient]) -> u32 {
    patients.iter().map(|p| p.id).max().map_or(1, |max| max + 1)
}
