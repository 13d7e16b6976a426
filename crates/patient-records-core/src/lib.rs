//! Patient Records Core Library
//!
//! Local-first patient record store with a derived-view computation
//! pipeline. The whole collection lives under one key in client-local
//! key-value storage; every mutation rewrites it and downstream views are
//! recomputed from a fresh load.
//!
//! # Architecture
//!
//! ```text
//! Form input ──▶ validate ──▶ RecordStore (add / edit / delete)
//!                                   │
//!                        save whole collection under one key
//!                                   │
//!                 ┌─────────────────┼─────────────────┐
//!                 ▼                 ▼                 ▼
//!            Query Engine     Statistics        Chart payloads
//!          (filtered list)   (full dataset)   (doughnut/pie/bar)
//! ```
//!
//! Derived values (age, BMI, BMI category, age bucket) are never stored;
//! they are recomputed from the raw fields on every read, so they cannot go
//! stale relative to edits.
//!
//! # Modules
//!
//! - [`models`]: domain types ([`Patient`], [`PatientDraft`], [`Sex`])
//! - [`metrics`]: pure derived-value functions and the category/bucket types
//! - [`store`]: whole-collection persistence over pluggable backends
//! - [`query`]: free-text plus faceted filtering
//! - [`stats`]: summary aggregates and chart payloads
//! - [`validate`]: regex-based field validation for the intake form

pub mod metrics;
pub mod models;
pub mod query;
pub mod stats;
pub mod store;
pub mod validate;

// Re-export commonly used types
pub use metrics::{AgeBucket, BmiCategory};
pub use models::{Patient, PatientDraft, Sex};
pub use query::{search, search_on, SearchFilter};
pub use stats::{AgeBucketCount, BmiCategoryCounts, ChartSeries, Statistics};
pub use store::{
    MemoryStorage, RecordStore, StorageBackend, StoreConfig, StoreError, StoreResult,
};
pub use validate::{validate_field, validate_form, FieldError, FormField, PatientForm};

#[cfg(not(target_arch = "wasm32"))]
pub use store::FileStorage;
