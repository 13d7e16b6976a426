//! Domain models for the patient record manager.

mod patient;

pub use patient::*;
