//! View payloads handed across the wasm boundary.
//!
//! These are plain serializable structs; the JavaScript side owns the DOM
//! and the charting library and only ever receives precomputed data.

use chrono::NaiveDate;
use patient_records_core::{
    metrics, ChartSeries, FieldError, Patient, Statistics,
};
use serde::Serialize;

/// One list entry with every derived display field precomputed.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PatientRow {
    pub id: u32,
    pub first_name: String,
    pub last_name: String,
    /// Whole years, absent when the birthdate does not parse.
    pub age: Option<u32>,
    /// `DD/MM/YYYY` display form of the birthdate.
    pub birthdate_uk: String,
    pub sex: &'static str,
    pub height_cm: f64,
    pub weight_kg: f64,
    pub bmi: f64,
    pub bmi_category: &'static str,
    /// Hex color for the BMI badge, matching the category.
    pub bmi_color: &'static str,
    pub mobile: String,
    pub email: String,
    /// Notes with the dash placeholder already applied.
    pub notes: String,
}

/// Badge color per category: green for Normal, amber for Overweight, red
/// for the two extreme bands.
fn bmi_color(category: patient_records_core::BmiCategory) -> &'static str {
    use patient_records_core::BmiCategory::*;
    match category {
        Normal => "#4ade80",
        Overweight => "#facc15",
        Underweight | Obese => "#ef4444",
    }
}

impl PatientRow {
    /// Build a display row with ages evaluated as of `today`.
    pub fn from_patient_on(patient: &Patient, today: NaiveDate) -> Self {
        let category = patient.bmi_category();
        Self {
            id: patient.id,
            first_name: patient.first_name.clone(),
            last_name: patient.last_name.clone(),
            age: patient.age_on(today),
            birthdate_uk: metrics::format_date_uk(&patient.birthdate),
            sex: patient.sex.label(),
            height_cm: patient.height_cm,
            weight_kg: patient.weight_kg,
            bmi: patient.bmi(),
            bmi_category: category.label(),
            bmi_color: bmi_color(category),
            mobile: patient.mobile.clone(),
            email: patient.email.clone(),
            notes: patient.health_info.clone().unwrap_or_else(|| "—".into()),
        }
    }
}

/// Build display rows for an already-filtered list.
pub fn build_rows_on(patients: &[Patient], today: NaiveDate) -> Vec<PatientRow> {
    patients
        .iter()
        .map(|p| PatientRow::from_patient_on(p, today))
        .collect()
}

/// Everything the summary cards and the three charts need, recomputed from
/// the full collection after every mutation.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Dashboard {
    pub stats: Statistics,
    pub bmi_chart: ChartSeries,
    pub sex_chart: ChartSeries,
    pub age_chart: ChartSeries,
}

impl Dashboard {
    pub fn from_collection_on(patients: &[Patient], today: NaiveDate) -> Self {
        let stats = Statistics::compute_on(patients, today);
        Self {
            bmi_chart: stats.bmi_chart(),
            sex_chart: stats.sex_chart(),
            age_chart: stats.age_chart(),
            stats,
        }
    }
}

/// Outcome of a form submission.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(tag = "status", rename_all = "camelCase")]
pub enum SubmitResult {
    /// All fields passed; the collection was updated.
    #[serde(rename_all = "camelCase")]
    Saved {
        /// Confirmation text for the fade-out note.
        message: String,
        /// The saved record's id (freshly assigned on add).
        id: u32,
        dashboard: Dashboard,
    },
    /// At least one field failed; nothing was written.
    #[serde(rename_all = "camelCase")]
    Invalid { errors: Vec<FieldError> },
}
