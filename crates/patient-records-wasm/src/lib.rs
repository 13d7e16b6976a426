//! wasm-bindgen boundary for the patient record manager.
//!
//! The JavaScript side keeps the DOM wiring: it reads control values, owns
//! the delete confirmation dialog, and feeds the returned payloads to the
//! charting library. Every mutating call here runs a complete
//! load-mutate-save-recompute cycle and returns a fresh [`view::Dashboard`],
//! so the page never holds derived state of its own.

pub mod view;

use chrono::Utc;
use patient_records_core::{
    validate, FormField, PatientForm, RecordStore, SearchFilter, StorageBackend, StoreError,
    StoreResult,
};
use serde_wasm_bindgen::{from_value, to_value};
use wasm_bindgen::prelude::*;

use view::{build_rows_on, Dashboard, SubmitResult};

/// `window.localStorage` as a store backend. The whole collection lives
/// under a single key, absent until the first save.
pub struct LocalStorage;

impl LocalStorage {
    fn storage() -> StoreResult<web_sys::Storage> {
        web_sys::window()
            .and_then(|w| w.local_storage().ok().flatten())
            .ok_or_else(|| StoreError::Backend("localStorage is not available".into()))
    }
}

impl StorageBackend for LocalStorage {
    fn read_key(&self, key: &str) -> StoreResult<Option<String>> {
        Self::storage()?
            .get_item(key)
            .map_err(|_| StoreError::Backend(format!("failed to read key {key}")))
    }

    fn write_key(&mut self, key: &str, value: &str) -> StoreResult<()> {
        Self::storage()?
            .set_item(key, value)
            .map_err(|_| StoreError::Backend(format!("failed to write key {key}")))
    }
}

fn to_js_error(err: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&err.to_string())
}

/// The application object the page constructs once and calls from its event
/// handlers. Single-threaded and synchronous: every call completes its full
/// read-compute-write cycle before returning.
#[wasm_bindgen]
pub struct PatientApp {
    store: RecordStore<LocalStorage>,
}

impl Default for PatientApp {
    fn default() -> Self {
        Self::new()
    }
}

#[wasm_bindgen]
impl PatientApp {
    #[wasm_bindgen(constructor)]
    pub fn new() -> PatientApp {
        #[cfg(target_arch = "wasm32")]
        console_error_panic_hook::set_once();

        PatientApp {
            store: RecordStore::new(LocalStorage),
        }
    }

    /// Handle a form submission.
    ///
    /// `form` carries the raw input strings; `editing_id` is the explicit
    /// create-vs-update mode the page controller holds (present when the
    /// user clicked Edit on a record, absent for a new patient). On
    /// validation failure nothing is written and the per-field errors come
    /// back; on success the refreshed dashboard and a confirmation message
    /// do.
    pub fn submit(&mut self, form: JsValue, editing_id: Option<u32>) -> Result<JsValue, JsValue> {
        let form: PatientForm = from_value(form).map_err(to_js_error)?;

        let draft = match validate::validate_form(&form) {
            Ok(draft) => draft,
            Err(errors) => {
                let result = SubmitResult::Invalid { errors };
                return to_value(&result).map_err(to_js_error);
            }
        };

        let (id, message) = match editing_id {
            Some(id) => {
                // Replace-by-id; an absent id leaves the collection
                // unchanged.
                self.store
                    .edit(&draft.into_patient(id))
                    .map_err(to_js_error)?;
                (id, "Patient updated!")
            }
            None => {
                let added = self.store.add(draft).map_err(to_js_error)?;
                (added.id, "Patient added!")
            }
        };

        let result = SubmitResult::Saved {
            message: message.into(),
            id,
            dashboard: self.dashboard_payload()?,
        };
        to_value(&result).map_err(to_js_error)
    }

    /// Delete a record by id and return the refreshed dashboard.
    ///
    /// The confirmation dialog stays on the JavaScript side; this is only
    /// called after the user confirms. Deleting an absent id changes
    /// nothing.
    pub fn remove(&mut self, id: u32) -> Result<JsValue, JsValue> {
        self.store.delete(id).map_err(to_js_error)?;
        let dashboard = self.dashboard_payload()?;
        to_value(&dashboard).map_err(to_js_error)
    }

    /// Filtered list view from the raw control values (search box and the
    /// sex / age-bucket / BMI-category dropdowns; empty string = unset).
    pub fn search(
        &self,
        query: String,
        sex: String,
        age: String,
        bmi: String,
    ) -> Result<JsValue, JsValue> {
        let filter = SearchFilter::from_controls(&query, &sex, &age, &bmi);
        let patients = self.store.load().map_err(to_js_error)?;
        let today = Utc::now().date_naive();
        let rows = build_rows_on(
            &patient_records_core::search_on(&patients, &filter, today),
            today,
        );
        to_value(&rows).map_err(to_js_error)
    }

    /// Summary statistics and chart payloads over the full collection.
    pub fn dashboard(&self) -> Result<JsValue, JsValue> {
        let dashboard = self.dashboard_payload()?;
        to_value(&dashboard).map_err(to_js_error)
    }

    /// Inline validation for input/blur handlers: returns the error message
    /// for the field, or `null` when the value passes. Unknown field ids
    /// are an error.
    pub fn validate_field(&self, field: String, value: String) -> Result<JsValue, JsValue> {
        let field = FormField::from_id(&field)
            .ok_or_else(|| JsValue::from_str(&format!("unknown form field: {field}")))?;
        match validate::validate_field(field, &value) {
            Some(message) => Ok(JsValue::from_str(&message)),
            None => Ok(JsValue::NULL),
        }
    }

    fn dashboard_payload(&self) -> Result<Dashboard, JsValue> {
        let patients = self.store.load().map_err(to_js_error)?;
        Ok(Dashboard::from_collection_on(
            &patients,
            Utc::now().date_naive(),
        ))
    }
}
