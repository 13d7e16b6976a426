//! Field validation for the intake form.
//!
//! Validation is field-level and non-fatal: every failing field gets its own
//! message, and submission proceeds only when all fields pass. Rules and
//! messages match the legacy intake form, including the UK mobile format.

use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

use crate::metrics;
use crate::models::{PatientDraft, Sex};

static FIRST_NAME_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z]{2,12}$").unwrap());
static LAST_NAME_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z][A-Za-z'\-]{1,19}$").unwrap());
static MOBILE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^07\d{9}$").unwrap());
static EMAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").unwrap());

/// Range limits enforced at input time. Records are not re-validated on
/// read, so these only gate what enters the store.
#[derive(Debug, Clone, PartialEq)]
pub struct InputLimits {
    pub height_cm: (f64, f64),
    pub weight_kg: (f64, f64),
    pub age_years: (u32, u32),
}

impl Default for InputLimits {
    fn default() -> Self {
        Self {
            height_cm: (30.0, 200.0),
            weight_kg: (1.0, 200.0),
            age_years: (0, 120),
        }
    }
}

/// The form fields, named after their DOM element ids.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum FormField {
    FirstName,
    LastName,
    Birthdate,
    Height,
    Weight,
    Sex,
    Mobile,
    Email,
}

impl FormField {
    /// DOM element id of the input, also used as the wire name.
    pub fn id(&self) -> &'static str {
        match self {
            FormField::FirstName => "first-name",
            FormField::LastName => "last-name",
            FormField::Birthdate => "birthdate",
            FormField::Height => "height",
            FormField::Weight => "weight",
            FormField::Sex => "sex",
            FormField::Mobile => "mobile",
            FormField::Email => "email",
        }
    }

    /// Look a field up by its DOM id.
    pub fn from_id(id: &str) -> Option<Self> {
        match id {
            "first-name" => Some(FormField::FirstName),
            "last-name" => Some(FormField::LastName),
            "birthdate" => Some(FormField::Birthdate),
            "height" => Some(FormField::Height),
            "weight" => Some(FormField::Weight),
            "sex" => Some(FormField::Sex),
            "mobile" => Some(FormField::Mobile),
            "email" => Some(FormField::Email),
            _ => None,
        }
    }

    /// All fields in form order.
    pub fn all() -> [FormField; 8] {
        [
            FormField::FirstName,
            FormField::LastName,
            FormField::Birthdate,
            FormField::Height,
            FormField::Weight,
            FormField::Sex,
            FormField::Mobile,
            FormField::Email,
        ]
    }
}

/// One failing field with its user-facing message.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct FieldError {
    pub field: FormField,
    pub message: String,
}

/// Raw form values as read off the inputs, all strings.
#[derive(Debug, Clone, Default, serde::Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
pub struct PatientForm {
    pub first_name: String,
    pub last_name: String,
    pub birthdate: String,
    pub height: String,
    pub weight: String,
    pub sex: String,
    pub mobile: String,
    pub email: String,
    pub health_info: String,
}

/// Validate a single field value, returning the error message on failure.
///
/// This backs the inline input/blur handlers; `validate_form` applies the
/// same checks on submit.
pub fn validate_field(field: FormField, value: &str) -> Option<String> {
    let value = value.trim();
    match field {
        FormField::FirstName => (!FIRST_NAME_RE.is_match(value))
            .then(|| "First name must be 2–12 letters.".into()),
        FormField::LastName => (!LAST_NAME_RE.is_match(value))
            .then(|| "Last name must be 2–20 letters.".into()),
        FormField::Birthdate => {
            let limits = InputLimits::default();
            let in_range = metrics::age(value)
                .map_or(false, |age| age >= limits.age_years.0 && age <= limits.age_years.1);
            (!in_range).then(|| "Enter a valid date.".into())
        }
        FormField::Height => {
            let limits = InputLimits::default();
            let ok = value
                .parse::<f64>()
                .map_or(false, |h| h >= limits.height_cm.0 && h <= limits.height_cm.1);
            (!ok).then(|| "Height 30–200 cm.".into())
        }
        FormField::Weight => {
            let limits = InputLimits::default();
            let ok = value
                .parse::<f64>()
                .map_or(false, |w| w >= limits.weight_kg.0 && w <= limits.weight_kg.1);
            (!ok).then(|| "Weight 1–200 kg.".into())
        }
        FormField::Sex => Sex::parse(value).is_none().then(|| "Select sex.".into()),
        FormField::Mobile => (!MOBILE_RE.is_match(value))
            .then(|| "Must start 07 & be 11 digits.".into()),
        FormField::Email => (!EMAIL_RE.is_match(value)).then(|| "Invalid email.".into()),
    }
}

/// Validate every field of the form.
///
/// Returns a draft ready for the store when all fields pass, otherwise
/// every failing field with its message so the presentation layer can
/// surface them next to the inputs.
pub fn validate_form(form: &PatientForm) -> Result<PatientDraft, Vec<FieldError>> {
    let values = |field: FormField| -> &str {
        match field {
            FormField::FirstName => &form.first_name,
            FormField::LastName => &form.last_name,
            FormField::Birthdate => &form.birthdate,
            FormField::Height => &form.height,
            FormField::Weight => &form.weight,
            FormField::Sex => &form.sex,
            FormField::Mobile => &form.mobile,
            FormField::Email => &form.email,
        }
    };

    let errors: Vec<FieldError> = FormField::all()
        .into_iter()
        .filter_map(|field| {
            validate_field(field, values(field)).map(|message| FieldError { field, message })
        })
        .collect();

    if !errors.is_empty() {
        return Err(errors);
    }

    let health_info = form.health_info.trim();
    Ok(PatientDraft {
        first_name: form.first_name.trim().into(),
        last_name: form.last_name.trim().into(),
        birthdate: form.birthdate.trim().into(),
        // Parses cannot fail here; the field checks above gate them.
        height_cm: form.height.trim().parse().unwrap_or_default(),
        weight_kg: form.weight.trim().parse().unwrap_or_default(),
        sex: Sex::parse(&form.sex).unwrap_or(Sex::Male),
        mobile: form.mobile.trim().into(),
        email: form.email.trim().into(),
        health_info: (!health_info.is_empty()).then(|| health_info.into()),
    })
}
