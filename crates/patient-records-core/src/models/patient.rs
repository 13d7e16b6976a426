//! Patient models.

use serde::{Deserialize, Serialize};

use crate::metrics::{self, BmiCategory};

/// Patient sex as captured by the intake form.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Sex {
    Male,
    Female,
}

impl Sex {
    /// Parse the value of the sex control. Empty or unknown values are `None`.
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim() {
            "Male" => Some(Sex::Male),
            "Female" => Some(Sex::Female),
            _ => None,
        }
    }

    /// Display label, identical to the serialized form.
    pub fn label(&self) -> &'static str {
        match self {
            Sex::Male => "Male",
            Sex::Female => "Female",
        }
    }
}

/// A stored patient record.
///
/// Serde names match the records the legacy browser app persisted, so a
/// collection written under the `patients` key by that app deserializes
/// without migration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Patient {
    /// Unique numeric identifier, assigned by the store as max + 1.
    pub id: u32,
    pub first_name: String,
    pub last_name: String,
    /// Birthdate as entered (`YYYY-MM-DD`); parsed lazily at read time.
    pub birthdate: String,
    #[serde(rename = "height")]
    pub height_cm: f64,
    #[serde(rename = "weight")]
    pub weight_kg: f64,
    pub sex: Sex,
    /// Mobile phone number (UK format).
    pub mobile: String,
    pub email: String,
    /// Free-text health notes.
    #[serde(default)]
    pub health_info: Option<String>,
}

impl Patient {
    /// Age in whole years as of `today`, or `None` when the birthdate does
    /// not parse or lies in the future.
    pub fn age_on(&self, today: chrono::NaiveDate) -> Option<u32> {
        metrics::age_on(&self.birthdate, today)
    }

    /// Age in whole years as of now.
    pub fn age(&self) -> Option<u32> {
        metrics::age(&self.birthdate)
    }

    /// Body mass index, rounded to one decimal place.
    pub fn bmi(&self) -> f64 {
        metrics::bmi(self.height_cm, self.weight_kg)
    }

    /// BMI category derived from the rounded BMI value.
    pub fn bmi_category(&self) -> BmiCategory {
        BmiCategory::from_bmi(self.bmi())
    }

    /// "First Last" display name.
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// A validated patient payload that has not yet been assigned an id.
///
/// Produced by [`crate::validate::validate_form`]; consumed by
/// [`crate::store::RecordStore::add`], which assigns the identifier.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PatientDraft {
    pub first_name: String,
    pub last_name: String,
    pub birthdate: String,
    #[serde(rename = "height")]
    pub height_cm: f64,
    #[serde(rename = "weight")]
    pub weight_kg: f64,
    pub sex: Sex,
    pub mobile: String,
    pub email: String,
    #[serde(default)]
    pub health_info: Option<String>,
}

impl PatientDraft {
    /// Attach an identifier, turning the draft into a stored record.
    pub fn into_patient(self, id: u32) -> Patient {
        Patient {
            id,
            first_name: self.first_name,
            last_name: self.last_name,
            birthdate: self.birthdate,
            height_cm: self.height_cm,
            weight_kg: self.weight_kg,
            sex: self.sex,
            mobile: self.mobile,
            email: self.email,
            health_info: self.health_info,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_patient() -> Patient {
        Patient {
            id: 1,
            first_name: "Ada".into(),
            last_name: "Lovelace".into(),
            birthdate: "1990-03-14".into(),
            height_cm: 170.0,
            weight_kg: 65.0,
            sex: Sex::Female,
            mobile: "07123456789".into(),
            email: "ada@example.com".into(),
            health_info: None,
        }
    }

    #[test]
    fn test_serde_uses_legacy_field_names() {
        let json = serde_json::to_value(test_patient()).unwrap();
        assert_eq!(json["firstName"], "Ada");
        assert_eq!(json["lastName"], "Lovelace");
        assert_eq!(json["height"], 170.0);
        assert_eq!(json["weight"], 65.0);
        assert_eq!(json["sex"], "Female");
    }

    #[test]
    fn test_deserialize_legacy_record() {
        let raw = r#"{
            "id": 3,
            "firstName": "Tom",
            "lastName": "Hardy",
            "birthdate": "1977-09-15",
            "height": 175,
            "weight": 78,
            "sex": "Male",
            "mobile": "07000000000",
            "email": "tom@example.com",
            "healthInfo": "asthma"
        }"#;
        let patient: Patient = serde_json::from_str(raw).unwrap();
        assert_eq!(patient.id, 3);
        assert_eq!(patient.sex, Sex::Male);
        assert_eq!(patient.health_info.as_deref(), Some("asthma"));
    }

    #[test]
    fn test_sex_parse() {
        assert_eq!(Sex::parse("Male"), Some(Sex::Male));
        assert_eq!(Sex::parse("Female"), Some(Sex::Female));
        assert_eq!(Sex::parse(""), None);
        assert_eq!(Sex::parse("other"), None);
    }

    #[test]
    fn test_draft_into_patient() {
        let draft = PatientDraft {
            first_name: "Ada".into(),
            last_name: "Lovelace".into(),
            birthdate: "1990-03-14".into(),
            height_cm: 170.0,
            weight_kg: 65.0,
            sex: Sex::Female,
            mobile: "07123456789".into(),
            email: "ada@example.com".into(),
            health_info: Some("none".into()),
        };
        let patient = draft.into_patient(7);
        assert_eq!(patient.id, 7);
        assert_eq!(patient.first_name, "Ada");
    }

    #[test]
    fn test_full_name() {
        assert_eq!(test_patient().full_name(), "Ada Lovelace");
    }
}
