//! Derived metrics: age, BMI, BMI category, age buckets.
//!
//! Nothing here is ever stored. Every value is recomputed from the raw
//! record fields at read time, so derived views cannot go stale after an
//! edit.

use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Days per year used for age arithmetic. Deliberately not calendar-exact;
/// the stored behavior is consistently this approximation.
const DAYS_PER_YEAR: f64 = 365.25;

/// Age in whole years as of `today`.
///
/// Returns `None` when the birthdate does not parse as `YYYY-MM-DD` or lies
/// after `today` (a negative age is never reported).
pub fn age_on(birthdate: &str, today: NaiveDate) -> Option<u32> {
    let dob = NaiveDate::parse_from_str(birthdate.trim(), "%Y-%m-%d").ok()?;
    let days = (today - dob).num_days();
    if days < 0 {
        return None;
    }
    Some((days as f64 / DAYS_PER_YEAR).floor() as u32)
}

/// Age in whole years as of the current date.
pub fn age(birthdate: &str) -> Option<u32> {
    age_on(birthdate, today())
}

/// The current date, UTC. Callers that need determinism use the `_on`
/// variants and pass their own date.
pub fn today() -> NaiveDate {
    Utc::now().date_naive()
}

/// Body mass index: weight / height², rounded to one decimal place.
///
/// Height is in centimeters, weight in kilograms. Validation guarantees a
/// non-zero height before any record reaches this function.
pub fn bmi(height_cm: f64, weight_kg: f64) -> f64 {
    let height_m = height_cm / 100.0;
    let raw = weight_kg / (height_m * height_m);
    (raw * 10.0).round() / 10.0
}

/// Format a `YYYY-MM-DD` birthdate as `DD/MM/YYYY` for display.
///
/// An unparseable input is returned unchanged.
pub fn format_date_uk(date: &str) -> String {
    match NaiveDate::parse_from_str(date.trim(), "%Y-%m-%d") {
        Ok(parsed) => parsed.format("%d/%m/%Y").to_string(),
        Err(_) => date.to_string(),
    }
}

/// The four BMI bands.
///
/// Boundaries are half-open on the lower bound: 18.5 exactly is Normal,
/// 25.0 exactly is Overweight, 30.0 exactly is Obese.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum BmiCategory {
    Underweight,
    Normal,
    Overweight,
    Obese,
}

impl BmiCategory {
    /// Categorize a BMI value.
    pub fn from_bmi(bmi: f64) -> Self {
        if bmi < 18.5 {
            BmiCategory::Underweight
        } else if bmi < 25.0 {
            BmiCategory::Normal
        } else if bmi < 30.0 {
            BmiCategory::Overweight
        } else {
            BmiCategory::Obese
        }
    }

    /// Display label, identical to the filter control values.
    pub fn label(&self) -> &'static str {
        match self {
            BmiCategory::Underweight => "Underweight",
            BmiCategory::Normal => "Normal",
            BmiCategory::Overweight => "Overweight",
            BmiCategory::Obese => "Obese",
        }
    }

    /// Parse a category label. Empty or unknown values are `None`.
    pub fn parse(label: &str) -> Option<Self> {
        match label.trim() {
            "Underweight" => Some(BmiCategory::Underweight),
            "Normal" => Some(BmiCategory::Normal),
            "Overweight" => Some(BmiCategory::Overweight),
            "Obese" => Some(BmiCategory::Obese),
            _ => None,
        }
    }

    /// All categories in display order.
    pub fn all() -> [BmiCategory; 4] {
        [
            BmiCategory::Underweight,
            BmiCategory::Normal,
            BmiCategory::Overweight,
            BmiCategory::Obese,
        ]
    }
}

/// A ten-year age range used for filtering and the age histogram.
///
/// Buckets are `"0 to 9"` through `"80 to 89"`, with everything at 90 and
/// above collapsed into `"90+"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AgeBucket {
    /// Lowest age in the bucket: 0, 10, ..., 80, or 90 for the open bucket.
    floor: u32,
}

impl AgeBucket {
    const OPEN_FLOOR: u32 = 90;

    /// Bucket containing the given age.
    pub fn from_age(age: u32) -> Self {
        let floor = (age / 10) * 10;
        Self {
            floor: floor.min(Self::OPEN_FLOOR),
        }
    }

    /// Parse a bucket label: `"{min} to {max}"` or `"{min}+"`.
    ///
    /// This is the text the filter dropdown and chart labels carry, so it is
    /// the only interchange format. Empty or malformed labels are `None`.
    pub fn parse(label: &str) -> Option<Self> {
        let label = label.trim();
        if label.is_empty() {
            return None;
        }
        if let Some(min) = label.strip_suffix('+') {
            let floor: u32 = min.trim().parse().ok()?;
            return Some(Self { floor });
        }
        let (min, _max) = label.split_once(" to ")?;
        let floor: u32 = min.trim().parse().ok()?;
        Some(Self { floor })
    }

    /// Whether the age falls inside this bucket, inclusive on both ends.
    pub fn contains(&self, age: u32) -> bool {
        if self.floor >= Self::OPEN_FLOOR {
            age >= self.floor
        } else {
            age >= self.floor && age <= self.floor + 9
        }
    }

    /// Display label, identical to the dropdown option text.
    pub fn label(&self) -> String {
        if self.floor >= Self::OPEN_FLOOR {
            format!("{}+", self.floor)
        } else {
            format!("{} to {}", self.floor, self.floor + 9)
        }
    }
}


#[cfg(test)]
mod property_tests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        // Every valid form input lands in exactly one of the four bands.
        #[test]
        fn bmi_category_total_over_valid_inputs(
            height in 30.0f64..=200.0,
            weight in 1.0f64..=200.0,
        ) {
            let value = bmi(height, weight);
            let category = BmiCategory::from_bmi(value);
            prop_assert!(BmiCategory::all().contains(&category));
            prop_assert_eq!(BmiCategory::parse(category.label()), Some(category));
        }

        #[test]
        fn every_age_has_exactly_one_bucket(age in 0u32..=120) {
            let bucket = AgeBucket::from_age(age);
            prop_assert!(bucket.contains(age));
            let others = (0..=9).map(|d| AgeBucket::from_age(d * 10));
            let holding = others.filter(|b| b.contains(age)).count();
            prop_assert_eq!(holding, 1);
        }
    }
}
