//! Query engine: free-text name search plus categorical facets.

use chrono::NaiveDate;

use crate::metrics::{self, AgeBucket, BmiCategory};
use crate::models::{Patient, Sex};

/// The four filter predicates, ANDed together. Unset members match all.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchFilter {
    /// Case-insensitive substring matched against first OR last name.
    /// Empty matches all.
    pub query: String,
    pub sex: Option<Sex>,
    pub age_bucket: Option<AgeBucket>,
    pub bmi_category: Option<BmiCategory>,
}

impl SearchFilter {
    /// Build a filter from the raw control values the presentation layer
    /// reads off the search box and the three dropdowns. Empty strings and
    /// unknown labels leave the corresponding predicate unset.
    pub fn from_controls(query: &str, sex: &str, age: &str, bmi: &str) -> Self {
        Self {
            query: query.trim().to_lowercase(),
            sex: Sex::parse(sex),
            age_bucket: AgeBucket::parse(age),
            bmi_category: BmiCategory::parse(bmi),
        }
    }

    /// Whether `patient` passes every predicate, ages computed as of `today`.
    pub fn matches_on(&self, patient: &Patient, today: NaiveDate) -> bool {
        let matches_name = self.query.is_empty()
            || patient.first_name.to_lowercase().contains(&self.query)
            || patient.last_name.to_lowercase().contains(&self.query);

        let matches_sex = self.sex.map_or(true, |sex| patient.sex == sex);

        // A record with no computable age matches only an unset age filter.
        let matches_age = match self.age_bucket {
            None => true,
            Some(bucket) => patient
                .age_on(today)
                .map_or(false, |age| bucket.contains(age)),
        };

        let matches_bmi = self
            .bmi_category
            .map_or(true, |category| patient.bmi_category() == category);

        matches_name && matches_sex && matches_age && matches_bmi
    }
}

/// Filter `patients` through `filter` with ages computed as of `today`.
///
/// The filter is stable: results keep the original (insertion) order, and
/// repeating the same parameters over the same list yields the same result.
pub fn search_on(patients: &[Patient], filter: &SearchFilter, today: NaiveDate) -> Vec<Patient> {
    patients
        .iter()
        .filter(|p| filter.matches_on(p, today))
        .cloned()
        .collect()
}

/// [`search_on`] with ages computed as of the current date.
pub fn search(patients: &[Patient], filter: &SearchFilter) -> Vec<Patient> {
    search_on(patients, filter, metrics::today())
}
