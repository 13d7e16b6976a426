//! Statistics aggregator: summary counts and chart payloads.
//!
//! Aggregates are pure functions of the full, unfiltered collection,
//! recomputed from scratch after every mutation; nothing is maintained
//! incrementally.

use chrono::NaiveDate;
use serde::Serialize;

use crate::metrics::{self, AgeBucket, BmiCategory};
use crate::models::{Patient, Sex};

/// Record counts per BMI category across the whole population.
#[derive(Debug, Clone, Default, Serialize, PartialEq, Eq)]
pub struct BmiCategoryCounts {
    pub underweight: usize,
    pub normal: usize,
    pub overweight: usize,
    pub obese: usize,
}

impl BmiCategoryCounts {
    fn bump(&mut self, category: BmiCategory) {
        match category {
            BmiCategory::Underweight => self.underweight += 1,
            BmiCategory::Normal => self.normal += 1,
            BmiCategory::Overweight => self.overweight += 1,
            BmiCategory::Obese => self.obese += 1,
        }
    }

    fn get(&self, category: BmiCategory) -> usize {
        match category {
            BmiCategory::Underweight => self.underweight,
            BmiCategory::Normal => self.normal,
            BmiCategory::Overweight => self.overweight,
            BmiCategory::Obese => self.obese,
        }
    }
}

/// One bar of the age-distribution histogram.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct AgeBucketCount {
    /// Bucket label, identical to the filter dropdown text.
    pub label: String,
    pub count: usize,
}

/// A label/value series ready to hand to the charting library.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct ChartSeries {
    pub labels: Vec<String>,
    pub values: Vec<usize>,
}

/// Summary aggregates over the full record collection.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Statistics {
    pub total: usize,
    pub male_count: usize,
    pub female_count: usize,
    /// Mean BMI of the male sub-population, one decimal place; `None` when
    /// there are no male records (rendered as a dash, never divided by zero).
    pub avg_bmi_male: Option<f64>,
    /// Mean BMI of the female sub-population, same convention.
    pub avg_bmi_female: Option<f64>,
    pub bmi_categories: BmiCategoryCounts,
    /// Female records aged 50 or over.
    pub females_50_plus: usize,
    /// Decade buckets in ascending order; empty buckets and records with no
    /// computable age are omitted.
    pub age_histogram: Vec<AgeBucketCount>,
}

impl Statistics {
    /// Compute all aggregates with ages evaluated as of `today`.
    pub fn compute_on(patients: &[Patient], today: NaiveDate) -> Self {
        let mut male_count = 0;
        let mut female_count = 0;
        let mut male_bmi_sum = 0.0;
        let mut female_bmi_sum = 0.0;
        let mut bmi_categories = BmiCategoryCounts::default();
        let mut females_50_plus = 0;
        let mut buckets = std::collections::BTreeMap::new();

        for patient in patients {
            let bmi = patient.bmi();
            bmi_categories.bump(BmiCategory::from_bmi(bmi));

            let age = patient.age_on(today);
            match patient.sex {
                Sex::Male => {
                    male_count += 1;
                    male_bmi_sum += bmi;
                }
                Sex::Female => {
                    female_count += 1;
                    female_bmi_sum += bmi;
                    if age.map_or(false, |a| a >= 50) {
                        females_50_plus += 1;
                    }
                }
            }

            if let Some(age) = age {
                *buckets.entry(AgeBucket::from_age(age)).or_insert(0usize) += 1;
            }
        }

        let age_histogram = buckets
            .into_iter()
            .map(|(bucket, count)| AgeBucketCount {
                label: bucket.label(),
                count,
            })
            .collect();

        Self {
            total: patients.len(),
            male_count,
            female_count,
            avg_bmi_male: mean_one_decimal(male_bmi_sum, male_count),
            avg_bmi_female: mean_one_decimal(female_bmi_sum, female_count),
            bmi_categories,
            females_50_plus,
            age_histogram,
        }
    }

    /// [`compute_on`](Self::compute_on) with ages as of the current date.
    pub fn compute(patients: &[Patient]) -> Self {
        Self::compute_on(patients, metrics::today())
    }

    /// BMI-distribution doughnut payload: one slice per category, always all
    /// four labels so slice colors stay stable.
    pub fn bmi_chart(&self) -> ChartSeries {
        let categories = BmiCategory::all();
        ChartSeries {
            labels: categories.iter().map(|c| c.label().to_string()).collect(),
            values: categories
                .iter()
                .map(|c| self.bmi_categories.get(*c))
                .collect(),
        }
    }

    /// Sex-ratio pie payload.
    pub fn sex_chart(&self) -> ChartSeries {
        ChartSeries {
            labels: vec!["Male".into(), "Female".into()],
            values: vec![self.male_count, self.female_count],
        }
    }

    /// Age-distribution bar payload, ascending decades, present buckets only.
    pub fn age_chart(&self) -> ChartSeries {
        ChartSeries {
            labels: self.age_histogram.iter().map(|b| b.label.clone()).collect(),
            values: self.age_histogram.iter().map(|b| b.count).collect(),
        }
    }
}

/// Arithmetic mean rounded to one decimal place, `None` for an empty group.
fn mean_one_decimal(sum: f64, count: usize) -> Option<f64> {
    if count == 0 {
        return None;
    }
    Some((sum / count as f64 * 10.0).round() / 10.0)
}
