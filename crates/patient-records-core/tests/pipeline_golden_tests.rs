//! Golden tests for the filter-and-aggregate pipeline.
//!
//! Each case drives the query engine through the same control values the
//! presentation layer would read off the search box and dropdowns.

use chrono::NaiveDate;
use patient_records_core::{search_on, Patient, SearchFilter, Sex, Statistics};

/// One filter scenario and the ids it must select.
struct GoldenCase {
    id: &'static str,
    query: &'static str,
    sex: &'static str,
    age: &'static str,
    bmi: &'static str,
    expected_ids: &'static [u32],
}

fn today() -> NaiveDate {
    NaiveDate::parse_from_str("2026-01-15", "%Y-%m-%d").unwrap()
}

fn patient(
    id: u32,
    first: &str,
    last: &str,
    birthdate: &str,
    sex: Sex,
    height_cm: f64,
    weight_kg: f64,
) -> Patient {
    Patient {
        id,
        first_name: first.into(),
        last_name: last.into(),
        birthdate: birthdate.into(),
        height_cm,
        weight_kg,
        sex,
        mobile: "07123456789".into(),
        email: "case@example.com".into(),
        health_info: None,
    }
}

/// Ages on 2026-01-15: 45, 72, 24, 91.
fn roster() -> Vec<Patient> {
    vec![
        patient(1, "Arthur", "Mills", "1980-06-01", Sex::Male, 180.0, 88.5), // BMI 27.3
        patient(2, "Beth", "Milton", "1953-06-01", Sex::Female, 160.0, 79.4), // BMI 31.0
        patient(3, "Ciara", "Nolan", "2001-04-20", Sex::Female, 170.0, 60.0), // BMI 20.8
        patient(4, "Dennis", "Oduya", "1934-03-05", Sex::Male, 175.0, 55.0), // BMI 18.0
    ]
}

fn golden_cases() -> Vec<GoldenCase> {
    vec![
        GoldenCase {
            id: "all-unset-returns-everything",
            query: "",
            sex: "",
            age: "",
            bmi: "",
            expected_ids: &[1, 2, 3, 4],
        },
        GoldenCase {
            id: "name-substring-both-names",
            query: "mil",
            sex: "",
            age: "",
            bmi: "",
            expected_ids: &[1, 2],
        },
        GoldenCase {
            id: "sex-facet",
            query: "",
            sex: "Female",
            age: "",
            bmi: "",
            expected_ids: &[2, 3],
        },
        GoldenCase {
            id: "age-decade-inclusive",
            query: "",
            sex: "",
            age: "40 to 49",
            bmi: "",
            expected_ids: &[1],
        },
        GoldenCase {
            id: "age-open-bucket",
            query: "",
            sex: "",
            age: "90+",
            bmi: "",
            expected_ids: &[4],
        },
        GoldenCase {
            id: "bmi-facet-exact-band",
            query: "",
            sex: "",
            age: "",
            bmi: "Obese",
            expected_ids: &[2],
        },
        GoldenCase {
            id: "underweight-band",
            query: "",
            sex: "",
            age: "",
            bmi: "Underweight",
            expected_ids: &[4],
        },
        GoldenCase {
            id: "all-facets-anded",
            query: "mil",
            sex: "Female",
            age: "70 to 79",
            bmi: "Obese",
            expected_ids: &[2],
        },
        GoldenCase {
            id: "conflicting-facets-match-nothing",
            query: "mil",
            sex: "Male",
            age: "",
            bmi: "Obese",
            expected_ids: &[],
        },
    ]
}

#[test]
fn golden_filter_cases() {
    let roster = roster();
    for case in golden_cases() {
        let filter = SearchFilter::from_controls(case.query, case.sex, case.age, case.bmi);
        let results = search_on(&roster, &filter, today());
        let ids: Vec<u32> = results.iter().map(|p| p.id).collect();
        assert_eq!(ids, case.expected_ids, "case {}", case.id);
    }
}

#[test]
fn filters_do_not_affect_statistics() {
    // Statistics always run over the full collection, whatever the list
    // view is currently filtered to.
    let roster = roster();
    let filter = SearchFilter::from_controls("", "Female", "", "");
    let filtered = search_on(&roster, &filter, today());
    assert_eq!(filtered.len(), 2);

    let stats = Statistics::compute_on(&roster, today());
    assert_eq!(stats.total, 4);
    assert_eq!(stats.male_count, 2);
    assert_eq!(stats.female_count, 2);
    assert_eq!(stats.females_50_plus, 1);
}

#[test]
fn worked_statistics_example() {
    let pair = vec![
        patient(1, "Arthur", "Mills", "1980-06-01", Sex::Male, 180.0, 88.5),
        patient(2, "Beth", "Milton", "1953-06-01", Sex::Female, 160.0, 79.4),
    ];
    let stats = Statistics::compute_on(&pair, today());
    assert_eq!(stats.avg_bmi_male, Some(27.3));
    assert_eq!(stats.avg_bmi_female, Some(31.0));
    assert_eq!(stats.bmi_categories.overweight, 1);
    assert_eq!(stats.bmi_categories.obese, 1);
    assert_eq!(stats.females_50_plus, 1);

    let age = stats.age_chart();
    assert_eq!(age.labels, ["40 to 49", "70 to 79"]);
    assert_eq!(age.values, [1, 1]);
}
