//! Tests for column classification over dataset header unions.

use proptest::prelude::*;
use unify_map::{ClassifyError, ColumnClassifier, ColumnRole, header_union};
use unify_model::Dataset;

fn dataset(columns: &[&str]) -> Dataset {
    Dataset::new(columns.iter().map(|c| (*c).to_string()).collect())
}

#[test]
fn classifies_world_bank_style_headers() {
    let datasets = vec![
        dataset(&["Country Name", "Country Code", "Time", "Time Code", "GDP (current US$)"]),
        dataset(&["M49 code", "Year", "Population"]),
    ];
    let union = header_union(&datasets);
    let chosen = ColumnClassifier::new().classify(&union).expect("classify");
    assert_eq!(chosen.country, "Country Name");
    assert_eq!(chosen.year, "Time");
}

#[test]
fn narrow_dataset_headers_are_scanned_after_the_widest() {
    let datasets = vec![
        dataset(&["iso", "value"]),
        dataset(&["Indicator", "Region Name", "yr"]),
    ];
    let union = header_union(&datasets);
    assert_eq!(union, vec!["Indicator", "Region Name", "yr", "iso", "value"]);
    let chosen = ColumnClassifier::new().classify(&union).expect("classify");
    assert_eq!(chosen.country, "Region Name");
    assert_eq!(chosen.year, "yr");
}

#[test]
fn no_year_column_aborts() {
    let union = header_union(&[dataset(&["Country", "GDP"])]);
    let err = ColumnClassifier::new().classify(&union).unwrap_err();
    assert_eq!(
        err,
        ClassifyError::NoMatchingColumn {
            role: ColumnRole::Year
        }
    );
}

fn arb_header() -> impl Strategy<Value = String> {
    prop_oneof![
        3 => r"[A-Za-z]{1,8}( [A-Za-z]{1,8}){0,2}",
        1 => Just("Country Name".to_string()),
        1 => Just("ISO alpha3".to_string()),
        1 => Just("Year".to_string()),
        1 => Just("time period".to_string()),
    ]
}

proptest! {
    #[test]
    fn classification_is_deterministic(headers in prop::collection::vec(arb_header(), 0..12)) {
        let classifier = ColumnClassifier::new();
        let first = classifier.classify(&headers);
        let second = classifier.classify(&headers);
        prop_assert_eq!(first, second);
    }

    #[test]
    fn chosen_country_is_the_first_keyword_match(
        headers in prop::collection::vec(arb_header(), 1..12)
    ) {
        let classifier = ColumnClassifier::new();
        if let Some(chosen) = classifier.find(&headers, ColumnRole::Country) {
            let position = headers.iter().position(|h| h == chosen).expect("chosen header present");
            for earlier in &headers[..position] {
                prop_assert!(classifier.find(std::slice::from_ref(earlier), ColumnRole::Country).is_none());
            }
        }
    }
}
