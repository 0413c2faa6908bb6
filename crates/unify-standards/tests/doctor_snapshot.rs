//! Tests for the reference doctor report.

mod support;

use unify_standards::{DoctorReport, ReferenceRegistry};

use support::write_reference_dir;

#[test]
fn doctor_report_snapshot_is_stable() {
    let temp = tempfile::tempdir().expect("tempdir");
    write_reference_dir(temp.path());

    let (registry, summary) =
        ReferenceRegistry::verify_and_load(temp.path()).expect("verify_and_load should succeed");
    let report = DoctorReport::from_registry(&registry, &summary);

    assert_eq!(report.schema, "unify.reference-doctor");
    assert_eq!(report.pins.countries, "fixture");
    let paths: Vec<&str> = report.files.iter().map(|f| f.path.as_str()).collect();
    assert_eq!(
        paths,
        vec![
            "countries.json",
            "dictionaries/gb-us.json",
            "dictionaries/us-gb.json"
        ]
    );

    insta::assert_json_snapshot!(report.counts, @r#"
    {
      "files": 3,
      "countries": 3,
      "historical": 1,
      "aliases": 2,
      "translations_us_gb": 2,
      "translations_gb_us": 1
    }
    "#);

    insta::assert_json_snapshot!(report.conflicts, @r#"
    [
      {
        "key": "great britain",
        "records": [
          "United Kingdom",
          "Britain"
        ]
      }
    ]
    "#);
}
