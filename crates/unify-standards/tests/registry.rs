//! Tests for reference manifest verification and loading.

mod support;

use std::path::PathBuf;

use unify_model::SpellingLocale;
use unify_standards::{ReferenceLoadError, ReferenceRegistry};

use support::{write, write_reference_dir};

#[test]
fn bundled_reference_data_verifies() {
    let dir = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../reference");
    let (registry, summary) =
        ReferenceRegistry::verify_and_load(&dir).expect("bundled reference data should verify");

    assert_eq!(summary.file_count, 3);
    assert!(summary.country_count > 250);
    assert!(summary.historical_count > 0);
    assert_eq!(summary.conflict_count, 0);

    let uk = registry
        .directory
        .get("united kingdom")
        .expect("United Kingdom present");
    assert_eq!(uk.alpha2.as_deref(), Some("GB"));
    assert_eq!(uk.m49.as_deref(), Some("826"));

    let ussr = registry.directory.get("Soviet Union").expect("USSR present");
    assert_eq!(ussr.canonical_name(), "Soviet Union (former)");

    assert_eq!(
        registry.translations(SpellingLocale::Gb).get("color"),
        Some("colour")
    );
    assert_eq!(
        registry.translations(SpellingLocale::Us).get("colour"),
        Some("color")
    );
}

#[test]
fn loads_fixture_and_keeps_record_order() {
    let temp = tempfile::tempdir().expect("tempdir");
    write_reference_dir(temp.path());

    let (registry, summary) =
        ReferenceRegistry::verify_and_load(temp.path()).expect("fixture should verify");

    let names: Vec<&str> = registry
        .directory
        .iter()
        .map(|record| record.name.as_str())
        .collect();
    assert_eq!(names, vec!["United Kingdom", "Yugoslavia", "Britain"]);
    assert_eq!(summary.conflict_count, 1);
    assert_eq!(registry.conflicts()[0].key, "great britain");
    assert_eq!(registry.translations(SpellingLocale::Gb).len(), 2);
}

#[test]
fn tampered_file_fails_checksum() {
    let temp = tempfile::tempdir().expect("tempdir");
    write_reference_dir(temp.path());
    write(
        &temp.path().join("dictionaries/gb-us.json"),
        br#"{"colour": "colr"}"#,
    );

    let err = ReferenceRegistry::verify_and_load(temp.path()).unwrap_err();
    assert!(matches!(err, ReferenceLoadError::Sha256Mismatch { .. }));
}

#[test]
fn missing_file_is_reported() {
    let temp = tempfile::tempdir().expect("tempdir");
    write_reference_dir(temp.path());
    std::fs::remove_file(temp.path().join("countries.json")).expect("remove countries");

    let err = ReferenceRegistry::verify_and_load(temp.path()).unwrap_err();
    assert!(matches!(err, ReferenceLoadError::MissingFile { .. }));
}

#[test]
fn manifest_without_dictionary_role_is_rejected() {
    let temp = tempfile::tempdir().expect("tempdir");
    write_reference_dir(temp.path());
    let manifest_path = temp.path().join("manifest.toml");
    let manifest = std::fs::read_to_string(&manifest_path).expect("read manifest");
    let trimmed = manifest
        .split("[[files]]")
        .take(3)
        .collect::<Vec<_>>()
        .join("[[files]]");
    write(&manifest_path, trimmed.as_bytes());

    let err = ReferenceRegistry::verify_and_load(temp.path()).unwrap_err();
    match err {
        ReferenceLoadError::MissingRole { role } => assert_eq!(role, "translations_gb_us"),
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn wrong_schema_is_rejected() {
    let temp = tempfile::tempdir().expect("tempdir");
    write_reference_dir(temp.path());
    let manifest_path = temp.path().join("manifest.toml");
    let manifest = std::fs::read_to_string(&manifest_path)
        .expect("read manifest")
        .replace("unify.reference-manifest", "other.manifest");
    write(&manifest_path, manifest.as_bytes());

    let err = ReferenceRegistry::verify_and_load(temp.path()).unwrap_err();
    assert!(matches!(err, ReferenceLoadError::InvalidManifest { .. }));
}

#[test]
fn duplicate_codes_fail_directory_construction() {
    let temp = tempfile::tempdir().expect("tempdir");
    write_reference_dir(temp.path());
    let countries = br#"[
  {"name": "United Kingdom", "alpha2": "GB"},
  {"name": "Gibraltar", "alpha2": "GB"}
]"#;
    write(&temp.path().join("countries.json"), countries);
    let manifest_path = temp.path().join("manifest.toml");
    let manifest = std::fs::read_to_string(&manifest_path).expect("read manifest");
    let old_sha = support::sha256_of(support::COUNTRIES.as_bytes());
    let new_sha = support::sha256_of(countries);
    write(
        &manifest_path,
        manifest.replace(&old_sha, &new_sha).as_bytes(),
    );

    let err = ReferenceRegistry::verify_and_load(temp.path()).unwrap_err();
    assert!(matches!(err, ReferenceLoadError::InvalidDirectory { .. }));
    assert!(err.to_string().contains("countries.json"));
}
