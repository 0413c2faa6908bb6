//! The reference directory of canonical country records.
//!
//! The directory is built once, validated, and then shared read-only by every
//! resolution call. Record order is significant: resolution scans records in
//! directory order and the first record that matches wins.
//!
//! ## Invariants enforced on construction
//!
//! - Names are non-empty and unique (case-insensitive, since name matching
//!   ignores case).
//! - Codes (alpha-2, alpha-3, M49) are unique across the whole directory.
//!
//! ## Conflicts
//!
//! Aliases and composed forms may legitimately collide across records (an
//! alias of one record equal to the name of another, for example). Such
//! overlaps are not rejected; they are collected as [`DirectoryConflict`]s so
//! callers can surface them as configuration warnings.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::country::CountryRecord;
use crate::error::{ModelError, Result};

/// A case-insensitive match key claimed by more than one record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DirectoryConflict {
    /// Lower-cased key shared by the records.
    pub key: String,
    /// Names of the records claiming the key, in directory order.
    pub records: Vec<String>,
}

#[derive(Debug, Clone, Default)]
pub struct ReferenceDirectory {
    records: Vec<CountryRecord>,
    conflicts: Vec<DirectoryConflict>,
}

impl ReferenceDirectory {
    /// Validates and indexes the given records, preserving their order.
    pub fn new(records: Vec<CountryRecord>) -> Result<Self> {
        let records: Vec<CountryRecord> =
            records.into_iter().map(CountryRecord::normalized).collect();

        validate(&records)?;

        let conflicts = detect_conflicts(&records);
        Ok(Self { records, conflicts })
    }

    pub fn records(&self) -> &[CountryRecord] {
        &self.records
    }

    pub fn iter(&self) -> std::slice::Iter<'_, CountryRecord> {
        self.records.iter()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Overlapping aliases / composed forms found at construction.
    pub fn conflicts(&self) -> &[DirectoryConflict] {
        &self.conflicts
    }

    /// Looks up a record by name, ignoring case.
    pub fn get(&self, name: &str) -> Option<&CountryRecord> {
        let lowered = name.to_lowercase();
        self.records
            .iter()
            .find(|record| record.name.to_lowercase() == lowered)
    }
}

impl<'a> IntoIterator for &'a ReferenceDirectory {
    type Item = &'a CountryRecord;
    type IntoIter = std::slice::Iter<'a, CountryRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

fn validate(records: &[CountryRecord]) -> Result<()> {
    let mut names: BTreeMap<String, &str> = BTreeMap::new();
    let mut codes: BTreeMap<&str, &str> = BTreeMap::new();

    for record in records {
        if record.name.is_empty() {
            return Err(ModelError::EmptyCountryName);
        }
        if names
            .insert(record.name.to_lowercase(), record.name.as_str())
            .is_some()
        {
            return Err(ModelError::DuplicateCountryName(record.name.clone()));
        }
        for code in record.codes() {
            if let Some(first) = codes.insert(code, record.name.as_str()) {
                return Err(ModelError::DuplicateCountryCode {
                    code: code.to_string(),
                    first: first.to_string(),
                    second: record.name.clone(),
                });
            }
        }
    }
    Ok(())
}

/// Collects every case-insensitive key (name, composed forms, aliases) and
/// reports keys claimed by more than one record.
fn detect_conflicts(records: &[CountryRecord]) -> Vec<DirectoryConflict> {
    let mut owners: BTreeMap<String, Vec<String>> = BTreeMap::new();

    for record in records {
        let mut keys = vec![record.name.to_lowercase()];
        keys.extend(record.composed_name().map(|v| v.to_lowercase()));
        keys.extend(record.prefixed_name().map(|v| v.to_lowercase()));
        keys.extend(record.aliases.iter().map(|alias| alias.to_lowercase()));
        keys.sort();
        keys.dedup();

        for key in keys {
            owners.entry(key).or_default().push(record.name.clone());
        }
    }

    owners
        .into_iter()
        .filter(|(_, names)| names.len() > 1)
        .map(|(key, records)| DirectoryConflict { key, records })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_duplicate_names_ignoring_case() {
        let err = ReferenceDirectory::new(vec![
            CountryRecord::new("France"),
            CountryRecord::new("FRANCE"),
        ])
        .unwrap_err();
        assert!(matches!(err, ModelError::DuplicateCountryName(name) if name == "FRANCE"));
    }

    #[test]
    fn rejects_duplicate_codes() {
        let err = ReferenceDirectory::new(vec![
            CountryRecord::new("France").with_alpha2("FR"),
            CountryRecord::new("Francia").with_alpha2("FR"),
        ])
        .unwrap_err();
        match err {
            ModelError::DuplicateCountryCode {
                code,
                first,
                second,
            } => {
                assert_eq!(code, "FR");
                assert_eq!(first, "France");
                assert_eq!(second, "Francia");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn rejects_empty_names() {
        let err = ReferenceDirectory::new(vec![CountryRecord::new("   ")]).unwrap_err();
        assert!(matches!(err, ModelError::EmptyCountryName));
    }

    #[test]
    fn reports_alias_overlaps_as_conflicts() {
        let directory = ReferenceDirectory::new(vec![
            CountryRecord::new("Congo").with_alias("Congo Republic"),
            CountryRecord::new("Congo Republic"),
            CountryRecord::new("Niger"),
        ])
        .unwrap();
        assert_eq!(
            directory.conflicts(),
            &[DirectoryConflict {
                key: "congo republic".to_string(),
                records: vec!["Congo".to_string(), "Congo Republic".to_string()],
            }]
        );
    }

    #[test]
    fn keeps_record_order_and_finds_by_name() {
        let directory = ReferenceDirectory::new(vec![
            CountryRecord::new("Zambia"),
            CountryRecord::new("Albania"),
        ])
        .unwrap();
        let names: Vec<&str> = directory.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["Zambia", "Albania"]);
        assert!(directory.get("albania").is_some());
        assert!(directory.get("Atlantis").is_none());
        assert!(directory.conflicts().is_empty());
    }
}
