//! Country resolution against the reference directory.
//!
//! Each country cell is matched by [`identify`], which scans records in
//! directory order and applies, per record:
//!
//! 1. name, ignoring case -> unchanged
//! 2. alpha-2 / alpha-3 / M49 code, exact -> unified to the record name
//! 3. for records with a `preceding` qualifier: `"{name} ({preceding})"` ->
//!    unchanged, `"{preceding} {name}"` -> unified to the composed form
//! 4. alias, ignoring case -> unified to the record's canonical name
//!
//! The first hit over the whole scan wins; a value no record claims is
//! invalid and its row is dropped. Cost is O(rows x records).

use serde::Serialize;
use tracing::warn;
use unify_map::{CountrySuggestion, DEFAULT_MIN_SIMILARITY, suggest_country};
use unify_model::{CellValue, CollatedRow, CollatedTable, ReferenceDirectory, ResolutionOutcome};

pub fn identify(stored: &str, directory: &ReferenceDirectory) -> ResolutionOutcome {
    let lowered = stored.to_lowercase();

    for record in directory {
        if record.name.to_lowercase() == lowered {
            return ResolutionOutcome::Unchanged;
        }
        if record.has_code(stored) {
            return ResolutionOutcome::Unified(record.name.clone());
        }
        if let (Some(composed), Some(prefixed)) = (record.composed_name(), record.prefixed_name())
        {
            if composed.to_lowercase() == lowered {
                return ResolutionOutcome::Unchanged;
            }
            if prefixed.to_lowercase() == lowered {
                return ResolutionOutcome::Unified(composed);
            }
        }
        if record.has_alias(stored) {
            return ResolutionOutcome::Unified(record.canonical_name());
        }
    }

    ResolutionOutcome::Invalid
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DropReason {
    /// The country cell was empty.
    MissingValue,
    /// No record matched the value.
    NoMatch,
}

impl DropReason {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::MissingValue => "missing value",
            Self::NoMatch => "no match",
        }
    }
}

/// A row removed during resolution.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DroppedRow {
    pub source_index: usize,
    pub row_index: usize,
    /// Raw country value, absent when the cell was missing.
    pub value: Option<String>,
    pub reason: DropReason,
    /// Closest canonical name, when one is similar enough.
    pub suggestion: Option<CountrySuggestion>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ResolutionReport {
    pub unified: usize,
    pub unchanged: usize,
    pub dropped: Vec<DroppedRow>,
}

#[derive(Debug, Clone, Copy)]
pub struct CountryResolver<'a> {
    directory: &'a ReferenceDirectory,
    min_similarity: f64,
}

impl<'a> CountryResolver<'a> {
    pub fn new(directory: &'a ReferenceDirectory) -> Self {
        Self {
            directory,
            min_similarity: DEFAULT_MIN_SIMILARITY,
        }
    }

    /// Threshold for drop-report suggestions.
    pub fn with_min_similarity(mut self, min_similarity: f64) -> Self {
        self.min_similarity = min_similarity;
        self
    }

    /// Resolves one cell. Missing cells are invalid; numbers are matched
    /// through their text rendering.
    pub fn resolve_cell(&self, cell: &CellValue) -> ResolutionOutcome {
        match cell.render() {
            Some(text) => identify(&text, self.directory),
            None => ResolutionOutcome::Invalid,
        }
    }

    /// Produces a new table with unified country cells and invalid rows
    /// removed. The input table is left untouched.
    pub fn resolve(&self, table: &CollatedTable) -> (CollatedTable, ResolutionReport) {
        let mut resolved = table.empty_like();
        let mut report = ResolutionReport::default();

        for row in &table.rows {
            let cell = table.country_cell(row);

            match self.resolve_cell(cell) {
                ResolutionOutcome::Unchanged => {
                    report.unchanged += 1;
                    resolved.rows.push(row.clone());
                }
                ResolutionOutcome::Unified(canonical) => {
                    report.unified += 1;
                    let country_index = table.country_index_for(row.source_index);
                    resolved
                        .rows
                        .push(rewrite_country(row, country_index, canonical));
                }
                ResolutionOutcome::Invalid => {
                    let dropped = self.dropped_row(row, cell);
                    warn!(
                        source_index = dropped.source_index,
                        row_index = dropped.row_index,
                        reason = dropped.reason.as_str(),
                        "dropping row with unresolved country"
                    );
                    report.dropped.push(dropped);
                }
            }
        }

        (resolved, report)
    }

    fn dropped_row(&self, row: &CollatedRow, cell: &CellValue) -> DroppedRow {
        let value = cell.render();
        let (reason, suggestion) = match &value {
            Some(text) => (
                DropReason::NoMatch,
                suggest_country(text, self.directory, self.min_similarity),
            ),
            None => (DropReason::MissingValue, None),
        };
        DroppedRow {
            source_index: row.source_index,
            row_index: row.row_index,
            value,
            reason,
            suggestion,
        }
    }
}

fn rewrite_country(
    row: &CollatedRow,
    country_index: Option<usize>,
    canonical: String,
) -> CollatedRow {
    let mut row = row.clone();
    if let Some(slot) = country_index.and_then(|idx| row.values.get_mut(idx)) {
        *slot = CellValue::Text(canonical);
    }
    row
}

#[cfg(test)]
mod tests {
    use unify_model::CountryRecord;

    use super::*;

    fn directory() -> ReferenceDirectory {
        ReferenceDirectory::new(vec![
            CountryRecord::new("United Kingdom")
                .with_alpha2("GB")
                .with_alpha3("GBR")
                .with_m49("826")
                .with_alias("Great Britain"),
            CountryRecord::new("Yugoslavia")
                .with_alpha3("YUG")
                .with_preceding("former")
                .with_alias("SFR Yugoslavia"),
            CountryRecord::new("Afghanistan").with_m49("004"),
        ])
        .unwrap()
    }

    #[test]
    fn names_match_ignoring_case() {
        assert_eq!(identify("UNITED kingdom", &directory()), ResolutionOutcome::Unchanged);
    }

    #[test]
    fn codes_match_exactly() {
        let directory = directory();
        assert_eq!(
            identify("GB", &directory),
            ResolutionOutcome::Unified("United Kingdom".into())
        );
        assert_eq!(
            identify("826", &directory),
            ResolutionOutcome::Unified("United Kingdom".into())
        );
        assert_eq!(identify("gb", &directory), ResolutionOutcome::Invalid);
        assert_eq!(identify("4", &directory), ResolutionOutcome::Invalid);
        assert_eq!(
            identify("004", &directory),
            ResolutionOutcome::Unified("Afghanistan".into())
        );
    }

    #[test]
    fn preceding_forms_resolve_to_the_composed_name() {
        let directory = directory();
        assert_eq!(
            identify("Yugoslavia (Former)", &directory),
            ResolutionOutcome::Unchanged
        );
        assert_eq!(
            identify("Former Yugoslavia", &directory),
            ResolutionOutcome::Unified("Yugoslavia (former)".into())
        );
        assert_eq!(
            identify("YUG", &directory),
            ResolutionOutcome::Unified("Yugoslavia".into())
        );
    }

    #[test]
    fn aliases_resolve_to_the_canonical_name() {
        let directory = directory();
        assert_eq!(
            identify("great britain", &directory),
            ResolutionOutcome::Unified("United Kingdom".into())
        );
        assert_eq!(
            identify("SFR YUGOSLAVIA", &directory),
            ResolutionOutcome::Unified("Yugoslavia (former)".into())
        );
    }

    #[test]
    fn earlier_records_win_ties() {
        let directory = ReferenceDirectory::new(vec![
            CountryRecord::new("Congo").with_alias("Congo Republic"),
            CountryRecord::new("Congo Republic"),
        ])
        .unwrap();
        assert_eq!(
            identify("Congo Republic", &directory),
            ResolutionOutcome::Unified("Congo".into())
        );
    }

    #[test]
    fn numbers_resolve_through_their_rendering() {
        let directory = directory();
        let resolver = CountryResolver::new(&directory);
        assert_eq!(
            resolver.resolve_cell(&CellValue::Number(826.0)),
            ResolutionOutcome::Unified("United Kingdom".into())
        );
        assert_eq!(
            resolver.resolve_cell(&CellValue::Missing),
            ResolutionOutcome::Invalid
        );
    }
}
