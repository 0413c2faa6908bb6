//! Collation of several datasets into one long-form table.

use std::sync::LazyLock;

use regex::Regex;
use unify_map::{ColumnClassification, ColumnClassifier, ColumnRole};
use unify_model::{CellValue, CollatedRow, CollatedTable, Dataset, EXTRAS_COLUMNS, SourceColumns};

use crate::error::ValidationError;

static YEAR_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[0-9]{4}").expect("valid year regex"));

/// First run of four ASCII digits in the cell's text rendering.
pub fn extract_year(cell: &CellValue) -> Option<String> {
    let text = cell.render()?;
    YEAR_PATTERN.find(&text).map(|m| m.as_str().to_string())
}

/// Structural checks run before anything else touches the datasets.
pub fn validate_datasets(datasets: &[Dataset]) -> Result<(), ValidationError> {
    if datasets.is_empty() {
        return Err(ValidationError::invalid("no datasets supplied"));
    }
    for (idx, dataset) in datasets.iter().enumerate() {
        if let Some(column) = dataset.duplicate_column() {
            return Err(ValidationError::invalid(format!(
                "dataset {idx} has duplicate column '{column}'"
            )));
        }
        if let Some(column) = dataset
            .columns
            .iter()
            .find(|c| EXTRAS_COLUMNS.contains(&c.as_str()))
        {
            return Err(ValidationError::invalid(format!(
                "dataset {idx} uses reserved column name '{column}'"
            )));
        }
    }
    Ok(())
}

/// Identifier columns of one dataset: the table-level column when the
/// dataset has it, else the dataset's own first keyword match.
pub fn source_columns(dataset: &Dataset, classification: &ColumnClassification) -> SourceColumns {
    let classifier = ColumnClassifier::new();
    let pick = |chosen: &str, role: ColumnRole| {
        if dataset.has_column(chosen) {
            Some(chosen.to_string())
        } else {
            classifier.find(dataset.columns.as_slice(), role).map(str::to_string)
        }
    };
    SourceColumns {
        country: pick(&classification.country, ColumnRole::Country),
        year: pick(&classification.year, ColumnRole::Year),
    }
}

/// Builds the collated table over `columns` (the header union).
///
/// Rows come out in (dataset index, row index) order. Cells are copied by
/// column name; columns a dataset lacks are [`CellValue::Missing`].
pub fn collate(
    datasets: &[Dataset],
    columns: Vec<String>,
    classification: &ColumnClassification,
) -> CollatedTable {
    let mut table = CollatedTable::new(
        classification.country.clone(),
        classification.year.clone(),
        columns,
    );
    table.sources = datasets
        .iter()
        .map(|dataset| source_columns(dataset, classification))
        .collect();

    for (source_index, dataset) in datasets.iter().enumerate() {
        let year_column = table.sources[source_index].year.clone();
        for (row_index, row) in dataset.rows.iter().enumerate() {
            let data_year = year_column
                .as_deref()
                .and_then(|column| extract_year(row.get(column)));
            let values = table
                .columns
                .iter()
                .map(|column| {
                    if dataset.has_column(column) {
                        row.get(column).clone()
                    } else {
                        CellValue::Missing
                    }
                })
                .collect();
            table.rows.push(CollatedRow {
                source_index,
                row_index,
                data_year,
                values,
            });
        }
    }

    table
}
