//! Long-form table produced by collating several datasets.
//!
//! The collated table carries two leading extras columns ahead of the union
//! of all input headers:
//!
//! - [`DATASET_INDEX_COLUMN`]: position of the originating dataset in the input list
//! - [`DATA_YEAR_COLUMN`]: four-digit year extracted from the year column
//!
//! Rows keep the order (dataset index, original row index). Later stages may
//! drop rows but never reorder them.
//!
//! The table-level country and year columns come from the header union. A
//! dataset that lacks one of them carries its own identifier column, recorded
//! per source in [`SourceColumns`].

use serde::{Deserialize, Serialize};

use crate::table::{CellValue, MISSING};

/// Header of the source-index extras column.
pub const DATASET_INDEX_COLUMN: &str = "Dataset Index";

/// Header of the extracted-year extras column.
pub const DATA_YEAR_COLUMN: &str = "Data Year";

/// Headers reserved for the extras columns, in output order.
pub const EXTRAS_COLUMNS: [&str; 2] = [DATASET_INDEX_COLUMN, DATA_YEAR_COLUMN];

/// One row of the collated table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CollatedRow {
    /// Index of the originating dataset (0-based, input list order).
    pub source_index: usize,
    /// Index of the row within its originating dataset.
    pub row_index: usize,
    /// First four-digit run found in the year cell.
    pub data_year: Option<String>,
    /// One value per data column, aligned with [`CollatedTable::columns`].
    pub values: Vec<CellValue>,
}

impl CollatedRow {
    /// Value of data column `index`; [`CellValue::Missing`] when out of range.
    pub fn cell(&self, index: usize) -> &CellValue {
        self.values.get(index).unwrap_or(&MISSING)
    }
}

/// Identifier columns of one source dataset.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceColumns {
    pub country: Option<String>,
    pub year: Option<String>,
}

/// The merged table handed to country resolution and downstream consumers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CollatedTable {
    /// Header chosen as the country identifier.
    pub country_column: String,
    /// Header chosen as the year identifier.
    pub year_column: String,
    /// Union of input headers (widest dataset first), excluding extras.
    pub columns: Vec<String>,
    /// Identifier columns per source dataset, indexed by source index.
    /// Sources without an entry use the table-level columns.
    #[serde(default)]
    pub sources: Vec<SourceColumns>,
    pub rows: Vec<CollatedRow>,
}

impl CollatedTable {
    pub fn new(country_column: String, year_column: String, columns: Vec<String>) -> Self {
        Self {
            country_column,
            year_column,
            columns,
            sources: Vec::new(),
            rows: Vec::new(),
        }
    }

    /// Same columns and sources, no rows.
    pub fn empty_like(&self) -> Self {
        Self {
            country_column: self.country_column.clone(),
            year_column: self.year_column.clone(),
            columns: self.columns.clone(),
            sources: self.sources.clone(),
            rows: Vec::new(),
        }
    }

    /// All headers in output order: extras first, then data columns.
    pub fn headers(&self) -> Vec<&str> {
        EXTRAS_COLUMNS
            .iter()
            .copied()
            .chain(self.columns.iter().map(String::as_str))
            .collect()
    }

    /// Position of a data column within [`CollatedRow::values`].
    pub fn column_index(&self, column: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == column)
    }

    pub fn country_index(&self) -> Option<usize> {
        self.column_index(&self.country_column)
    }

    /// Country column used by rows of `source_index`; `None` when that
    /// dataset has no country column at all.
    pub fn country_column_for(&self, source_index: usize) -> Option<&str> {
        match self.sources.get(source_index) {
            Some(source) => source.country.as_deref(),
            None => Some(self.country_column.as_str()),
        }
    }

    pub fn country_index_for(&self, source_index: usize) -> Option<usize> {
        self.country_column_for(source_index)
            .and_then(|column| self.column_index(column))
    }

    /// The country cell of `row`.
    pub fn country_cell<'r>(&self, row: &'r CollatedRow) -> &'r CellValue {
        match self.country_index_for(row.source_index) {
            Some(idx) => row.cell(idx),
            None => &MISSING,
        }
    }

    /// Value of `column` in `row`; extras columns are rendered on demand.
    ///
    /// `Dataset Index` comes back as a number. Writers that need the exact
    /// integer read [`CollatedRow::source_index`].
    pub fn value(&self, row: &CollatedRow, column: &str) -> CellValue {
        match column {
            DATASET_INDEX_COLUMN => CellValue::Number(row.source_index as f64),
            DATA_YEAR_COLUMN => row.data_year.clone().into(),
            _ => self
                .column_index(column)
                .map_or(CellValue::Missing, |idx| row.cell(idx).clone()),
        }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Number of rows that originated from dataset `source_index`.
    pub fn rows_from(&self, source_index: usize) -> usize {
        self.rows
            .iter()
            .filter(|row| row.source_index == source_index)
            .count()
    }
}
