//! Export of a collated table to a polars [`DataFrame`] for downstream
//! statistics.

use polars::prelude::{Column, DataFrame, NamedFrom, PolarsResult, Series};
use unify_model::{CellValue, CollatedTable, DATA_YEAR_COLUMN, DATASET_INDEX_COLUMN};

/// One column per header, extras first.
///
/// `Dataset Index` is `u32`, `Data Year` a string column. A data column whose
/// present cells are all numbers becomes `f64`; anything else is a string
/// column. Missing cells are nulls.
pub fn collated_to_dataframe(table: &CollatedTable) -> PolarsResult<DataFrame> {
    let mut columns: Vec<Column> = Vec::with_capacity(table.columns.len() + 2);

    let indices: Vec<u32> = table
        .rows
        .iter()
        .map(|row| row.source_index as u32)
        .collect();
    columns.push(Series::new(DATASET_INDEX_COLUMN.into(), indices).into());

    let years: Vec<Option<String>> = table.rows.iter().map(|row| row.data_year.clone()).collect();
    columns.push(Series::new(DATA_YEAR_COLUMN.into(), years).into());

    for (idx, name) in table.columns.iter().enumerate() {
        let cells: Vec<&CellValue> = table
            .rows
            .iter()
            .map(|row| row.cell(idx))
            .collect();
        columns.push(build_column(name, &cells));
    }

    DataFrame::new(columns)
}

fn build_column(name: &str, cells: &[&CellValue]) -> Column {
    let present = cells.iter().filter(|cell| !cell.is_missing());
    let numeric = present.clone().count() > 0
        && present.clone().all(|cell| matches!(cell, CellValue::Number(_)));

    if numeric {
        let values: Vec<Option<f64>> = cells.iter().map(|cell| cell.as_number()).collect();
        Series::new(name.into(), values).into()
    } else {
        let values: Vec<Option<String>> = cells.iter().map(|cell| cell.render()).collect();
        Series::new(name.into(), values).into()
    }
}
