//! Building blocks shared by the CLI commands: loading inputs, summarizing
//! a validation run, and writing its outputs.

use std::collections::BTreeSet;
use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use serde::Serialize;
use serde_json::{Map, Value};
use tracing::{debug, warn};
use unify_core::ValidationReport;
use unify_ingest::{IngestOptions, collect_input_files, read_dataset_with_options, write_collated_csv};
use unify_map::HeaderTokenizer;
use unify_model::{
    CellValue, CollatedTable, DATASET_INDEX_COLUMN, Dataset, HeaderToken, TranslationTable,
};

use crate::config::OutputFormat;
use crate::logging::redact_value;

pub const REPORT_SCHEMA: &str = "unify.validation-report";
pub const REPORT_SCHEMA_VERSION: u32 = 1;

/// Loads every input file in command-line order.
pub fn load_datasets(inputs: &[PathBuf], options: &IngestOptions) -> Result<Vec<Dataset>> {
    let files = collect_input_files(inputs).context("collect input files")?;
    if files.is_empty() {
        bail!("no CSV files found in the given inputs");
    }
    files
        .iter()
        .map(|path| {
            read_dataset_with_options(path, options)
                .with_context(|| format!("load dataset: {}", path.display()))
        })
        .collect()
}

/// Per-input row accounting for one validation run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileSummary {
    pub index: usize,
    pub label: String,
    pub country_column: Option<String>,
    pub rows_in: usize,
    pub rows_out: usize,
    pub dropped: usize,
}

pub fn summarize_files(
    datasets: &[Dataset],
    resolved: &CollatedTable,
    report: &ValidationReport,
) -> Vec<FileSummary> {
    datasets
        .iter()
        .enumerate()
        .map(|(index, dataset)| FileSummary {
            index,
            label: dataset_label(dataset, index),
            country_column: resolved.country_column_for(index).map(str::to_string),
            rows_in: dataset.row_count(),
            rows_out: resolved.rows_from(index),
            dropped: report.dropped_from(index),
        })
        .collect()
}

pub fn dataset_label(dataset: &Dataset, index: usize) -> String {
    dataset
        .label
        .clone()
        .unwrap_or_else(|| format!("dataset {index}"))
}

/// Logs each dropped row with its file and line. Values are redacted unless
/// `--log-data` is set.
pub fn log_dropped_rows(datasets: &[Dataset], report: &ValidationReport) {
    for row in &report.dropped {
        let label = datasets
            .get(row.source_index)
            .map(|dataset| dataset_label(dataset, row.source_index))
            .unwrap_or_default();
        warn!(
            file = %label,
            row = row.row_index,
            value = redact_value(row.value.as_deref().unwrap_or("")),
            reason = row.reason.as_str(),
            suggestion = row.suggestion.as_ref().map(|s| s.name.as_str()),
            "row dropped"
        );
    }
}

/// Tokenizes each distinct header once, in first-seen order.
pub fn tokenize_headers(datasets: &[Dataset], translations: &TranslationTable) -> Vec<HeaderToken> {
    let tokenizer = HeaderTokenizer::new(translations);
    let mut seen = BTreeSet::new();
    tokenizer
        .tokenize_datasets(datasets)
        .into_iter()
        .filter(|token| seen.insert(token.raw_header.clone()))
        .collect()
}

/// JSON report written with `--report`.
#[derive(Debug, Serialize)]
pub struct RunReport<'a> {
    pub schema: &'static str,
    pub schema_version: u32,
    pub files: &'a [FileSummary],
    pub validation: &'a ValidationReport,
    pub headers: &'a [HeaderToken],
}

impl<'a> RunReport<'a> {
    pub fn new(
        files: &'a [FileSummary],
        validation: &'a ValidationReport,
        headers: &'a [HeaderToken],
    ) -> Self {
        Self {
            schema: REPORT_SCHEMA,
            schema_version: REPORT_SCHEMA_VERSION,
            files,
            validation,
            headers,
        }
    }

    pub fn write(&self, path: &Path) -> Result<()> {
        let file = File::create(path)
            .with_context(|| format!("create report: {}", path.display()))?;
        serde_json::to_writer_pretty(BufWriter::new(file), self)
            .with_context(|| format!("write report: {}", path.display()))?;
        debug!(path = %path.display(), "wrote validation report");
        Ok(())
    }
}

/// Writes the resolved table in the requested format.
pub fn write_table(table: &CollatedTable, path: &Path, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Csv => write_collated_csv(table, path)?,
        OutputFormat::Json => {
            let file = File::create(path)
                .with_context(|| format!("create output: {}", path.display()))?;
            serde_json::to_writer_pretty(BufWriter::new(file), &table_records(table))
                .with_context(|| format!("write output: {}", path.display()))?;
        }
    }
    debug!(path = %path.display(), rows = table.len(), "wrote resolved table");
    Ok(())
}

/// One JSON object per row, keyed by header, extras first.
///
/// `Dataset Index` is written as an integer.
pub fn table_records(table: &CollatedTable) -> Vec<Map<String, Value>> {
    let headers = table.headers();
    table
        .rows
        .iter()
        .map(|row| {
            headers
                .iter()
                .map(|header| {
                    let value = if *header == DATASET_INDEX_COLUMN {
                        Value::from(row.source_index)
                    } else {
                        cell_json(&table.value(row, header))
                    };
                    (header.to_string(), value)
                })
                .collect()
        })
        .collect()
}

fn cell_json(cell: &CellValue) -> Value {
    match cell {
        CellValue::Text(text) => Value::String(text.clone()),
        CellValue::Number(number) => serde_json::Number::from_f64(*number)
            .map_or(Value::Null, Value::Number),
        CellValue::Missing => Value::Null,
    }
}
