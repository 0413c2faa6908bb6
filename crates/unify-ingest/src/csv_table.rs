//! CSV file reading into [`Dataset`]s.
//!
//! The first non-blank record is the header row. Cells are trimmed, blank
//! cells become [`CellValue::Missing`] and numeric text becomes
//! [`CellValue::Number`] only when the number renders back to the same text,
//! so codes such as `004` stay textual.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use csv::ReaderBuilder;
use tracing::{debug, warn};
use unify_model::{CellValue, Dataset, Row};

use crate::error::{IngestError, Result};

/// Maximum file size for CSV loading (500 MB default).
pub const MAX_CSV_FILE_SIZE: u64 = 500 * 1024 * 1024;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IngestOptions {
    pub delimiter: u8,
    pub max_file_size: u64,
}

impl Default for IngestOptions {
    fn default() -> Self {
        Self {
            delimiter: b',',
            max_file_size: MAX_CSV_FILE_SIZE,
        }
    }
}

fn normalize_header(raw: &str) -> String {
    let trimmed = raw.trim().trim_matches('\u{feff}');
    trimmed.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Converts one raw CSV field into a cell.
pub fn parse_cell(raw: &str) -> CellValue {
    let trimmed = raw.trim().trim_matches('\u{feff}');
    if trimmed.is_empty() {
        return CellValue::Missing;
    }
    match trimmed.parse::<f64>() {
        Ok(number) if number.is_finite() && number.to_string() == trimmed => {
            CellValue::Number(number)
        }
        _ => CellValue::text(trimmed),
    }
}

fn check_file_size(path: &Path, max_size: u64) -> Result<()> {
    let metadata = std::fs::metadata(path).map_err(|e| IngestError::open(path, e))?;
    if metadata.len() > max_size {
        return Err(IngestError::FileTooLarge {
            path: path.to_path_buf(),
            size: metadata.len(),
            max_size,
        });
    }
    Ok(())
}

/// Rejects UTF-16 input; a UTF-8 BOM is stripped from the header instead.
fn validate_encoding(path: &Path) -> Result<()> {
    let mut file = File::open(path).map_err(|e| IngestError::open(path, e))?;
    let mut buffer = [0u8; 2];
    let bytes_read = file.read(&mut buffer).map_err(|e| IngestError::FileRead {
        path: path.to_path_buf(),
        source: e,
    })?;
    if bytes_read == 2 {
        let encoding = match buffer {
            [0xFF, 0xFE] => Some("UTF-16 LE"),
            [0xFE, 0xFF] => Some("UTF-16 BE"),
            _ => None,
        };
        if let Some(encoding) = encoding {
            return Err(IngestError::UnsupportedEncoding {
                path: path.to_path_buf(),
                encoding,
            });
        }
    }
    Ok(())
}

pub fn read_dataset(path: &Path) -> Result<Dataset> {
    read_dataset_with_options(path, &IngestOptions::default())
}

pub fn read_dataset_with_options(path: &Path, options: &IngestOptions) -> Result<Dataset> {
    check_file_size(path, options.max_file_size)?;
    validate_encoding(path)?;

    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .delimiter(options.delimiter)
        .from_path(path)
        .map_err(|source| IngestError::CsvParse {
            path: path.to_path_buf(),
            source,
        })?;

    let mut columns: Option<Vec<String>> = None;
    let mut rows = Vec::new();
    let mut truncated = 0usize;

    for record in reader.records() {
        let record = record.map_err(|source| IngestError::CsvParse {
            path: path.to_path_buf(),
            source,
        })?;
        if record.iter().all(|value| value.trim().is_empty()) {
            continue;
        }
        let Some(headers) = &columns else {
            columns = Some(parse_headers(&record, path)?);
            continue;
        };
        if record.len() > headers.len() {
            truncated += 1;
        }
        let mut row = Row::new();
        for (idx, header) in headers.iter().enumerate() {
            let value = record.get(idx).map_or(CellValue::Missing, parse_cell);
            row.insert(header.as_str(), value);
        }
        rows.push(row);
    }

    let Some(columns) = columns else {
        return Err(IngestError::EmptyCsv {
            path: path.to_path_buf(),
        });
    };
    if truncated > 0 {
        warn!(
            path = %path.display(),
            rows = truncated,
            "ignoring fields beyond the header width"
        );
    }

    let mut dataset = Dataset::new(columns);
    dataset.rows = rows;
    if let Some(name) = path.file_name().and_then(|name| name.to_str()) {
        dataset = dataset.with_label(name);
    }
    debug!(
        path = %path.display(),
        columns = dataset.column_count(),
        rows = dataset.row_count(),
        "loaded dataset"
    );
    Ok(dataset)
}

fn parse_headers(record: &csv::StringRecord, path: &Path) -> Result<Vec<String>> {
    let headers: Vec<String> = record.iter().map(normalize_header).collect();
    if headers.iter().any(String::is_empty) {
        return Err(IngestError::EmptyColumnName {
            path: path.to_path_buf(),
        });
    }
    let probe = Dataset::new(headers);
    if let Some(column) = probe.duplicate_column() {
        return Err(IngestError::DuplicateColumn {
            column: column.to_string(),
            path: path.to_path_buf(),
        });
    }
    Ok(probe.columns)
}
