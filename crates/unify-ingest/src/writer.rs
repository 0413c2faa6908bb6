//! Writes collated tables as CSV, extras columns first.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use csv::WriterBuilder;
use unify_model::CollatedTable;

use crate::error::{IngestError, Result};

/// Writes `table` to `path`, replacing any existing file.
pub fn write_collated_csv(table: &CollatedTable, path: &Path) -> Result<()> {
    let file = File::create(path).map_err(|e| IngestError::FileRead {
        path: path.to_path_buf(),
        source: e,
    })?;
    write_collated(table, file).map_err(|source| IngestError::CsvWrite {
        path: path.to_path_buf(),
        source,
    })
}

/// Writes `table` to any writer. Missing cells are written as empty fields.
pub fn write_collated<W: Write>(table: &CollatedTable, writer: W) -> csv::Result<()> {
    let mut writer = WriterBuilder::new().from_writer(writer);
    let headers = table.headers();
    writer.write_record(&headers)?;
    for row in &table.rows {
        let record: Vec<String> = headers
            .iter()
            .map(|header| table.value(row, header).to_string())
            .collect();
        writer.write_record(&record)?;
    }
    writer.flush()?;
    Ok(())
}
