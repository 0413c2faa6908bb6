//! Loading input datasets from CSV files and writing collated tables back out.

pub mod csv_table;
pub mod discovery;
pub mod error;
pub mod writer;

pub use csv_table::{IngestOptions, MAX_CSV_FILE_SIZE, parse_cell, read_dataset, read_dataset_with_options};
pub use discovery::{collect_input_files, list_csv_files};
pub use error::{IngestError, Result};
pub use writer::{write_collated, write_collated_csv};
