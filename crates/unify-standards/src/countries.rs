//! Country list loader.
//!
//! The list is a JSON array of [`CountryRecord`]s. Record order is kept
//! because resolution treats directory order as the tie-break.

use std::path::Path;

use unify_model::{CountryRecord, ReferenceDirectory};

use crate::error::ReferenceLoadError;

pub fn load_country_records(path: &Path) -> Result<Vec<CountryRecord>, ReferenceLoadError> {
    let contents = std::fs::read_to_string(path).map_err(|e| ReferenceLoadError::io(path, e))?;
    parse_country_records(&contents, path)
}

pub fn parse_country_records(
    contents: &str,
    path: &Path,
) -> Result<Vec<CountryRecord>, ReferenceLoadError> {
    serde_json::from_str(contents).map_err(|e| ReferenceLoadError::json(path, e))
}

/// Loads and validates the country list into a [`ReferenceDirectory`].
pub fn load_directory(path: &Path) -> Result<ReferenceDirectory, ReferenceLoadError> {
    let records = load_country_records(path)?;
    ReferenceDirectory::new(records).map_err(|source| ReferenceLoadError::InvalidDirectory {
        path: path.to_path_buf(),
        source,
    })
}
