#![deny(unsafe_code)]

use std::collections::BTreeMap;
use std::path::Path;

use unify_model::TranslationTable;

use crate::error::ReferenceLoadError;

/// Reads a flat `{"word": "replacement"}` JSON dictionary.
pub fn load_translation_table(path: &Path) -> Result<TranslationTable, ReferenceLoadError> {
    let contents = std::fs::read_to_string(path).map_err(|e| ReferenceLoadError::io(path, e))?;
    let entries: BTreeMap<String, String> =
        serde_json::from_str(&contents).map_err(|e| ReferenceLoadError::json(path, e))?;
    Ok(TranslationTable::from(entries))
}
