#![deny(unsafe_code)]

use unify_model::DirectoryConflict;

use crate::manifest::{ManifestFile, Pins};
use crate::registry::{ReferenceRegistry, VerifySummary};

#[derive(Debug, Clone, serde::Serialize)]
pub struct DoctorReport {
    pub schema: String,
    pub schema_version: u32,
    pub pins: Pins,
    pub files: Vec<ManifestFile>,
    pub counts: DoctorCounts,
    pub conflicts: Vec<DirectoryConflict>,
}

#[derive(Debug, Clone, serde::Serialize)]
pub struct DoctorCounts {
    pub files: usize,
    pub countries: usize,
    pub historical: usize,
    pub aliases: usize,
    pub translations_us_gb: usize,
    pub translations_gb_us: usize,
}

impl DoctorReport {
    pub fn from_verify_summary(
        summary: &VerifySummary,
        files: Vec<ManifestFile>,
        conflicts: Vec<DirectoryConflict>,
    ) -> Self {
        Self {
            schema: "unify.reference-doctor".to_string(),
            schema_version: 1,
            pins: summary.manifest_pins.clone(),
            files,
            counts: DoctorCounts {
                files: summary.file_count,
                countries: summary.country_count,
                historical: summary.historical_count,
                aliases: summary.alias_count,
                translations_us_gb: summary.translation_count_us_gb,
                translations_gb_us: summary.translation_count_gb_us,
            },
            conflicts,
        }
    }

    pub fn from_registry(registry: &ReferenceRegistry, summary: &VerifySummary) -> Self {
        Self::from_verify_summary(
            summary,
            registry.files.clone(),
            registry.conflicts().to_vec(),
        )
    }
}
