#![deny(unsafe_code)]

use serde::{Deserialize, Serialize};

/// Schema identifier expected in `[manifest] schema`.
pub const MANIFEST_SCHEMA: &str = "unify.reference-manifest";

/// Supported `[manifest] schema_version`.
pub const MANIFEST_SCHEMA_VERSION: u32 = 1;

/// Role of the canonical country list.
pub const ROLE_COUNTRIES: &str = "countries";
/// Role of the US -> GB spelling dictionary.
pub const ROLE_TRANSLATIONS_US_GB: &str = "translations_us_gb";
/// Role of the GB -> US spelling dictionary.
pub const ROLE_TRANSLATIONS_GB_US: &str = "translations_gb_us";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Manifest {
    pub manifest: ManifestHeader,
    #[serde(default)]
    pub notes: Option<ManifestNotes>,
    pub pins: Pins,
    pub files: Vec<ManifestFile>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ManifestHeader {
    pub schema: String,
    pub schema_version: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ManifestNotes {
    pub summary: Option<String>,
}

/// Versions of the bundled reference sources.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pins {
    pub countries: String,
    pub translations: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ManifestFile {
    pub path: String,
    pub sha256: String,
    pub kind: String,
    pub role: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}
