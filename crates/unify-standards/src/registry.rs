#![deny(unsafe_code)]

use std::collections::BTreeSet;
use std::path::{Component, Path, PathBuf};
use std::sync::Arc;

use tracing::{info, warn};
use unify_model::{DirectoryConflict, ReferenceDirectory, SpellingLocale, TranslationTable};

use crate::countries::load_directory;
use crate::error::ReferenceLoadError;
use crate::hash::sha256_hex;
use crate::manifest::{
    MANIFEST_SCHEMA, MANIFEST_SCHEMA_VERSION, Manifest, ManifestFile, Pins, ROLE_COUNTRIES,
    ROLE_TRANSLATIONS_GB_US, ROLE_TRANSLATIONS_US_GB,
};
use crate::translations::load_translation_table;

const REQUIRED_ROLES: &[&str] = &[
    ROLE_COUNTRIES,
    ROLE_TRANSLATIONS_US_GB,
    ROLE_TRANSLATIONS_GB_US,
];

const ALLOWED_KINDS: &[&str] = &["json", "toml", "other"];

#[derive(Debug, Clone, serde::Serialize)]
pub struct VerifySummary {
    pub reference_dir: PathBuf,
    pub manifest_pins: Pins,
    pub file_count: usize,
    pub country_count: usize,
    pub historical_count: usize,
    pub alias_count: usize,
    pub translation_count_us_gb: usize,
    pub translation_count_gb_us: usize,
    pub conflict_count: usize,
}

/// Verified reference data: the country directory and both spelling
/// dictionaries, loaded once and shared read-only afterwards.
#[derive(Debug, Clone)]
pub struct ReferenceRegistry {
    pub manifest: Manifest,
    pub files: Vec<ManifestFile>,
    pub directory: Arc<ReferenceDirectory>,
    pub us_gb: TranslationTable,
    pub gb_us: TranslationTable,
}

impl ReferenceRegistry {
    pub fn verify_and_load(
        reference_dir: &Path,
    ) -> Result<(Self, VerifySummary), ReferenceLoadError> {
        let manifest = load_manifest(&reference_dir.join("manifest.toml"))?;

        validate_manifest(&manifest)?;

        let mut files = manifest.files.clone();
        files.sort_by(|a, b| a.path.cmp(&b.path));

        for file in &files {
            verify_file(reference_dir, file)?;
        }

        let directory =
            load_directory(&resolve_role_path(reference_dir, &files, ROLE_COUNTRIES)?)?;
        let us_gb = load_translation_table(&resolve_role_path(
            reference_dir,
            &files,
            ROLE_TRANSLATIONS_US_GB,
        )?)?;
        let gb_us = load_translation_table(&resolve_role_path(
            reference_dir,
            &files,
            ROLE_TRANSLATIONS_GB_US,
        )?)?;

        for conflict in directory.conflicts() {
            warn!(
                key = %conflict.key,
                records = ?conflict.records,
                "reference key claimed by more than one country record"
            );
        }

        let summary = VerifySummary {
            reference_dir: reference_dir.to_path_buf(),
            manifest_pins: manifest.pins.clone(),
            file_count: files.len(),
            country_count: directory.len(),
            historical_count: directory
                .iter()
                .filter(|record| record.preceding.is_some())
                .count(),
            alias_count: directory.iter().map(|record| record.aliases.len()).sum(),
            translation_count_us_gb: us_gb.len(),
            translation_count_gb_us: gb_us.len(),
            conflict_count: directory.conflicts().len(),
        };

        info!(
            dir = %reference_dir.display(),
            countries = summary.country_count,
            conflicts = summary.conflict_count,
            "reference data loaded"
        );

        Ok((
            Self {
                manifest,
                files,
                directory: Arc::new(directory),
                us_gb,
                gb_us,
            },
            summary,
        ))
    }

    /// Shared handle to the country directory.
    pub fn directory(&self) -> Arc<ReferenceDirectory> {
        Arc::clone(&self.directory)
    }

    /// Dictionary that rewrites headers towards `locale`.
    pub fn translations(&self, locale: SpellingLocale) -> &TranslationTable {
        match locale {
            SpellingLocale::Gb => &self.us_gb,
            SpellingLocale::Us => &self.gb_us,
        }
    }

    pub fn conflicts(&self) -> &[DirectoryConflict] {
        self.directory.conflicts()
    }
}

fn load_manifest(path: &Path) -> Result<Manifest, ReferenceLoadError> {
    let contents = std::fs::read_to_string(path).map_err(|e| ReferenceLoadError::io(path, e))?;
    toml::from_str(&contents).map_err(|e| ReferenceLoadError::Toml {
        path: path.to_path_buf(),
        source: e,
    })
}

fn validate_manifest(manifest: &Manifest) -> Result<(), ReferenceLoadError> {
    if manifest.manifest.schema != MANIFEST_SCHEMA {
        return Err(ReferenceLoadError::InvalidManifest {
            message: format!("unsupported schema: {}", manifest.manifest.schema),
        });
    }
    if manifest.manifest.schema_version != MANIFEST_SCHEMA_VERSION {
        return Err(ReferenceLoadError::InvalidManifest {
            message: format!(
                "unsupported schema_version: {}",
                manifest.manifest.schema_version
            ),
        });
    }

    let mut roles: BTreeSet<&str> = BTreeSet::new();
    for file in &manifest.files {
        if !roles.insert(file.role.as_str()) {
            return Err(ReferenceLoadError::DuplicateRole {
                role: file.role.clone(),
            });
        }

        if !ALLOWED_KINDS.contains(&file.kind.as_str()) {
            return Err(ReferenceLoadError::InvalidManifest {
                message: format!("unsupported kind '{}' for {}", file.kind, file.path),
            });
        }

        validate_sha(&file.sha256, &file.path)?;
        validate_path(&file.path)?;
    }

    for role in REQUIRED_ROLES {
        if !roles.contains(role) {
            return Err(ReferenceLoadError::MissingRole {
                role: (*role).to_string(),
            });
        }
    }

    Ok(())
}

fn verify_file(reference_dir: &Path, file: &ManifestFile) -> Result<(), ReferenceLoadError> {
    let full_path = reference_dir.join(&file.path);
    let bytes = std::fs::read(&full_path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            ReferenceLoadError::MissingFile {
                path: full_path.clone(),
            }
        } else {
            ReferenceLoadError::io(full_path.clone(), e)
        }
    })?;

    let actual = sha256_hex(&bytes);
    let expected = file.sha256.to_ascii_lowercase();
    if actual != expected {
        return Err(ReferenceLoadError::Sha256Mismatch {
            path: full_path,
            expected,
            actual,
        });
    }
    Ok(())
}

fn resolve_role_path(
    reference_dir: &Path,
    files: &[ManifestFile],
    role: &str,
) -> Result<PathBuf, ReferenceLoadError> {
    let f = files
        .iter()
        .find(|f| f.role == role)
        .ok_or_else(|| ReferenceLoadError::MissingRole {
            role: role.to_string(),
        })?;
    Ok(reference_dir.join(&f.path))
}

fn validate_sha(sha: &str, path: &str) -> Result<(), ReferenceLoadError> {
    if sha.len() != 64 || !sha.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(ReferenceLoadError::InvalidSha256 {
            path: PathBuf::from(path),
            message: "sha256 must be 64 hex characters".to_string(),
        });
    }
    Ok(())
}

fn validate_path(path: &str) -> Result<(), ReferenceLoadError> {
    if path.contains('\\') {
        return Err(ReferenceLoadError::InvalidPath {
            path: PathBuf::from(path),
            message: "manifest path must use '/' separators".to_string(),
        });
    }

    let p = Path::new(path);
    if p.is_absolute() {
        return Err(ReferenceLoadError::InvalidPath {
            path: p.to_path_buf(),
            message: "manifest path must be relative".to_string(),
        });
    }

    if p.components().any(|c| matches!(c, Component::ParentDir)) {
        return Err(ReferenceLoadError::InvalidPath {
            path: p.to_path_buf(),
            message: "manifest path must not traverse out of reference/".to_string(),
        });
    }

    Ok(())
}
