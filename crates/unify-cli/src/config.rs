//! `unify.toml` configuration.
//!
//! ```toml
//! [reference]
//! dir = "reference"
//!
//! [validation]
//! spelling = "us"
//! max_dropped = 10
//! min_similarity = 0.9
//!
//! [input]
//! delimiter = ";"
//!
//! [output]
//! format = "json"
//! ```
//!
//! Every key is optional. Command-line flags take precedence over the file.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};
use unify_model::SpellingLocale;
use unify_standards::reference_root;

pub const CONFIG_FILENAME: &str = "unify.toml";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct UnifyConfig {
    pub reference: ReferenceSettings,
    pub validation: ValidationSettings,
    pub input: InputSettings,
    pub output: OutputSettings,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ReferenceSettings {
    pub dir: Option<PathBuf>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ValidationSettings {
    pub spelling: SpellingLocale,
    /// Fail the run when more rows than this are dropped.
    pub max_dropped: Option<usize>,
    pub min_similarity: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct InputSettings {
    /// Field delimiter; a single ASCII character.
    pub delimiter: char,
}

impl Default for InputSettings {
    fn default() -> Self {
        Self { delimiter: ',' }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct OutputSettings {
    /// Format of the resolved table written with `--output`.
    pub format: OutputFormat,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Csv,
    Json,
}

impl UnifyConfig {
    /// Loads an explicitly requested file, or `./unify.toml` when present.
    ///
    /// An explicit path must exist; the implicit one falls back to defaults.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        match explicit {
            Some(path) => Self::from_file(path),
            None => {
                let path = Path::new(CONFIG_FILENAME);
                if path.is_file() {
                    Self::from_file(path)
                } else {
                    tracing::debug!("no {CONFIG_FILENAME} found, using defaults");
                    Ok(Self::default())
                }
            }
        }
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("read config: {}", path.display()))?;
        let config = Self::parse(&content)
            .with_context(|| format!("parse config: {}", path.display()))?;
        tracing::info!(path = %path.display(), "loaded configuration");
        Ok(config)
    }

    pub fn parse(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content)?;
        config.check()?;
        Ok(config)
    }

    /// Reference directory: the flag, then the config file, then
    /// `UNIFY_REFERENCE_DIR`, then the bundled `reference/` folder.
    pub fn reference_dir(&self, flag: Option<&Path>) -> PathBuf {
        flag.map(Path::to_path_buf)
            .or_else(|| self.reference.dir.clone())
            .unwrap_or_else(reference_root)
    }

    fn check(&self) -> Result<()> {
        if let Some(threshold) = self.validation.min_similarity
            && !(0.0..=1.0).contains(&threshold)
        {
            bail!("validation.min_similarity must be between 0 and 1, got {threshold}");
        }
        delimiter_byte(self.input.delimiter)?;
        Ok(())
    }
}

/// Converts a delimiter character to the byte the CSV reader expects.
pub fn delimiter_byte(delimiter: char) -> Result<u8> {
    if delimiter.is_ascii() && delimiter != '"' && delimiter != '\n' {
        Ok(delimiter as u8)
    } else {
        bail!("unsupported CSV delimiter {delimiter:?}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_gives_defaults() {
        let config = UnifyConfig::parse("").unwrap();
        assert_eq!(config, UnifyConfig::default());
        assert_eq!(config.validation.spelling, SpellingLocale::Gb);
        assert_eq!(config.output.format, OutputFormat::Csv);
        assert_eq!(config.input.delimiter, ',');
    }

    #[test]
    fn parses_every_section() {
        let config = UnifyConfig::parse(
            r#"
            [reference]
            dir = "data/reference"

            [validation]
            spelling = "us"
            max_dropped = 3
            min_similarity = 0.9

            [input]
            delimiter = ";"

            [output]
            format = "json"
            "#,
        )
        .unwrap();
        assert_eq!(config.reference.dir, Some(PathBuf::from("data/reference")));
        assert_eq!(config.validation.spelling, SpellingLocale::Us);
        assert_eq!(config.validation.max_dropped, Some(3));
        assert_eq!(config.validation.min_similarity, Some(0.9));
        assert_eq!(config.output.format, OutputFormat::Json);
        assert_eq!(delimiter_byte(config.input.delimiter).unwrap(), b';');
    }

    #[test]
    fn rejects_unknown_locales_and_keys() {
        assert!(UnifyConfig::parse("[validation]\nspelling = \"fr\"\n").is_err());
        assert!(UnifyConfig::parse("[validation]\nlang = \"gb\"\n").is_err());
        assert!(UnifyConfig::parse("[validation]\nmin_similarity = 1.5\n").is_err());
    }

    #[test]
    fn reference_dir_precedence() {
        let mut config = UnifyConfig::default();
        assert_eq!(config.reference_dir(None), reference_root());
        config.reference.dir = Some(PathBuf::from("from-config"));
        assert_eq!(config.reference_dir(None), PathBuf::from("from-config"));
        assert_eq!(
            config.reference_dir(Some(Path::new("from-flag"))),
            PathBuf::from("from-flag")
        );
    }

    #[test]
    fn explicit_missing_file_is_an_error() {
        let err = UnifyConfig::load(Some(Path::new("/nonexistent/unify.toml"))).unwrap_err();
        assert!(err.to_string().contains("read config"));
    }
}
