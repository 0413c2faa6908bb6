use thiserror::Error;

#[derive(Debug, Error)]
pub enum ModelError {
    #[error("country record has an empty name")]
    EmptyCountryName,
    #[error("duplicate country name in reference directory: {0}")]
    DuplicateCountryName(String),
    #[error("duplicate country code '{code}' shared by '{first}' and '{second}'")]
    DuplicateCountryCode {
        code: String,
        first: String,
        second: String,
    },
    #[error("unsupported spelling locale '{0}' (expected 'gb' or 'us')")]
    InvalidSpellingLocale(String),
}

pub type Result<T> = std::result::Result<T, ModelError>;
