#![deny(unsafe_code)]

pub mod classify;
pub mod error;
pub mod lexer;
pub mod score;
pub mod tokenize;
pub mod utils;

pub use classify::{
    COUNTRY_KEYWORDS, ColumnClassification, ColumnClassifier, YEAR_KEYWORDS, header_union,
};
pub use error::{ClassifyError, ColumnRole};
pub use score::{CountrySuggestion, DEFAULT_MIN_SIMILARITY, suggest_country};
pub use tokenize::HeaderTokenizer;
