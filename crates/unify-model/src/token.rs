//! Header tokenization types.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ModelError;

/// Target spelling convention for header translation.
///
/// `Gb` rewrites US spellings to British ones (`us-gb` dictionary), `Us`
/// the reverse (`gb-us` dictionary).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SpellingLocale {
    #[default]
    Gb,
    Us,
}

impl SpellingLocale {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Gb => "gb",
            Self::Us => "us",
        }
    }
}

impl fmt::Display for SpellingLocale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SpellingLocale {
    type Err = ModelError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "gb" => Ok(Self::Gb),
            "us" => Ok(Self::Us),
            _ => Err(ModelError::InvalidSpellingLocale(value.to_string())),
        }
    }
}

/// Flat spelling dictionary for one translation direction.
///
/// Keys are stored lower-cased; lookups expect an already lower-cased word.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "BTreeMap<String, String>", into = "BTreeMap<String, String>")]
pub struct TranslationTable {
    entries: BTreeMap<String, String>,
}

impl TranslationTable {
    pub fn new<I, K, V>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        Self {
            entries: entries
                .into_iter()
                .map(|(key, value)| (key.as_ref().trim().to_lowercase(), value.into()))
                .filter(|(key, _)| !key.is_empty())
                .collect(),
        }
    }

    pub fn get(&self, word: &str) -> Option<&str> {
        self.entries.get(word).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl From<BTreeMap<String, String>> for TranslationTable {
    fn from(entries: BTreeMap<String, String>) -> Self {
        Self::new(entries)
    }
}

impl From<TranslationTable> for BTreeMap<String, String> {
    fn from(table: TranslationTable) -> Self {
        table.entries
    }
}

/// Semantic breakdown of one column header.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeaderToken {
    /// Header as supplied.
    pub raw_header: String,
    /// Header after spelling translation and number formatting.
    pub translated: String,
    /// Remaining words, in order.
    pub tokens: Vec<String>,
    /// Three-word phrases joined by "and" / "of".
    pub combos: Vec<String>,
    /// Content of the parenthesised clause, e.g. "current US$".
    pub unit: Option<String>,
    /// Qualifier after the last comma.
    pub context: Option<String>,
}
