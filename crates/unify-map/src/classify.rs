//! Keyword-based selection of the country and year columns.
//!
//! Headers are scanned in header-union order and the first header whose
//! lower-cased words intersect the role's keyword set wins. The union order
//! is fixed by [`header_union`], so classification is deterministic for a
//! given list of datasets.

use serde::Serialize;
use tracing::debug;
use unify_model::Dataset;

use crate::error::{ClassifyError, ColumnRole};
use crate::utils::header_words;

pub const COUNTRY_KEYWORDS: &[&str] = &["country", "alpha", "iso", "m49", "name"];
pub const YEAR_KEYWORDS: &[&str] = &["year", "time", "yr"];

impl ColumnRole {
    pub fn keywords(self) -> &'static [&'static str] {
        match self {
            Self::Country => COUNTRY_KEYWORDS,
            Self::Year => YEAR_KEYWORDS,
        }
    }
}

/// The chosen identifier columns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ColumnClassification {
    pub country: String,
    pub year: String,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ColumnClassifier;

impl ColumnClassifier {
    pub fn new() -> Self {
        Self
    }

    /// First header matching `role`, in the given order.
    pub fn find<'a, S: AsRef<str>>(&self, headers: &'a [S], role: ColumnRole) -> Option<&'a str> {
        let keywords = role.keywords();
        headers
            .iter()
            .map(AsRef::<str>::as_ref)
            .find(|header| header_words(header).any(|word| keywords.contains(&word.as_str())))
    }

    pub fn classify<S: AsRef<str>>(
        &self,
        headers: &[S],
    ) -> Result<ColumnClassification, ClassifyError> {
        let country = self.require(headers, ColumnRole::Country)?;
        let year = self.require(headers, ColumnRole::Year)?;
        debug!(%country, %year, "classified identifier columns");
        Ok(ColumnClassification {
            country: country.to_string(),
            year: year.to_string(),
        })
    }

    fn require<'a, S: AsRef<str>>(
        &self,
        headers: &'a [S],
        role: ColumnRole,
    ) -> Result<&'a str, ClassifyError> {
        self.find(headers, role)
            .ok_or(ClassifyError::NoMatchingColumn { role })
    }
}

/// Union of all dataset headers.
///
/// The widest dataset (first one with the strictly largest column count)
/// contributes its headers first, in their original order; headers of the
/// other datasets follow in input order when not already present.
pub fn header_union(datasets: &[Dataset]) -> Vec<String> {
    let mut widest: Option<&Dataset> = None;
    for dataset in datasets {
        if widest.is_none_or(|w| dataset.column_count() > w.column_count()) {
            widest = Some(dataset);
        }
    }

    let mut union: Vec<String> = widest.map(|d| d.columns.clone()).unwrap_or_default();
    for dataset in datasets {
        for column in &dataset.columns {
            if !union.contains(column) {
                union.push(column.clone());
            }
        }
    }
    union
}
