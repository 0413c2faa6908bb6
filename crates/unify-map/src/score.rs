//! Fuzzy nearest-name suggestions for unresolved country values.
//!
//! Uses Jaro-Winkler similarity on normalized text. Suggestions are purely
//! informational: they feed the drop report and never change resolution.

use std::cmp::Ordering;

use rapidfuzz::distance::jaro_winkler;
use serde::Serialize;
use unify_model::{CountryRecord, ReferenceDirectory};

use crate::utils::normalize_text;

/// Similarity a candidate must exceed to be suggested.
pub const DEFAULT_MIN_SIMILARITY: f64 = 0.85;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CountrySuggestion {
    /// Canonical form of the closest record.
    pub name: String,
    /// Jaro-Winkler similarity (0.0 to 1.0).
    pub score: f64,
}

/// Closest record to `value`, compared against each record's name, composed
/// form and aliases.
///
/// Returns `None` when nothing scores above `min_similarity`. Ties keep the
/// earlier record in directory order.
pub fn suggest_country(
    value: &str,
    directory: &ReferenceDirectory,
    min_similarity: f64,
) -> Option<CountrySuggestion> {
    let needle = normalize_text(value);
    if needle.is_empty() {
        return None;
    }

    let mut best: Option<CountrySuggestion> = None;
    for record in directory {
        let score = record_similarity(&needle, record);
        if score <= min_similarity {
            continue;
        }
        let better = best
            .as_ref()
            .is_none_or(|b| score.partial_cmp(&b.score) == Some(Ordering::Greater));
        if better {
            best = Some(CountrySuggestion {
                name: record.canonical_name(),
                score,
            });
        }
    }
    best
}

fn record_similarity(needle: &str, record: &CountryRecord) -> f64 {
    std::iter::once(record.name.clone())
        .chain(record.composed_name())
        .chain(record.aliases.iter().cloned())
        .map(|candidate| {
            jaro_winkler::similarity(needle.chars(), normalize_text(&candidate).chars())
        })
        .fold(0.0, f64::max)
}
