//! Utility functions for header and name matching.

/// Lower-cased, whitespace-split words of a header.
///
/// Punctuation is kept, so `"Country,"` does not yield `"country"`.
pub fn header_words(header: &str) -> impl Iterator<Item = String> + '_ {
    header.split_whitespace().map(str::to_lowercase)
}

/// Normalizes text for fuzzy comparison by lowercasing and replacing
/// separators with spaces.
pub fn normalize_text(raw: &str) -> String {
    raw.trim()
        .to_lowercase()
        .replace(['_', '-', '.', '/', '\\', ','], " ")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}
