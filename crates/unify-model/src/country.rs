//! Canonical country records.
//!
//! A record carries the display name that every equivalent representation is
//! unified to, the ISO 3166-1 codes, the UN M49 numeric code and two optional
//! extensions:
//!
//! - `preceding`: a historical qualifier producing the composite display form
//!   `"{name} ({preceding})"`
//! - `aliases`: alternate spellings, matched case-insensitively
//!
//! Legacy field names (`country`, `a2`, `a3`, `aka`) are accepted on input.

use serde::{Deserialize, Deserializer, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CountryRecord {
    /// Canonical display name.
    #[serde(alias = "country")]
    pub name: String,

    /// ISO 3166-1 alpha-2 code (e.g. "GB").
    #[serde(default, alias = "a2", skip_serializing_if = "Option::is_none")]
    pub alpha2: Option<String>,

    /// ISO 3166-1 alpha-3 code (e.g. "GBR").
    #[serde(default, alias = "a3", skip_serializing_if = "Option::is_none")]
    pub alpha3: Option<String>,

    /// UN M49 numeric code, kept as text so leading zeros survive ("004").
    #[serde(
        default,
        deserialize_with = "deserialize_m49",
        skip_serializing_if = "Option::is_none"
    )]
    pub m49: Option<String>,

    /// Historical qualifier (e.g. "former").
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preceding: Option<String>,

    /// Alternate spellings.
    #[serde(default, alias = "aka", skip_serializing_if = "Vec::is_empty")]
    pub aliases: Vec<String>,
}

impl CountryRecord {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            alpha2: None,
            alpha3: None,
            m49: None,
            preceding: None,
            aliases: Vec::new(),
        }
    }

    pub fn with_alpha2(mut self, code: impl Into<String>) -> Self {
        self.alpha2 = Some(code.into());
        self
    }

    pub fn with_alpha3(mut self, code: impl Into<String>) -> Self {
        self.alpha3 = Some(code.into());
        self
    }

    pub fn with_m49(mut self, code: impl Into<String>) -> Self {
        self.m49 = Some(code.into());
        self
    }

    pub fn with_preceding(mut self, qualifier: impl Into<String>) -> Self {
        self.preceding = Some(qualifier.into());
        self
    }

    pub fn with_alias(mut self, alias: impl Into<String>) -> Self {
        self.aliases.push(alias.into());
        self
    }

    /// `"{name} ({preceding})"` when the record has a qualifier.
    pub fn composed_name(&self) -> Option<String> {
        self.preceding
            .as_ref()
            .map(|preceding| format!("{} ({})", self.name, preceding))
    }

    /// `"{preceding} {name}"` when the record has a qualifier.
    pub fn prefixed_name(&self) -> Option<String> {
        self.preceding
            .as_ref()
            .map(|preceding| format!("{} {}", preceding, self.name))
    }

    /// The value rows are unified to: the composed form when a qualifier
    /// exists, the plain name otherwise.
    pub fn canonical_name(&self) -> String {
        self.composed_name().unwrap_or_else(|| self.name.clone())
    }

    /// Present codes in alpha2, alpha3, m49 order.
    pub fn codes(&self) -> impl Iterator<Item = &str> {
        [&self.alpha2, &self.alpha3, &self.m49]
            .into_iter()
            .filter_map(|code| code.as_deref())
    }

    /// True when `value` equals one of the codes exactly (case-sensitive).
    pub fn has_code(&self, value: &str) -> bool {
        self.codes().any(|code| code == value)
    }

    /// True when `value` matches an alias, ignoring case.
    pub fn has_alias(&self, value: &str) -> bool {
        let lowered = value.to_lowercase();
        self.aliases
            .iter()
            .any(|alias| alias.to_lowercase() == lowered)
    }

    /// Trims every field and turns blank optional fields into `None`.
    pub fn normalized(self) -> Self {
        fn clean(value: Option<String>) -> Option<String> {
            value
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        }

        Self {
            name: self.name.trim().to_string(),
            alpha2: clean(self.alpha2),
            alpha3: clean(self.alpha3),
            m49: clean(self.m49),
            preceding: clean(self.preceding),
            aliases: self
                .aliases
                .into_iter()
                .map(|alias| alias.trim().to_string())
                .filter(|alias| !alias.is_empty())
                .collect(),
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum M49Repr {
    Text(String),
    Number(u64),
}

/// Accepts the M49 code as a string or an integer; integers are zero-padded
/// to three digits.
fn deserialize_m49<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<M49Repr>::deserialize(deserializer)?;
    Ok(value.map(|repr| match repr {
        M49Repr::Text(text) => text,
        M49Repr::Number(number) => format!("{number:03}"),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn composed_forms_require_preceding() {
        let plain = CountryRecord::new("France");
        assert_eq!(plain.composed_name(), None);
        assert_eq!(plain.canonical_name(), "France");

        let former = CountryRecord::new("Yugoslavia").with_preceding("former");
        assert_eq!(former.composed_name().as_deref(), Some("Yugoslavia (former)"));
        assert_eq!(former.prefixed_name().as_deref(), Some("former Yugoslavia"));
        assert_eq!(former.canonical_name(), "Yugoslavia (former)");
    }

    #[test]
    fn codes_are_case_sensitive_and_aliases_are_not() {
        let record = CountryRecord::new("United Kingdom")
            .with_alpha2("GB")
            .with_alpha3("GBR")
            .with_m49("826")
            .with_alias("Great Britain");
        assert!(record.has_code("GB"));
        assert!(!record.has_code("gb"));
        assert!(record.has_code("826"));
        assert!(record.has_alias("great BRITAIN"));
        assert_eq!(record.codes().collect::<Vec<_>>(), vec!["GB", "GBR", "826"]);
    }

    #[test]
    fn normalized_drops_blank_fields() {
        let mut record = CountryRecord::new("  Chad ").with_alpha2(" ");
        record.aliases = vec!["".to_string(), " Tchad ".to_string()];
        let record = record.normalized();
        assert_eq!(record.name, "Chad");
        assert_eq!(record.alpha2, None);
        assert_eq!(record.aliases, vec!["Tchad"]);
    }
}
