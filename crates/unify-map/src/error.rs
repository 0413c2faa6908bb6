//! Error types for column classification.

use std::fmt;

use serde::{Deserialize, Serialize};

/// The two identifier columns every validation run needs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnRole {
    Country,
    Year,
}

impl ColumnRole {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Country => "country",
            Self::Year => "year",
        }
    }
}

impl fmt::Display for ColumnRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ClassifyError {
    /// No header contains one of the role's keywords.
    #[error("no column header matches the {role} keywords")]
    NoMatchingColumn { role: ColumnRole },
}
