use serde::{Deserialize, Serialize};

/// Result of resolving one raw country cell against the reference directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", content = "value", rename_all = "snake_case")]
pub enum ResolutionOutcome {
    /// The cell must be rewritten to this canonical value.
    Unified(String),
    /// The cell is already canonical.
    Unchanged,
    /// No record matched; the row is dropped.
    Invalid,
}
