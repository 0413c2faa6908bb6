use unify_map::{ClassifyError, ColumnRole};

/// Call-level validation failures. Unresolved countries are not errors; they
/// show up as dropped rows in the report.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("invalid input: {reason}")]
    InvalidInput { reason: String },

    #[error("no column header matches the {role} keywords")]
    NoMatchingColumn { role: ColumnRole },
}

impl ValidationError {
    pub(crate) fn invalid(reason: impl Into<String>) -> Self {
        Self::InvalidInput {
            reason: reason.into(),
        }
    }
}

impl From<ClassifyError> for ValidationError {
    fn from(error: ClassifyError) -> Self {
        match error {
            ClassifyError::NoMatchingColumn { role } => Self::NoMatchingColumn { role },
        }
    }
}
