use std::path::PathBuf;

use unify_cli::pipeline::FileSummary;
use unify_core::ValidationReport;

#[derive(Debug)]
pub struct ValidateResult {
    pub reference_dir: PathBuf,
    pub files: Vec<FileSummary>,
    pub report: ValidationReport,
    pub output: Option<PathBuf>,
    pub report_path: Option<PathBuf>,
    /// Rendered head of the resolved table.
    pub preview: Option<String>,
    pub max_dropped: Option<usize>,
}

impl ValidateResult {
    pub fn exceeds_max_dropped(&self) -> bool {
        self.max_dropped
            .is_some_and(|limit| self.report.dropped_count() > limit)
    }
}
