//! Validation pipeline: classify -> collate -> resolve.
//!
//! The pipeline holds the reference directory it was built with and no other
//! state, so one instance can serve concurrent validation calls.
//!
//! # Example
//!
//! ```ignore
//! let pipeline = ValidationPipeline::new(registry.directory());
//! let (table, report) = pipeline.validate(&datasets)?;
//! ```

use std::sync::Arc;
use std::time::{Duration, Instant};

use serde::Serialize;
use tracing::{info, info_span};
use unify_map::{ColumnClassification, ColumnClassifier, DEFAULT_MIN_SIMILARITY, header_union};
use unify_model::{CollatedTable, Dataset, ReferenceDirectory};

use crate::collate::{collate, validate_datasets};
use crate::error::ValidationError;
use crate::resolve::{CountryResolver, DroppedRow};

/// Summary of one validation call.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValidationReport {
    pub country_column: String,
    pub year_column: String,
    /// Rows in the collated table before resolution.
    pub rows_collated: usize,
    /// Rows kept after resolution.
    pub rows_resolved: usize,
    pub unified: usize,
    pub unchanged: usize,
    pub dropped: Vec<DroppedRow>,
    pub elapsed: Duration,
}

impl ValidationReport {
    pub fn dropped_count(&self) -> usize {
        self.dropped.len()
    }

    pub fn dropped_from(&self, source_index: usize) -> usize {
        self.dropped
            .iter()
            .filter(|row| row.source_index == source_index)
            .count()
    }
}

#[derive(Debug, Clone)]
pub struct ValidationPipeline {
    directory: Arc<ReferenceDirectory>,
    classifier: ColumnClassifier,
    min_similarity: f64,
}

impl ValidationPipeline {
    pub fn new(directory: Arc<ReferenceDirectory>) -> Self {
        Self {
            directory,
            classifier: ColumnClassifier::new(),
            min_similarity: DEFAULT_MIN_SIMILARITY,
        }
    }

    /// Threshold for drop-report suggestions.
    pub fn with_min_similarity(mut self, min_similarity: f64) -> Self {
        self.min_similarity = min_similarity;
        self
    }

    pub fn directory(&self) -> &ReferenceDirectory {
        &self.directory
    }

    /// Picks the country and year columns from the datasets' header union.
    pub fn classify(&self, datasets: &[Dataset]) -> Result<ColumnClassification, ValidationError> {
        validate_datasets(datasets)?;
        Ok(self.classifier.classify(&header_union(datasets))?)
    }

    /// Collates the datasets without resolving countries.
    pub fn collate(&self, datasets: &[Dataset]) -> Result<CollatedTable, ValidationError> {
        validate_datasets(datasets)?;
        let union = header_union(datasets);
        let classification = self.classifier.classify(&union)?;
        Ok(collate(datasets, union, &classification))
    }

    /// Runs the full pipeline and returns the resolved table.
    ///
    /// Structural problems and missing identifier columns abort the call;
    /// rows with unresolvable countries are dropped and listed in the report.
    pub fn validate(
        &self,
        datasets: &[Dataset],
    ) -> Result<(CollatedTable, ValidationReport), ValidationError> {
        let span = info_span!("validate", datasets = datasets.len());
        let _guard = span.enter();
        let start = Instant::now();

        let collated = self.collate(datasets)?;
        let resolver =
            CountryResolver::new(&self.directory).with_min_similarity(self.min_similarity);
        let (resolved, resolution) = resolver.resolve(&collated);

        let report = ValidationReport {
            country_column: collated.country_column.clone(),
            year_column: collated.year_column.clone(),
            rows_collated: collated.len(),
            rows_resolved: resolved.len(),
            unified: resolution.unified,
            unchanged: resolution.unchanged,
            dropped: resolution.dropped,
            elapsed: start.elapsed(),
        };

        info!(
            country_column = %report.country_column,
            year_column = %report.year_column,
            rows = report.rows_collated,
            kept = report.rows_resolved,
            dropped = report.dropped_count(),
            elapsed_ms = report.elapsed.as_millis() as u64,
            "validation finished"
        );

        Ok((resolved, report))
    }
}
