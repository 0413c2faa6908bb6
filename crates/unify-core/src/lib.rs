#![deny(unsafe_code)]

pub mod collate;
pub mod error;
pub mod frame;
pub mod pipeline;
pub mod resolve;

pub use collate::{collate, extract_year, source_columns, validate_datasets};
pub use error::ValidationError;
pub use frame::collated_to_dataframe;
pub use pipeline::{ValidationPipeline, ValidationReport};
pub use resolve::{CountryResolver, DropReason, DroppedRow, ResolutionReport, identify};
