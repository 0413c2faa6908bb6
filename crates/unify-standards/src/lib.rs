#![deny(unsafe_code)]

pub mod countries;
pub mod doctor;
pub mod error;
pub mod hash;
pub mod manifest;
pub mod paths;
pub mod registry;
pub mod translations;

pub use crate::doctor::DoctorReport;
pub use crate::error::ReferenceLoadError;
pub use crate::paths::{REFERENCE_ENV_VAR, reference_root};
pub use crate::registry::{ReferenceRegistry, VerifySummary};
