//! CLI library components for the dataset unifier.

pub mod config;
pub mod logging;
pub mod pipeline;
