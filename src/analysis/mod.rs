//! Aggregation and console reporting over parsed trace data.

pub mod density;
pub mod report;

pub use density::{LocationCounts, LocationKey};
pub use report::write_density_report;
