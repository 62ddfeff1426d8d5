//! Domain models for the inpatient registry.

mod options;
mod patient;
mod sort;

pub use options::*;
pub use patient::*;
pub use sort::*;
