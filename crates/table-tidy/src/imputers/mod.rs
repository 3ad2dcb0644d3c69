//! Missing value imputation.
//!
//! This module provides the statistical imputer used by the pipeline:
//! median for numeric columns, mode for text columns, and a constant for text
//! columns that have no observed values.

mod statistical;

pub use statistical::StatisticalImputer;
