//! Pipeline module.
//!
//! This module provides the cleaning pipeline, its stage list, and the
//! outlier capping stage that closes it.

pub mod outliers;
mod runner;
mod stage;

pub use outliers::{IqrBounds, OutlierHandler};
pub use runner::{Pipeline, clean};
pub use stage::CleaningStage;
