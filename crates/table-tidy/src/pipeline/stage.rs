//! Stages of the cleaning pipeline.

use serde::{Deserialize, Serialize};

/// Stages of the cleaning pipeline, in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CleaningStage {
    /// Trimming, lowercasing, and underscoring column names
    HeaderNormalization,
    /// Dropping all-missing rows, then all-missing columns
    Pruning,
    /// Trimming text cells and unifying missing sentinels
    Sanitizing,
    /// Converting mostly-numeric text columns to numeric
    TypeCoercion,
    /// Filling missing values
    Imputation,
    /// Removing repeated rows
    Deduplication,
    /// Clamping numeric columns to IQR bounds
    OutlierCapping,
}

impl CleaningStage {
    /// All stages in the order the pipeline runs them.
    pub const ALL: [CleaningStage; 7] = [
        Self::HeaderNormalization,
        Self::Pruning,
        Self::Sanitizing,
        Self::TypeCoercion,
        Self::Imputation,
        Self::Deduplication,
        Self::OutlierCapping,
    ];

    /// Returns a human-readable name for the stage.
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::HeaderNormalization => "Normalizing Headers",
            Self::Pruning => "Pruning Empty Rows/Columns",
            Self::Sanitizing => "Trimming Strings",
            Self::TypeCoercion => "Coercing Types",
            Self::Imputation => "Imputing Values",
            Self::Deduplication => "Removing Duplicates",
            Self::OutlierCapping => "Capping Outliers",
        }
    }

    /// 1-based position in the pipeline.
    pub fn step(&self) -> usize {
        match self {
            Self::HeaderNormalization => 1,
            Self::Pruning => 2,
            Self::Sanitizing => 3,
            Self::TypeCoercion => 4,
            Self::Imputation => 5,
            Self::Deduplication => 6,
            Self::OutlierCapping => 7,
        }
    }
}
