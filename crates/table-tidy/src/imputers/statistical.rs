//! Statistical imputation methods.
//!
//! Numeric columns are filled with their median, text columns with their
//! mode, and text columns with nothing to take a mode from with a constant.

use crate::config::CleaningConfig;
use crate::types::{Column, Table};
use crate::utils::{first_occurrence_mode, median};
use tracing::debug;

/// Statistical imputation methods for filling missing values.
pub struct StatisticalImputer;

impl StatisticalImputer {
    /// Fill every missing cell in the table.
    ///
    /// Each column's statistic is computed once, before any of its cells are
    /// filled.
    pub fn impute(table: Table, config: &CleaningConfig) -> (Table, Vec<String>) {
        let mut processing_steps = Vec::new();
        let mut table = table;

        for column in table.columns_mut() {
            if column.missing_count() == 0 {
                continue;
            }

            if column.is_numeric() {
                Self::apply_numeric_median(column, &mut processing_steps);
            } else if column.text_values().next().is_some() {
                Self::apply_mode_imputation(column, &mut processing_steps);
            } else {
                Self::apply_constant_imputation(
                    column,
                    config.fallback_text_fill(),
                    &mut processing_steps,
                );
            }
        }

        (table, processing_steps)
    }

    /// Apply median imputation for a numeric column.
    ///
    /// A column with no values has no median and is left as-is.
    pub fn apply_numeric_median(column: &mut Column, processing_steps: &mut Vec<String>) {
        let Some(median_val) = median(&column.numeric_values()) else {
            debug!("No values to take a median from in '{}'", column.name());
            return;
        };

        let filled = column.fill_missing_numeric(median_val);
        if filled > 0 {
            processing_steps.push(format!(
                "Filled {} missing values in '{}' with median {:.2}",
                filled,
                column.name(),
                median_val
            ));
            debug!("Median imputed '{}' ({})", column.name(), median_val);
        }
    }

    /// Apply mode imputation for a text column. Ties go to the value seen first.
    pub fn apply_mode_imputation(column: &mut Column, processing_steps: &mut Vec<String>) {
        let Some(mode_val) = first_occurrence_mode(column.text_values()).map(str::to_string)
        else {
            return;
        };

        let filled = column.fill_missing_text(&mode_val);
        if filled > 0 {
            processing_steps.push(format!(
                "Filled {} missing values in '{}' with mode '{}'",
                filled,
                column.name(),
                mode_val
            ));
            debug!("Mode imputed '{}' ({})", column.name(), mode_val);
        }
    }

    /// Apply constant imputation.
    pub fn apply_constant_imputation(
        column: &mut Column,
        fill_value: &str,
        processing_steps: &mut Vec<String>,
    ) {
        let filled = column.fill_missing_text(fill_value);
        if filled > 0 {
            processing_steps.push(format!(
                "Filled {} missing values in '{}' with constant '{}'",
                filled,
                column.name(),
                fill_value
            ));
            debug!("Constant imputed '{}'", column.name());
        }
    }
}
