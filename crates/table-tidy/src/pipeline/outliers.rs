//! Outlier handling module.
//!
//! Clamps numeric columns to IQR fences computed from the column itself.

use crate::config::CleaningConfig;
use crate::types::{Column, Table};
use crate::utils::{quantile_sorted, sorted_values};
use tracing::debug;

/// Lower and upper clamp bounds for one column.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IqrBounds {
    pub q1: f64,
    pub q3: f64,
    pub lower: f64,
    pub upper: f64,
}

impl IqrBounds {
    /// Compute bounds from a column's values, or `None` when it has none.
    pub fn from_values(values: &[f64], multiplier: f64) -> Option<Self> {
        let sorted = sorted_values(values);
        let q1 = quantile_sorted(&sorted, 0.25)?;
        let q3 = quantile_sorted(&sorted, 0.75)?;
        let iqr = q3 - q1;

        Some(Self {
            q1,
            q3,
            lower: q1 - multiplier * iqr,
            upper: q3 + multiplier * iqr,
        })
    }

    pub fn iqr(&self) -> f64 {
        self.q3 - self.q1
    }
}

/// Handles outlier detection and treatment.
pub struct OutlierHandler;

impl OutlierHandler {
    /// Clamp every numeric column into `[Q1 - k*IQR, Q3 + k*IQR]`.
    ///
    /// A zero IQR clamps the column to its constant.
    pub fn cap_outliers(table: Table, config: &CleaningConfig) -> (Table, Vec<String>) {
        let mut processing_steps = Vec::new();
        let mut table = table;
        let mut outliers_capped = 0;

        for column in table.columns_mut().iter_mut().filter(|c| c.is_numeric()) {
            outliers_capped +=
                Self::cap_column(column, config.outlier_iqr_multiplier(), &mut processing_steps);
        }

        debug!("Capped {} outliers at IQR bounds", outliers_capped);
        (table, processing_steps)
    }

    fn cap_column(
        column: &mut Column,
        multiplier: f64,
        processing_steps: &mut Vec<String>,
    ) -> usize {
        let Some(bounds) = IqrBounds::from_values(&column.numeric_values(), multiplier) else {
            return 0;
        };

        let capped = column.clamp_numeric(bounds.lower, bounds.upper);
        if capped > 0 {
            processing_steps.push(format!(
                "Capped {} values in '{}' to [{:.2}, {:.2}]",
                capped,
                column.name(),
                bounds.lower,
                bounds.upper
            ));
            debug!(
                "'{}': Q1={}, Q3={}, IQR={}, capped {}",
                column.name(),
                bounds.q1,
                bounds.q3,
                bounds.iqr(),
                capped
            );
        }
        capped
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Cell;

    fn cap(column: Column) -> (Column, Vec<String>) {
        let table = Table::new(vec![column]).unwrap();
        let (table, steps) = OutlierHandler::cap_outliers(table, &CleaningConfig::default());
        (table.into_columns().remove(0), steps)
    }

    // ==================== IqrBounds tests ====================

    #[test]
    fn test_bounds_reference_scenario() {
        let bounds = IqrBounds::from_values(&[1.0, 2.0, 3.0, 4.0, 100.0], 1.5).unwrap();
        assert_eq!(bounds.q1, 2.0);
        assert_eq!(bounds.q3, 4.0);
        assert_eq!(bounds.iqr(), 2.0);
        assert_eq!(bounds.lower, -1.0);
        assert_eq!(bounds.upper, 7.0);
    }

    #[test]
    fn test_bounds_unsorted_input() {
        let bounds = IqrBounds::from_values(&[100.0, 3.0, 1.0, 4.0, 2.0], 1.5).unwrap();
        assert_eq!(bounds.lower, -1.0);
        assert_eq!(bounds.upper, 7.0);
    }

    #[test]
    fn test_bounds_empty() {
        assert!(IqrBounds::from_values(&[], 1.5).is_none());
    }

    // ==================== cap_outliers tests ====================

    #[test]
    fn test_cap_outliers_reference_scenario() {
        let (col, steps) = cap(Column::numeric(
            "value",
            vec![Some(1.0), Some(2.0), Some(3.0), Some(4.0), Some(100.0)],
        ));
        assert_eq!(col.numeric_values(), vec![1.0, 2.0, 3.0, 4.0, 7.0]);
        assert_eq!(steps.len(), 1);
        assert!(steps[0].contains("[-1.00, 7.00]"));
    }

    #[test]
    fn test_cap_outliers_low_side() {
        let (col, _) = cap(Column::numeric(
            "value",
            vec![Some(-100.0), Some(2.0), Some(3.0), Some(4.0), Some(5.0)],
        ));
        // Q1=2, Q3=4, lower=-1
        assert_eq!(col.cells()[0], Cell::Numeric(-1.0));
    }

    #[test]
    fn test_cap_outliers_zero_iqr_clamps_to_constant() {
        let (col, _) = cap(Column::numeric(
            "value",
            vec![Some(5.0), Some(5.0), Some(5.0), Some(5.0), Some(9.0)],
        ));
        assert_eq!(col.numeric_values(), vec![5.0; 5]);
    }

    #[test]
    fn test_cap_outliers_no_outliers() {
        let (col, steps) = cap(Column::numeric("value", vec![Some(1.0), Some(2.0), Some(3.0)]));
        assert_eq!(col.numeric_values(), vec![1.0, 2.0, 3.0]);
        assert!(steps.is_empty());
    }

    #[test]
    fn test_cap_outliers_ignores_text() {
        let (col, steps) = cap(Column::text("name", vec![Some("a"), Some("zzz")]));
        assert!(col.is_text());
        assert!(steps.is_empty());
    }

    #[test]
    fn test_cap_outliers_idempotent() {
        let (once, _) = cap(Column::numeric(
            "value",
            vec![Some(1.0), Some(2.0), Some(3.0), Some(4.0), Some(100.0)],
        ));
        let (twice, steps) = cap(once.clone());
        assert_eq!(twice, once);
        assert!(steps.is_empty());
    }

    #[test]
    fn test_cap_outliers_empty_column() {
        let (col, steps) = cap(Column::numeric("value", Vec::<Option<f64>>::new()));
        assert!(col.is_empty());
        assert!(steps.is_empty());
    }
}
