//! Type coercion for text columns that hold mostly numbers.

use crate::config::CleaningConfig;
use crate::types::{Column, Table};
use crate::utils::parse_numeric;
use tracing::debug;

/// Converts text columns to numeric when enough of their rows parse.
#[derive(Debug, Clone, Copy, Default)]
pub struct TypeCorrector;

impl TypeCorrector {
    /// Coerce every text column whose parseable share of *all* rows reaches
    /// the configured threshold. Cells that fail to parse become missing.
    pub fn coerce_numeric_columns(
        &self,
        table: Table,
        config: &CleaningConfig,
    ) -> (Table, Vec<String>) {
        let mut correction_steps = Vec::new();
        let mut table = table;
        let total_rows = table.height();

        debug!("Checking text columns for numeric coercion...");

        for column in table.columns_mut().iter_mut().filter(|c| c.is_text()) {
            let parsed = Self::parse_column(column);
            let parsed_count = parsed.iter().filter(|v| v.is_some()).count();

            if Self::should_coerce(parsed_count, total_rows, config) {
                correction_steps.push(format!(
                    "Coerced '{}' to numeric ({}/{} values parsed)",
                    column.name(),
                    parsed_count,
                    total_rows
                ));
                debug!(
                    "Coerced '{}' to numeric ({}/{} parsed)",
                    column.name(),
                    parsed_count,
                    total_rows
                );
                column.promote_to_numeric(parsed);
            } else if parsed_count > 0 {
                debug!(
                    "Kept '{}' as text ({}/{} parsed, below threshold)",
                    column.name(),
                    parsed_count,
                    total_rows
                );
            }
        }

        (table, correction_steps)
    }

    /// Parse each cell of a text column; missing and unparseable cells are `None`.
    fn parse_column(column: &Column) -> Vec<Option<f64>> {
        column
            .cells()
            .iter()
            .map(|cell| cell.as_text().and_then(parse_numeric))
            .collect()
    }

    /// At least one value must parse, so all-missing columns stay text.
    fn should_coerce(parsed_count: usize, total_rows: usize, config: &CleaningConfig) -> bool {
        parsed_count > 0
            && parsed_count as f64 >= total_rows as f64 * config.numeric_coercion_threshold()
    }
}
