//! Data sanitization functions for text cells.

use crate::types::Table;
use crate::utils::is_missing_sentinel;
use tracing::debug;

/// Trim whitespace from every text cell, then turn empty strings and the
/// literal `nan` into missing cells.
///
/// Numeric columns are not touched.
pub fn trim_and_unify_missing(table: Table) -> (Table, Vec<String>) {
    let mut actions = Vec::new();
    let mut table = table;
    let mut total_replacements = 0;

    for column in table.columns_mut().iter_mut().filter(|c| c.is_text()) {
        let mut trimmed_count = 0;
        let mut replaced_count = 0;

        column.map_text(|val| {
            let trimmed = val.trim();
            if trimmed.len() != val.len() {
                trimmed_count += 1;
            }
            if is_missing_sentinel(trimmed) {
                replaced_count += 1;
                None
            } else {
                Some(trimmed.to_string())
            }
        });

        if trimmed_count > 0 {
            actions.push(format!(
                "Trimmed whitespace from {} values in '{}'",
                trimmed_count,
                column.name()
            ));
        }
        if replaced_count > 0 {
            actions.push(format!(
                "Marked {} empty/'nan' values as missing in '{}'",
                replaced_count,
                column.name()
            ));
        }
        total_replacements += replaced_count;
    }

    if total_replacements > 0 {
        debug!("Replaced {} sentinel values with missing", total_replacements);
    }

    (table, actions)
}
