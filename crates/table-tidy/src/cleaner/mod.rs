//! Structural cleaning stages.
//!
//! This module provides functionality for:
//! - Normalizing column headers
//! - Dropping all-missing rows and columns
//! - Trimming text and unifying missing sentinels
//! - Coercing mostly-numeric text columns
//! - Removing duplicate rows

mod headers;
mod sanitizers;
mod type_corrector;

pub use headers::normalize_headers;
pub use sanitizers::trim_and_unify_missing;
pub use type_corrector::TypeCorrector;

use crate::types::{Cell, Table};
use std::collections::HashSet;
use tracing::debug;

/// Data cleaner for row/column pruning and deduplication.
#[derive(Debug, Clone, Copy, Default)]
pub struct DataCleaner;

/// Hashable view of a cell used to compare rows.
#[derive(Debug, PartialEq, Eq, Hash)]
enum CellKey<'a> {
    Numeric(u64),
    Text(&'a str),
    Missing,
}

impl<'a> From<&'a Cell> for CellKey<'a> {
    fn from(cell: &'a Cell) -> Self {
        match cell {
            // -0.0 and 0.0 compare equal, so they must hash equal too
            Cell::Numeric(v) if *v == 0.0 => CellKey::Numeric(0f64.to_bits()),
            Cell::Numeric(v) => CellKey::Numeric(v.to_bits()),
            Cell::Text(s) => CellKey::Text(s),
            Cell::Missing => CellKey::Missing,
        }
    }
}

impl DataCleaner {
    /// Drop rows that are missing in every column, then columns that are
    /// missing in every remaining row.
    ///
    /// Column pruning is skipped for zero-row tables so their columns survive.
    pub fn prune_empty(&self, table: Table) -> (Table, Vec<String>) {
        let mut cleaning_actions = Vec::new();
        let mut table = table;

        // 1. Rows
        let before_rows = table.height();
        let keep: Vec<bool> = table
            .rows()
            .map(|row| row.iter().any(|cell| !cell.is_missing()))
            .collect();
        table.retain_rows(&keep);
        let rows_removed = before_rows - table.height();

        if rows_removed > 0 {
            cleaning_actions.push(format!("Dropped {} empty rows", rows_removed));
            debug!("Dropped {} all-missing rows", rows_removed);
        }

        // 2. Columns, against the row-pruned table
        let height = table.height();
        if height > 0 {
            let (kept, dropped): (Vec<_>, Vec<_>) = table
                .into_columns()
                .into_iter()
                .partition(|col| col.missing_count() < col.len());

            if !dropped.is_empty() {
                let names: Vec<&str> = dropped.iter().map(|c| c.name()).collect();
                cleaning_actions.push(format!(
                    "Dropped {} empty columns: {:?}",
                    dropped.len(),
                    names
                ));
                debug!("Dropped {} all-missing columns", dropped.len());
            }

            table = Table::from_columns(kept, height);
        }

        (table, cleaning_actions)
    }

    /// Remove rows equal to an earlier row, keeping first occurrences in order.
    pub fn remove_duplicates(&self, table: Table) -> (Table, Vec<String>) {
        let mut cleaning_actions = Vec::new();
        let mut table = table;
        let before = table.height();

        let keep: Vec<bool> = {
            let mut seen: HashSet<Vec<CellKey<'_>>> = HashSet::with_capacity(before);
            table
                .rows()
                .map(|row| seen.insert(row.into_iter().map(CellKey::from).collect()))
                .collect()
        };
        table.retain_rows(&keep);

        let duplicates_removed = before - table.height();
        if duplicates_removed > 0 {
            let pct = (duplicates_removed as f64 / before as f64) * 100.0;
            cleaning_actions.push(format!(
                "Removed {} duplicate rows ({:.1}%)",
                duplicates_removed, pct
            ));
            debug!("Removed {} duplicate rows", duplicates_removed);
        } else {
            debug!("No duplicate rows found");
        }

        (table, cleaning_actions)
    }
}
