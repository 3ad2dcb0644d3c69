//! Column header normalization.

use crate::types::Table;
use crate::utils::normalize_header;
use std::collections::HashSet;
use tracing::debug;

/// Normalize every column name and resolve collisions.
///
/// Names are trimmed, lowercased, and have spaces replaced by `_`. When two
/// columns normalize to the same name, the first keeps it and each later one
/// gets the smallest `_N` suffix not taken by any other normalized name.
pub fn normalize_headers(table: Table) -> (Table, Vec<String>) {
    let mut actions = Vec::new();
    let mut table = table;

    let normalized: Vec<String> = table
        .columns()
        .iter()
        .map(|c| normalize_header(c.name()))
        .collect();

    // Names claimed directly by normalization are reserved up front so a
    // suffixed name never steals one that appears later in the table.
    let reserved: HashSet<&str> = normalized.iter().map(String::as_str).collect();
    let mut taken: HashSet<String> = HashSet::with_capacity(normalized.len());
    let mut final_names = Vec::with_capacity(normalized.len());

    for name in &normalized {
        let resolved = if taken.contains(name) {
            let mut n = 1;
            loop {
                let candidate = format!("{}_{}", name, n);
                if !taken.contains(&candidate) && !reserved.contains(candidate.as_str()) {
                    break candidate;
                }
                n += 1;
            }
        } else {
            name.clone()
        };
        taken.insert(resolved.clone());
        final_names.push(resolved);
    }

    for (column, new_name) in table.columns_mut().iter_mut().zip(final_names) {
        if column.name() != new_name {
            actions.push(format!("Renamed '{}' to '{}'", column.name(), new_name));
            debug!("Renamed column '{}' -> '{}'", column.name(), new_name);
            column.rename(new_name);
        }
    }

    (table, actions)
}
