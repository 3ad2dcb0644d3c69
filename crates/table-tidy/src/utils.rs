//! Shared utilities for the cleaning pipeline.
//!
//! This module contains the parsing and statistics helpers used across
//! multiple stages so that every stage agrees on what "numeric", "median",
//! and "mode" mean.

use std::collections::HashMap;

// =============================================================================
// String Parsing Utilities
// =============================================================================

/// Sentinel text treated as missing after trimming (case-sensitive).
pub const NAN_SENTINEL: &str = "nan";

/// Try to parse a string as a finite floating point number.
///
/// Surrounding whitespace is ignored. Values that parse to NaN or an infinity
/// are rejected so that numeric cells always hold finite values.
///
/// # Example
///
/// ```rust
/// use table_tidy::utils::parse_numeric;
///
/// assert_eq!(parse_numeric(" 42 "), Some(42.0));
/// assert_eq!(parse_numeric("1e3"), Some(1000.0));
/// assert_eq!(parse_numeric("inf"), None);
/// assert_eq!(parse_numeric("x"), None);
/// ```
pub fn parse_numeric(s: &str) -> Option<f64> {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Check if an already-trimmed value is one of the missing sentinels.
#[inline]
pub fn is_missing_sentinel(trimmed: &str) -> bool {
    trimmed.is_empty() || trimmed == NAN_SENTINEL
}

/// Normalize a column header: trim, lowercase, and replace spaces with `_`.
///
/// Punctuation is preserved.
pub fn normalize_header(name: &str) -> String {
    name.trim().to_lowercase().replace(' ', "_")
}

// =============================================================================
// Statistics Utilities
// =============================================================================

/// Sort finite values ascending.
pub fn sorted_values(values: &[f64]) -> Vec<f64> {
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.total_cmp(b));
    sorted
}

/// Quantile of already-sorted values using linear interpolation between
/// closest ranks. Returns `None` for an empty slice.
pub fn quantile_sorted(sorted: &[f64], q: f64) -> Option<f64> {
    if sorted.is_empty() {
        return None;
    }

    let position = (sorted.len() - 1) as f64 * q.clamp(0.0, 1.0);
    let lower = position.floor() as usize;
    let upper = position.ceil() as usize;
    let fraction = position - lower as f64;

    let (a, b) = (sorted[lower], sorted[upper]);
    let delta = b - a;
    // b - a overflows when the neighbours are huge and of opposite sign
    let value = if delta.is_finite() {
        a + delta * fraction
    } else {
        a * (1.0 - fraction) + b * fraction
    };
    Some(value)
}

/// Median of the values, or `None` when there are none.
pub fn median(values: &[f64]) -> Option<f64> {
    quantile_sorted(&sorted_values(values), 0.5)
}

/// Most frequent value. Ties go to the value that appeared first.
pub fn first_occurrence_mode<'a, I>(values: I) -> Option<&'a str>
where
    I: IntoIterator<Item = &'a str>,
{
    // value -> (count, first index)
    let mut counts: HashMap<&'a str, (usize, usize)> = HashMap::new();
    for (idx, val) in values.into_iter().enumerate() {
        counts.entry(val).or_insert((0, idx)).0 += 1;
    }

    counts
        .into_iter()
        .max_by(|(_, (count_a, first_a)), (_, (count_b, first_b))| {
            count_a.cmp(count_b).then(first_b.cmp(first_a))
        })
        .map(|(val, _)| val)
}

// =============================================================================
// Tests
// =============================================================================
