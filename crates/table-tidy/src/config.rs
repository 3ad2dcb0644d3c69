//! Configuration types for loading and cleaning.
//!
//! The cleaning policy is fixed: [`CleaningConfig::default()`] is the only way
//! to obtain one, and the pipeline never reads policy from callers. The loader
//! has a few parse options in [`LoaderConfig`].

use serde::{Deserialize, Serialize};

/// Fraction of rows that must parse as numbers for a text column to be coerced.
pub const NUMERIC_COERCION_THRESHOLD: f64 = 0.5;

/// Multiplier applied to the IQR when deriving outlier bounds.
pub const OUTLIER_IQR_MULTIPLIER: f64 = 1.5;

/// Fill value for text columns with no observed values.
pub const FALLBACK_TEXT_FILL: &str = "Unknown";

/// Delimiters to try when sniffing.
pub const CANDIDATE_DELIMITERS: [u8; 4] = [b',', b'\t', b';', b'|'];

/// Raw field values read as missing at load time. Matching is exact and
/// case-sensitive, before any trimming.
pub const DEFAULT_NA_VALUES: [&str; 19] = [
    "", "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN",
    "<NA>", "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

/// Fixed cleaning policy.
///
/// Fields are readable for reporting, but the struct has no builder: every
/// pipeline runs with the same constants.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CleaningConfig {
    numeric_coercion_threshold: f64,
    outlier_iqr_multiplier: f64,
    fallback_text_fill: String,
}

impl Default for CleaningConfig {
    fn default() -> Self {
        Self {
            numeric_coercion_threshold: NUMERIC_COERCION_THRESHOLD,
            outlier_iqr_multiplier: OUTLIER_IQR_MULTIPLIER,
            fallback_text_fill: FALLBACK_TEXT_FILL.to_string(),
        }
    }
}

impl CleaningConfig {
    /// Fraction of total rows (0.0 - 1.0) that must parse as numbers.
    pub fn numeric_coercion_threshold(&self) -> f64 {
        self.numeric_coercion_threshold
    }

    /// IQR multiplier for outlier bounds.
    pub fn outlier_iqr_multiplier(&self) -> f64 {
        self.outlier_iqr_multiplier
    }

    /// Text used when a text column has nothing to take a mode from.
    pub fn fallback_text_fill(&self) -> &str {
        &self.fallback_text_fill
    }
}

/// Parse options for the table loader.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoaderConfig {
    /// Quote character for fields containing delimiters.
    /// Default: `"`
    pub quote_char: u8,

    /// Delimiters considered by the sniffer, in tie-break order.
    /// Default: comma, tab, semicolon, pipe
    pub candidate_delimiters: Vec<u8>,

    /// Number of non-blank lines inspected when sniffing.
    /// Default: 10
    pub sniff_lines: usize,

    /// Field values read as missing.
    /// Default: [`DEFAULT_NA_VALUES`]
    pub na_values: Vec<String>,
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self {
            quote_char: b'"',
            candidate_delimiters: CANDIDATE_DELIMITERS.to_vec(),
            sniff_lines: 10,
            na_values: DEFAULT_NA_VALUES.iter().map(|v| v.to_string()).collect(),
        }
    }
}
