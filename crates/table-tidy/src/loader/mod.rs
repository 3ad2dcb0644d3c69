//! Table loading from raw bytes.
//!
//! The loader turns an uploaded byte stream into a [`Table`]. It makes two
//! attempts:
//!
//! 1. Strict UTF-8 with the best-scoring delimiter.
//! 2. Latin-1 with every delimiter that appears in the sample, best first.
//!
//! If neither produces a rectangular table the caller gets
//! [`CleaningError::UnparsableInput`] wrapping the last failure. The loader
//! only parses; it never cleans.

mod encoding;
mod sniffer;

pub use encoding::Encoding;
pub use sniffer::{DEFAULT_DELIMITER, DelimiterSniffer};

use crate::config::LoaderConfig;
use crate::error::{CleaningError, Result, ResultExt};
use crate::types::{Column, Table};
use crate::utils::parse_numeric;
use polars::io::csv::read::CsvReadOptions;
use polars::prelude::{CsvParseOptions, DataFrame, SerReader};
use std::io::Cursor;
use tracing::{debug, info};

/// Loads delimited text into a [`Table`].
#[derive(Debug, Clone, Default)]
pub struct TableLoader {
    config: LoaderConfig,
}

impl TableLoader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: LoaderConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &LoaderConfig {
        &self.config
    }

    /// Parse `bytes` into a table, falling back to Latin-1 once.
    pub fn load(&self, bytes: &[u8]) -> Result<Table> {
        match self.load_primary(bytes) {
            Ok(table) => return Ok(table),
            Err(e) => debug!("UTF-8 load failed, retrying as Latin-1: {}", e),
        }

        self.load_fallback(bytes)
            .map_err(|e| CleaningError::UnparsableInput(Box::new(e)))
    }

    fn load_primary(&self, bytes: &[u8]) -> Result<Table> {
        let encoding = Encoding::Utf8;
        let text = encoding.decode(bytes)?;
        let delimiter = DelimiterSniffer::new(&self.config).detect(&text);
        self.parse(&text, encoding, delimiter)
    }

    fn load_fallback(&self, bytes: &[u8]) -> Result<Table> {
        let encoding = Encoding::Latin1;
        let text = encoding.decode(bytes)?;

        let mut candidates: Vec<u8> = DelimiterSniffer::new(&self.config)
            .rank(&text)
            .into_iter()
            .filter(|&(_, score)| score > 0)
            .map(|(delim, _)| delim)
            .collect();
        if candidates.is_empty() {
            candidates.push(DEFAULT_DELIMITER);
        }

        let mut last_error = CleaningError::EmptyInput;
        for delimiter in candidates {
            match self.parse(&text, encoding, delimiter) {
                Ok(table) => return Ok(table),
                Err(e) => {
                    debug!("Delimiter {:?} failed: {}", delimiter as char, e);
                    last_error = e;
                }
            }
        }
        Err(last_error)
    }

    /// Parse decoded text with one delimiter. The first record is the header.
    fn parse(&self, text: &str, encoding: Encoding, delimiter: u8) -> Result<Table> {
        let records = skip_blank_lines(text, self.config.quote_char);
        if records.trim().is_empty() {
            return Err(CleaningError::EmptyInput);
        }
        debug!(
            "Parsing {} bytes as {} with delimiter {:?}",
            records.len(),
            encoding,
            delimiter as char
        );

        let df = CsvReadOptions::default()
            .with_has_header(false)
            .with_infer_schema_length(Some(0))
            .with_parse_options(
                CsvParseOptions::default()
                    .with_separator(delimiter)
                    .with_quote_char(Some(self.config.quote_char))
                    .with_missing_is_null(true)
                    .with_truncate_ragged_lines(false),
            )
            .into_reader_with_file_handle(Cursor::new(records.into_bytes()))
            .finish()
            .context(format!("Reading {} input", encoding))?;

        let table = table_from_records(&df, &self.config.na_values)?;
        info!(
            "Loaded {} rows x {} columns ({}, delimiter {:?})",
            table.height(),
            table.width(),
            encoding,
            delimiter as char
        );
        Ok(table)
    }
}

/// Parse `bytes` with the default loader.
pub fn load(bytes: &[u8]) -> Result<Table> {
    TableLoader::new().load(bytes)
}

/// Drop blank and whitespace-only lines that sit between records.
///
/// Lines inside a quoted field are kept verbatim, line endings included.
fn skip_blank_lines(text: &str, quote: u8) -> String {
    let quote = quote as char;
    let mut records = String::with_capacity(text.len());
    let mut in_quotes = false;

    for line in text.split_inclusive('\n') {
        if !in_quotes && line.trim().is_empty() {
            continue;
        }
        records.push_str(line);
        // a doubled quote flips twice, so only unbalanced quotes change state
        if line.matches(quote).count() % 2 == 1 {
            in_quotes = !in_quotes;
        }
    }
    records
}

/// Build a table from an all-string frame whose first row is the header.
fn table_from_records(df: &DataFrame, na_values: &[String]) -> Result<Table> {
    if df.height() == 0 {
        return Err(CleaningError::EmptyInput);
    }

    let mut columns = Vec::with_capacity(df.width());
    for (idx, col) in df.get_columns().iter().enumerate() {
        let values = col.as_materialized_series().str()?;
        let mut fields = values.into_iter();

        let name = match fields.next().flatten() {
            Some(header) if !header.is_empty() => header.to_string(),
            _ => format!("Unnamed: {}", idx),
        };
        let fields = fields
            .map(|field| field.filter(|v| !na_values.iter().any(|na| na == v)))
            .collect();
        columns.push(infer_column(name, fields));
    }

    Table::new(columns)
}
