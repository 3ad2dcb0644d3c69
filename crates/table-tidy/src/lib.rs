//! Tabular Dataset Cleaning Library
//!
//! Turns an uploaded delimited file into a clean, rectangular table with a
//! fixed, deterministic policy.
//!
//! # Overview
//!
//! The library exposes two operations:
//!
//! - **[`load`]**: parse raw bytes into a [`Table`], detecting the delimiter and
//!   falling back from UTF-8 to Latin-1
//! - **[`clean`]**: run the seven-stage cleaning pipeline over a table
//!
//! The pipeline stages, in order:
//!
//! 1. Header normalization (trim, lowercase, spaces to `_`)
//! 2. Dropping all-missing rows, then all-missing columns
//! 3. Trimming text and unifying `""`/`"nan"` as missing
//! 4. Coercing mostly-numeric text columns to numeric
//! 5. Imputation: median for numeric, mode for text, `"Unknown"` as last resort
//! 6. Removing duplicate rows, keeping the first
//! 7. Capping numeric values at `[Q1 - 1.5*IQR, Q3 + 1.5*IQR]`
//!
//! # Quick Start
//!
//! ```rust
//! use table_tidy::{clean, frame::write_csv, load};
//!
//! let raw = b" Name ,Score\nalice,10\nbob,\n alice ,10\ncarol,x\n";
//!
//! let table = clean(load(raw)?);
//! assert_eq!(table.column_names(), vec!["name", "score"]);
//! assert_eq!(table.height(), 3);
//!
//! let mut out = Vec::new();
//! write_csv(&table, &mut out)?;
//! # Ok::<(), table_tidy::CleaningError>(())
//! ```
//!
//! # Summaries
//!
//! Use [`Pipeline::process`] instead of [`clean`] to get a [`CleaningSummary`]
//! describing what every stage did:
//!
//! ```rust
//! use table_tidy::{CleaningStage, Pipeline, load};
//!
//! let result = Pipeline::new().process(load(b"a,b\n1,x\n1,x\n")?);
//! let dedup = result.summary.stage(CleaningStage::Deduplication).unwrap();
//! assert_eq!(dedup.rows_after, 1);
//! # Ok::<(), table_tidy::CleaningError>(())
//! ```

pub mod cleaner;
pub mod config;
pub mod error;
pub mod frame;
pub mod imputers;
pub mod loader;
pub mod pipeline;
pub mod types;
pub mod utils;

// Re-exports for convenient access
pub use cleaner::{DataCleaner, TypeCorrector};
pub use config::{CleaningConfig, LoaderConfig};
pub use error::{CleaningError, ResultExt};
pub use imputers::StatisticalImputer;
pub use loader::{Encoding, TableLoader, load};
pub use pipeline::{CleaningStage, IqrBounds, OutlierHandler, Pipeline, clean};
pub use types::{Cell, CleaningResult, CleaningSummary, Column, ColumnKind, StageReport, Table};

static_assertions::assert_impl_all!(CleaningConfig: Send, Sync);
static_assertions::assert_impl_all!(LoaderConfig: Send, Sync);
