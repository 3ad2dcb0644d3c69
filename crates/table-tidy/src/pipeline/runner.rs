//! Main cleaning pipeline module.
//!
//! This module provides the `Pipeline` struct that runs the cleaning stages
//! in their fixed order over one table.

use crate::cleaner::{DataCleaner, TypeCorrector, normalize_headers, trim_and_unify_missing};
use crate::config::CleaningConfig;
use crate::imputers::StatisticalImputer;
use crate::pipeline::outliers::OutlierHandler;
use crate::pipeline::stage::CleaningStage;
use crate::types::{CleaningResult, CleaningSummary, Table};
use chrono::Local;
use std::time::Instant;
use tracing::{debug, info};

/// The cleaning pipeline.
///
/// A pipeline owns nothing but the fixed [`CleaningConfig`], so one instance
/// can clean any number of independent tables, from any number of threads.
///
/// # Example
///
/// ```rust
/// use table_tidy::{Column, Pipeline, Table};
///
/// let table = Table::new(vec![
///     Column::text(" Score ", vec![Some("1"), Some("2"), Some("x"), Some("3")]),
/// ])?;
///
/// let result = Pipeline::new().process(table);
/// assert_eq!(result.table.column_names(), vec!["score"]);
/// assert_eq!(result.table.column("score")?.numeric_values(), vec![1.0, 2.0, 3.0]);
/// # Ok::<(), table_tidy::CleaningError>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct Pipeline {
    config: CleaningConfig,
    cleaner: DataCleaner,
    type_corrector: TypeCorrector,
}

static_assertions::assert_impl_all!(Pipeline: Send, Sync);
static_assertions::assert_impl_all!(Table: Send, Sync);

impl Pipeline {
    /// Create a pipeline with the fixed cleaning policy.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn config(&self) -> &CleaningConfig {
        &self.config
    }

    /// Run every stage over the table and return the cleaned table with a
    /// summary of what each stage did.
    pub fn process(&self, table: Table) -> CleaningResult {
        let start_time = Instant::now();
        let started_at = Local::now().format("%Y-%m-%d %H:%M:%S").to_string();

        info!("Starting cleaning pipeline on {:?} table...", table.shape());
        let mut summary = CleaningSummary::new(started_at, table.height(), table.width());

        let table = self.run_stage(
            &mut summary,
            table,
            CleaningStage::HeaderNormalization,
            normalize_headers,
        );
        let table = self.run_stage(&mut summary, table, CleaningStage::Pruning, |t| {
            self.cleaner.prune_empty(t)
        });
        let table = self.run_stage(
            &mut summary,
            table,
            CleaningStage::Sanitizing,
            trim_and_unify_missing,
        );
        let table = self.run_stage(&mut summary, table, CleaningStage::TypeCoercion, |t| {
            self.type_corrector.coerce_numeric_columns(t, &self.config)
        });
        let table = self.run_stage(&mut summary, table, CleaningStage::Imputation, |t| {
            StatisticalImputer::impute(t, &self.config)
        });
        let table = self.run_stage(&mut summary, table, CleaningStage::Deduplication, |t| {
            self.cleaner.remove_duplicates(t)
        });
        let table = self.run_stage(&mut summary, table, CleaningStage::OutlierCapping, |t| {
            OutlierHandler::cap_outliers(t, &self.config)
        });

        summary.duration_ms = start_time.elapsed().as_millis() as u64;
        info!(
            "Cleaning complete: {:?} -> {:?} in {}ms",
            (summary.rows_before, summary.columns_before),
            table.shape(),
            summary.duration_ms
        );

        CleaningResult { table, summary }
    }

    fn run_stage<F>(
        &self,
        summary: &mut CleaningSummary,
        table: Table,
        stage: CleaningStage,
        apply: F,
    ) -> Table
    where
        F: FnOnce(Table) -> (Table, Vec<String>),
    {
        info!("Step {}: {}...", stage.step(), stage.display_name());
        let (table, actions) = apply(table);
        for action in &actions {
            debug!("  {}", action);
        }
        summary.record_stage(stage, &table, actions);
        table
    }
}

/// Clean a table with the fixed policy, discarding the summary.
pub fn clean(table: Table) -> Table {
    Pipeline::new().process(table).table
}
