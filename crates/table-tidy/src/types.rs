//! Table model and cleaning summary types.
//!
//! A [`Table`] is an ordered list of [`Column`]s that all share one row count.
//! Each column carries a [`ColumnKind`] tag and a vector of [`Cell`]s; the tag
//! decides which cell variants the column may hold, and the only transition
//! is text to numeric during type coercion.

use crate::error::{CleaningError, Result};
use crate::pipeline::CleaningStage;
use serde::{Deserialize, Serialize};
use std::fmt;

// ============================================================================
// Cells and Columns
// ============================================================================

/// A single table entry.
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    /// Finite floating point value.
    Numeric(f64),
    /// Text value.
    Text(String),
    /// No value.
    Missing,
}

impl Cell {
    pub fn is_missing(&self) -> bool {
        matches!(self, Cell::Missing)
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Cell::Numeric(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Cell::Text(s) => Some(s),
            _ => None,
        }
    }
}

/// Missing cells render as an empty string.
impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cell::Numeric(v) => write!(f, "{}", v),
            Cell::Text(s) => f.write_str(s),
            Cell::Missing => Ok(()),
        }
    }
}

/// Type tag of a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColumnKind {
    Numeric,
    Text,
}

impl ColumnKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Numeric => "numeric",
            Self::Text => "text",
        }
    }
}

/// A named, homogeneously typed column.
///
/// Numeric columns hold only [`Cell::Numeric`] and [`Cell::Missing`]; text
/// columns hold only [`Cell::Text`] and [`Cell::Missing`].
#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    name: String,
    kind: ColumnKind,
    cells: Vec<Cell>,
}

impl Column {
    /// Build a numeric column. Non-finite values become missing.
    pub fn numeric<I>(name: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = Option<f64>>,
    {
        let cells = values
            .into_iter()
            .map(|v| match v {
                Some(v) if v.is_finite() => Cell::Numeric(v),
                _ => Cell::Missing,
            })
            .collect();

        Self {
            name: name.into(),
            kind: ColumnKind::Numeric,
            cells,
        }
    }

    /// Build a text column. Values are kept verbatim, including empty strings.
    pub fn text<I, S>(name: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = Option<S>>,
        S: Into<String>,
    {
        let cells = values
            .into_iter()
            .map(|v| match v {
                Some(s) => Cell::Text(s.into()),
                None => Cell::Missing,
            })
            .collect();

        Self {
            name: name.into(),
            kind: ColumnKind::Text,
            cells,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> ColumnKind {
        self.kind
    }

    pub fn is_numeric(&self) -> bool {
        self.kind == ColumnKind::Numeric
    }

    pub fn is_text(&self) -> bool {
        self.kind == ColumnKind::Text
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn missing_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_missing()).count()
    }

    /// Non-missing numeric values in row order. Empty for text columns.
    pub fn numeric_values(&self) -> Vec<f64> {
        self.cells.iter().filter_map(Cell::as_f64).collect()
    }

    /// Non-missing text values in row order. Empty for numeric columns.
    pub fn text_values(&self) -> impl Iterator<Item = &str> {
        self.cells.iter().filter_map(Cell::as_text)
    }

    pub(crate) fn rename(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    /// Keep only the rows whose mask entry is `true`.
    pub(crate) fn retain_rows(&mut self, keep: &[bool]) {
        let mut idx = 0;
        self.cells.retain(|_| {
            let kept = keep.get(idx).copied().unwrap_or(true);
            idx += 1;
            kept
        });
    }

    /// Rewrite each text cell; returning `None` turns the cell missing.
    /// Numeric columns are left untouched.
    pub(crate) fn map_text<F>(&mut self, mut f: F)
    where
        F: FnMut(&str) -> Option<String>,
    {
        if self.kind != ColumnKind::Text {
            return;
        }
        for cell in &mut self.cells {
            let rewritten = match cell {
                Cell::Text(s) => f(s),
                _ => continue,
            };
            *cell = match rewritten {
                Some(new) => Cell::Text(new),
                None => Cell::Missing,
            };
        }
    }

    /// Replace a text column with parsed numeric values, one per row.
    ///
    /// This is the only kind transition a column can make.
    pub(crate) fn promote_to_numeric(&mut self, parsed: Vec<Option<f64>>) {
        debug_assert_eq!(parsed.len(), self.cells.len());
        let name = std::mem::take(&mut self.name);
        *self = Column::numeric(name, parsed);
    }

    /// Fill missing cells of a numeric column. Returns how many were filled.
    pub(crate) fn fill_missing_numeric(&mut self, value: f64) -> usize {
        if self.kind != ColumnKind::Numeric || !value.is_finite() {
            return 0;
        }
        self.fill_missing_with(|| Cell::Numeric(value))
    }

    /// Fill missing cells of a text column. Returns how many were filled.
    pub(crate) fn fill_missing_text(&mut self, value: &str) -> usize {
        if self.kind != ColumnKind::Text {
            return 0;
        }
        self.fill_missing_with(|| Cell::Text(value.to_string()))
    }

    fn fill_missing_with<F>(&mut self, make: F) -> usize
    where
        F: Fn() -> Cell,
    {
        let mut filled = 0;
        for cell in &mut self.cells {
            if cell.is_missing() {
                *cell = make();
                filled += 1;
            }
        }
        filled
    }

    /// Clamp every numeric value into `[lower, upper]`. Returns how many changed.
    pub(crate) fn clamp_numeric(&mut self, lower: f64, upper: f64) -> usize {
        let mut changed = 0;
        for cell in &mut self.cells {
            if let Cell::Numeric(v) = cell {
                let clamped = v.max(lower).min(upper);
                if clamped != *v {
                    *v = clamped;
                    changed += 1;
                }
            }
        }
        changed
    }
}

// ============================================================================
// Table
// ============================================================================

/// Rectangular collection of named columns.
///
/// The row count is stored alongside the columns, so a table keeps it even
/// after every column has been removed.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Table {
    columns: Vec<Column>,
    height: usize,
}

impl Table {
    /// Build a table, checking that every column has the same row count.
    pub fn new(columns: Vec<Column>) -> Result<Self> {
        let height = columns.first().map_or(0, Column::len);
        if let Some(bad) = columns.iter().find(|c| c.len() != height) {
            return Err(CleaningError::ShapeMismatch {
                column: bad.name().to_string(),
                expected: height,
                found: bad.len(),
            });
        }
        Ok(Self { columns, height })
    }

    /// A table with `height` rows and no columns.
    pub fn empty(height: usize) -> Self {
        Self {
            columns: Vec::new(),
            height,
        }
    }

    /// Build a table from columns already known to have `height` rows.
    pub(crate) fn from_columns(columns: Vec<Column>, height: usize) -> Self {
        debug_assert!(
            columns.iter().all(|c| c.len() == height),
            "columns must share one row count"
        );
        Self { columns, height }
    }

    /// Number of rows.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Number of columns.
    pub fn width(&self) -> usize {
        self.columns.len()
    }

    pub fn shape(&self) -> (usize, usize) {
        (self.height(), self.width())
    }

    pub fn is_empty(&self) -> bool {
        self.height() == 0
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(Column::name).collect()
    }

    /// First column with the given name.
    pub fn column(&self, name: &str) -> Result<&Column> {
        self.columns
            .iter()
            .find(|c| c.name() == name)
            .ok_or_else(|| CleaningError::ColumnNotFound(name.to_string()))
    }

    /// Cells of one row, in column order.
    pub fn row(&self, idx: usize) -> Option<Vec<&Cell>> {
        if idx >= self.height() {
            return None;
        }
        Some(self.columns.iter().map(|c| &c.cells()[idx]).collect())
    }

    /// Iterate over rows as cell vectors.
    pub fn rows(&self) -> impl Iterator<Item = Vec<&Cell>> {
        (0..self.height()).map(move |idx| self.columns.iter().map(|c| &c.cells()[idx]).collect())
    }

    pub(crate) fn columns_mut(&mut self) -> &mut [Column] {
        &mut self.columns
    }

    pub(crate) fn into_columns(self) -> Vec<Column> {
        self.columns
    }

    /// Keep only the rows whose mask entry is `true`.
    pub(crate) fn retain_rows(&mut self, keep: &[bool]) {
        for column in &mut self.columns {
            column.retain_rows(keep);
        }
        self.height = (0..self.height)
            .filter(|&idx| keep.get(idx).copied().unwrap_or(true))
            .count();
    }
}

// ============================================================================
// Cleaning Summary Types
// ============================================================================

/// What one stage did.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StageReport {
    pub stage: CleaningStage,
    /// Rows remaining after the stage.
    pub rows_after: usize,
    /// Columns remaining after the stage.
    pub columns_after: usize,
    /// Human-readable actions, in the order they happened.
    pub actions: Vec<String>,
}

/// Human-readable summary of a cleaning run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CleaningSummary {
    /// Local time the run started.
    pub started_at: String,
    /// Total execution time in milliseconds.
    pub duration_ms: u64,

    /// Number of rows before cleaning.
    pub rows_before: usize,
    /// Number of rows after cleaning.
    pub rows_after: usize,
    /// Number of rows removed during cleaning.
    pub rows_removed: usize,

    /// Number of columns before cleaning.
    pub columns_before: usize,
    /// Number of columns after cleaning.
    pub columns_after: usize,
    /// Number of columns removed during cleaning.
    pub columns_removed: usize,

    /// Per-stage reports, in execution order.
    pub stages: Vec<StageReport>,
}

impl CleaningSummary {
    pub fn new(started_at: impl Into<String>, rows_before: usize, columns_before: usize) -> Self {
        Self {
            started_at: started_at.into(),
            duration_ms: 0,
            rows_before,
            rows_after: rows_before,
            rows_removed: 0,
            columns_before,
            columns_after: columns_before,
            columns_removed: 0,
            stages: Vec::new(),
        }
    }

    /// Record a stage and refresh the running totals.
    pub fn record_stage(&mut self, stage: CleaningStage, table: &Table, actions: Vec<String>) {
        self.rows_after = table.height();
        self.columns_after = table.width();
        self.rows_removed = self.rows_before.saturating_sub(self.rows_after);
        self.columns_removed = self.columns_before.saturating_sub(self.columns_after);
        self.stages.push(StageReport {
            stage,
            rows_after: self.rows_after,
            columns_after: self.columns_after,
            actions,
        });
    }

    pub fn stage(&self, stage: CleaningStage) -> Option<&StageReport> {
        self.stages.iter().find(|s| s.stage == stage)
    }

    pub fn total_actions(&self) -> usize {
        self.stages.iter().map(|s| s.actions.len()).sum()
    }
}

/// Cleaned table plus the summary of how it was produced.
#[derive(Debug, Clone)]
pub struct CleaningResult {
    pub table: Table,
    pub summary: CleaningSummary,
}
