//! Conversion between [`Table`] and polars.
//!
//! The cleaning stages never touch polars; these helpers are for callers that
//! want a `DataFrame` or need to serialize a cleaned table back to CSV.

use crate::error::{Result, ResultExt};
use crate::types::{Cell, Column, Table};
use polars::prelude::{
    Column as FrameColumn, CsvWriter, DataFrame, DataType, NamedFrom, SerWriter, Series,
};
use std::io::Write;

impl Table {
    /// Convert to a polars `DataFrame`.
    ///
    /// Numeric columns become `Float64`, text columns `String`, and missing
    /// cells null. Fails if two columns share a name.
    pub fn to_dataframe(&self) -> Result<DataFrame> {
        let columns: Vec<FrameColumn> = self
            .columns()
            .iter()
            .map(|column| to_series(column).into())
            .collect();

        DataFrame::new(columns).context("Building DataFrame")
    }

    /// Build a table from a polars `DataFrame`.
    ///
    /// Numeric dtypes become numeric columns. Strings and every other dtype
    /// become text columns, the latter through polars' string cast.
    pub fn from_dataframe(df: &DataFrame) -> Result<Self> {
        if df.width() == 0 {
            return Ok(Table::empty(df.height()));
        }

        let mut columns = Vec::with_capacity(df.width());

        for col in df.get_columns() {
            let series = col.as_materialized_series();
            let name = series.name().to_string();

            let column = if series.dtype() == &DataType::String {
                Column::text(name, series.str()?.into_iter())
            } else if series.dtype().is_primitive_numeric() {
                let floats = series.cast(&DataType::Float64)?;
                Column::numeric(name, floats.f64()?.into_iter())
            } else {
                let strings = series.cast(&DataType::String)?;
                Column::text(name, strings.str()?.into_iter())
            };
            columns.push(column);
        }

        Table::new(columns)
    }
}

fn to_series(column: &Column) -> Series {
    let name = column.name().into();
    if column.is_numeric() {
        let values: Vec<Option<f64>> = column.cells().iter().map(Cell::as_f64).collect();
        Series::new(name, values)
    } else {
        let values: Vec<Option<&str>> = column.cells().iter().map(Cell::as_text).collect();
        Series::new(name, values)
    }
}

/// Write a table as comma-delimited CSV with a header row.
///
/// Missing cells are written as empty fields.
pub fn write_csv<W: Write>(table: &Table, writer: W) -> Result<()> {
    let mut df = table.to_dataframe()?;

    CsvWriter::new(writer)
        .include_header(true)
        .with_separator(b',')
        .with_quote_char(b'"')
        .finish(&mut df)
        .context("Writing CSV")?;

    Ok(())
}
