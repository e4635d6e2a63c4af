//! CSV Loader - reads the sales and rental files into wide tables
//!
//! Each raw table keeps the frame exactly as read, plus the list of value columns that the
//! reshaping step will unpivot: slash-delimited date headers for sales, `Bedroom_*` headers for
//! rentals.

use crate::error::{Result, ScreenerError};
use crate::schema::{BEDROOM_PREFIX, RENTAL_ID_COLUMNS, SALES_ID_COLUMNS};
use polars::prelude::*;
use std::path::Path;
use tracing::info;

/// Wide sales table: one row per region, one column per historical date.
#[derive(Debug, Clone)]
pub struct RawSalesTable {
    pub frame: DataFrame,
    pub date_columns: Vec<String>,
}

/// Wide rental table: one row per HUD county area, one column per bedroom size.
#[derive(Debug, Clone)]
pub struct RawRentalTable {
    pub frame: DataFrame,
    pub bedroom_columns: Vec<String>,
}

impl RawSalesTable {
    /// Wrap an already-read frame, validating the descriptive columns.
    pub fn from_frame(frame: DataFrame) -> Result<Self> {
        require_columns(&frame, "sales", &SALES_ID_COLUMNS)?;
        let date_columns: Vec<String> = frame
            .get_column_names()
            .into_iter()
            .filter(|name| name.contains('/'))
            .map(str::to_string)
            .collect();
        Ok(Self {
            frame,
            date_columns,
        })
    }
}

impl RawRentalTable {
    pub fn from_frame(frame: DataFrame) -> Result<Self> {
        require_columns(&frame, "rental", &RENTAL_ID_COLUMNS)?;
        let bedroom_columns: Vec<String> = frame
            .get_column_names()
            .into_iter()
            .filter(|name| name.starts_with(BEDROOM_PREFIX))
            .map(str::to_string)
            .collect();
        Ok(Self {
            frame,
            bedroom_columns,
        })
    }
}

pub fn load_sales_csv(path: impl AsRef<Path>) -> Result<RawSalesTable> {
    let frame = read_csv(path.as_ref())?;
    let table = RawSalesTable::from_frame(frame)?;
    info!(
        "Loaded sales table {:?}: {} regions, {} date columns",
        path.as_ref(),
        table.frame.height(),
        table.date_columns.len()
    );
    Ok(table)
}

pub fn load_rental_csv(path: impl AsRef<Path>) -> Result<RawRentalTable> {
    let frame = read_csv(path.as_ref())?;
    let table = RawRentalTable::from_frame(frame)?;
    info!(
        "Loaded rental table {:?}: {} areas, {} bedroom columns",
        path.as_ref(),
        table.frame.height(),
        table.bedroom_columns.len()
    );
    Ok(table)
}

fn read_csv(path: &Path) -> Result<DataFrame> {
    if !path.exists() {
        return Err(ScreenerError::Load(format!(
            "File not found: {}",
            path.display()
        )));
    }

    LazyCsvReader::new(path)
        .with_has_header(true)
        .with_infer_schema_length(None)
        .finish()
        .and_then(|lf| lf.collect())
        .map_err(|e| ScreenerError::Load(format!("Failed to read {}: {}", path.display(), e)))
}

fn require_columns(frame: &DataFrame, table: &str, required: &[&str]) -> Result<()> {
    let present = frame.get_column_names();
    match required.iter().find(|c| !present.contains(*c)) {
        Some(missing) => Err(ScreenerError::MissingColumn {
            table: table.to_string(),
            column: missing.to_string(),
        }),
        None => Ok(()),
    }
}
