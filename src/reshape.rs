//! Wide-to-long reshaping
//!
//! Turns a table with one column per observation period (or category) into a table with one
//! row per observation.

use crate::error::Result;
use polars::prelude::*;
use tracing::debug;

/// Unpivot `value_columns` into (`label_name`, `value_name`) pairs.
///
/// The output holds `height * value_columns.len()` rows, ordered value column by value column,
/// with every identifier value copied unchanged onto each fan-out row. Values are stacked as
/// Float64 so integer and float columns can share the value column.
pub fn melt(
    df: &DataFrame,
    id_columns: &[&str],
    value_columns: &[String],
    label_name: &str,
    value_name: &str,
) -> Result<DataFrame> {
    let ids = df.select(id_columns.iter().copied())?;
    let height = df.height();

    let mut long: Option<DataFrame> = None;
    for value_col in value_columns {
        let mut piece = ids.clone();
        piece.with_column(Series::new(label_name, vec![value_col.as_str(); height]))?;
        let values = df
            .column(value_col)?
            .cast(&DataType::Float64)?
            .with_name(value_name);
        piece.with_column(values)?;

        match long.as_mut() {
            Some(acc) => {
                acc.vstack_mut(&piece)?;
            }
            None => long = Some(piece),
        }
    }

    let long = match long {
        Some(mut acc) => {
            acc.align_chunks();
            acc
        }
        None => {
            let mut empty = ids.head(Some(0));
            empty.with_column(Series::new_empty(label_name, &DataType::String))?;
            empty.with_column(Series::new_empty(value_name, &DataType::Float64))?;
            empty
        }
    };

    debug!(
        "Melted {} rows x {} value columns into {} rows",
        height,
        value_columns.len(),
        long.height()
    );
    Ok(long)
}
