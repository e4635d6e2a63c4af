use crate::error::Result;
use crate::schema::FIPS_CODE;
use chrono::NaiveDate;
use polars::prelude::*;
use std::collections::HashSet;

/// Read a column as owned strings, casting non-string columns first.
pub fn string_values(df: &DataFrame, name: &str) -> Result<Vec<Option<String>>> {
    let series = df.column(name)?;
    let series = match series.dtype() {
        DataType::String => series.clone(),
        _ => series.cast(&DataType::String)?,
    };
    Ok(series
        .str()?
        .into_iter()
        .map(|v| v.map(|s| s.to_string()))
        .collect())
}

/// Read a numeric column as f64 values.
pub fn f64_values(df: &DataFrame, name: &str) -> Result<Vec<Option<f64>>> {
    let series = df.column(name)?.cast(&DataType::Float64)?;
    Ok(series.f64()?.into_iter().collect())
}

pub fn date_values(df: &DataFrame, name: &str) -> Result<Vec<Option<NaiveDate>>> {
    Ok(df.column(name)?.date()?.as_date_iter().collect())
}

/// Cast the named columns to Float64 in place.
pub fn cast_to_f64(df: DataFrame, columns: &[&str]) -> Result<DataFrame> {
    let exprs: Vec<Expr> = columns
        .iter()
        .map(|c| col(c).cast(DataType::Float64).alias(c))
        .collect();
    Ok(df.lazy().with_columns(exprs).collect()?)
}

/// Keep only rows whose `FIPS_Code` is in `codes`. An empty slice keeps every row.
pub fn filter_by_fips(df: &DataFrame, codes: &[String]) -> Result<DataFrame> {
    if codes.is_empty() {
        return Ok(df.clone());
    }
    let wanted: HashSet<&str> = codes.iter().map(String::as_str).collect();
    let mask: BooleanChunked = df
        .column(FIPS_CODE)?
        .str()?
        .into_iter()
        .map(|v| v.map_or(false, |code| wanted.contains(code)))
        .collect();
    Ok(df.filter(&mask)?)
}
