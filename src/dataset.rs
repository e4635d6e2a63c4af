//! Analysis dataset
//!
//! Built once from the two raw tables and then only read. Holds the three derived tables every
//! query runs against: rental-long, sales-long and their join.

use crate::data_utils::cast_to_f64;
use crate::error::{Result, ScreenerError};
use crate::ingestion::{load_rental_csv, load_sales_csv, RawRentalTable, RawSalesTable};
use crate::keys::{apply_rental_keys, apply_sales_keys, CountyPaddingConvention, JoinKeyConvention};
use crate::reshape::melt;
use crate::schema::*;
use chrono::NaiveDate;
use lazy_static::lazy_static;
use polars::prelude::*;
use regex::Regex;
use std::collections::HashMap;
use std::path::Path;
use tracing::{info, warn};

lazy_static! {
    static ref BEDROOM_DIGITS: Regex = Regex::new(r"(\d+)").expect("valid bedroom pattern");
}


#[derive(Debug, Clone)]
pub struct AnalysisDataset {
    rental_long: DataFrame,
    sales_long: DataFrame,
    merged: DataFrame,
}

impl AnalysisDataset {
    /// Build with the default county key convention.
    pub fn build(rental: &RawRentalTable, sales: &RawSalesTable) -> Result<Self> {
        Self::build_with(rental, sales, &CountyPaddingConvention)
    }

    pub fn build_with(
        rental: &RawRentalTable,
        sales: &RawSalesTable,
        convention: &dyn JoinKeyConvention,
    ) -> Result<Self> {
        let rental_long = build_rental_long(rental, convention)?;
        let sales_long = build_sales_long(sales, convention)?;
        let merged = build_merged(&rental_long, &sales_long)?;

        info!(
            "Analysis dataset ready: {} rental rows, {} sales rows, {} merged rows",
            rental_long.height(),
            sales_long.height(),
            merged.height()
        );

        Ok(Self {
            rental_long,
            sales_long,
            merged,
        })
    }

    /// Load both CSVs and build. Any failure here is fatal to the session.
    pub fn load(rental_path: impl AsRef<Path>, sales_path: impl AsRef<Path>) -> Result<Self> {
        let rental = load_rental_csv(rental_path)?;
        let sales = load_sales_csv(sales_path)?;
        Self::build(&rental, &sales)
    }

    pub fn rental_long(&self) -> &DataFrame {
        &self.rental_long
    }

    pub fn sales_long(&self) -> &DataFrame {
        &self.sales_long
    }

    pub fn merged(&self) -> &DataFrame {
        &self.merged
    }
}

/// Integer bedroom count embedded in a label such as `Bedroom_2`.
pub fn bedroom_count(label: &str) -> Result<i64> {
    BEDROOM_DIGITS
        .captures(label)
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().parse::<i64>().ok())
        .ok_or_else(|| ScreenerError::InvalidBedroomLabel(label.to_string()))
}

/// Parse a sales column header into a calendar date.
///
/// `11/30/2023`, `2023/11/30` and `11/30/23` are accepted. The format is picked from segment
/// widths because chrono's `%Y` also takes a two-digit year.
pub fn parse_header_date(header: &str) -> Option<NaiveDate> {
    let header = header.trim();
    let segments: Vec<&str> = header.split('/').collect();
    if segments.len() != 3 || !segments.iter().all(|s| s.chars().all(|c| c.is_ascii_digit())) {
        return None;
    }

    let format = match (segments[0].len(), segments[2].len()) {
        (4, 1..=2) => "%Y/%m/%d",
        (1..=2, 4) => "%m/%d/%Y",
        (1..=2, 2) => "%m/%d/%y",
        _ => return None,
    };
    NaiveDate::parse_from_str(header, format).ok()
}

/// Sales in long form: one row per (region, date) with a parsed `Date` and the joined key.
pub fn build_sales_long(
    raw: &RawSalesTable,
    convention: &dyn JoinKeyConvention,
) -> Result<DataFrame> {
    let mut long = melt(&raw.frame, &SALES_ID_COLUMNS, &raw.date_columns, DATE, VALUE)?;

    let dates: Vec<Option<NaiveDate>> = long
        .column(DATE)?
        .str()?
        .into_iter()
        .map(|label| label.and_then(parse_header_date))
        .collect();
    long.with_column(Series::new(DATE, dates))?;

    let before = long.height();
    let mut long = long.drop_nulls(Some([DATE].as_slice()))?;
    if long.height() < before {
        warn!(
            "Dropped {} sales rows whose date header did not parse",
            before - long.height()
        );
    }

    apply_sales_keys(&mut long, convention)?;
    Ok(long)
}

/// Rentals in long form: one row per (county, bedroom size) with `Bedroom_Count`.
///
/// Every bedroom column label must carry a count; a label without one fails the build before
/// any reshaping happens.
pub fn build_rental_long(
    raw: &RawRentalTable,
    convention: &dyn JoinKeyConvention,
) -> Result<DataFrame> {
    let counts: HashMap<&str, i64> = raw
        .bedroom_columns
        .iter()
        .map(|label| bedroom_count(label).map(|n| (label.as_str(), n)))
        .collect::<Result<_>>()?;

    let mut long = melt(
        &raw.frame,
        &RENTAL_ID_COLUMNS,
        &raw.bedroom_columns,
        BEDROOM_TYPE,
        RENT,
    )?;

    let bedroom_counts: Vec<Option<i64>> = long
        .column(BEDROOM_TYPE)?
        .str()?
        .into_iter()
        .map(|label| label.and_then(|l| counts.get(l).copied()))
        .collect();
    long.with_column(Series::new(BEDROOM_COUNT, bedroom_counts))?;

    apply_rental_keys(&mut long, convention)?;
    cast_to_f64(long, &[POPULATION])
}

/// Join rental-long to sales-long on `FIPS_Code` and drop every row holding a null.
///
/// Rentals with no sales match would only survive a left join as nulls and be dropped
/// afterwards, so this joins inner directly.
pub fn build_merged(rental_long: &DataFrame, sales_long: &DataFrame) -> Result<DataFrame> {
    let merged = rental_long
        .clone()
        .lazy()
        .join(
            sales_long.clone().lazy(),
            [col(FIPS_CODE)],
            [col(FIPS_CODE)],
            JoinArgs::new(JoinType::Inner),
        )
        .drop_nulls(None)
        .collect()?;

    if merged.height() == 0 && rental_long.height() > 0 && sales_long.height() > 0 {
        warn!("Join on {} matched no rows; check the key convention", FIPS_CODE);
    }
    Ok(merged)
}
