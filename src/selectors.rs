//! Option lists for state, metro and county pickers.
//!
//! Every list keeps first-appearance order from the underlying table and skips nulls.

use crate::data_utils::{filter_by_fips, string_values};
use crate::dataset::AnalysisDataset;
use crate::error::Result;
use crate::schema::*;
use itertools::Itertools;

/// Distinct sales states.
pub fn states(dataset: &AnalysisDataset) -> Result<Vec<String>> {
    Ok(string_values(dataset.sales_long(), STATE)?
        .into_iter()
        .flatten()
        .unique()
        .collect())
}

pub fn metros_in_state(dataset: &AnalysisDataset, state: &str) -> Result<Vec<String>> {
    let sales = dataset.sales_long();
    let states = string_values(sales, STATE)?;
    let metros = string_values(sales, METRO)?;

    Ok(states
        .into_iter()
        .zip(metros)
        .filter(|(s, _)| s.as_deref() == Some(state))
        .filter_map(|(_, metro)| metro)
        .unique()
        .collect())
}

/// Sales-side FIPS codes of the regions in one metro of one state.
pub fn fips_codes_for_metro(
    dataset: &AnalysisDataset,
    state: &str,
    metro: &str,
) -> Result<Vec<String>> {
    let sales = dataset.sales_long();
    let states = string_values(sales, STATE)?;
    let metros = string_values(sales, METRO)?;
    let codes = string_values(sales, FIPS_CODE)?;

    Ok(states
        .into_iter()
        .zip(metros)
        .zip(codes)
        .filter(|((s, m), _)| s.as_deref() == Some(state) && m.as_deref() == Some(metro))
        .filter_map(|(_, code)| code)
        .unique()
        .collect())
}

/// Rental county names for a set of FIPS codes. An empty set lists every county.
pub fn counties_for_fips(dataset: &AnalysisDataset, fips_codes: &[String]) -> Result<Vec<String>> {
    let rentals = filter_by_fips(dataset.rental_long(), fips_codes)?;
    Ok(string_values(&rentals, COUNTY_NAME)?
        .into_iter()
        .flatten()
        .unique()
        .collect())
}
