//! Summary aggregators over the long tables.
//!
//! Rent and population summaries read rental-long, optionally narrowed to a set of FIPS codes
//! (an empty set means every county). The metro history reads sales-long.

use crate::data_utils::{date_values, f64_values, filter_by_fips, string_values};
use crate::dataset::{bedroom_count, AnalysisDataset};
use crate::error::Result;
use crate::outcome::QueryOutcome;
use crate::schema::*;
use chrono::NaiveDate;
use itertools::Itertools;
use polars::prelude::*;
use serde::Serialize;
use std::collections::HashMap;
use tracing::debug;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RentSummaryRow {
    pub bedroom_type: String,
    pub county_name: String,
    pub average_rent: f64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PopulationRow {
    pub county_name: String,
    pub population: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HistoryPoint {
    pub date: NaiveDate,
    pub value: f64,
}

/// Price history of one sales region.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RegionSeries {
    pub region_name: String,
    pub points: Vec<HistoryPoint>,
}

/// Mean rent per (bedroom type, county), ordered by bedroom count then county.
pub fn rent_summary(
    dataset: &AnalysisDataset,
    fips_codes: &[String],
) -> Result<QueryOutcome<Vec<RentSummaryRow>>> {
    let rentals = filter_by_fips(dataset.rental_long(), fips_codes)?;
    if rentals.height() == 0 {
        return Ok(QueryOutcome::Empty);
    }

    let grouped = rentals
        .lazy()
        .group_by_stable([col(BEDROOM_TYPE), col(COUNTY_NAME)])
        .agg([col(RENT).mean()])
        .collect()?;

    let bedrooms = string_values(&grouped, BEDROOM_TYPE)?;
    let counties = string_values(&grouped, COUNTY_NAME)?;
    let rents = f64_values(&grouped, RENT)?;

    let mut rows: Vec<RentSummaryRow> = bedrooms
        .into_iter()
        .zip(counties)
        .zip(rents)
        .filter_map(|((bedroom, county), rent)| {
            Some(RentSummaryRow {
                bedroom_type: bedroom?,
                county_name: county?,
                average_rent: rent?,
            })
        })
        .collect();
    rows.sort_by(|a, b| {
        (bedroom_count(&a.bedroom_type).ok(), &a.bedroom_type, &a.county_name).cmp(&(
            bedroom_count(&b.bedroom_type).ok(),
            &b.bedroom_type,
            &b.county_name,
        ))
    });

    debug!("Rent summary: {} rows", rows.len());
    Ok(QueryOutcome::from_rows(rows))
}

/// Distinct county populations, largest first.
pub fn population_summary(
    dataset: &AnalysisDataset,
    fips_codes: &[String],
) -> Result<QueryOutcome<Vec<PopulationRow>>> {
    let rentals = filter_by_fips(dataset.rental_long(), fips_codes)?;
    let counties = string_values(&rentals, COUNTY_NAME)?;
    let populations = f64_values(&rentals, POPULATION)?;

    Ok(QueryOutcome::from_rows(distinct_populations(counties, populations)))
}

/// Pairs are de-duplicated on the raw population and rounded afterwards, so two raw values
/// rounding to the same whole number stay as two rows.
fn distinct_populations(
    counties: Vec<Option<String>>,
    populations: Vec<Option<f64>>,
) -> Vec<PopulationRow> {
    let mut rows: Vec<PopulationRow> = counties
        .into_iter()
        .zip(populations)
        .filter_map(|(county, population)| Some((county?, population?.to_bits())))
        .unique()
        .map(|(county_name, bits)| PopulationRow {
            county_name,
            population: f64::from_bits(bits).round_ties_even() as i64,
        })
        .collect();
    rows.sort_by(|a, b| b.population.cmp(&a.population));
    rows
}

/// One price series per sales region in `metro`. An empty metro selects every region.
///
/// Points are in date order and null observations are left out; regions without a single
/// observation are not returned.
pub fn metro_history(
    dataset: &AnalysisDataset,
    metro: &str,
) -> Result<QueryOutcome<Vec<RegionSeries>>> {
    let sales = dataset.sales_long();
    let metros = string_values(sales, METRO)?;
    let regions = string_values(sales, REGION_NAME)?;
    let dates = date_values(sales, DATE)?;
    let values = f64_values(sales, VALUE)?;

    let mut series: Vec<RegionSeries> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();

    for (((row_metro, region), date), value) in metros.into_iter().zip(regions).zip(dates).zip(values) {
        if !metro.is_empty() && row_metro.as_deref() != Some(metro) {
            continue;
        }
        let (Some(region), Some(date), Some(value)) = (region, date, value) else {
            continue;
        };
        let slot = *index.entry(region.clone()).or_insert_with(|| {
            series.push(RegionSeries {
                region_name: region,
                points: Vec::new(),
            });
            series.len() - 1
        });
        series[slot].points.push(HistoryPoint { date, value });
    }

    for region in series.iter_mut() {
        region.points.sort_by_key(|p| p.date);
    }

    debug!("Metro history for '{}': {} regions", metro, series.len());
    Ok(QueryOutcome::from_rows(series))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::fixtures::dataset;

    fn codes(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    #[test]
    fn test_rent_summary_for_selected_counties() {
        let outcome = rent_summary(&dataset(), &codes(&["107399999", "100199999"])).unwrap();
        let rows = outcome.into_found().unwrap();
        let flat: Vec<(&str, &str, f64)> = rows
            .iter()
            .map(|r| (r.bedroom_type.as_str(), r.county_name.as_str(), r.average_rent))
            .collect();
        assert_eq!(
            flat,
            vec![
                ("Bedroom_0", "Autauga", 700.0),
                ("Bedroom_0", "Jefferson", 1000.0),
                ("Bedroom_2", "Autauga", 950.0),
                ("Bedroom_2", "Jefferson", 1400.0),
            ]
        );
    }

    #[test]
    fn test_rent_summary_no_match_is_empty() {
        let outcome = rent_summary(&dataset(), &codes(&["999999999"])).unwrap();
        assert_eq!(outcome, QueryOutcome::Empty);
    }

    #[test]
    fn test_population_summary_is_unique_and_descending() {
        let rows = population_summary(&dataset(), &[]).unwrap().into_found().unwrap();
        assert_eq!(
            rows,
            vec![
                PopulationRow { county_name: "Santa Clara".into(), population: 1_936_259 },
                PopulationRow { county_name: "Jefferson".into(), population: 674_721 },
                PopulationRow { county_name: "Autauga".into(), population: 58_805 },
                PopulationRow { county_name: "Loving".into(), population: 64 },
            ]
        );
    }

    #[test]
    fn test_population_dedupes_raw_values_before_rounding() {
        let county = |name: &str| Some(name.to_string());
        let rows = distinct_populations(
            vec![county("Jefferson"), county("Jefferson"), county("Jefferson"), county("Loving")],
            vec![Some(674_720.6), Some(674_720.6), Some(674_721.2), Some(64.0)],
        );
        assert_eq!(
            rows,
            vec![
                PopulationRow { county_name: "Jefferson".into(), population: 674_721 },
                PopulationRow { county_name: "Jefferson".into(), population: 674_721 },
                PopulationRow { county_name: "Loving".into(), population: 64 },
            ]
        );
    }

    #[test]
    fn test_metro_history_skips_null_observations() {
        let series = metro_history(&dataset(), "Montgomery, AL")
            .unwrap()
            .into_found()
            .unwrap();
        assert_eq!(series.len(), 1);
        assert_eq!(series[0].region_name, "Autauga County");
        assert_eq!(
            series[0].points,
            vec![HistoryPoint {
                date: NaiveDate::from_ymd_opt(2023, 10, 31).unwrap(),
                value: 210_000.0
            }]
        );
    }

    #[test]
    fn test_metro_history_all_regions_in_date_order() {
        let series = metro_history(&dataset(), "").unwrap().into_found().unwrap();
        let names: Vec<&str> = series.iter().map(|s| s.region_name.as_str()).collect();
        assert_eq!(
            names,
            vec!["Santa Clara County", "Autauga County", "Jefferson County", "Nowhere County"]
        );
        let jefferson: Vec<NaiveDate> = series[2].points.iter().map(|p| p.date).collect();
        assert!(jefferson.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_metro_history_unknown_metro() {
        let outcome = metro_history(&dataset(), "Atlantis, XX").unwrap();
        assert_eq!(outcome, QueryOutcome::Empty);
    }
}
