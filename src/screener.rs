//! Market Screener
//!
//! Filters the merged dataset to one observation date and a set of thresholds, averages each
//! county, and ranks counties by expected annual rental ROI.

use crate::data_utils::{date_values, f64_values, string_values};
use crate::dataset::{parse_header_date, AnalysisDataset};
use crate::error::Result;
use crate::format::{dollars, html_table, percent, thousands};
use crate::links::{links_for, ListingLinks, RentalTarget};
use crate::outcome::QueryOutcome;
use crate::schema::*;
use chrono::NaiveDate;
use polars::prelude::*;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use tracing::{debug, info};

/// Observation date and minimum thresholds for one screen.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScreenCriteria {
    pub as_of: NaiveDate,
    pub min_price: f64,
    pub min_population: f64,
    pub min_roi: f64,
}

impl Default for ScreenCriteria {
    fn default() -> Self {
        Self {
            as_of: NaiveDate::from_ymd_opt(2023, 11, 30).unwrap_or_default(),
            min_price: 50_000.0,
            min_population: 500_000.0,
            min_roi: 0.10,
        }
    }
}

impl ScreenCriteria {
    /// Build criteria from a presentation-supplied period string.
    ///
    /// Accepts ISO dates (`2023-11-30`) as well as the sales header forms (`11/30/2023`).
    pub fn parse(
        period: &str,
        min_price: f64,
        min_population: f64,
        min_roi: f64,
    ) -> QueryOutcome<ScreenCriteria> {
        let period = period.trim();
        let as_of = if period.contains('-') {
            parse_iso_date(period)
        } else {
            parse_header_date(period)
        };

        match as_of {
            Some(as_of) => QueryOutcome::Found(ScreenCriteria {
                as_of,
                min_price,
                min_population,
                min_roi,
            }),
            None => QueryOutcome::ParseError(format!("Unrecognised date: '{}'", period)),
        }
    }
}

/// `YYYY-MM-DD` with a four-digit year only.
fn parse_iso_date(period: &str) -> Option<NaiveDate> {
    let year = period.split('-').next()?;
    if year.len() != 4 {
        return None;
    }
    NaiveDate::parse_from_str(period, "%Y-%m-%d").ok()
}

/// Twelve months of rent over the property value.
pub fn rental_roi(monthly_rent: f64, property_value: f64) -> f64 {
    monthly_rent * 12.0 / property_value
}

/// One county that passed the screen, with its group averages.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScreenedMarket {
    pub metro: String,
    pub county_name: String,
    pub state_postal_code: String,
    pub fips_code: String,
    pub population: f64,
    pub average_rent: f64,
    pub average_property_value: f64,
    pub expected_annual_roi: f64,
    pub links: ListingLinks,
}

impl ScreenedMarket {
    /// Display cells in ranked-table column order.
    pub fn display_row(&self) -> Vec<String> {
        vec![
            self.metro.clone(),
            self.county_name.clone(),
            thousands(self.population),
            dollars(self.average_rent),
            dollars(self.average_property_value),
            percent(self.expected_annual_roi),
            self.links.foreclosure_anchor(),
            self.links.rental_anchor(),
        ]
    }
}

/// Screen result, sorted by descending expected ROI.
#[derive(Debug, Clone, Default, Serialize)]
pub struct RankedMarkets {
    markets: Vec<ScreenedMarket>,
}

impl RankedMarkets {
    pub fn markets(&self) -> &[ScreenedMarket] {
        &self.markets
    }

    pub fn len(&self) -> usize {
        self.markets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.markets.is_empty()
    }

    /// Formatted table with the full ranked column schema, even when no market passed.
    pub fn to_dataframe(&self) -> Result<DataFrame> {
        let rows: Vec<Vec<String>> = self.markets.iter().map(ScreenedMarket::display_row).collect();
        let columns: Vec<Series> = RANKED_COLUMNS
            .iter()
            .enumerate()
            .map(|(i, name)| {
                let cells: Vec<String> = rows.iter().map(|row| row[i].clone()).collect();
                Series::new(name, cells)
            })
            .collect();
        Ok(DataFrame::new(columns)?)
    }

    pub fn to_html(&self) -> String {
        let rows: Vec<Vec<String>> = self.markets.iter().map(ScreenedMarket::display_row).collect();
        html_table(&RANKED_COLUMNS, &rows)
    }
}

/// Rank counties in the merged dataset against `criteria`.
///
/// An observation date with no data, or thresholds nothing passes, give an empty ranking.
pub fn screen(dataset: &AnalysisDataset, criteria: &ScreenCriteria) -> Result<RankedMarkets> {
    debug!("Screening with {:?}", criteria);

    let merged = dataset.merged();
    let on_date: BooleanChunked = date_values(merged, DATE)?
        .into_iter()
        .map(|d| d == Some(criteria.as_of))
        .collect();
    let mut observed = merged.filter(&on_date)?;
    let observed_rows = observed.height();

    // Whole units, halves to even.
    let rounded: Vec<Option<f64>> = f64_values(&observed, VALUE)?
        .into_iter()
        .map(|v| v.map(f64::round_ties_even))
        .collect();
    observed.with_column(Series::new(VALUE, rounded))?;

    let grouped = observed
        .lazy()
        .with_column((col(RENT) * lit(12.0) / col(VALUE)).alias(RENTAL_ROI))
        .filter(
            col(VALUE)
                .gt(lit(0.0))
                .and(col(VALUE).gt_eq(lit(criteria.min_price)))
                .and(col(POPULATION).gt_eq(lit(criteria.min_population)))
                .and(col(RENTAL_ROI).gt_eq(lit(criteria.min_roi))),
        )
        .group_by_stable([
            col(METRO),
            col(COUNTY_NAME),
            col(STATE_POSTAL_CODE),
            col(FIPS_CODE),
        ])
        .agg([
            col(POPULATION).mean(),
            col(RENT).mean(),
            col(VALUE).mean(),
            col(RENTAL_ROI).mean(),
        ])
        .collect()?;

    let mut markets = extract_markets(&grouped)?;
    markets.sort_by(|a, b| {
        b.expected_annual_roi
            .partial_cmp(&a.expected_annual_roi)
            .unwrap_or(Ordering::Equal)
    });

    info!(
        "Screen as of {}: {} observations on date, {} counties passed",
        criteria.as_of,
        observed_rows,
        markets.len()
    );

    Ok(RankedMarkets { markets })
}

fn extract_markets(grouped: &DataFrame) -> Result<Vec<ScreenedMarket>> {
    let metros = string_values(grouped, METRO)?;
    let counties = string_values(grouped, COUNTY_NAME)?;
    let states = string_values(grouped, STATE_POSTAL_CODE)?;
    let codes = string_values(grouped, FIPS_CODE)?;
    let populations = f64_values(grouped, POPULATION)?;
    let rents = f64_values(grouped, RENT)?;
    let values = f64_values(grouped, VALUE)?;
    let rois = f64_values(grouped, RENTAL_ROI)?;

    let mut markets = Vec::with_capacity(grouped.height());
    for i in 0..grouped.height() {
        let (Some(metro), Some(county), Some(state), Some(code)) = (
            metros[i].clone(),
            counties[i].clone(),
            states[i].clone(),
            codes[i].clone(),
        ) else {
            continue;
        };
        let (Some(population), Some(rent), Some(value), Some(roi)) =
            (populations[i], rents[i], values[i], rois[i])
        else {
            continue;
        };

        let links = links_for(&county, &state, RentalTarget::HousesOnly);
        markets.push(ScreenedMarket {
            metro,
            county_name: county,
            state_postal_code: state,
            fips_code: code,
            population,
            average_rent: rent,
            average_property_value: value,
            expected_annual_roi: roi,
            links,
        });
    }
    Ok(markets)
}
