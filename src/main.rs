use rental_screener::config::ScreenerConfig;
use rental_screener::dataset::AnalysisDataset;
use rental_screener::links::selected_county_links;
use rental_screener::outcome::QueryOutcome;
use rental_screener::screener::{screen, ScreenCriteria};
use rental_screener::{selectors, summary};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde::Serialize;
use std::path::PathBuf;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "rental-screener")]
#[command(about = "Rank US counties by expected rental ROI from HUD rents and Zillow sale prices")]
#[command(version)]
struct Args {
    /// JSON config file (paths and screen defaults)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Rental rate CSV (overrides config and RENTAL_CSV)
    #[arg(long, global = true)]
    rental_csv: Option<PathBuf>,

    /// Home sales CSV (overrides config and SALES_CSV)
    #[arg(long, global = true)]
    sales_csv: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Rank counties by expected annual rental ROI
    Screen {
        /// Observation date, e.g. 2023-11-30 or 11/30/2023
        #[arg(long)]
        as_of: Option<String>,

        #[arg(long)]
        min_price: Option<f64>,

        #[arg(long)]
        min_population: Option<f64>,

        /// Minimum ROI as a ratio (0.10 = 10%)
        #[arg(long)]
        min_roi: Option<f64>,

        /// Print an HTML table instead of JSON
        #[arg(long)]
        html: bool,
    },
    /// Mean rent per bedroom type and county
    RentSummary {
        /// FIPS codes to include (repeatable; none = all counties)
        #[arg(long = "fips")]
        fips: Vec<String>,
    },
    /// County populations, largest first
    Population {
        #[arg(long = "fips")]
        fips: Vec<String>,
    },
    /// Sale price history of every region in a metro
    History {
        /// Metro name; empty selects every region
        #[arg(default_value = "")]
        metro: String,
    },
    /// Foreclosure and rental listing links for a county
    Links { county: String, state: String },
    /// Picker options: states, metros of a state, or counties of a metro
    Options {
        #[arg(long)]
        state: Option<String>,

        #[arg(long)]
        metro: Option<String>,
    },
}

#[derive(Serialize)]
struct MetroOptions {
    fips_codes: Vec<String>,
    counties: Vec<String>,
}

fn main() -> Result<()> {
    // Load environment variables from .env file
    dotenv::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let mut config = ScreenerConfig::resolve(args.config.as_deref()).context("Failed to resolve configuration")?;
    if let Some(path) = args.rental_csv {
        config.rental_csv = path;
    }
    if let Some(path) = args.sales_csv {
        config.sales_csv = path;
    }

    if let Commands::Links { county, state } = &args.command {
        return print_json(&selected_county_links(county, state));
    }

    info!("Rental screener starting...");
    let dataset = AnalysisDataset::load(&config.rental_csv, &config.sales_csv)
        .map_err(|e| {
            error!("Failed to build analysis dataset: {}", e);
            e
        })
        .with_context(|| {
            format!(
                "Failed to load {} and {}",
                config.rental_csv.display(),
                config.sales_csv.display()
            )
        })?;

    match args.command {
        Commands::Screen { as_of, min_price, min_population, min_roi, html } => {
            run_screen(&dataset, &config.screen, as_of, min_price, min_population, min_roi, html)
        }
        Commands::RentSummary { fips } => print_json(&summary::rent_summary(&dataset, &fips)?),
        Commands::Population { fips } => print_json(&summary::population_summary(&dataset, &fips)?),
        Commands::History { metro } => print_json(&summary::metro_history(&dataset, &metro)?),
        Commands::Options { state, metro } => run_options(&dataset, state, metro),
        Commands::Links { .. } => Ok(()),
    }
}

fn run_screen(
    dataset: &AnalysisDataset,
    defaults: &ScreenCriteria,
    as_of: Option<String>,
    min_price: Option<f64>,
    min_population: Option<f64>,
    min_roi: Option<f64>,
    html: bool,
) -> Result<()> {
    let period = as_of.unwrap_or_else(|| defaults.as_of.format("%Y-%m-%d").to_string());
    let criteria = ScreenCriteria::parse(
        &period,
        min_price.unwrap_or(defaults.min_price),
        min_population.unwrap_or(defaults.min_population),
        min_roi.unwrap_or(defaults.min_roi),
    );

    let criteria = match criteria {
        QueryOutcome::Found(criteria) => criteria,
        other => return print_json(&other),
    };

    let ranked = screen(dataset, &criteria)?;
    if html {
        println!("{}", ranked.to_html());
        Ok(())
    } else {
        print_json(&QueryOutcome::from_rows(ranked.markets().to_vec()))
    }
}

fn run_options(dataset: &AnalysisDataset, state: Option<String>, metro: Option<String>) -> Result<()> {
    match (state, metro) {
        (Some(state), Some(metro)) => {
            let fips_codes = selectors::fips_codes_for_metro(dataset, &state, &metro)?;
            let counties = if fips_codes.is_empty() {
                Vec::new()
            } else {
                selectors::counties_for_fips(dataset, &fips_codes)?
            };
            print_json(&MetroOptions { fips_codes, counties })
        }
        (Some(state), None) => print_json(&selectors::metros_in_state(dataset, &state)?),
        _ => print_json(&selectors::states(dataset)?),
    }
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
