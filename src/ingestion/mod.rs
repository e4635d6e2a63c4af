//! Ingestion - loads the two source CSVs into validated wide tables

pub mod csv_loader;

pub use csv_loader::{load_rental_csv, load_sales_csv, RawRentalTable, RawSalesTable};
