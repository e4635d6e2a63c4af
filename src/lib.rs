pub mod config;
pub mod data_utils;
pub mod dataset;
pub mod error;
pub mod format;
pub mod ingestion;
pub mod keys;
pub mod links;
pub mod outcome;
pub mod reshape;
pub mod schema;
pub mod screener;
pub mod selectors;
pub mod summary;

pub use config::ScreenerConfig;
pub use dataset::AnalysisDataset;
pub use error::{Result, ScreenerError};
pub use outcome::QueryOutcome;
pub use screener::{screen, RankedMarkets, ScreenCriteria};
