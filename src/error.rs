use thiserror::Error;

#[derive(Error, Debug)]
pub enum ScreenerError {
    #[error("Load error: {0}")]
    Load(String),

    #[error("Missing column '{column}' in {table} table")]
    MissingColumn { table: String, column: String },

    #[error("Bedroom column '{0}' has no bedroom count in its label")]
    InvalidBedroomLabel(String),

    #[error("Frame error: {0}")]
    Frame(String),

    #[error("Config error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl From<polars::error::PolarsError> for ScreenerError {
    fn from(err: polars::error::PolarsError) -> Self {
        ScreenerError::Frame(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, ScreenerError>;
