//! Error types for the climate_panel crate

use polars::prelude::PolarsError;
use thiserror::Error;

/// Custom error types for the climate_panel crate
#[derive(Debug, Error)]
pub enum PanelError {
    /// Input rows are missing expected columns or carry values that
    /// cannot be interpreted. Raised at load time, never silently
    /// coerced.
    #[error("Schema error: {0}")]
    SchemaError(String),

    /// Error related to data handling or aggregation
    #[error("Data error: {0}")]
    DataError(String),

    /// A selected district is not present in any loaded table
    #[error("Unknown region: {0}")]
    InvalidRegion(String),

    /// Error from invalid parameters
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// Error from IO operations
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// Error from Polars operations
    #[error("Polars error: {0}")]
    PolarsError(String),

    /// Error from CSV serialization
    #[error("CSV error: {0}")]
    CsvError(String),
}

/// Result type with our custom error
pub type Result<T> = std::result::Result<T, PanelError>;

impl From<PolarsError> for PanelError {
    fn from(err: PolarsError) -> Self {
        PanelError::PolarsError(err.to_string())
    }
}

impl From<csv::Error> for PanelError {
    fn from(err: csv::Error) -> Self {
        PanelError::CsvError(err.to_string())
    }
}

impl From<series_math::MathError> for PanelError {
    fn from(err: series_math::MathError) -> Self {
        PanelError::InvalidParameter(err.to_string())
    }
}
