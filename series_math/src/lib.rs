//! # Series Math
//!
//! Month-indexed series mathematics for climatology panels.
//! This crate provides the calendar-month series type plus the
//! smoothing and anomaly operations applied to monthly aggregates.

use thiserror::Error;

pub mod anomaly;
pub mod monthly;
pub mod smoothing;

pub use crate::anomaly::anomaly;
pub use crate::monthly::{MonthlySeries, MONTHS, MONTH_LABELS};
pub use crate::smoothing::centered_moving_average;

/// Errors that can occur in series calculations
#[derive(Error, Debug)]
pub enum MathError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Calculation error: {0}")]
    CalculationError(String),
}

/// Result type for series math operations
pub type Result<T> = std::result::Result<T, MathError>;
