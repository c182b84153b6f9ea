//! The calendar-month series type shared by every aggregation stage

use crate::{MathError, Result};
use serde::{Deserialize, Serialize};

/// Number of slots in every series: one per calendar month.
pub const MONTHS: usize = 12;

/// Month labels in calendar order, used for chart axes and CSV export.
pub const MONTH_LABELS: [&str; MONTHS] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// A year-of-months series with one slot per calendar month (1-12).
///
/// A series always carries exactly 12 entries in month order. A month
/// with no underlying observations holds `None` rather than being
/// dropped, so consumers can rely on positional alignment when
/// subtracting or zipping series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlySeries {
    values: [Option<f64>; MONTHS],
}

impl MonthlySeries {
    /// Create a series with every month missing.
    pub fn missing() -> Self {
        Self {
            values: [None; MONTHS],
        }
    }

    /// Create a series from 12 month slots in calendar order.
    pub fn from_values(values: [Option<f64>; MONTHS]) -> Self {
        Self { values }
    }

    /// Create a series from a vector of month slots in calendar order.
    pub fn from_vec(values: Vec<Option<f64>>) -> Result<Self> {
        let len = values.len();
        let values: [Option<f64>; MONTHS] = values.try_into().map_err(|_| {
            MathError::InvalidInput(format!(
                "A monthly series needs exactly {} entries, got {}",
                MONTHS, len
            ))
        })?;
        Ok(Self { values })
    }

    /// Create a series with the same value in every month.
    pub fn constant(value: f64) -> Self {
        Self {
            values: [Some(value); MONTHS],
        }
    }

    /// Value for a calendar month (1-12). Months outside that range
    /// yield `None`, same as a missing observation.
    pub fn value(&self, month: u32) -> Option<f64> {
        if (1..=MONTHS as u32).contains(&month) {
            self.values[(month - 1) as usize]
        } else {
            None
        }
    }

    /// Set the value for a calendar month (1-12).
    pub fn set(&mut self, month: u32, value: Option<f64>) -> Result<()> {
        if !(1..=MONTHS as u32).contains(&month) {
            return Err(MathError::InvalidInput(format!(
                "Month must be in 1-12, got {}",
                month
            )));
        }
        self.values[(month - 1) as usize] = value;
        Ok(())
    }

    /// The 12 month slots in calendar order.
    pub fn values(&self) -> &[Option<f64>; MONTHS] {
        &self.values
    }

    /// Iterate months as `(month, value)` pairs, months 1 through 12.
    pub fn iter(&self) -> impl Iterator<Item = (u32, Option<f64>)> + '_ {
        self.values
            .iter()
            .enumerate()
            .map(|(idx, value)| (idx as u32 + 1, *value))
    }

    /// True when no month carries a value. An all-missing series is a
    /// valid aggregation result, not an error.
    pub fn is_all_missing(&self) -> bool {
        self.values.iter().all(Option::is_none)
    }
}

impl Default for MonthlySeries {
    fn default() -> Self {
        Self::missing()
    }
}
