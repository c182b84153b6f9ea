//! Immutable configuration: metrics, regions, baseline policy and
//! per-panel display toggles.
//!
//! Everything the aggregation pipeline needs from the caller travels
//! through these structs, so the pipeline stays testable without any
//! ambient UI state.

use crate::error::{PanelError, Result};
use serde::{Deserialize, Serialize};

/// The two observed metrics, each backed by its own table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Metric {
    Rainfall,
    Temperature,
}

impl Metric {
    /// Name of the value column carrying this metric's observations.
    pub fn value_column(&self) -> &'static str {
        match self {
            Metric::Rainfall => "rainfall_mm",
            Metric::Temperature => "temperature",
        }
    }
}

/// Spatial scope of aggregation: a district, optionally narrowed to a
/// subcounty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Region {
    pub district: String,
    pub subcounty: Option<String>,
}

impl Region {
    /// Region covering a whole district.
    pub fn district(name: impl Into<String>) -> Self {
        Self {
            district: name.into(),
            subcounty: None,
        }
    }

    /// Region narrowed to a single subcounty.
    pub fn subcounty(district: impl Into<String>, subcounty: impl Into<String>) -> Self {
        Self {
            district: district.into(),
            subcounty: Some(subcounty.into()),
        }
    }

    /// Display label: the subcounty when one is selected, otherwise
    /// the district.
    pub fn label(&self) -> &str {
        self.subcounty.as_deref().unwrap_or(&self.district)
    }
}

/// An inclusive range of calendar years.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct YearRange {
    pub start: i32,
    pub end: i32,
}

impl YearRange {
    pub fn new(start: i32, end: i32) -> Result<Self> {
        if start > end {
            return Err(PanelError::InvalidParameter(format!(
                "Year range start {} is after end {}",
                start, end
            )));
        }
        Ok(Self { start, end })
    }

    pub fn contains(&self, year: i32) -> bool {
        (self.start..=self.end).contains(&year)
    }
}

/// Fixed per-metric aggregation policy: which years form the
/// climatological baseline and whether series are smoothed before
/// anomaly computation.
///
/// The policies differ on purpose. Rainfall arrives as monthly totals
/// whose monsoon-season spikes must survive, so it is never smoothed.
/// The satellite-derived temperature signal is noisy month to month at
/// this spatial aggregation, so every temperature series gets a
/// 3-month centered average before anomalies are taken.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetricSettings {
    pub metric: Metric,
    pub baseline_years: YearRange,
    /// Centered window width, `None` for unsmoothed metrics.
    pub smoothing_window: Option<usize>,
}

impl MetricSettings {
    /// CHIRPS rainfall: 1991-2020 baseline, no smoothing.
    pub fn rainfall() -> Self {
        Self {
            metric: Metric::Rainfall,
            baseline_years: YearRange {
                start: 1991,
                end: 2020,
            },
            smoothing_window: None,
        }
    }

    /// MODIS/VIIRS temperature: 2002-2020 baseline, window-3 smoothing.
    pub fn temperature() -> Self {
        Self {
            metric: Metric::Temperature,
            baseline_years: YearRange {
                start: 2002,
                end: 2020,
            },
            smoothing_window: Some(3),
        }
    }

    /// Label used for the baseline series in charts and exports.
    pub fn baseline_label(&self) -> String {
        format!(
            "LTM ({}–{})",
            self.baseline_years.start, self.baseline_years.end
        )
    }
}

/// Which of the derived series a panel should carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeriesToggles {
    pub show_baseline: bool,
    pub show_year_a: bool,
    pub show_year_b: bool,
    pub show_anomalies: bool,
}

impl SeriesToggles {
    pub fn all() -> Self {
        Self {
            show_baseline: true,
            show_year_a: true,
            show_year_b: true,
            show_anomalies: true,
        }
    }
}

impl Default for SeriesToggles {
    fn default() -> Self {
        Self {
            show_baseline: true,
            show_year_a: true,
            show_year_b: true,
            show_anomalies: false,
        }
    }
}

/// One dashboard request: the selected region, the two comparison
/// years and the per-metric display toggles. Immutable once built.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PanelRequest {
    pub region: Region,
    pub year_a: i32,
    pub year_b: i32,
    pub rainfall: SeriesToggles,
    pub temperature: SeriesToggles,
}

impl PanelRequest {
    /// Request with the default comparison years and toggles.
    pub fn new(region: Region) -> Self {
        Self {
            region,
            year_a: 2024,
            year_b: 2025,
            rainfall: SeriesToggles::default(),
            temperature: SeriesToggles::default(),
        }
    }

    pub fn with_years(mut self, year_a: i32, year_b: i32) -> Self {
        self.year_a = year_a;
        self.year_b = year_b;
        self
    }
}
