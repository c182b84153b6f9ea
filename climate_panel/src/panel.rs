//! Panel assembly: the derived series one chart panel needs.

use crate::config::{Metric, Region, SeriesToggles};
use crate::data::ObservationTable;
use crate::error::{PanelError, Result};
use serde::Serialize;
use series_math::{anomaly, centered_moving_average, MonthlySeries};

/// The derived series for one metric's chart panel.
///
/// Each field is present only when the corresponding toggle asked for
/// it; a present series always carries all 12 months, possibly with
/// missing entries.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MetricPanel {
    pub metric: Metric,
    pub baseline_label: String,
    pub year_a: i32,
    pub year_b: i32,
    pub baseline: Option<MonthlySeries>,
    pub series_a: Option<MonthlySeries>,
    pub series_b: Option<MonthlySeries>,
    pub anomaly_a: Option<MonthlySeries>,
    pub anomaly_b: Option<MonthlySeries>,
}

impl MetricPanel {
    /// The present series with their display labels, in chart order.
    pub fn series(&self) -> Vec<(String, &MonthlySeries)> {
        let mut named = Vec::new();
        if let Some(series) = &self.baseline {
            named.push((self.baseline_label.clone(), series));
        }
        if let Some(series) = &self.series_a {
            named.push((self.year_a.to_string(), series));
        }
        if let Some(series) = &self.series_b {
            named.push((self.year_b.to_string(), series));
        }
        if let Some(series) = &self.anomaly_a {
            named.push((format!("{} Anomaly", self.year_a), series));
        }
        if let Some(series) = &self.anomaly_b {
            named.push((format!("{} Anomaly", self.year_b), series));
        }
        named
    }

    /// Serialize the panel to JSON
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string(self).map_err(|e| PanelError::DataError(e.to_string()))
    }
}

/// Both chart panels for one request.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardPanels {
    pub rainfall: MetricPanel,
    pub temperature: MetricPanel,
}

impl DashboardPanels {
    /// Serialize both panels to JSON
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string(self).map_err(|e| PanelError::DataError(e.to_string()))
    }
}

/// Build one metric's panel from its observation table.
///
/// The region filter is applied first, then the baseline and the two
/// comparison years are aggregated to monthly means. When the metric's
/// policy smooths, every series is smoothed before the anomalies are
/// taken, so chart and anomaly views stay consistent. Anomalies are
/// always derived from the internally-computed baseline and year
/// series, even when those toggles are off.
pub fn build_metric_panel(
    table: &ObservationTable,
    region: &Region,
    toggles: &SeriesToggles,
    year_a: i32,
    year_b: i32,
) -> Result<MetricPanel> {
    let settings = table.settings().clone();
    let scoped = table.filter_region(region)?;

    tracing::debug!(
        metric = ?settings.metric,
        district = %region.district,
        rows = scoped.len(),
        "aggregating region slice"
    );

    let baseline = scoped.monthly_mean(settings.baseline_years.start, settings.baseline_years.end)?;
    let series_a = scoped.monthly_mean(year_a, year_a)?;
    let series_b = scoped.monthly_mean(year_b, year_b)?;

    let (baseline, series_a, series_b) = match settings.smoothing_window {
        Some(window) => (
            centered_moving_average(&baseline, window)?,
            centered_moving_average(&series_a, window)?,
            centered_moving_average(&series_b, window)?,
        ),
        None => (baseline, series_a, series_b),
    };

    let (anomaly_a, anomaly_b) = if toggles.show_anomalies {
        (
            Some(anomaly(&series_a, &baseline)),
            Some(anomaly(&series_b, &baseline)),
        )
    } else {
        (None, None)
    };

    Ok(MetricPanel {
        metric: settings.metric,
        baseline_label: settings.baseline_label(),
        year_a,
        year_b,
        baseline: toggles.show_baseline.then_some(baseline),
        series_a: toggles.show_year_a.then_some(series_a),
        series_b: toggles.show_year_b.then_some(series_b),
        anomaly_a,
        anomaly_b,
    })
}
