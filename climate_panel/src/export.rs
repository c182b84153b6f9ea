//! Delimited-text export of panel series.
//!
//! The export mirrors the chart: 12 rows labeled Jan through Dec, one
//! column per present series, missing entries left blank.

use crate::config::Region;
use crate::error::{PanelError, Result};
use crate::panel::MetricPanel;
use series_math::MONTH_LABELS;

/// Render a panel as CSV text.
pub fn panel_to_csv(panel: &MetricPanel) -> Result<String> {
    let named = panel.series();
    let mut writer = csv::Writer::from_writer(Vec::new());

    let mut header = vec!["Month".to_string()];
    header.extend(named.iter().map(|(label, _)| label.clone()));
    writer.write_record(&header)?;

    for (idx, month) in MONTH_LABELS.iter().enumerate() {
        let mut record = vec![month.to_string()];
        for (_, series) in &named {
            record.push(match series.values()[idx] {
                Some(value) => value.to_string(),
                None => String::new(),
            });
        }
        writer.write_record(&record)?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| PanelError::CsvError(e.to_string()))?;
    String::from_utf8(bytes).map_err(|e| PanelError::CsvError(e.to_string()))
}

/// Suggested download file name for a panel export.
pub fn export_file_name(panel: &MetricPanel, region: &Region) -> String {
    let metric = match panel.metric {
        crate::config::Metric::Rainfall => "rainfall",
        crate::config::Metric::Temperature => "temperature",
    };
    match &region.subcounty {
        Some(subcounty) => format!("{}_{}_{}.csv", metric, region.district, subcounty),
        None => format!("{}_{}.csv", metric, region.district),
    }
}
