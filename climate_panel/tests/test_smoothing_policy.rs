//! The per-metric smoothing asymmetry: temperature series are smoothed
//! before anomalies, rainfall series never are.

use assert_approx_eq::assert_approx_eq;
use climate_panel::config::{MetricSettings, Region, SeriesToggles};
use climate_panel::data::{ObservationTable, TableLoader};
use climate_panel::panel::build_metric_panel;
use polars::prelude::*;

fn metric_table(
    settings: &MetricSettings,
    value_column: &str,
    rows: &[(&str, Option<f64>)],
) -> ObservationTable {
    let districts: Vec<&str> = rows.iter().map(|_| "Gulu").collect();
    let dates: Vec<&str> = rows.iter().map(|row| row.0).collect();
    let values: Vec<Option<f64>> = rows.iter().map(|row| row.1).collect();

    let df = DataFrame::new(vec![
        Series::new("district", districts),
        Series::new("date", dates),
        Series::new(value_column, values),
    ])
    .unwrap();

    TableLoader::from_dataframe(df, settings).unwrap()
}

/// One observation per month for a year, value = month * 10.
fn ramp_rows(year: i32) -> Vec<(String, Option<f64>)> {
    (1..=12)
        .map(|month| {
            (
                format!("{}-{:02}-15", year, month),
                Some(month as f64 * 10.0),
            )
        })
        .collect()
}

/// One observation per month, constant value.
fn flat_rows(year: i32, value: f64) -> Vec<(String, Option<f64>)> {
    (1..=12)
        .map(|month| (format!("{}-{:02}-15", year, month), Some(value)))
        .collect()
}

fn owned(rows: &[(String, Option<f64>)]) -> Vec<(&str, Option<f64>)> {
    rows.iter().map(|(date, value)| (date.as_str(), *value)).collect()
}

#[test]
fn test_rainfall_series_are_never_smoothed() {
    let rows = ramp_rows(2024);
    let table = metric_table(&MetricSettings::rainfall(), "rainfall_mm", &owned(&rows));

    let panel = build_metric_panel(
        &table,
        &Region::district("Gulu"),
        &SeriesToggles::all(),
        2024,
        2025,
    )
    .unwrap();

    // raw means survive untouched: January is 10, not mean(10, 20)
    let series_a = panel.series_a.unwrap();
    assert_eq!(series_a.value(1), Some(10.0));
    assert_eq!(series_a.value(12), Some(120.0));
}

#[test]
fn test_rainfall_anomaly_comes_from_raw_means() {
    // baseline years at 100 mm, observed year at 150 mm
    let mut rows = Vec::new();
    for year in 1991..=2020 {
        rows.extend(flat_rows(year, 100.0));
    }
    rows.extend(flat_rows(2024, 150.0));
    let table = metric_table(&MetricSettings::rainfall(), "rainfall_mm", &owned(&rows));

    let panel = build_metric_panel(
        &table,
        &Region::district("Gulu"),
        &SeriesToggles::all(),
        2024,
        2025,
    )
    .unwrap();

    let anomaly = panel.anomaly_a.unwrap();
    for (_, value) in anomaly.iter() {
        assert_eq!(value, Some(50.0));
    }
}

#[test]
fn test_temperature_series_are_smoothed_for_display() {
    let rows = ramp_rows(2024);
    let table = metric_table(&MetricSettings::temperature(), "temperature", &owned(&rows));

    let panel = build_metric_panel(
        &table,
        &Region::district("Gulu"),
        &SeriesToggles::all(),
        2024,
        2025,
    )
    .unwrap();

    // the window shrinks at the boundary: January is mean(10, 20)
    let series_a = panel.series_a.unwrap();
    assert_eq!(series_a.value(1), Some(15.0));
    assert_eq!(series_a.value(6), Some(60.0));
    assert_eq!(series_a.value(12), Some(115.0));
}

#[test]
fn test_temperature_anomaly_is_zero_when_year_matches_baseline() {
    // baseline years and the observed year share the seasonal pattern
    // t[m] = 20 + m, so the smoothed anomaly must vanish
    let pattern = |year: i32| -> Vec<(String, Option<f64>)> {
        (1..=12)
            .map(|month| {
                (
                    format!("{}-{:02}-15", year, month),
                    Some(20.0 + month as f64),
                )
            })
            .collect()
    };

    let mut rows = Vec::new();
    for year in 2002..=2020 {
        rows.extend(pattern(year));
    }
    rows.extend(pattern(2024));
    let table = metric_table(&MetricSettings::temperature(), "temperature", &owned(&rows));

    let panel = build_metric_panel(
        &table,
        &Region::district("Gulu"),
        &SeriesToggles::all(),
        2024,
        2025,
    )
    .unwrap();

    let anomaly = panel.anomaly_a.unwrap();
    for (month, value) in anomaly.iter() {
        let value = value.unwrap_or_else(|| panic!("month {} missing", month));
        assert_approx_eq!(value, 0.0, 1e-9);
    }
}

#[test]
fn test_anomalies_propagate_missing_months() {
    // baseline covers every month, the observed year only January
    let mut rows = Vec::new();
    for year in 1991..=2020 {
        rows.extend(flat_rows(year, 100.0));
    }
    rows.push(("2024-01-15".to_string(), Some(130.0)));
    let table = metric_table(&MetricSettings::rainfall(), "rainfall_mm", &owned(&rows));

    let panel = build_metric_panel(
        &table,
        &Region::district("Gulu"),
        &SeriesToggles::all(),
        2024,
        2025,
    )
    .unwrap();

    let anomaly = panel.anomaly_a.unwrap();
    assert_eq!(anomaly.value(1), Some(30.0));
    for month in 2..=12 {
        assert_eq!(anomaly.value(month), None);
    }

    // year B has no observations at all
    assert!(panel.anomaly_b.unwrap().is_all_missing());
}

#[test]
fn test_toggles_gate_the_exposed_series() {
    let rows = ramp_rows(2024);
    let table = metric_table(&MetricSettings::rainfall(), "rainfall_mm", &owned(&rows));

    let toggles = SeriesToggles {
        show_baseline: false,
        show_year_a: true,
        show_year_b: false,
        show_anomalies: false,
    };
    let panel = build_metric_panel(&table, &Region::district("Gulu"), &toggles, 2024, 2025).unwrap();

    assert!(panel.baseline.is_none());
    assert!(panel.series_a.is_some());
    assert!(panel.series_b.is_none());
    assert!(panel.anomaly_a.is_none());
    assert!(panel.anomaly_b.is_none());
    assert_eq!(panel.series().len(), 1);
}
