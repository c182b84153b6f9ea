use climate_panel::{
    export_file_name, panel_to_csv, DataStore, PanelRequest, Region, SeriesToggles,
};
use std::fmt::Write as _;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Write the two observation files the way the upstream exports look:
/// rainfall with the year-stamped admin headers, temperature already
/// normalized. Rainfall is 100 mm across the baseline and 150 mm in
/// 2024; temperature is a constant 25 degrees everywhere.
fn write_sample_files(dir: &Path) -> (PathBuf, PathBuf) {
    let mut rainfall = String::from("DNAME2024,SCNAME2024,date,rainfall_mm\n");
    for year in (1991..=2020).chain([2024, 2025]) {
        let value = if year >= 2024 { 150.0 } else { 100.0 };
        for month in 1..=12 {
            writeln!(rainfall, "Gulu,Omoro,{}-{:02}-15,{}", year, month, value).unwrap();
        }
    }
    let rainfall_path = dir.join("cleaned_rainfall.csv");
    fs::write(&rainfall_path, rainfall).unwrap();

    let mut temperature = String::from("district,subcounty,date,temperature\n");
    for year in (2002..=2020).chain([2024, 2025]) {
        for month in 1..=12 {
            writeln!(temperature, "Gulu,Omoro,{}-{:02}-15,25.0", year, month).unwrap();
        }
    }
    let temperature_path = dir.join("temp_data.csv");
    fs::write(&temperature_path, temperature).unwrap();

    (rainfall_path, temperature_path)
}

#[test]
fn test_full_dashboard_workflow() {
    // 1. Create the observation files
    let dir = TempDir::new().unwrap();
    let (rainfall_path, temperature_path) = write_sample_files(dir.path());

    // 2. Open the store and inspect the region catalog
    let mut store = DataStore::new(rainfall_path, temperature_path);
    assert_eq!(store.districts().unwrap(), vec!["Gulu"]);
    assert_eq!(store.subcounties("Gulu").unwrap(), vec!["Omoro"]);

    // 3. Build both panels with anomalies switched on
    let mut request = PanelRequest::new(Region::district("Gulu"));
    request.rainfall = SeriesToggles::all();
    request.temperature = SeriesToggles::all();
    let panels = store.panels(&request).unwrap();

    // 4. Rainfall: baseline 100, 2024 at 150, anomaly +50 from raw means
    let rainfall = &panels.rainfall;
    assert_eq!(rainfall.baseline_label, "LTM (1991–2020)");
    for (_, value) in rainfall.baseline.as_ref().unwrap().iter() {
        assert_eq!(value, Some(100.0));
    }
    for (_, value) in rainfall.anomaly_a.as_ref().unwrap().iter() {
        assert_eq!(value, Some(50.0));
    }

    // 5. Temperature: constant series smooth to themselves, anomaly 0
    let temperature = &panels.temperature;
    assert_eq!(temperature.baseline_label, "LTM (2002–2020)");
    for (_, value) in temperature.series_a.as_ref().unwrap().iter() {
        assert_eq!(value, Some(25.0));
    }
    for (_, value) in temperature.anomaly_a.as_ref().unwrap().iter() {
        assert_eq!(value, Some(0.0));
    }

    // 6. Export: 12 month rows plus a header naming every series
    let csv = panel_to_csv(rainfall).unwrap();
    let lines: Vec<&str> = csv.lines().collect();
    assert_eq!(lines.len(), 13);
    assert_eq!(
        lines[0],
        "Month,LTM (1991–2020),2024,2025,2024 Anomaly,2025 Anomaly"
    );
    assert!(lines[1].starts_with("Jan,"));
    assert!(lines[12].starts_with("Dec,"));

    assert_eq!(
        export_file_name(rainfall, &request.region),
        "rainfall_Gulu.csv"
    );

    // 7. Panels serialize for downstream renderers
    let json = panels.to_json().unwrap();
    assert!(json.contains("rainfall"));
    assert!(json.contains("temperature"));
}

#[test]
fn test_unknown_region_gives_all_missing_panels() {
    let dir = TempDir::new().unwrap();
    let (rainfall_path, temperature_path) = write_sample_files(dir.path());
    let mut store = DataStore::new(rainfall_path, temperature_path);

    let request = PanelRequest::new(Region::district("Nowhere"));
    let panels = store.panels(&request).unwrap();

    assert!(panels.rainfall.baseline.as_ref().unwrap().is_all_missing());
    assert!(panels.rainfall.series_a.as_ref().unwrap().is_all_missing());
    assert!(panels
        .temperature
        .baseline
        .as_ref()
        .unwrap()
        .is_all_missing());
}

#[test]
fn test_subcounty_request_narrows_both_metrics() {
    let dir = TempDir::new().unwrap();
    let (rainfall_path, temperature_path) = write_sample_files(dir.path());
    let mut store = DataStore::new(rainfall_path, temperature_path);

    let request = PanelRequest::new(Region::subcounty("Gulu", "Omoro"));
    let panels = store.panels(&request).unwrap();

    assert_eq!(
        panels.rainfall.baseline.as_ref().unwrap().value(1),
        Some(100.0)
    );
    assert_eq!(
        panels.temperature.baseline.as_ref().unwrap().value(1),
        Some(25.0)
    );

    // a subcounty that exists nowhere behaves like an empty region
    let request = PanelRequest::new(Region::subcounty("Gulu", "Nowhere"));
    let panels = store.panels(&request).unwrap();
    assert!(panels.rainfall.baseline.as_ref().unwrap().is_all_missing());
}

#[test]
fn test_missing_entries_export_as_blank_cells() {
    let dir = TempDir::new().unwrap();

    // a single January observation leaves 11 months missing
    let rainfall_path = dir.path().join("cleaned_rainfall.csv");
    fs::write(
        &rainfall_path,
        "DNAME2024,SCNAME2024,date,rainfall_mm\nGulu,Omoro,2024-01-15,42.0\n",
    )
    .unwrap();
    let temperature_path = dir.path().join("temp_data.csv");
    fs::write(
        &temperature_path,
        "district,subcounty,date,temperature\nGulu,Omoro,2024-01-15,25.0\n",
    )
    .unwrap();

    let mut store = DataStore::new(rainfall_path, temperature_path);
    let panels = store.panels(&PanelRequest::new(Region::district("Gulu"))).unwrap();

    let csv = panel_to_csv(&panels.rainfall).unwrap();
    let lines: Vec<&str> = csv.lines().collect();
    assert_eq!(lines[1], "Jan,,42,");
    assert_eq!(lines[2], "Feb,,,");
}
