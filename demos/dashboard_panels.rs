//! End-to-end demo: synthesizes the two observation files, builds both
//! dashboard panels for a sample district and prints the chart series
//! plus the CSV exports.
//!
//! ```sh
//! RUST_LOG=debug cargo run --example dashboard_panels
//! ```

use climate_panel::{
    export_file_name, panel_to_csv, DataStore, MetricPanel, PanelRequest, Region, SeriesToggles,
    MONTH_LABELS,
};
use std::error::Error;
use std::fmt::Write as _;
use std::fs;
use std::path::{Path, PathBuf};

fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let dir = tempfile::tempdir()?;
    let (rainfall_path, temperature_path) = write_sample_files(dir.path())?;

    let mut store = DataStore::new(rainfall_path, temperature_path);
    println!("districts: {:?}", store.districts()?);
    println!("subcounties of Gulu: {:?}\n", store.subcounties("Gulu")?);

    let mut request = PanelRequest::new(Region::district("Gulu"));
    request.rainfall = SeriesToggles::all();
    request.temperature = SeriesToggles::all();

    let panels = store.panels(&request)?;
    print_panel("Rainfall (mm)", &panels.rainfall);
    print_panel("Temperature (°C)", &panels.temperature);

    for panel in [&panels.rainfall, &panels.temperature] {
        println!("--- {} ---", export_file_name(panel, &request.region));
        println!("{}", panel_to_csv(panel)?);
    }

    Ok(())
}

fn print_panel(title: &str, panel: &MetricPanel) {
    println!("{}", title);
    for (label, series) in panel.series() {
        let mut line = format!("  {:>16}:", label);
        for value in series.values() {
            match value {
                Some(value) => {
                    let _ = write!(line, " {:>7.1}", value);
                }
                None => line.push_str("       -"),
            }
        }
        println!("{}", line);
    }
    println!("  {:>16}: {}\n", "months", MONTH_LABELS.join("     "));
}

/// Seasonal sample data: a rainy-season bump for rainfall, a mild
/// annual cycle for temperature, with 2024/2025 shifted off the
/// baseline so anomalies are visible.
fn write_sample_files(dir: &Path) -> Result<(PathBuf, PathBuf), Box<dyn Error>> {
    let mut rainfall = String::from("DNAME2024,SCNAME2024,date,rainfall_mm\n");
    for year in (1991..=2020).chain([2024, 2025]) {
        let shift = if year >= 2024 { 35.0 } else { 0.0 };
        for month in 1..=12u32 {
            // twin peaks around April and October
            let seasonal = 60.0
                + 80.0 * (-((month as f64 - 4.0) / 1.5).powi(2)).exp()
                + 95.0 * (-((month as f64 - 10.0) / 1.5).powi(2)).exp();
            for subcounty in ["Omoro", "Paicho"] {
                writeln!(
                    rainfall,
                    "Gulu,{},{}-{:02}-15,{:.1}",
                    subcounty,
                    year,
                    month,
                    seasonal + shift
                )?;
            }
        }
    }
    let rainfall_path = dir.join("cleaned_rainfall.csv");
    fs::write(&rainfall_path, rainfall)?;

    let mut temperature = String::from("district,subcounty,date,temperature\n");
    for year in (2002..=2020).chain([2024, 2025]) {
        let shift = if year >= 2024 { 1.2 } else { 0.0 };
        for month in 1..=12u32 {
            let seasonal = 26.0 + 3.0 * ((month as f64 - 2.0) * std::f64::consts::PI / 6.0).cos();
            for subcounty in ["Omoro", "Paicho"] {
                writeln!(
                    temperature,
                    "Gulu,{},{}-{:02}-15,{:.1}",
                    subcounty,
                    year,
                    month,
                    seasonal + shift
                )?;
            }
        }
    }
    let temperature_path = dir.join("temp_data.csv");
    fs::write(&temperature_path, temperature)?;

    Ok((rainfall_path, temperature_path))
}
