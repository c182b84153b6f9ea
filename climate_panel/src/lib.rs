//! # Climate Panel
//!
//! A Rust library for district rainfall and temperature climatology
//! panels: monthly means against a long-term baseline, centered
//! smoothing, anomaly series and CSV export.
//!
//! ## Features
//!
//! - CSV loading with header normalization for the cleaned rainfall
//!   and temperature exports
//! - Region filtering by district with optional subcounty narrowing
//! - Monthly-mean aggregation over a configurable baseline or a single
//!   year, always reindexed to all 12 calendar months
//! - Per-metric smoothing policy: temperature series pass through a
//!   3-month centered average, rainfall series never do
//! - Anomaly series with missing-propagation
//! - An injected [`DataStore`] that caches tables and reloads when the
//!   backing file changes
//!
//! ## Quick Start
//!
//! ```no_run
//! use climate_panel::{panel_to_csv, DataStore, PanelRequest, Region};
//!
//! let mut store = DataStore::new("cleaned_rainfall.csv", "temp_data.csv");
//!
//! let mut request = PanelRequest::new(Region::district("Gulu"));
//! request.rainfall.show_anomalies = true;
//!
//! let panels = store.panels(&request)?;
//! println!("{}", panel_to_csv(&panels.rainfall)?);
//! # Ok::<(), climate_panel::PanelError>(())
//! ```

pub mod config;
pub mod data;
pub mod error;
pub mod export;
pub mod panel;
pub mod store;

// Re-export commonly used types
pub use crate::config::{Metric, MetricSettings, PanelRequest, Region, SeriesToggles, YearRange};
pub use crate::data::{ObservationTable, TableLoader};
pub use crate::error::PanelError;
pub use crate::export::{export_file_name, panel_to_csv};
pub use crate::panel::{build_metric_panel, DashboardPanels, MetricPanel};
pub use crate::store::DataStore;
pub use series_math::{MonthlySeries, MONTH_LABELS};

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const NAME: &str = env!("CARGO_PKG_NAME");
