//! Injected data-access layer with explicit cache invalidation.
//!
//! The two observation files are read once and held in memory; a
//! cached table is reloaded when the file's modification time changes
//! or when `refresh` is called. Nothing here is memoized globally, so
//! two stores over the same files stay independent.

use crate::config::{Metric, MetricSettings, PanelRequest};
use crate::data::{ObservationTable, TableLoader};
use crate::error::{PanelError, Result};
use crate::panel::{build_metric_panel, DashboardPanels};
use std::collections::BTreeSet;
use std::path::PathBuf;
use std::time::SystemTime;

#[derive(Debug)]
struct CachedTable {
    path: PathBuf,
    settings: MetricSettings,
    loaded: Option<(SystemTime, ObservationTable)>,
}

impl CachedTable {
    fn new(path: PathBuf, settings: MetricSettings) -> Self {
        Self {
            path,
            settings,
            loaded: None,
        }
    }

    fn table(&mut self) -> Result<&ObservationTable> {
        let modified = std::fs::metadata(&self.path)?.modified()?;
        if matches!(&self.loaded, Some((seen, _)) if *seen != modified) {
            self.loaded = None;
        }

        match &mut self.loaded {
            Some((_, table)) => {
                tracing::debug!(path = %self.path.display(), "observation table cache hit");
                Ok(table)
            }
            slot => {
                tracing::info!(
                    path = %self.path.display(),
                    metric = ?self.settings.metric,
                    "loading observation table"
                );
                let table = TableLoader::from_csv(&self.path, &self.settings)?;
                let (_, table) = slot.insert((modified, table));
                Ok(table)
            }
        }
    }

    fn invalidate(&mut self) {
        self.loaded = None;
    }
}

/// Data store over the rainfall and temperature tables.
#[derive(Debug)]
pub struct DataStore {
    rainfall: CachedTable,
    temperature: CachedTable,
}

impl DataStore {
    /// Store over the two observation files with the default metric
    /// policies.
    pub fn new(rainfall_path: impl Into<PathBuf>, temperature_path: impl Into<PathBuf>) -> Self {
        Self::with_settings(
            rainfall_path,
            MetricSettings::rainfall(),
            temperature_path,
            MetricSettings::temperature(),
        )
    }

    /// Store with custom per-metric policies, mainly for tests and
    /// alternate baselines.
    pub fn with_settings(
        rainfall_path: impl Into<PathBuf>,
        rainfall_settings: MetricSettings,
        temperature_path: impl Into<PathBuf>,
        temperature_settings: MetricSettings,
    ) -> Self {
        Self {
            rainfall: CachedTable::new(rainfall_path.into(), rainfall_settings),
            temperature: CachedTable::new(temperature_path.into(), temperature_settings),
        }
    }

    /// The cached table for a metric, reloading it if the backing file
    /// changed since the last read.
    pub fn table(&mut self, metric: Metric) -> Result<&ObservationTable> {
        match metric {
            Metric::Rainfall => self.rainfall.table(),
            Metric::Temperature => self.temperature.table(),
        }
    }

    /// Drop both cached tables; the next access reloads from disk.
    pub fn refresh(&mut self) {
        self.rainfall.invalidate();
        self.temperature.invalidate();
    }

    /// Sorted union of the districts present in either table.
    pub fn districts(&mut self) -> Result<Vec<String>> {
        let mut set: BTreeSet<String> = self.rainfall.table()?.districts()?.into_iter().collect();
        set.extend(self.temperature.table()?.districts()?);
        Ok(set.into_iter().collect())
    }

    /// Sorted union of a district's subcounties across both tables.
    ///
    /// Unlike the aggregation path, this is a validation surface:
    /// asking for a district neither table knows is an error.
    pub fn subcounties(&mut self, district: &str) -> Result<Vec<String>> {
        if !self.districts()?.iter().any(|name| name == district) {
            return Err(PanelError::InvalidRegion(district.to_string()));
        }

        let mut set: BTreeSet<String> = self
            .rainfall
            .table()?
            .subcounties(district)?
            .into_iter()
            .collect();
        set.extend(self.temperature.table()?.subcounties(district)?);
        Ok(set.into_iter().collect())
    }

    /// Build both chart panels for one request. The region filter is
    /// applied identically to both metrics, so anomaly comparisons
    /// stay region-consistent.
    pub fn panels(&mut self, request: &PanelRequest) -> Result<DashboardPanels> {
        let rainfall = build_metric_panel(
            self.rainfall.table()?,
            &request.region,
            &request.rainfall,
            request.year_a,
            request.year_b,
        )?;
        let temperature = build_metric_panel(
            self.temperature.table()?,
            &request.region,
            &request.temperature,
            request.year_a,
            request.year_b,
        )?;

        Ok(DashboardPanels {
            rainfall,
            temperature,
        })
    }
}
