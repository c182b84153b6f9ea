//! Observation tables: CSV loading, header normalization, region
//! filtering and monthly-mean aggregation.

use crate::config::{MetricSettings, Region, YearRange};
use crate::error::{PanelError, Result};
use chrono::{Datelike, NaiveDate, NaiveDateTime};
use polars::prelude::*;
use series_math::{MonthlySeries, MONTHS};
use std::collections::BTreeSet;
use std::fs::File;
use std::path::Path;

const DISTRICT_COLUMN: &str = "district";
const SUBCOUNTY_COLUMN: &str = "subcounty";
const DATE_COLUMN: &str = "date";
const YEAR_COLUMN: &str = "year";
const MONTH_COLUMN: &str = "month";

/// Renames applied after header normalization. The upstream rainfall
/// export labels its admin columns with the boundary-set year.
const COLUMN_RENAMES: [(&str, &str); 2] = [
    ("dname2024", DISTRICT_COLUMN),
    ("scname2024", SUBCOUNTY_COLUMN),
];

/// Date formats accepted in the `date` column, tried in order.
const DATE_FORMATS: [&str; 3] = ["%Y-%m-%d", "%Y/%m/%d", "%d/%m/%Y"];

/// A loaded observation table for one metric.
///
/// Headers are already normalized and the calendar `year`/`month`
/// columns derived, so every consumer sees the same shape regardless
/// of which upstream export the rows came from. The collection is
/// immutable once loaded.
#[derive(Debug, Clone)]
pub struct ObservationTable {
    df: DataFrame,
    settings: MetricSettings,
}

/// Loader for observation tables
#[derive(Debug)]
pub struct TableLoader;

impl TableLoader {
    /// Load an observation table from a CSV file.
    ///
    /// Fails fast on missing columns, unparseable dates and
    /// non-numeric value cells rather than producing silently wrong
    /// aggregates later.
    pub fn from_csv<P: AsRef<Path>>(path: P, settings: &MetricSettings) -> Result<ObservationTable> {
        let file = File::open(path.as_ref())?;
        let df = CsvReader::new(file)
            .infer_schema(None)
            .has_header(true)
            .finish()?;

        tracing::debug!(
            rows = df.height(),
            metric = ?settings.metric,
            path = %path.as_ref().display(),
            "read observation csv"
        );
        Self::from_dataframe(df, settings)
    }

    /// Create an observation table from an existing DataFrame.
    pub fn from_dataframe(mut df: DataFrame, settings: &MetricSettings) -> Result<ObservationTable> {
        normalize_headers(&mut df)?;

        require_column(&df, DISTRICT_COLUMN)?;
        require_column(&df, DATE_COLUMN)?;
        require_column(&df, settings.metric.value_column())?;

        // Surface non-numeric value cells at load time
        column_values(&df, settings.metric.value_column())?;

        let (years, months) = derive_year_month(&df)?;
        df.with_column(Series::new(YEAR_COLUMN, years))?;
        df.with_column(Series::new(MONTH_COLUMN, months))?;

        Ok(ObservationTable {
            df,
            settings: settings.clone(),
        })
    }
}

impl ObservationTable {
    /// Get the underlying DataFrame
    pub fn dataframe(&self) -> &DataFrame {
        &self.df
    }

    /// The aggregation policy this table was loaded under.
    pub fn settings(&self) -> &MetricSettings {
        &self.settings
    }

    /// Number of observation rows
    pub fn len(&self) -> usize {
        self.df.height()
    }

    /// Check if the table has no rows
    pub fn is_empty(&self) -> bool {
        self.df.height() == 0
    }

    /// Distinct districts present in the table, sorted, blanks dropped.
    pub fn districts(&self) -> Result<Vec<String>> {
        let names = self.df.column(DISTRICT_COLUMN)?.utf8()?;
        let set: BTreeSet<String> = names
            .into_iter()
            .flatten()
            .filter(|name| !name.trim().is_empty())
            .map(|name| name.to_string())
            .collect();
        Ok(set.into_iter().collect())
    }

    /// Distinct subcounties of a district, sorted, blanks dropped.
    /// Tables without a subcounty column yield an empty list.
    pub fn subcounties(&self, district: &str) -> Result<Vec<String>> {
        if !self.has_column(SUBCOUNTY_COLUMN) {
            return Ok(Vec::new());
        }

        let districts = self.df.column(DISTRICT_COLUMN)?.utf8()?;
        let subcounties = self.df.column(SUBCOUNTY_COLUMN)?.utf8()?;

        let mut set = BTreeSet::new();
        for (name, subcounty) in districts.into_iter().zip(subcounties.into_iter()) {
            if name == Some(district) {
                if let Some(subcounty) = subcounty {
                    if !subcounty.trim().is_empty() {
                        set.insert(subcounty.to_string());
                    }
                }
            }
        }
        Ok(set.into_iter().collect())
    }

    /// Restrict the table to one region.
    ///
    /// A region absent from the data yields an empty table, which
    /// aggregates to an all-missing series further down; it is not an
    /// error at this layer.
    pub fn filter_region(&self, region: &Region) -> Result<ObservationTable> {
        let districts = self.df.column(DISTRICT_COLUMN)?.utf8()?;
        let mut mask: BooleanChunked = districts
            .into_iter()
            .map(|name| name == Some(region.district.as_str()))
            .collect();

        if let Some(subcounty) = &region.subcounty {
            if self.has_column(SUBCOUNTY_COLUMN) {
                let subcounties = self.df.column(SUBCOUNTY_COLUMN)?.utf8()?;
                let subcounty_mask: BooleanChunked = subcounties
                    .into_iter()
                    .map(|name| name == Some(subcounty.as_str()))
                    .collect();
                mask = &mask & &subcounty_mask;
            } else {
                // a subcounty was requested but the table has none
                mask = (0..self.df.height()).map(|_| false).collect();
            }
        }

        Ok(ObservationTable {
            df: self.df.filter(&mask)?,
            settings: self.settings.clone(),
        })
    }

    /// Mean of the metric value per calendar month over an inclusive
    /// year range, reindexed to all 12 months.
    ///
    /// Duplicate observations within a month are averaged together.
    /// Null value cells are skipped. Months with no observations are
    /// missing in the result; an empty table yields an all-missing
    /// series rather than an error.
    pub fn monthly_mean(&self, year_min: i32, year_max: i32) -> Result<MonthlySeries> {
        let range = YearRange::new(year_min, year_max)?;

        let years = self.df.column(YEAR_COLUMN)?.i32()?;
        let months = self.df.column(MONTH_COLUMN)?.u32()?;
        let values = column_values(&self.df, self.settings.metric.value_column())?;

        let mut sums = [0.0f64; MONTHS];
        let mut counts = [0usize; MONTHS];

        for ((year, month), value) in years
            .into_iter()
            .zip(months.into_iter())
            .zip(values.into_iter())
        {
            let (year, month) = match (year, month) {
                (Some(year), Some(month)) => (year, month),
                _ => continue,
            };
            let value = match value {
                Some(value) => value,
                None => continue,
            };
            if !range.contains(year) {
                continue;
            }
            // months come from chrono, always 1-12
            let idx = (month as usize) - 1;
            sums[idx] += value;
            counts[idx] += 1;
        }

        let mut series = MonthlySeries::missing();
        for idx in 0..MONTHS {
            if counts[idx] > 0 {
                series.set(idx as u32 + 1, Some(sums[idx] / counts[idx] as f64))?;
            }
        }
        Ok(series)
    }

    fn has_column(&self, name: &str) -> bool {
        self.df.get_column_names().iter().any(|column| *column == name)
    }
}

/// Lowercase and trim every header, then apply the upstream renames.
fn normalize_headers(df: &mut DataFrame) -> Result<()> {
    let normalized: Vec<String> = df
        .get_column_names()
        .iter()
        .map(|name| name.trim().to_lowercase())
        .collect();
    df.set_column_names(&normalized)?;

    for (from, to) in COLUMN_RENAMES {
        if df.get_column_names().iter().any(|name| *name == from) {
            df.rename(from, to)?;
        }
    }
    Ok(())
}

fn require_column(df: &DataFrame, name: &str) -> Result<()> {
    if df.get_column_names().iter().any(|column| *column == name) {
        Ok(())
    } else {
        Err(PanelError::SchemaError(format!(
            "Required column '{}' not found; got: {}",
            name,
            df.get_column_names().join(", ")
        )))
    }
}

/// Parse the date column into calendar year and month vectors.
fn derive_year_month(df: &DataFrame) -> Result<(Vec<i32>, Vec<u32>)> {
    let column = df.column(DATE_COLUMN)?;
    let mut years = Vec::with_capacity(df.height());
    let mut months = Vec::with_capacity(df.height());

    match column.dtype() {
        DataType::Utf8 => {
            for (row, raw) in column.utf8()?.into_iter().enumerate() {
                let raw = raw.ok_or_else(|| {
                    PanelError::SchemaError(format!("Empty date in row {}", row))
                })?;
                let date = parse_date(raw).ok_or_else(|| {
                    PanelError::SchemaError(format!("Unparseable date '{}' in row {}", raw, row))
                })?;
                years.push(date.year());
                months.push(date.month());
            }
        }
        DataType::Date => {
            for (row, days) in column.date()?.into_iter().enumerate() {
                let days = days.ok_or_else(|| {
                    PanelError::SchemaError(format!("Empty date in row {}", row))
                })?;
                // polars Date is days since the Unix epoch
                let date = NaiveDate::from_num_days_from_ce_opt(days + 719_163).ok_or_else(
                    || PanelError::SchemaError(format!("Out-of-range date in row {}", row)),
                )?;
                years.push(date.year());
                months.push(date.month());
            }
        }
        other => {
            return Err(PanelError::SchemaError(format!(
                "Date column has unsupported type {:?}",
                other
            )));
        }
    }

    Ok((years, months))
}

fn parse_date(raw: &str) -> Option<NaiveDate> {
    let trimmed = raw.trim();
    for format in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(trimmed, format) {
            return Some(date);
        }
    }
    NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%d %H:%M:%S")
        .ok()
        .map(|datetime| datetime.date())
}

/// Get a column as per-row `Option<f64>` values, preserving nulls.
fn column_values(df: &DataFrame, column_name: &str) -> Result<Vec<Option<f64>>> {
    let column = df.column(column_name).map_err(|e| {
        PanelError::SchemaError(format!("Column '{}' not found: {}", column_name, e))
    })?;

    match column.dtype() {
        DataType::Float64 => Ok(column.f64()?.into_iter().collect()),
        DataType::Float32 => Ok(column
            .f32()?
            .into_iter()
            .map(|value| value.map(|v| v as f64))
            .collect()),
        DataType::Int64 => Ok(column
            .i64()?
            .into_iter()
            .map(|value| value.map(|v| v as f64))
            .collect()),
        DataType::Int32 => Ok(column
            .i32()?
            .into_iter()
            .map(|value| value.map(|v| v as f64))
            .collect()),
        _ => Err(PanelError::SchemaError(format!(
            "Column '{}' cannot be interpreted as numeric values",
            column_name
        ))),
    }
}
