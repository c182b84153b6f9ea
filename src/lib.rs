//! Workspace facade for the climate panel crates.
//!
//! Pulls the member crates together so downstream code can depend on a
//! single package:
//!
//! - [`climate_panel`] for loading, aggregation, panels and export
//! - [`series_math`] for the month-indexed series type and its math

pub use climate_panel;
pub use series_math;
