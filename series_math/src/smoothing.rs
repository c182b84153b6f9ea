//! Centered moving average smoothing for monthly series

use crate::monthly::{MonthlySeries, MONTHS};
use crate::{MathError, Result};

/// Smooth a monthly series with a centered moving average.
///
/// Each month is replaced by the mean of the non-missing values inside
/// a window centered on it. The window shrinks at the series
/// boundaries, so January and December average over whatever neighbors
/// exist instead of becoming missing. A month is missing in the output
/// only when every value in its window is missing; a single present
/// value is enough to produce a mean.
///
/// The window must be odd so the average stays centered.
pub fn centered_moving_average(series: &MonthlySeries, window: usize) -> Result<MonthlySeries> {
    if window == 0 || window % 2 == 0 {
        return Err(MathError::InvalidInput(format!(
            "Window must be a positive odd number, got {}",
            window
        )));
    }

    let half = window / 2;
    let values = series.values();
    let mut smoothed = MonthlySeries::missing();

    for idx in 0..MONTHS {
        let lo = idx.saturating_sub(half);
        let hi = (idx + half).min(MONTHS - 1);

        let present: Vec<f64> = values[lo..=hi].iter().filter_map(|v| *v).collect();
        if !present.is_empty() {
            let mean = present.iter().sum::<f64>() / present.len() as f64;
            smoothed.set(idx as u32 + 1, Some(mean))?;
        }
    }

    Ok(smoothed)
}
