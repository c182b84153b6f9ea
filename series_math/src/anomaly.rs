//! Anomaly series: deviation of an observed year from its baseline

use crate::monthly::{MonthlySeries, MONTHS};

/// Elementwise difference between an observed series and its baseline.
///
/// A month missing in either input is missing in the result; sparsity
/// propagates instead of turning into a fake zero.
pub fn anomaly(observed: &MonthlySeries, baseline: &MonthlySeries) -> MonthlySeries {
    let mut values = [None; MONTHS];
    for idx in 0..MONTHS {
        values[idx] = match (observed.values()[idx], baseline.values()[idx]) {
            (Some(obs), Some(base)) => Some(obs - base),
            _ => None,
        };
    }
    MonthlySeries::from_values(values)
}
