//! EMA (Exponential Moving Average) indicator

use crate::common::math;
use crate::indicators::IndicatorError;

/// Calculate the EMA series for a period.
///
/// The output is aligned index-for-index with the input: the first
/// `period - 1` elements are `None` (warm-up), the element at
/// `period - 1` is seeded with the SMA of the first `period` values,
/// and each later element follows `value * k + prev * (1 - k)` with
/// `k = 2 / (period + 1)`. Causal one-pass recurrence, no lookahead.
pub fn ema_series(values: &[f64], period: usize) -> Result<Vec<Option<f64>>, IndicatorError> {
    if period == 0 {
        return Err(IndicatorError::InvalidPeriod(period));
    }

    let mut out = vec![None; values.len()];
    if values.len() < period {
        return Ok(out);
    }

    let k = 2.0 / (period as f64 + 1.0);
    let mut prev = math::mean(&values[..period]);
    out[period - 1] = Some(prev);

    for i in period..values.len() {
        prev = values[i] * k + prev * (1.0 - k);
        out[i] = Some(prev);
    }

    Ok(out)
}
