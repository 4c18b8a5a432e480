//! RSI (Relative Strength Index) indicator
//!
//! RSI = 100 - (100 / (1 + RS))
//! RS = Average Gain / Average Loss

use crate::common::math;
use crate::indicators::IndicatorError;

pub const DEFAULT_RSI_PERIOD: usize = 14;

/// A zero average loss maps to RSI = 100 exactly, never an error.
fn rsi_value(avg_gain: f64, avg_loss: f64) -> f64 {
    if avg_loss == 0.0 {
        return 100.0;
    }
    let rs = avg_gain / avg_loss;
    100.0 - (100.0 / (1.0 + rs))
}

/// Calculate the RSI series for a period.
///
/// Needs `period + 1` values for any defined output. Seed averages are
/// the arithmetic means of the first `period` gains/losses, putting the
/// first defined value at index `period`; later values use Wilder's
/// smoothing `(avg * (period - 1) + step) / period`. Every defined
/// element lies in [0, 100].
pub fn rsi_series(values: &[f64], period: usize) -> Result<Vec<Option<f64>>, IndicatorError> {
    if period == 0 {
        return Err(IndicatorError::InvalidPeriod(period));
    }

    let mut out = vec![None; values.len()];
    if values.len() < period + 1 {
        return Ok(out);
    }

    let mut gains = Vec::with_capacity(values.len() - 1);
    let mut losses = Vec::with_capacity(values.len() - 1);
    for w in values.windows(2) {
        let diff = w[1] - w[0];
        gains.push(diff.max(0.0));
        losses.push((-diff).max(0.0));
    }

    let mut avg_gain = math::mean(&gains[..period]);
    let mut avg_loss = math::mean(&losses[..period]);
    out[period] = Some(rsi_value(avg_gain, avg_loss));

    let p = period as f64;
    for i in period + 1..values.len() {
        // Gain/loss at step i lives at index i - 1 of the diff arrays.
        avg_gain = (avg_gain * (p - 1.0) + gains[i - 1]) / p;
        avg_loss = (avg_loss * (p - 1.0) + losses[i - 1]) / p;
        out[i] = Some(rsi_value(avg_gain, avg_loss));
    }

    Ok(out)
}
