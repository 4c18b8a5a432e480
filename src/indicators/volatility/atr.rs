//! ATR (Average True Range) indicator
//!
//! ATR measures market volatility by smoothing true range over a period.

use crate::common::math;
use crate::indicators::IndicatorError;

pub const DEFAULT_ATR_PERIOD: usize = 14;

/// Calculate the ATR series for a period.
///
/// The three series must have equal length; `period + 1` closes are
/// needed for any defined output. The seed at index `period` is the
/// arithmetic mean of the first `period` true ranges; later elements
/// use Wilder's smoothing `(prev * (period - 1) + tr) / period`.
/// Output length always equals `close.len()`, and every defined
/// element is >= 0.
pub fn atr_series(
    high: &[f64],
    low: &[f64],
    close: &[f64],
    period: usize,
) -> Result<Vec<Option<f64>>, IndicatorError> {
    if period == 0 {
        return Err(IndicatorError::InvalidPeriod(period));
    }
    if high.len() != close.len() || low.len() != close.len() {
        return Err(IndicatorError::LengthMismatch {
            high: high.len(),
            low: low.len(),
            close: close.len(),
        });
    }

    let mut out = vec![None; close.len()];
    if close.len() < period + 1 {
        return Ok(out);
    }

    let mut trs = Vec::with_capacity(close.len() - 1);
    for i in 1..close.len() {
        trs.push(math::true_range(high[i], low[i], close[i - 1]));
    }

    let p = period as f64;
    let mut atr = math::mean(&trs[..period]);
    out[period] = Some(atr);

    for i in period + 1..close.len() {
        atr = (atr * (p - 1.0) + trs[i - 1]) / p;
        out[i] = Some(atr);
    }

    Ok(out)
}
