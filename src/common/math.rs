//! Shared numeric helpers for indicator calculations.

/// Arithmetic mean. Returns 0.0 for an empty slice; indicator code
/// only calls this after checking it has enough history.
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// True Range of a bar given the previous close.
///
/// `max(high - low, |high - prev_close|, |low - prev_close|)`, always >= 0.
pub fn true_range(high: f64, low: f64, prev_close: f64) -> f64 {
    let hl = high - low;
    let hc = (high - prev_close).abs();
    let lc = (low - prev_close).abs();
    hl.max(hc).max(lc)
}

/// Round to a fixed number of decimal places.
pub fn round_to(value: f64, decimals: u32) -> f64 {
    let factor = 10f64.powi(decimals as i32);
    (value * factor).round() / factor
}
