use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One time-boxed OHLC price bar.
///
/// Series are ordered oldest first. The engine assumes numeric
/// well-formedness but does not validate OHLC consistency (that the
/// high bounds the open/close, etc.) — that is the data source's job.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Candle {
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: f64,
    pub timestamp: DateTime<Utc>,
}

impl Candle {
    pub fn new(
        open: f64,
        high: f64,
        low: f64,
        close: f64,
        volume: f64,
        timestamp: DateTime<Utc>,
    ) -> Self {
        Self {
            open,
            high,
            low,
            close,
            volume,
            timestamp,
        }
    }
}
