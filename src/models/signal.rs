use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Trade direction at the latest bar. Binary by policy: the engine
/// never emits a neutral/wait state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Trend {
    Buy,
    Sell,
}

/// Raw indicator values at the latest bar, reported alongside the
/// signal for transparency/debugging. Unrounded.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct IndicatorSnapshot {
    pub ema_fast: f64,
    pub ema_slow: f64,
    pub rsi: f64,
    pub atr: f64,
}

/// A synthesized trading signal. Created fresh per evaluation and
/// never mutated afterwards.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Signal {
    pub trend: Trend,
    pub entry: f64,
    pub stop_loss: f64,
    pub take_profit: f64,
    /// Heuristic percentage in [35, 90], not a calibrated probability.
    pub confidence: u8,
    pub indicators: IndicatorSnapshot,
    pub generated_at: DateTime<Utc>,
}
