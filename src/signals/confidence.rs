//! Heuristic confidence scoring for synthesized signals.

use crate::models::signal::Trend;

const BASE_SCORE: f64 = 30.0;
const MIN_CONFIDENCE: f64 = 35.0;
const MAX_CONFIDENCE: f64 = 90.0;

/// EMA separation as a fraction of price, scaled into a 0-40 score.
/// A 1% fast/slow gap already saturates the component.
fn separation_score(ema_fast: f64, ema_slow: f64, price: f64) -> f64 {
    let separation = (ema_fast - ema_slow).abs() / price;
    (separation * 4000.0).min(40.0)
}

/// Momentum agreement with the trend. Mirrored around 50 for shorts.
fn rsi_score(trend: Trend, rsi: f64) -> f64 {
    match trend {
        Trend::Buy if rsi >= 55.0 => 30.0,
        Trend::Buy if rsi >= 50.0 => 15.0,
        Trend::Buy => 5.0,
        Trend::Sell if rsi <= 45.0 => 30.0,
        Trend::Sell if rsi <= 50.0 => 15.0,
        Trend::Sell => 5.0,
    }
}

/// Wide ranges relative to price read as lower-conviction setups.
fn volatility_penalty(atr: f64, price: f64) -> f64 {
    let ratio = atr / price;
    if ratio > 0.02 {
        20.0
    } else if ratio > 0.01 {
        10.0
    } else {
        0.0
    }
}

/// Confidence percentage for a signal, truncated to an integer and
/// clamped to [35, 90]. A heuristic weighting, not a probability.
pub fn confidence_score(
    trend: Trend,
    ema_fast: f64,
    ema_slow: f64,
    rsi: f64,
    atr: f64,
    price: f64,
) -> u8 {
    let raw = BASE_SCORE + separation_score(ema_fast, ema_slow, price) + rsi_score(trend, rsi)
        - volatility_penalty(atr, price);
    raw.clamp(MIN_CONFIDENCE, MAX_CONFIDENCE).trunc() as u8
}
