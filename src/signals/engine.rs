//! Signal synthesis engine: OHLC series in, trend + risk levels out.
//!
//! Pure and synchronous. The engine never fetches data and never
//! defaults a missing indicator value; synthesis is all-or-nothing
//! per invocation.

use chrono::Utc;
use thiserror::Error;

use crate::common::math;
use crate::indicators::momentum::{rsi_series, DEFAULT_RSI_PERIOD};
use crate::indicators::trend::ema_series;
use crate::indicators::volatility::{atr_series, DEFAULT_ATR_PERIOD};
use crate::indicators::IndicatorError;
use crate::models::candle::Candle;
use crate::models::signal::{IndicatorSnapshot, Signal, Trend};
use crate::signals::confidence::confidence_score;

/// Indicator periods and risk parameters for synthesis.
#[derive(Debug, Clone, Copy)]
pub struct EngineConfig {
    pub fast_ema_period: usize,
    pub slow_ema_period: usize,
    pub rsi_period: usize,
    pub atr_period: usize,
    /// Stop-loss distance as a multiple of ATR.
    pub atr_multiple: f64,
    /// Take-profit distance as a multiple of the stop-loss distance.
    pub reward_risk: f64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            fast_ema_period: 50,
            slow_ema_period: 200,
            rsi_period: DEFAULT_RSI_PERIOD,
            atr_period: DEFAULT_ATR_PERIOD,
            atr_multiple: 1.2,
            reward_risk: 2.0,
        }
    }
}

#[derive(Debug, Error)]
pub enum SignalError {
    #[error("insufficient history: need at least {required} candles, got {got}")]
    InsufficientData { required: usize, got: usize },

    #[error("indicators not ready at the latest bar")]
    NotReady,

    #[error(transparent)]
    Indicator(#[from] IndicatorError),
}

pub struct SignalEngine {
    config: EngineConfig,
}

impl SignalEngine {
    pub fn new(config: EngineConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Minimum series length for every latest indicator value to be
    /// defined: one bar past the slowest warm-up window.
    pub fn min_candles(&self) -> usize {
        let c = &self.config;
        (c.slow_ema_period + 1)
            .max(c.fast_ema_period + 1)
            .max(c.rsi_period + 1)
            .max(c.atr_period + 1)
    }

    /// Synthesize a signal from an oldest-first candle series.
    ///
    /// Reported price levels are rounded to `precision` decimal
    /// places. The stop distance is rounded before the levels are
    /// derived so that `|tp - entry| = rr * |entry - sl|` holds
    /// exactly on the reported numbers.
    pub fn evaluate(&self, candles: &[Candle], precision: u32) -> Result<Signal, SignalError> {
        let required = self.min_candles();
        if candles.len() < required {
            return Err(SignalError::InsufficientData {
                required,
                got: candles.len(),
            });
        }

        let closes: Vec<f64> = candles.iter().map(|c| c.close).collect();
        let highs: Vec<f64> = candles.iter().map(|c| c.high).collect();
        let lows: Vec<f64> = candles.iter().map(|c| c.low).collect();

        let ema_fast = last_defined(&ema_series(&closes, self.config.fast_ema_period)?)?;
        let ema_slow = last_defined(&ema_series(&closes, self.config.slow_ema_period)?)?;
        let rsi = last_defined(&rsi_series(&closes, self.config.rsi_period)?)?;
        let atr = last_defined(&atr_series(&highs, &lows, &closes, self.config.atr_period)?)?;

        let close = closes[closes.len() - 1];
        let trend = if ema_fast > ema_slow {
            Trend::Buy
        } else {
            Trend::Sell
        };

        let entry = math::round_to(close, precision);
        let risk = math::round_to(atr * self.config.atr_multiple, precision);
        let (stop_loss, take_profit) = match trend {
            Trend::Buy => (entry - risk, entry + risk * self.config.reward_risk),
            Trend::Sell => (entry + risk, entry - risk * self.config.reward_risk),
        };

        let confidence = confidence_score(trend, ema_fast, ema_slow, rsi, atr, close);

        Ok(Signal {
            trend,
            entry,
            stop_loss,
            take_profit,
            confidence,
            indicators: IndicatorSnapshot {
                ema_fast,
                ema_slow,
                rsi,
                atr,
            },
            generated_at: Utc::now(),
        })
    }
}

impl Default for SignalEngine {
    fn default() -> Self {
        Self::new(EngineConfig::default())
    }
}

fn last_defined(series: &[Option<f64>]) -> Result<f64, SignalError> {
    series.last().copied().flatten().ok_or(SignalError::NotReady)
}
