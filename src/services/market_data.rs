//! Market data provider interface.

use async_trait::async_trait;
use thiserror::Error;

use crate::models::candle::Candle;

#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("http transport error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("provider rejected request: {0}")]
    Rejected(String),

    #[error("unexpected provider payload: {0}")]
    BadPayload(String),
}

/// Source of historical OHLC candles for a symbol/timeframe pair.
///
/// Implementations own all network concerns (timeouts, upstream error
/// mapping); the signal engine only ever sees the resulting series.
#[async_trait]
pub trait MarketDataProvider: Send + Sync {
    /// Fetch up to `limit` candles, ordered oldest first.
    async fn fetch_candles(
        &self,
        symbol: &str,
        timeframe: &str,
        limit: usize,
    ) -> Result<Vec<Candle>, ProviderError>;
}
