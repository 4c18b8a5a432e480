//! Twelve Data REST provider for historical OHLC series.
//!
//! Calls the `time_series` endpoint and converts its stringly-typed
//! bars into candles. The API returns bars newest first; they are
//! reversed to oldest first before handing off to the engine.

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::Deserialize;
use tracing::debug;

use crate::config::ProviderConfig;
use crate::models::candle::Candle;
use crate::services::market_data::{MarketDataProvider, ProviderError};

pub struct TwelveDataProvider {
    client: reqwest::Client,
    config: ProviderConfig,
}

#[derive(Debug, Deserialize)]
struct TimeSeriesResponse {
    #[serde(default)]
    status: Option<String>,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    values: Vec<RawBar>,
}

#[derive(Debug, Deserialize)]
struct RawBar {
    datetime: String,
    open: String,
    high: String,
    low: String,
    close: String,
    #[serde(default)]
    volume: Option<String>,
}

impl TwelveDataProvider {
    pub fn new(config: ProviderConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            config,
        }
    }

    fn map_interval(timeframe: &str) -> Result<&'static str, ProviderError> {
        match timeframe {
            "1m" => Ok("1min"),
            "5m" => Ok("5min"),
            "15m" => Ok("15min"),
            "30m" => Ok("30min"),
            "1h" => Ok("1h"),
            "4h" => Ok("4h"),
            "1d" => Ok("1day"),
            other => Err(ProviderError::Rejected(format!(
                "unsupported timeframe: {other}"
            ))),
        }
    }
}

#[async_trait]
impl MarketDataProvider for TwelveDataProvider {
    async fn fetch_candles(
        &self,
        symbol: &str,
        timeframe: &str,
        limit: usize,
    ) -> Result<Vec<Candle>, ProviderError> {
        let interval = Self::map_interval(timeframe)?;
        let url = format!("{}/time_series", self.config.base_url);

        let response = self
            .client
            .get(&url)
            .query(&[
                ("symbol", symbol.to_string()),
                ("interval", interval.to_string()),
                ("outputsize", limit.to_string()),
                ("apikey", self.config.api_key.clone()),
            ])
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(ProviderError::Rejected(format!(
                "upstream returned status {}",
                response.status()
            )));
        }

        let body: TimeSeriesResponse = response.json().await?;
        if matches!(body.status.as_deref(), Some("error")) {
            return Err(ProviderError::Rejected(
                body.message
                    .unwrap_or_else(|| "unspecified provider error".to_string()),
            ));
        }

        let mut candles = Vec::with_capacity(body.values.len());
        for bar in body.values {
            candles.push(parse_bar(bar)?);
        }
        candles.reverse();

        debug!(
            symbol = %symbol,
            interval = %interval,
            count = candles.len(),
            "fetched candle series"
        );
        Ok(candles)
    }
}

fn parse_bar(bar: RawBar) -> Result<Candle, ProviderError> {
    let timestamp = parse_datetime(&bar.datetime)?;
    let volume = bar
        .volume
        .as_deref()
        .and_then(|v| v.parse().ok())
        .unwrap_or(0.0);

    Ok(Candle::new(
        parse_price(&bar.open)?,
        parse_price(&bar.high)?,
        parse_price(&bar.low)?,
        parse_price(&bar.close)?,
        volume,
        timestamp,
    ))
}

fn parse_price(raw: &str) -> Result<f64, ProviderError> {
    raw.parse()
        .map_err(|_| ProviderError::BadPayload(format!("non-numeric price field: {raw}")))
}

/// Intraday bars carry a full timestamp; daily bars only a date.
fn parse_datetime(raw: &str) -> Result<DateTime<Utc>, ProviderError> {
    if let Ok(dt) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S") {
        return Ok(dt.and_utc());
    }
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        if let Some(dt) = date.and_hms_opt(0, 0, 0) {
            return Ok(dt.and_utc());
        }
    }
    Err(ProviderError::BadPayload(format!(
        "unparseable datetime: {raw}"
    )))
}
