//! Environment-backed service configuration.

use std::env;

/// Execution environment name, defaulting to sandbox.
pub fn get_environment() -> String {
    env::var("ENVIRONMENT").unwrap_or_else(|_| "sandbox".to_string())
}

/// Market-data provider settings. Read once at startup and handed to
/// the fetch layer explicitly; the signal engine never sees these.
#[derive(Debug, Clone)]
pub struct ProviderConfig {
    pub base_url: String,
    pub api_key: String,
}

impl ProviderConfig {
    pub fn from_env() -> Self {
        Self {
            base_url: env::var("MARKET_DATA_BASE_URL")
                .unwrap_or_else(|_| "https://api.twelvedata.com".to_string()),
            api_key: env::var("MARKET_DATA_API_KEY").unwrap_or_default(),
        }
    }
}

/// Decimal places used when reporting price levels for a symbol.
///
/// Metals and crypto-style symbols quote to 2 places; six-letter
/// currency pairs to 5 (3 when quoted in JPY); anything unrecognized
/// falls back to 2.
pub fn decimal_places(symbol: &str) -> u32 {
    let s = symbol.to_ascii_uppercase();
    if s.starts_with("XAU") || s.starts_with("XAG") || s.starts_with("BTC") || s.starts_with("ETH")
    {
        return 2;
    }
    if s.len() == 6 && s.chars().all(|c| c.is_ascii_alphabetic()) {
        if s.ends_with("JPY") {
            return 3;
        }
        return 5;
    }
    2
}
