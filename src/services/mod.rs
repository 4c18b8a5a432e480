pub mod market_data;
pub mod twelvedata;

pub use market_data::{MarketDataProvider, ProviderError};
