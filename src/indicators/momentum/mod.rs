pub mod rsi;

pub use rsi::{rsi_series, DEFAULT_RSI_PERIOD};
