pub mod atr;

pub use atr::{atr_series, DEFAULT_ATR_PERIOD};
