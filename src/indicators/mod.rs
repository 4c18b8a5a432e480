pub mod error;

pub mod momentum;
pub mod trend;
pub mod volatility;

pub use error::IndicatorError;
