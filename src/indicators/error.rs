use thiserror::Error;

/// Configuration errors rejected before any computation starts.
/// Short input is not an error; it is encoded as `None` elements.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IndicatorError {
    #[error("indicator period must be at least 1, got {0}")]
    InvalidPeriod(usize),

    #[error("high/low/close series lengths differ: {high}/{low}/{close}")]
    LengthMismatch {
        high: usize,
        low: usize,
        close: usize,
    },
}
