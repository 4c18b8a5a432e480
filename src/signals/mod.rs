//! Signal synthesis from indicator values.

pub mod confidence;
pub mod engine;

pub use engine::{EngineConfig, SignalEngine, SignalError};
