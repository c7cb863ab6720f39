//! Trend model implementation.
//!
//! The model is a small value type: fitting produces it from `(period, value)`
//! pairs, and evaluation is a pure function of its parameters.

pub mod trend;

pub use trend::*;
