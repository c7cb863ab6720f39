//! Input/output helpers.
//!
//! - CSV ingest into the sales store (`ingest`)
//! - trend JSON export (`export`)

pub mod export;
pub mod ingest;

pub use export::*;
pub use ingest::*;
