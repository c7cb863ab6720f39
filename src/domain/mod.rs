//! Domain types used throughout the crate.
//!
//! This module defines:
//!
//! - calendar periods and ingested observations (`Period`, `Observation`)
//! - the ingest duplicate policy (`DuplicatePolicy`)
//! - query outputs (`Analysis`, `Category`, `BestMonth`, `FitQuality`, `TrendFile`)

pub mod types;

pub use types::*;
