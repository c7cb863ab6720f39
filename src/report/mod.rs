//! Reporting utilities: user-facing messages for each query and the dataset summary.
//!
//! We keep formatting code in one place so the store and engine never build
//! strings, and output changes stay localized.

pub mod format;

pub use format::*;
