//! `sales-forecast` library crate.
//!
//! The binary (`sales`) is a thin wrapper around this library so that:
//!
//! - the store and forecast engine are testable without spawning processes
//! - the same core can sit behind another front-end (an HTTP service, a notebook)
//!   that hands it raw `(period, value)` rows

pub mod app;
pub mod cli;
pub mod domain;
pub mod error;
pub mod forecast;
pub mod io;
pub mod math;
pub mod models;
pub mod plot;
pub mod report;
pub mod store;

pub use domain::{Analysis, BestMonth, Category, DuplicatePolicy, Observation, Period};
pub use error::{AppError, SalesError};
pub use forecast::ForecastEngine;
pub use store::TimeSeriesStore;
