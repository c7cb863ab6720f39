//! Command-line parsing for the monthly sales forecaster.
//!
//! The goal of this module is to keep **argument parsing** separate from the
//! store and the forecasting code.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::domain::{DuplicatePolicy, Period};
use crate::error::SalesError;

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(name = "sales", version, about = "Monthly sales lookup and trend forecasting")]
pub struct Cli {
    /// Sales CSV (`period,sales` with a header row).
    #[arg(long, env = "SALES_CSV", value_name = "CSV")]
    pub csv: PathBuf,

    /// How repeated periods in the CSV are resolved.
    #[arg(long, value_enum, default_value_t = DuplicatePolicy::LastWins)]
    pub duplicates: DuplicatePolicy,

    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Predict sales for a month from the fitted trend.
    Predict(MonthArgs),
    /// Show recorded sales for a month.
    Sales(MonthArgs),
    /// Classify predicted sales for a month as high, average or low.
    Analyze(MonthArgs),
    /// Show the best recorded month of a year.
    Best(YearArgs),
    /// Print dataset stats and trend diagnostics; optionally plot/export.
    Summary(SummaryArgs),
}

#[derive(Debug, Args, Clone, Copy)]
pub struct MonthArgs {
    #[arg(long, allow_negative_numbers = true)]
    pub year: i32,

    /// Month number (1-12).
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..=12))]
    pub month: u32,
}

impl MonthArgs {
    pub fn period(&self) -> Result<Period, SalesError> {
        Period::new(self.year, self.month)
    }
}

#[derive(Debug, Args, Clone, Copy)]
pub struct YearArgs {
    #[arg(long, allow_negative_numbers = true)]
    pub year: i32,
}

#[derive(Debug, Args, Clone)]
pub struct SummaryArgs {
    /// Export the fitted trend (model + quality + monthly grid) to JSON.
    #[arg(long = "export-trend", value_name = "JSON")]
    pub export_trend: Option<PathBuf>,

    /// Months past the last observation to extend the exported grid and plot.
    #[arg(long, default_value_t = 12)]
    pub horizon: u32,

    /// Render an ASCII plot of recorded sales and the trend.
    #[arg(long)]
    pub plot: bool,

    /// Plot width (columns).
    #[arg(long, default_value_t = 80)]
    pub width: usize,

    /// Plot height (rows).
    #[arg(long, default_value_t = 20)]
    pub height: usize,
}
