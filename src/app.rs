//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - parses CLI arguments
//! - loads the sales CSV into a fresh store
//! - runs the requested query through the forecast engine
//! - prints the answer and writes optional exports

use clap::Parser;
use tracing::info;

use crate::cli::{Cli, Command, MonthArgs, SummaryArgs, YearArgs};
use crate::error::{AppError, SalesError};
use crate::forecast::ForecastEngine;
use crate::store::TimeSeriesStore;

pub mod pipeline;

/// Entry point for the `sales` binary.
pub fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let session = pipeline::load_session(&cli.csv, cli.duplicates)?;

    let output = execute(&session.store, &cli.command)?;
    println!("{output}");
    Ok(())
}

/// Run one command against a loaded store and return the text to print.
pub fn execute(store: &TimeSeriesStore, command: &Command) -> Result<String, AppError> {
    let engine = ForecastEngine::new(store);

    match command {
        Command::Predict(args) => handle_predict(&engine, args),
        Command::Sales(args) => handle_sales(&engine, args),
        Command::Analyze(args) => handle_analyze(&engine, args),
        Command::Best(args) => Ok(handle_best(&engine, args)),
        Command::Summary(args) => handle_summary(store, &engine, args),
    }
}

fn handle_predict(engine: &ForecastEngine<'_>, args: &MonthArgs) -> Result<String, AppError> {
    let period = args.period()?;
    let prediction = engine.predict(period)?;
    Ok(crate::report::format_prediction(period, prediction))
}

fn handle_sales(engine: &ForecastEngine<'_>, args: &MonthArgs) -> Result<String, AppError> {
    let period = args.period()?;
    match engine.sales_for_month(period) {
        Ok(sales) => Ok(crate::report::format_sales_for_month(period, Some(sales))),
        Err(SalesError::NoData) => Err(AppError::new(
            3,
            crate::report::format_sales_for_month(period, None),
        )),
        Err(e) => Err(e.into()),
    }
}

fn handle_analyze(engine: &ForecastEngine<'_>, args: &MonthArgs) -> Result<String, AppError> {
    let analysis = engine.analyze(args.period()?)?;
    info!(
        period = %analysis.period,
        prediction = analysis.prediction,
        category = ?analysis.category,
        "analyzed sales"
    );
    Ok(crate::report::format_analysis(&analysis))
}

fn handle_best(engine: &ForecastEngine<'_>, args: &YearArgs) -> String {
    crate::report::format_best_month(args.year, engine.best_month(args.year))
}

fn handle_summary(
    store: &TimeSeriesStore,
    engine: &ForecastEngine<'_>,
    args: &SummaryArgs,
) -> Result<String, AppError> {
    let stats = store.stats();
    let trend = match engine.trend() {
        Ok(model) => Some(model),
        Err(SalesError::NoData) => None,
        Err(e) => return Err(e.into()),
    };

    let mut out = crate::report::format_summary(stats.as_ref(), trend.as_ref(), store.duplicate_policy());

    if args.plot {
        let points: Vec<_> = store.valued().collect();
        let curve = match (&stats, &trend) {
            (Some(s), Some(_)) => {
                let months = crate::io::export::grid_months(s.first_period, s.last_period, args.horizon);
                engine.forecast(s.first_period, months)?
            }
            _ => Vec::new(),
        };
        out.push('\n');
        out.push_str(&crate::plot::render_sales_plot(&points, &curve, args.width, args.height));
    }

    if let Some(path) = &args.export_trend {
        let trend_file = crate::io::export::build_trend_file(store, args.horizon)?;
        crate::io::export::write_trend_json(path, &trend_file)?;
        info!(path = %path.display(), "exported trend");
    }

    Ok(out.trim_end().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_store() -> TimeSeriesStore {
        let mut store = TimeSeriesStore::new();
        store
            .ingest([
                ["2023-01", "100"],
                ["2023-06", "500"],
                ["2023-12", "500"],
                ["2024-01", ""],
            ])
            .unwrap();
        store
    }

    fn month(year: i32, month: u32) -> MonthArgs {
        MonthArgs { year, month }
    }

    #[test]
    fn sales_command_reports_value_or_not_available() {
        let store = sample_store();

        let out = execute(&store, &Command::Sales(month(2023, 6))).unwrap();
        assert_eq!(out, "Sales for 2023-06: 500.0");

        let err = execute(&store, &Command::Sales(month(2024, 1))).unwrap_err();
        assert_eq!(err.exit_code(), 3);
        assert_eq!(err.message(), "Data Not Available for 2024-01");
    }

    #[test]
    fn best_command_handles_empty_year() {
        let store = sample_store();

        let out = execute(&store, &Command::Best(YearArgs { year: 2023 })).unwrap();
        assert!(out.contains("is: 2023-06"), "{out}");

        let out = execute(&store, &Command::Best(YearArgs { year: 2024 })).unwrap();
        assert_eq!(out, "No sales data available for the year 2024");
    }

    #[test]
    fn predict_on_empty_store_is_no_data() {
        let store = TimeSeriesStore::new();
        let err = execute(&store, &Command::Predict(month(2024, 1))).unwrap_err();
        assert_eq!(err.exit_code(), 3);
    }

    #[test]
    fn analyze_prints_category_text() {
        let store = sample_store();
        let out = execute(&store, &Command::Analyze(month(2023, 6))).unwrap();
        assert!(out.starts_with("Sales are "), "{out}");
    }

    #[test]
    fn summary_with_plot_and_export() {
        let store = sample_store();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("trend.json");

        let args = SummaryArgs {
            export_trend: Some(path.clone()),
            horizon: 6,
            plot: true,
            width: 40,
            height: 10,
        };
        let out = execute(&store, &Command::Summary(args)).unwrap();

        assert!(out.contains("=== sales - Monthly Sales Trend ==="));
        assert!(out.contains("Plot: period=[2023-01, 2024-07]"), "{out}");
        assert!(path.exists());
    }
}
