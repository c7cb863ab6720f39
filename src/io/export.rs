//! Export the fitted trend to JSON.
//!
//! The trend file carries the model parameters, fit quality, the observed
//! period range and a monthly grid of predicted values running from the first
//! observed period to `horizon` months past the last one. The schema is
//! defined by `domain::TrendFile`.

use std::fs::File;
use std::path::Path;

use crate::domain::{Period, TrendFile, TrendGrid};
use crate::error::{AppError, SalesError};
use crate::forecast::ForecastEngine;
use crate::store::TimeSeriesStore;

/// Build the trend file for the current store contents.
pub fn build_trend_file(store: &TimeSeriesStore, horizon: u32) -> Result<TrendFile, SalesError> {
    let stats = store.stats().ok_or(SalesError::NoData)?;
    let engine = ForecastEngine::new(store);
    let model = engine.trend()?;

    let months = grid_months(stats.first_period, stats.last_period, horizon);
    let (periods, predicted): (Vec<Period>, Vec<f64>) = engine
        .forecast(stats.first_period, months)?
        .into_iter()
        .unzip();

    Ok(TrendFile {
        tool: "sales".to_string(),
        slope_per_year: model.slope_per_year(),
        intercept: model.intercept(),
        x_mean: model.x_mean(),
        fit_quality: model.quality(),
        first_period: stats.first_period,
        last_period: stats.last_period,
        grid: TrendGrid { periods, predicted },
    })
}

/// Number of monthly grid points covering `first..=last` plus `horizon`.
pub fn grid_months(first: Period, last: Period, horizon: u32) -> u32 {
    u32::try_from(first.months_until(last) + 1)
        .unwrap_or(1)
        .saturating_add(horizon)
}

/// Write a trend JSON file.
pub fn write_trend_json(path: &Path, trend: &TrendFile) -> Result<(), AppError> {
    let file = File::create(path)
        .map_err(|e| AppError::new(2, format!("Failed to create trend JSON '{}': {e}", path.display())))?;

    serde_json::to_writer_pretty(file, trend)
        .map_err(|e| AppError::new(2, format!("Failed to write trend JSON: {e}")))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p(year: i32, month: u32) -> Period {
        Period::new(year, month).unwrap()
    }

    #[test]
    fn grid_spans_observations_plus_horizon() {
        let mut store = TimeSeriesStore::new();
        store
            .ingest([["2023-01", "100"], ["2023-04", "160"]])
            .unwrap();

        let trend = build_trend_file(&store, 2).unwrap();

        assert_eq!(trend.first_period, p(2023, 1));
        assert_eq!(trend.last_period, p(2023, 4));
        assert_eq!(trend.grid.periods.len(), 6);
        assert_eq!(trend.grid.periods.last(), Some(&p(2023, 6)));
        assert_eq!(trend.grid.predicted.len(), 6);
        assert!((trend.grid.predicted[3] - 160.0).abs() < 1e-9);
    }

    #[test]
    fn empty_store_cannot_export() {
        let store = TimeSeriesStore::new();
        assert!(matches!(build_trend_file(&store, 3), Err(SalesError::NoData)));
    }

    #[test]
    fn written_file_reads_back() {
        let mut store = TimeSeriesStore::new();
        store
            .ingest([["2023-01", "100"], ["2023-02", "120"], ["2023-03", ""]])
            .unwrap();
        let trend = build_trend_file(&store, 0).unwrap();

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("trend.json");
        write_trend_json(&path, &trend).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        assert!(text.contains("\"first_period\": \"2023-01\""));
        let back: TrendFile = serde_json::from_str(&text).unwrap();
        assert_eq!(back.grid.periods, trend.grid.periods);
        assert!((back.slope_per_year - trend.slope_per_year).abs() < 1e-9);
    }
}
