use tracing::debug;

use crate::domain::{Analysis, BestMonth, Category, Period};
use crate::error::SalesError;
use crate::models::TrendModel;
use crate::store::TimeSeriesStore;

/// Read-only query surface over a [`TimeSeriesStore`].
///
/// Holding the engine borrows the store, so the series cannot change while a
/// query is running.
#[derive(Debug, Clone, Copy)]
pub struct ForecastEngine<'a> {
    store: &'a TimeSeriesStore,
}

impl<'a> ForecastEngine<'a> {
    pub fn new(store: &'a TimeSeriesStore) -> Self {
        Self { store }
    }

    /// Fit the trend to every observation with a recorded value.
    pub fn trend(&self) -> Result<TrendModel, SalesError> {
        if self.store.is_empty() {
            return Err(SalesError::NoData);
        }
        TrendModel::fit(self.store.valued())
    }

    pub fn predict(&self, period: Period) -> Result<f64, SalesError> {
        let prediction = self.trend()?.predict(period);
        debug!(%period, prediction, "predicted sales");
        Ok(prediction)
    }

    /// Recorded sales for `period`; [`SalesError::NoData`] when not available.
    pub fn sales_for_month(&self, period: Period) -> Result<f64, SalesError> {
        self.store.lookup(period).ok_or(SalesError::NoData)
    }

    pub fn analyze(&self, period: Period) -> Result<Analysis, SalesError> {
        let prediction = self.predict(period)?;
        Ok(Analysis {
            period,
            prediction,
            category: Category::classify(prediction),
        })
    }

    /// Highest recorded month of `year`. Ties go to the earliest ingested.
    ///
    /// `None` when the year has no recorded values.
    pub fn best_month(&self, year: i32) -> Option<BestMonth> {
        self.store
            .observations_for_year(year)
            .filter_map(|o| o.value.map(|value| BestMonth { period: o.period, value }))
            .fold(None, |best: Option<BestMonth>, candidate| match best {
                Some(b) if b.value >= candidate.value => Some(b),
                _ => Some(candidate),
            })
    }

    /// Predictions for `months` consecutive periods starting at `from`.
    pub fn forecast(&self, from: Period, months: u32) -> Result<Vec<(Period, f64)>, SalesError> {
        let model = self.trend()?;
        Ok((0..months)
            .map(|i| {
                let period = from.plus_months(i);
                (period, model.predict(period))
            })
            .collect())
    }
}
