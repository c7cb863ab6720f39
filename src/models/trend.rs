//! Linear sales trend over fractional-year time.
//!
//! Feature: `x = year + month / 12`. Target: recorded sales.
//!
//! Degenerate inputs follow a fixed contract:
//! - no points: [`SalesError::NoData`]
//! - every point on the same `x` (including a single point): a flat line at
//!   the mean value
//! - otherwise: the ordinary least squares line

use tracing::debug;

use crate::domain::{FitQuality, Period};
use crate::error::SalesError;
use crate::math::{LineFit, fit_line};

/// Response variance below which R² is undefined.
const SST_EPS: f64 = 1e-12;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrendModel {
    line: LineFit,
    quality: FitQuality,
}

impl TrendModel {
    /// Fit the trend to `(period, value)` pairs.
    pub fn fit<I>(points: I) -> Result<Self, SalesError>
    where
        I: IntoIterator<Item = (Period, f64)>,
    {
        let (xs, ys): (Vec<f64>, Vec<f64>) = points
            .into_iter()
            .map(|(p, v)| (p.fractional_year(), v))
            .unzip();

        if xs.is_empty() {
            return Err(SalesError::NoData);
        }

        let line = fit_line(&xs, &ys).ok_or(SalesError::NoData)?;
        let quality = compute_quality(&line, &xs, &ys);

        debug!(
            n = quality.n,
            slope = line.slope,
            intercept = line.intercept,
            rmse = quality.rmse,
            "fitted sales trend"
        );

        Ok(Self { line, quality })
    }

    pub fn predict(&self, period: Period) -> f64 {
        self.line.eval(period.fractional_year())
    }

    /// Change in predicted sales per year.
    pub fn slope_per_year(&self) -> f64 {
        self.line.slope
    }

    /// Predicted sales at [`Self::x_mean`].
    pub fn intercept(&self) -> f64 {
        self.line.intercept
    }

    /// Mean of the fitted `x` values (fractional years).
    pub fn x_mean(&self) -> f64 {
        self.line.x_mean
    }

    pub fn quality(&self) -> FitQuality {
        self.quality
    }
}

fn compute_quality(line: &LineFit, xs: &[f64], ys: &[f64]) -> FitQuality {
    let n = ys.len();
    let y_mean = ys.iter().sum::<f64>() / n as f64;

    let sse: f64 = xs
        .iter()
        .zip(ys)
        .map(|(&x, &y)| {
            let r = y - line.eval(x);
            r * r
        })
        .sum();
    let sst: f64 = ys.iter().map(|y| (y - y_mean) * (y - y_mean)).sum();

    FitQuality {
        n,
        sse,
        rmse: (sse / n as f64).sqrt(),
        r_squared: (sst > SST_EPS).then(|| 1.0 - sse / sst),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p(year: i32, month: u32) -> Period {
        Period::new(year, month).unwrap()
    }

    #[test]
    fn empty_input_is_no_data() {
        assert_eq!(TrendModel::fit(Vec::<(Period, f64)>::new()), Err(SalesError::NoData));
    }

    #[test]
    fn single_point_predicts_its_value_everywhere() {
        let model = TrendModel::fit([(p(2023, 3), 420.0)]).unwrap();
        assert_eq!(model.slope_per_year(), 0.0);
        assert!((model.predict(p(2030, 11)) - 420.0).abs() < 1e-12);
        assert_eq!(model.quality().r_squared, None);
    }

    #[test]
    fn perfect_line_has_unit_r_squared() {
        // +10 per month => +120 per year.
        let points: Vec<(Period, f64)> = (0..12)
            .map(|i| (p(2023, 1).plus_months(i), 100.0 + 10.0 * f64::from(i)))
            .collect();
        let model = TrendModel::fit(points).unwrap();

        assert!((model.slope_per_year() - 120.0).abs() < 1e-8);
        assert!((model.predict(p(2024, 1)) - 220.0).abs() < 1e-8);
        let r2 = model.quality().r_squared.unwrap();
        assert!((r2 - 1.0).abs() < 1e-12);
        assert!(model.quality().sse < 1e-12);
    }

    #[test]
    fn noisy_series_has_partial_fit() {
        let model = TrendModel::fit([
            (p(2023, 1), 100.0),
            (p(2023, 2), 180.0),
            (p(2023, 3), 140.0),
            (p(2023, 4), 220.0),
        ])
        .unwrap();

        let q = model.quality();
        assert_eq!(q.n, 4);
        assert!(q.sse > 0.0);
        let r2 = q.r_squared.unwrap();
        assert!(r2 > 0.0 && r2 < 1.0);
    }
}
