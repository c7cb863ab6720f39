//! Ordinary least squares for a straight line.
//!
//! We solve
//!
//! ```text
//! minimize Σ (y_i - (b0 + b1 (x_i - x̄)))^2
//! ```
//!
//! Implementation choices:
//! - `x` is centered on its mean before building the design matrix. Our `x`
//!   values are fractional years (around 2000), and an uncentered `[1, x]`
//!   design is badly conditioned.
//! - The solve goes through SVD (`nalgebra`), which handles the tall design
//!   matrix directly. A degenerate design (all `x` equal) is detected before
//!   solving and handled by the caller.

use nalgebra::{DMatrix, DVector};

/// Spread below which all `x` values are treated as identical.
const X_SPREAD_EPS: f64 = 1e-9;

/// A fitted line in centered form: `y = intercept + slope * (x - x_mean)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineFit {
    pub x_mean: f64,
    pub intercept: f64,
    pub slope: f64,
}

impl LineFit {
    pub fn eval(&self, x: f64) -> f64 {
        self.intercept + self.slope * (x - self.x_mean)
    }
}

/// Solve a least squares problem using SVD.
///
/// Returns `None` if the system is too ill-conditioned to solve robustly.
pub fn solve_least_squares(x: &DMatrix<f64>, y: &DVector<f64>) -> Option<DVector<f64>> {
    let svd = x.clone().svd(true, true);

    for &tol in &[1e-12, 1e-10, 1e-8] {
        if let Ok(beta) = svd.solve(y, tol) {
            if beta.iter().all(|v| v.is_finite()) {
                return Some(beta);
            }
        }
    }

    None
}

/// Fit a line through `(xs[i], ys[i])`.
///
/// Returns `None` for empty input or mismatched lengths. When every `x` is
/// the same the slope is zero and the intercept is the mean of `ys`.
pub fn fit_line(xs: &[f64], ys: &[f64]) -> Option<LineFit> {
    if xs.is_empty() || xs.len() != ys.len() {
        return None;
    }

    let n = xs.len() as f64;
    let x_mean = xs.iter().sum::<f64>() / n;
    let y_mean = ys.iter().sum::<f64>() / n;

    let x_spread = xs.iter().map(|x| (x - x_mean).abs()).fold(0.0, f64::max);
    if x_spread < X_SPREAD_EPS {
        return Some(LineFit {
            x_mean,
            intercept: y_mean,
            slope: 0.0,
        });
    }

    let mut design = DMatrix::<f64>::zeros(xs.len(), 2);
    for (i, &x) in xs.iter().enumerate() {
        design[(i, 0)] = 1.0;
        design[(i, 1)] = x - x_mean;
    }
    let y = DVector::from_column_slice(ys);

    let beta = solve_least_squares(&design, &y)?;
    Some(LineFit {
        x_mean,
        intercept: beta[0],
        slope: beta[1],
    })
}
