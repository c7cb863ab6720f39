//! Shared domain types.
//!
//! These types are intentionally kept small and `Copy` where possible so they
//! can be passed around freely between the store, the engine and the reports.
//! Output types are serializable so they can be exported to JSON.

use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, NaiveDate};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::error::SalesError;

/// A calendar month, ordered by `(year, month)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct Period {
    year: i32,
    month: u32,
}

impl Period {
    pub fn new(year: i32, month: u32) -> Result<Self, SalesError> {
        NaiveDate::from_ymd_opt(year, month, 1)
            .map(|d| Self {
                year: d.year(),
                month: d.month(),
            })
            .ok_or(SalesError::InvalidPeriod { year, month })
    }

    /// Parse `YYYY-MM`.
    pub fn parse(s: &str) -> Result<Self, String> {
        let s = s.trim();
        let bytes = s.as_bytes();
        let shape_ok = bytes.len() == 7
            && bytes[4] == b'-'
            && bytes[..4].iter().all(u8::is_ascii_digit)
            && bytes[5..].iter().all(u8::is_ascii_digit);
        if !shape_ok {
            return Err(format!("Invalid period '{s}'. Expected YYYY-MM."));
        }

        // Day 1 always exists, so this only rejects bad months.
        let date = NaiveDate::parse_from_str(&format!("{s}-01"), "%Y-%m-%d")
            .map_err(|e| format!("Invalid period '{s}': {e}"))?;
        Ok(Self {
            year: date.year(),
            month: date.month(),
        })
    }

    pub fn year(self) -> i32 {
        self.year
    }

    pub fn month(self) -> u32 {
        self.month
    }

    /// Regression feature: `year + month / 12`.
    ///
    /// December of year `Y` encodes as `Y + 1.0`, the same value as a
    /// hypothetical month 0 of `Y + 1`; January of `Y + 1` is `Y + 1 + 1/12`.
    /// The spacing between consecutive months stays uniform.
    pub fn fractional_year(self) -> f64 {
        f64::from(self.year) + f64::from(self.month) / 12.0
    }

    /// The period `n` months after this one.
    pub fn plus_months(self, n: u32) -> Self {
        let zero_based = i64::from(self.year) * 12 + i64::from(self.month - 1) + i64::from(n);
        Self {
            year: zero_based.div_euclid(12) as i32,
            month: zero_based.rem_euclid(12) as u32 + 1,
        }
    }

    /// Number of months from `self` to `other` (negative if `other` is earlier).
    pub fn months_until(self, other: Period) -> i64 {
        let a = i64::from(self.year) * 12 + i64::from(self.month);
        let b = i64::from(other.year) * 12 + i64::from(other.month);
        b - a
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

impl FromStr for Period {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Period::parse(s)
    }
}

impl From<Period> for String {
    fn from(value: Period) -> Self {
        value.to_string()
    }
}

impl TryFrom<String> for Period {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Period::parse(&value)
    }
}

/// One ingested row: a period and its recorded sales, if any.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Observation {
    pub period: Period,
    /// `None` means "no data recorded" for this period.
    pub value: Option<f64>,
}

/// How the store resolves a period that is ingested more than once.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum DuplicatePolicy {
    /// Overwrite the stored value in place (the observation keeps its position).
    #[default]
    LastWins,
    /// Keep the first value and ignore later rows for the same period.
    FirstWins,
    /// Fail the whole ingest.
    Reject,
}

/// Sales above this prediction are classified as [`Category::High`].
pub const HIGH_SALES_THRESHOLD: f64 = 1000.0;

/// Sales below this prediction are classified as [`Category::Low`].
pub const LOW_SALES_THRESHOLD: f64 = 500.0;

/// Qualitative band for a predicted sales figure.
///
/// The bands are fixed: `High` requires strictly more than
/// [`HIGH_SALES_THRESHOLD`], `Low` strictly less than [`LOW_SALES_THRESHOLD`].
/// Both boundaries themselves are `Average`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    High,
    Low,
    Average,
}

impl Category {
    pub fn classify(prediction: f64) -> Self {
        if prediction > HIGH_SALES_THRESHOLD {
            Category::High
        } else if prediction < LOW_SALES_THRESHOLD {
            Category::Low
        } else {
            Category::Average
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            Category::High => "Sales are high due to increased marketing and seasonal demand.",
            Category::Low => "Sales are low due to market saturation and lack of promotions.",
            Category::Average => "Sales are average, with no significant contributing factors.",
        }
    }
}

/// Output of `analyze`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Analysis {
    pub period: Period,
    pub prediction: f64,
    pub category: Category,
}

/// Highest-selling month of a year.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BestMonth {
    pub period: Period,
    pub value: f64,
}

/// Fit quality diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FitQuality {
    pub n: usize,
    pub sse: f64,
    pub rmse: f64,
    /// `None` when every observed value is identical.
    pub r_squared: Option<f64>,
}

/// A saved trend file (JSON).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrendFile {
    pub tool: String,
    pub slope_per_year: f64,
    pub intercept: f64,
    pub x_mean: f64,
    pub fit_quality: FitQuality,
    pub first_period: Period,
    pub last_period: Period,
    pub grid: TrendGrid,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrendGrid {
    pub periods: Vec<Period>,
    pub predicted: Vec<f64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn period_parses_iso_year_month() {
        let p = Period::parse("2024-03").unwrap();
        assert_eq!(p.year(), 2024);
        assert_eq!(p.month(), 3);
        assert_eq!(p.to_string(), "2024-03");
    }

    #[test]
    fn period_rejects_bad_text() {
        for bad in ["2024-13", "2024-00", "2024-1", "24-01", "2024/01", "2024-01-01", "", "abcd-ef"] {
            assert!(Period::parse(bad).is_err(), "{bad} should be rejected");
        }
    }

    #[test]
    fn period_new_validates_month() {
        assert!(Period::new(2024, 12).is_ok());
        assert_eq!(
            Period::new(2024, 13),
            Err(SalesError::InvalidPeriod { year: 2024, month: 13 })
        );
    }

    #[test]
    fn periods_order_by_year_then_month() {
        let a = Period::new(2023, 12).unwrap();
        let b = Period::new(2024, 1).unwrap();
        assert!(a < b);
        assert_eq!(a.plus_months(1), b);
        assert_eq!(b.plus_months(23), Period::new(2025, 12).unwrap());
        assert_eq!(a.months_until(b), 1);
    }

    #[test]
    fn fractional_year_encoding() {
        let p = Period::new(2024, 6).unwrap();
        assert!((p.fractional_year() - 2024.5).abs() < 1e-12);
    }

    #[test]
    fn category_boundaries_are_average() {
        assert_eq!(Category::classify(1000.0), Category::Average);
        assert_eq!(Category::classify(500.0), Category::Average);
        assert_eq!(Category::classify(1000.01), Category::High);
        assert_eq!(Category::classify(499.99), Category::Low);
    }

    #[test]
    fn period_serializes_as_text() {
        let p = Period::new(2023, 6).unwrap();
        let json = serde_json::to_string(&p).unwrap();
        assert_eq!(json, "\"2023-06\"");
        let back: Period = serde_json::from_str(&json).unwrap();
        assert_eq!(back, p);
    }
}
