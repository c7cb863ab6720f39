//! In-memory monthly sales series.
//!
//! The store owns the ingested observations and is the only place they are
//! mutated. Ingest runs in two phases:
//!
//! 1. **Stage**: parse and validate every row, and check duplicates against the
//!    configured [`DuplicatePolicy`]. Nothing is touched yet.
//! 2. **Commit**: merge the staged observations in input order. This phase
//!    cannot fail, so a failed batch leaves the store exactly as it was.

use std::collections::{HashMap, HashSet};

use tracing::{debug, warn};

use crate::domain::{DuplicatePolicy, Observation, Period};
use crate::error::SalesError;

/// Counts reported by a successful ingest.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IngestSummary {
    pub rows: usize,
    pub appended: usize,
    pub replaced: usize,
    pub ignored: usize,
}

/// Summary stats about the series.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SeriesStats {
    pub observations: usize,
    pub valued: usize,
    pub first_period: Period,
    pub last_period: Period,
    pub min_value: Option<f64>,
    pub max_value: Option<f64>,
}

#[derive(Debug, Clone, Default)]
pub struct TimeSeriesStore {
    observations: Vec<Observation>,
    index: HashMap<Period, usize>,
    policy: DuplicatePolicy,
}

impl TimeSeriesStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_policy(policy: DuplicatePolicy) -> Self {
        Self {
            policy,
            ..Self::default()
        }
    }

    pub fn duplicate_policy(&self) -> DuplicatePolicy {
        self.policy
    }

    /// Validate and append a batch of raw `(period_text, value_text)` rows.
    ///
    /// Fields past the second are ignored. An empty value field records the
    /// period with no data. The batch is all-or-nothing.
    pub fn ingest<I, R, F>(&mut self, rows: I) -> Result<IngestSummary, SalesError>
    where
        I: IntoIterator<Item = R>,
        R: IntoIterator<Item = F>,
        F: AsRef<str>,
    {
        let staged = self.stage(rows)?;
        Ok(self.commit(staged))
    }

    fn stage<I, R, F>(&self, rows: I) -> Result<Vec<Observation>, SalesError>
    where
        I: IntoIterator<Item = R>,
        R: IntoIterator<Item = F>,
        F: AsRef<str>,
    {
        let mut staged = Vec::new();
        let mut seen = HashSet::new();

        for (idx, raw) in rows.into_iter().enumerate() {
            let row = idx + 1;
            let observation = parse_row(row, raw)?;

            let is_duplicate =
                self.index.contains_key(&observation.period) || !seen.insert(observation.period);
            if is_duplicate && self.policy == DuplicatePolicy::Reject {
                return Err(SalesError::DuplicatePeriod {
                    row,
                    period: observation.period,
                });
            }

            staged.push(observation);
        }

        Ok(staged)
    }

    fn commit(&mut self, staged: Vec<Observation>) -> IngestSummary {
        let mut summary = IngestSummary {
            rows: staged.len(),
            ..IngestSummary::default()
        };

        for observation in staged {
            match self.index.get(&observation.period).copied() {
                None => {
                    self.index.insert(observation.period, self.observations.len());
                    self.observations.push(observation);
                    summary.appended += 1;
                }
                Some(pos) => match self.policy {
                    DuplicatePolicy::LastWins => {
                        warn!(period = %observation.period, "duplicate period, replacing earlier value");
                        self.observations[pos].value = observation.value;
                        summary.replaced += 1;
                    }
                    // Reject never reaches commit with a duplicate.
                    DuplicatePolicy::FirstWins | DuplicatePolicy::Reject => {
                        warn!(period = %observation.period, "duplicate period, keeping earlier value");
                        summary.ignored += 1;
                    }
                },
            }
        }

        debug!(
            rows = summary.rows,
            appended = summary.appended,
            replaced = summary.replaced,
            ignored = summary.ignored,
            total = self.observations.len(),
            "ingest committed"
        );
        summary
    }

    /// Recorded sales for `period`, or `None` if never ingested or recorded empty.
    pub fn lookup(&self, period: Period) -> Option<f64> {
        self.index
            .get(&period)
            .and_then(|&pos| self.observations[pos].value)
    }

    /// Observations of `year` that carry a value, in insertion order.
    pub fn observations_for_year(&self, year: i32) -> impl Iterator<Item = &Observation> + '_ {
        self.observations
            .iter()
            .filter(move |o| o.period.year() == year && o.value.is_some())
    }

    /// All `(period, value)` pairs with a present value, in insertion order.
    pub fn valued(&self) -> impl Iterator<Item = (Period, f64)> + '_ {
        self.observations
            .iter()
            .filter_map(|o| o.value.map(|v| (o.period, v)))
    }

    pub fn observations(&self) -> &[Observation] {
        &self.observations
    }

    pub fn len(&self) -> usize {
        self.observations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.observations.is_empty()
    }

    pub fn stats(&self) -> Option<SeriesStats> {
        let first_period = self.observations.iter().map(|o| o.period).min()?;
        let last_period = self.observations.iter().map(|o| o.period).max()?;

        let mut valued = 0usize;
        let mut min_value: Option<f64> = None;
        let mut max_value: Option<f64> = None;
        for (_, v) in self.valued() {
            valued += 1;
            min_value = Some(min_value.map_or(v, |m| m.min(v)));
            max_value = Some(max_value.map_or(v, |m| m.max(v)));
        }

        Some(SeriesStats {
            observations: self.observations.len(),
            valued,
            first_period,
            last_period,
            min_value,
            max_value,
        })
    }
}

fn parse_row<R, F>(row: usize, raw: R) -> Result<Observation, SalesError>
where
    R: IntoIterator<Item = F>,
    F: AsRef<str>,
{
    let mut fields = raw.into_iter();
    let (Some(period_text), Some(value_text)) = (fields.next(), fields.next()) else {
        return Err(SalesError::MissingColumns { row });
    };

    let period_text = period_text.as_ref().trim();
    let period = Period::parse(period_text).map_err(|_| SalesError::MalformedPeriod {
        row,
        text: period_text.to_string(),
    })?;

    let value = parse_value(value_text.as_ref()).ok_or_else(|| SalesError::MalformedValue {
        row,
        text: value_text.as_ref().trim().to_string(),
    })?;

    Ok(Observation { period, value })
}

/// `Some(None)` for an empty field, `Some(Some(v))` for a finite number,
/// `None` for anything else.
fn parse_value(s: &str) -> Option<Option<f64>> {
    let s = s.trim();
    if s.is_empty() {
        return Some(None);
    }
    let v = s.parse::<f64>().ok()?;
    if v.is_finite() { Some(Some(v)) } else { None }
}
