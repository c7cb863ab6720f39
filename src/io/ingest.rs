//! CSV ingest.
//!
//! This module only does lexing: it turns a `period,sales` CSV into raw
//! string records and hands them to [`TimeSeriesStore::ingest`], which owns
//! all validation. The first line is a header and is always skipped.
//!
//! Rows may have varying widths (`flexible`), so a short row reaches the
//! store and is reported as missing columns rather than as a CSV error.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use csv::StringRecord;
use tracing::info;

use crate::error::{AppError, SalesError};
use crate::store::{IngestSummary, TimeSeriesStore};

/// Load a sales CSV file into `store`.
pub fn load_sales_csv(path: &Path, store: &mut TimeSeriesStore) -> Result<IngestSummary, AppError> {
    let file = File::open(path)
        .map_err(|e| AppError::new(2, format!("Failed to open CSV '{}': {e}", path.display())))?;

    let summary = ingest_csv(file, store)?;
    info!(
        path = %path.display(),
        rows = summary.rows,
        total = store.len(),
        "loaded sales data"
    );
    Ok(summary)
}

/// Ingest CSV text from any reader.
pub fn ingest_csv<R: Read>(reader: R, store: &mut TimeSeriesStore) -> Result<IngestSummary, AppError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let records: Vec<StringRecord> = reader
        .records()
        .collect::<Result<_, _>>()
        .map_err(|e| AppError::new(2, format!("File processing error: {e}")))?;

    store
        .ingest(records.iter())
        .map_err(|e| validation_error(&e, &records))
}

fn validation_error(err: &SalesError, records: &[StringRecord]) -> AppError {
    let line = err
        .row()
        .and_then(|row| records.get(row - 1))
        .and_then(StringRecord::position)
        .map(|pos| pos.line());

    match line {
        Some(line) => AppError::new(2, format!("Data validation error: {err} (line {line})")),
        None => AppError::new(2, format!("Data validation error: {err}")),
    }
}
