use thiserror::Error;

use crate::domain::Period;

/// Errors raised by the store and the forecast engine.
///
/// Ingest errors carry the 1-based row position within the batch that was
/// being ingested.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SalesError {
    #[error("Invalid CSV format: missing required columns on row {row}")]
    MissingColumns { row: usize },

    #[error("Invalid period '{text}' on row {row} (expected YYYY-MM)")]
    MalformedPeriod { row: usize, text: String },

    #[error("Invalid sales value '{text}' on row {row}")]
    MalformedValue { row: usize, text: String },

    #[error("Duplicate period {period} on row {row}")]
    DuplicatePeriod { row: usize, period: Period },

    #[error("Invalid period: year {year}, month {month}")]
    InvalidPeriod { year: i32, month: u32 },

    #[error("No sales data available")]
    NoData,
}

impl SalesError {
    /// True for errors caused by the shape of ingested input.
    pub fn is_input_error(&self) -> bool {
        !matches!(self, SalesError::NoData)
    }

    /// Batch row the error refers to, if any.
    pub fn row(&self) -> Option<usize> {
        match self {
            SalesError::MissingColumns { row }
            | SalesError::MalformedPeriod { row, .. }
            | SalesError::MalformedValue { row, .. }
            | SalesError::DuplicatePeriod { row, .. } => Some(*row),
            SalesError::InvalidPeriod { .. } | SalesError::NoData => None,
        }
    }
}

#[derive(Clone)]
pub struct AppError {
    exit_code: u8,
    message: String,
}

impl AppError {
    pub fn new(exit_code: u8, message: impl Into<String>) -> Self {
        Self {
            exit_code,
            message: message.into(),
        }
    }

    pub fn exit_code(&self) -> u8 {
        self.exit_code
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl From<SalesError> for AppError {
    fn from(err: SalesError) -> Self {
        let exit_code = if err.is_input_error() { 2 } else { 3 };
        AppError::new(exit_code, err.to_string())
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::fmt::Debug for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppError")
            .field("exit_code", &self.exit_code)
            .field("message", &self.message)
            .finish()
    }
}

impl std::error::Error for AppError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_data_maps_to_exit_code_3() {
        let err: AppError = SalesError::NoData.into();
        assert_eq!(err.exit_code(), 3);
    }

    #[test]
    fn input_errors_map_to_exit_code_2() {
        let err: AppError = SalesError::MalformedValue {
            row: 4,
            text: "abc".to_string(),
        }
        .into();
        assert_eq!(err.exit_code(), 2);
        assert!(err.message().contains("row 4"));
    }
}
