//! Shared "load" step used by every command.
//!
//! Each invocation is one session: an empty store is created, the CSV is
//! ingested once, and the requested query runs against it.

use std::path::Path;

use crate::domain::DuplicatePolicy;
use crate::error::AppError;
use crate::io::ingest::load_sales_csv;
use crate::store::{IngestSummary, TimeSeriesStore};

/// A freshly loaded session.
#[derive(Debug, Clone)]
pub struct Session {
    pub store: TimeSeriesStore,
    pub ingest: IngestSummary,
}

pub fn load_session(csv: &Path, policy: DuplicatePolicy) -> Result<Session, AppError> {
    let mut store = TimeSeriesStore::with_policy(policy);
    let ingest = load_sales_csv(csv, &mut store)?;
    Ok(Session { store, ingest })
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;
    use crate::domain::Period;

    #[test]
    fn loads_csv_with_policy() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "month,sales\n2023-01,100\n2023-01,250").unwrap();

        let session = load_session(file.path(), DuplicatePolicy::FirstWins).unwrap();

        assert_eq!(session.ingest.ignored, 1);
        assert_eq!(session.store.lookup(Period::new(2023, 1).unwrap()), Some(100.0));
    }

    #[test]
    fn reject_policy_fails_load() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "month,sales\n2023-01,100\n2023-01,250").unwrap();

        let err = load_session(file.path(), DuplicatePolicy::Reject).unwrap_err();
        assert_eq!(err.exit_code(), 2);
        assert!(err.message().contains("Duplicate period 2023-01"), "{err}");
    }
}
