//! Run-scoped tallies of row outcomes

use crate::storage::BatchOutcome;
use crate::validate::RowOutcome;

/// Tallies for one ingestion run.
///
/// Owned by the pipeline and only ever incremented. Once the run completes,
/// `inserted + duplicates_skipped == valid_rows()`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Counters {
    pub total_rows_read: u64,
    pub inserted: u64,
    pub duplicates_skipped: u64,
    pub invalid_date: u64,
    pub invalid_status: u64,
    pub other_errors: u64,
}

impl Counters {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rows that passed validation
    pub fn valid_rows(&self) -> u64 {
        self.total_rows_read.saturating_sub(self.rejected_rows())
    }

    /// Rows rejected for any reason
    pub fn rejected_rows(&self) -> u64 {
        self.invalid_date + self.invalid_status + self.other_errors
    }

    pub(crate) fn record_read(&mut self) {
        self.total_rows_read += 1;
    }

    /// Count a rejection. Accepted rows leave the counters untouched.
    pub(crate) fn record_outcome(&mut self, outcome: &RowOutcome) {
        match outcome {
            RowOutcome::Accepted(_) => {},
            RowOutcome::MissingField => self.other_errors += 1,
            RowOutcome::InvalidStatus => self.invalid_status += 1,
            RowOutcome::InvalidDate => self.invalid_date += 1,
        }
    }

    pub(crate) fn record_batch(&mut self, outcome: BatchOutcome) {
        self.inserted += outcome.inserted;
        self.duplicates_skipped += outcome.duplicates;
    }

    /// Whether every valid row has been written or recognised as a duplicate
    pub fn is_balanced(&self) -> bool {
        self.inserted + self.duplicates_skipped == self.valid_rows()
    }
}
