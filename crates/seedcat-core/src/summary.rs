use std::fmt;

use serde::Serialize;

/// Result of writing one record to the catalog store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpsertOutcome {
    /// No record with this name existed; a new one was inserted.
    Created,
    /// A record with this name existed and all of its fields were replaced.
    Replaced,
}

/// Per-run tally reported at the end of an ingestion batch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct IngestSummary {
    /// Non-blank data rows read from the source sheet.
    pub seen: usize,
    /// Rows skipped because they had no usable product name.
    pub rejected: usize,
    pub created: usize,
    pub replaced: usize,
    /// Accepted rows whose store write failed.
    pub failed: usize,
}

impl IngestSummary {
    /// Rows that passed normalization.
    #[must_use]
    pub fn accepted(&self) -> usize {
        self.seen.saturating_sub(self.rejected)
    }

    /// Rows that reached the store successfully.
    #[must_use]
    pub fn written(&self) -> usize {
        self.created + self.replaced
    }

    pub fn record_outcome(&mut self, outcome: UpsertOutcome) {
        match outcome {
            UpsertOutcome::Created => self.created += 1,
            UpsertOutcome::Replaced => self.replaced += 1,
        }
    }
}

impl fmt::Display for IngestSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "seen {}, rejected {}, created {}, replaced {}, failed {}",
            self.seen, self.rejected, self.created, self.replaced, self.failed
        )
    }
}
