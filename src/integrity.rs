//! Sequence diagnostics for converted records
//!
//! The logger stamps records with consecutive revisions and writes them into a
//! ring file, so a healthy log shows `revision + 1` and non-decreasing
//! timestamps everywhere except at the wrap point. Nothing here rejects or
//! reorders records; anomalies are only counted for the conversion report.

use crate::types::{ConversionReport, Record, RecordKey};
use log::warn;

/// Tracks revision and timestamp continuity across a record stream
#[derive(Debug, Default)]
pub struct SequenceCheck {
    previous: Option<RecordKey>,
    pub revision_gaps: u64,
    pub timestamp_regressions: u64,
}

impl SequenceCheck {
    pub fn new() -> Self {
        Self::default()
    }

    /// Observe the next record in stream order
    pub fn observe(&mut self, record: &Record) {
        let key = record.key();
        if let Some(prev) = self.previous {
            if key.revision != prev.revision.wrapping_add(1) {
                self.revision_gaps += 1;
                warn!(
                    "Revision gap: {} follows {} (timestamp {})",
                    key.revision, prev.revision, key.timestamp
                );
            }
            if key.timestamp < prev.timestamp {
                self.timestamp_regressions += 1;
                warn!(
                    "Timestamp went backwards at revision {}: {} -> {}",
                    key.revision, prev.timestamp, key.timestamp
                );
            }
        }
        self.previous = Some(key);
    }

    /// Copy the counters into a report
    pub fn apply(&self, report: &mut ConversionReport) {
        report.revision_gaps = self.revision_gaps;
        report.timestamp_regressions = self.timestamp_regressions;
    }
}
