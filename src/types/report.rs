use crate::types::RecordKey;
use std::fmt;
use std::path::PathBuf;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Lifecycle of one conversion session.
///
/// `NotStarted -> HeaderWritten -> DataWritten* -> Finished`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    NotStarted,
    HeaderWritten,
    DataWritten,
    Finished,
}

impl SessionState {
    pub fn name(&self) -> &'static str {
        match self {
            SessionState::NotStarted => "not started",
            SessionState::HeaderWritten => "header written",
            SessionState::DataWritten => "writing data",
            SessionState::Finished => "finished",
        }
    }

    pub fn accepts_records(&self) -> bool {
        matches!(self, SessionState::HeaderWritten | SessionState::DataWritten)
    }
}

impl fmt::Display for SessionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// How a conversion ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Termination {
    /// The source ended on a record boundary
    Clean,
    /// The source ended partway through a record; the dangling bytes were skipped
    IncompleteRecord { trailing_bytes: usize },
}

impl Termination {
    pub fn is_clean(&self) -> bool {
        matches!(self, Termination::Clean)
    }
}

/// Summary of a single conversion pass
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ConversionReport {
    pub records: u64,
    pub bytes_read: u64,
    pub termination: Termination,
    pub first: Option<RecordKey>,
    pub last: Option<RecordKey>,
    /// Records whose revision did not follow the previous one
    pub revision_gaps: u64,
    /// Records timestamped earlier than the previous one
    pub timestamp_regressions: u64,
}

impl Default for ConversionReport {
    fn default() -> Self {
        Self {
            records: 0,
            bytes_read: 0,
            termination: Termination::Clean,
            first: None,
            last: None,
            revision_gaps: 0,
            timestamp_regressions: 0,
        }
    }
}

impl ConversionReport {
    /// Seconds spanned between the first and last record timestamps.
    ///
    /// `None` when timestamps went backwards anywhere in the stream, since the
    /// first and last records in file order then no longer bound the log.
    pub fn span_seconds(&self) -> Option<u32> {
        if self.timestamp_regressions > 0 {
            return None;
        }
        match (self.first, self.last) {
            (Some(first), Some(last)) => Some(last.timestamp.saturating_sub(first.timestamp)),
            _ => None,
        }
    }

    pub fn has_anomalies(&self) -> bool {
        self.revision_gaps > 0 || self.timestamp_regressions > 0
    }
}

/// Result of converting one file on disk
#[derive(Debug, Clone)]
pub struct FileConversion {
    pub output_path: PathBuf,
    pub report: ConversionReport,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn report(first_ts: u32, last_ts: u32, regressions: u64) -> ConversionReport {
        ConversionReport {
            records: 2,
            first: Some(RecordKey {
                revision: 1,
                timestamp: first_ts,
            }),
            last: Some(RecordKey {
                revision: 2,
                timestamp: last_ts,
            }),
            timestamp_regressions: regressions,
            ..ConversionReport::default()
        }
    }

    #[test]
    fn test_span_of_ordered_log() {
        assert_eq!(report(1000, 1600, 0).span_seconds(), Some(600));
    }

    #[test]
    fn test_no_span_for_wrapped_log() {
        assert_eq!(report(1600, 1000, 1).span_seconds(), None);
        // Wrapped in the middle: endpoints look ordered but the span is meaningless
        assert_eq!(report(1000, 1600, 1).span_seconds(), None);
    }

    #[test]
    fn test_no_span_without_records() {
        assert_eq!(ConversionReport::default().span_seconds(), None);
    }
}
