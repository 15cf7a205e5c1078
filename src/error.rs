use std::fmt;

/// Errors raised while decoding and exporting data log records
#[derive(Debug)]
pub enum ExtractError {
    /// I/O errors from the input source or output sink
    Io(std::io::Error),
    /// CSV writer errors
    Csv(csv::Error),
    /// The source ended partway through a record
    IncompleteRecord {
        expected: usize,
        actual: usize,
        offset: u64,
    },
    /// A session operation was called out of order
    InvalidState {
        state: &'static str,
        operation: &'static str,
    },
    /// Export setup error (output path resolution and the like)
    Export(String),
}

impl ExtractError {
    /// True for the truncated-final-record condition, which ends a conversion
    /// without invalidating lines already written.
    pub fn is_incomplete_record(&self) -> bool {
        matches!(self, ExtractError::IncompleteRecord { .. })
    }
}

impl fmt::Display for ExtractError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExtractError::Io(err) => write!(f, "I/O error: {}", err),
            ExtractError::Csv(err) => write!(f, "CSV error: {}", err),
            ExtractError::IncompleteRecord {
                expected,
                actual,
                offset,
            } => write!(
                f,
                "Incomplete record at offset {}: expected {} bytes, got {} bytes",
                offset, expected, actual
            ),
            ExtractError::InvalidState { state, operation } => {
                write!(f, "Cannot {} while session is {}", operation, state)
            }
            ExtractError::Export(msg) => write!(f, "Export error: {}", msg),
        }
    }
}

impl std::error::Error for ExtractError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ExtractError::Io(err) => Some(err),
            ExtractError::Csv(err) => Some(err),
            _ => None,
        }
    }
}

impl From<std::io::Error> for ExtractError {
    fn from(err: std::io::Error) -> Self {
        ExtractError::Io(err)
    }
}

impl From<csv::Error> for ExtractError {
    fn from(err: csv::Error) -> Self {
        ExtractError::Csv(err)
    }
}

pub type Result<T> = std::result::Result<T, ExtractError>;
