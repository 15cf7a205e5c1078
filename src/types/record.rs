#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Number of monitored channels per record
pub const CHANNEL_COUNT: usize = 15;

/// Byte length of one encoded record.
///
/// Two `u32` fields followed by 47 `f64` fields. The two integers share one
/// 8-byte slot, so the layout carries no alignment padding.
pub const RECORD_SIZE: usize = 4 + 4 + 8 + 8 + 3 * CHANNEL_COUNT * 8;

/// One data log sample
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Record {
    pub revision: u32,
    /// Seconds since the logger's epoch
    pub timestamp: u32,
    /// Total hours observed in this record
    pub log_hours: f64,
    pub hz_hours: f64,
    pub volt_hours: [f64; CHANNEL_COUNT],
    pub watt_hours: [f64; CHANNEL_COUNT],
    pub va_hours: [f64; CHANNEL_COUNT],
}

impl Record {
    pub fn new(revision: u32, timestamp: u32) -> Self {
        Self {
            revision,
            timestamp,
            log_hours: 0.0,
            hz_hours: 0.0,
            volt_hours: [0.0; CHANNEL_COUNT],
            watt_hours: [0.0; CHANNEL_COUNT],
            va_hours: [0.0; CHANNEL_COUNT],
        }
    }

    pub fn key(&self) -> RecordKey {
        RecordKey {
            revision: self.revision,
            timestamp: self.timestamp,
        }
    }

    /// Per-channel (volt, watt, va) triples in channel order
    pub fn channels(&self) -> impl Iterator<Item = (f64, f64, f64)> + '_ {
        (0..CHANNEL_COUNT).map(move |i| (self.volt_hours[i], self.watt_hours[i], self.va_hours[i]))
    }
}

impl Default for Record {
    fn default() -> Self {
        Self::new(0, 0)
    }
}

/// Identifying prefix of a record
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct RecordKey {
    pub revision: u32,
    pub timestamp: u32,
}
