//! Record decoder
//!
//! Maps one fixed-size chunk onto a [`Record`] field by field. The logger
//! writes its in-memory struct straight to the SD card, so the on-disk layout
//! is the RP2040's native one: little-endian, no padding, with the three
//! channel arrays stored as consecutive blocks of [`CHANNEL_COUNT`] values.
//!
//! | bytes     | field        |
//! |-----------|--------------|
//! | 0..4      | revision     |
//! | 4..8      | timestamp    |
//! | 8..16     | log_hours    |
//! | 16..24    | hz_hours     |
//! | 24..144   | volt_hours   |
//! | 144..264  | watt_hours   |
//! | 264..384  | va_hours     |

use crate::error::{ExtractError, Result};
use crate::types::{Record, CHANNEL_COUNT, RECORD_SIZE};
use byteorder::{ByteOrder, LittleEndian};
use std::ops::Range;

/// Byte order of the producing logger
pub type LogEndian = LittleEndian;

const REVISION: Range<usize> = 0..4;
const TIMESTAMP: Range<usize> = 4..8;
const LOG_HOURS: Range<usize> = 8..16;
const HZ_HOURS: Range<usize> = 16..24;
const BLOCK_LEN: usize = CHANNEL_COUNT * 8;
const VOLT_HOURS: Range<usize> = 24..24 + BLOCK_LEN;
const WATT_HOURS: Range<usize> = VOLT_HOURS.end..VOLT_HOURS.end + BLOCK_LEN;
const VA_HOURS: Range<usize> = WATT_HOURS.end..WATT_HOURS.end + BLOCK_LEN;

/// Decode exactly one record.
///
/// Any chunk length other than [`RECORD_SIZE`] is rejected with
/// [`ExtractError::IncompleteRecord`] before a single field is read. The
/// reported offset is relative to the chunk, i.e. always 0; the stream reader
/// reports absolute offsets.
pub fn decode(chunk: &[u8]) -> Result<Record> {
    if chunk.len() != RECORD_SIZE {
        return Err(ExtractError::IncompleteRecord {
            expected: RECORD_SIZE,
            actual: chunk.len(),
            offset: 0,
        });
    }

    let mut record = Record::new(
        LogEndian::read_u32(&chunk[REVISION]),
        LogEndian::read_u32(&chunk[TIMESTAMP]),
    );
    record.log_hours = LogEndian::read_f64(&chunk[LOG_HOURS]);
    record.hz_hours = LogEndian::read_f64(&chunk[HZ_HOURS]);
    LogEndian::read_f64_into(&chunk[VOLT_HOURS], &mut record.volt_hours);
    LogEndian::read_f64_into(&chunk[WATT_HOURS], &mut record.watt_hours);
    LogEndian::read_f64_into(&chunk[VA_HOURS], &mut record.va_hours);

    Ok(record)
}

/// Encode a record in the logger's on-disk layout.
///
/// Used to produce sample data logs; the inverse of [`decode`].
pub fn encode(record: &Record) -> [u8; RECORD_SIZE] {
    let mut buf = [0u8; RECORD_SIZE];
    LogEndian::write_u32(&mut buf[REVISION], record.revision);
    LogEndian::write_u32(&mut buf[TIMESTAMP], record.timestamp);
    LogEndian::write_f64(&mut buf[LOG_HOURS], record.log_hours);
    LogEndian::write_f64(&mut buf[HZ_HOURS], record.hz_hours);
    LogEndian::write_f64_into(&record.volt_hours, &mut buf[VOLT_HOURS]);
    LogEndian::write_f64_into(&record.watt_hours, &mut buf[WATT_HOURS]);
    LogEndian::write_f64_into(&record.va_hours, &mut buf[VA_HOURS]);
    buf
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layout_covers_whole_record() {
        assert_eq!(RECORD_SIZE, 384);
        assert_eq!(VA_HOURS.end, RECORD_SIZE);
        assert_eq!(WATT_HOURS.start, 144);
        assert_eq!(VA_HOURS.start, 264);
    }

    #[test]
    fn test_decode_field_offsets() {
        let mut chunk = [0u8; RECORD_SIZE];
        chunk[0..4].copy_from_slice(&7u32.to_le_bytes());
        chunk[4..8].copy_from_slice(&1_700_000_000u32.to_le_bytes());
        chunk[8..16].copy_from_slice(&12.5f64.to_le_bytes());
        chunk[16..24].copy_from_slice(&3600.25f64.to_le_bytes());
        // first and last slot of each channel block
        chunk[24..32].copy_from_slice(&1.0f64.to_le_bytes());
        chunk[136..144].copy_from_slice(&15.0f64.to_le_bytes());
        chunk[144..152].copy_from_slice(&2.0f64.to_le_bytes());
        chunk[256..264].copy_from_slice(&30.0f64.to_le_bytes());
        chunk[264..272].copy_from_slice(&3.0f64.to_le_bytes());
        chunk[376..384].copy_from_slice(&45.0f64.to_le_bytes());

        let record = decode(&chunk).unwrap();
        assert_eq!(record.revision, 7);
        assert_eq!(record.timestamp, 1_700_000_000);
        assert_eq!(record.log_hours, 12.5);
        assert_eq!(record.hz_hours, 3600.25);
        assert_eq!(record.volt_hours[0], 1.0);
        assert_eq!(record.volt_hours[14], 15.0);
        assert_eq!(record.watt_hours[0], 2.0);
        assert_eq!(record.watt_hours[14], 30.0);
        assert_eq!(record.va_hours[0], 3.0);
        assert_eq!(record.va_hours[14], 45.0);
        assert_eq!(record.volt_hours[1], 0.0);
    }

    #[test]
    fn test_decode_integer_extremes() {
        for value in [0u32, 1, u32::MAX] {
            let mut record = Record::new(value, value);
            record.log_hours = 1.0;
            let decoded = decode(&encode(&record)).unwrap();
            assert_eq!(decoded.revision, value);
            assert_eq!(decoded.timestamp, value);
        }
    }

    #[test]
    fn test_decode_rejects_short_chunk() {
        let chunk = [0u8; RECORD_SIZE - 1];
        match decode(&chunk) {
            Err(ExtractError::IncompleteRecord {
                expected, actual, ..
            }) => {
                assert_eq!(expected, RECORD_SIZE);
                assert_eq!(actual, RECORD_SIZE - 1);
            }
            other => panic!("expected IncompleteRecord, got {other:?}"),
        }
    }

    #[test]
    fn test_decode_rejects_oversized_chunk() {
        let chunk = vec![0u8; RECORD_SIZE + 8];
        assert!(decode(&chunk).unwrap_err().is_incomplete_record());
    }

    #[test]
    fn test_decode_preserves_non_finite() {
        let mut record = Record::new(1, 2);
        record.hz_hours = f64::NAN;
        record.watt_hours[3] = f64::INFINITY;
        let decoded = decode(&encode(&record)).unwrap();
        assert!(decoded.hz_hours.is_nan());
        assert_eq!(decoded.watt_hours[3], f64::INFINITY);
    }
}
