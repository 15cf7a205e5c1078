//! CSV export of decoded data log records
//!
//! One header line, then one line per record, columns in the order
//! `Revision,Timestamp,LogHours,HzHours` followed by
//! `VoltHrs{i},WattHrs{i},VaHrs{i}` for each channel `i` in `1..=15`.
//! Lines end with `\n`.

use crate::conversion::*;
use crate::error::{ExtractError, Result};
use crate::integrity::SequenceCheck;
use crate::parser::RecordReader;
use crate::types::*;
use log::{debug, info, warn};
use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::{Path, PathBuf};

/// Extension given to derived output files
pub const CSV_EXTENSION: &str = "csv";

/// Export options for controlling where output lands
#[derive(Debug, Clone, Default)]
pub struct ExportOptions {
    /// Explicit output file; overrides path derivation
    pub output_path: Option<PathBuf>,
    /// Directory for derived output files (default: beside the input)
    pub output_dir: Option<String>,
}

/// Column names in output order
pub fn header_fields() -> Vec<String> {
    let mut fields = Vec::with_capacity(4 + 3 * CHANNEL_COUNT);
    fields.extend(
        ["Revision", "Timestamp", "LogHours", "HzHours"]
            .iter()
            .map(|s| s.to_string()),
    );
    for i in 1..=CHANNEL_COUNT {
        fields.push(format!("VoltHrs{i}"));
        fields.push(format!("WattHrs{i}"));
        fields.push(format!("VaHrs{i}"));
    }
    fields
}

/// Formatted values of one record, in the same order as [`header_fields`]
pub fn record_fields(record: &Record) -> Vec<String> {
    let mut fields = Vec::with_capacity(4 + 3 * CHANNEL_COUNT);
    fields.push(record.revision.to_string());
    fields.push(record.timestamp.to_string());
    fields.push(format_log_hours(record.log_hours));
    fields.push(format_hz_hours(record.hz_hours));
    for (volt, watt, va) in record.channels() {
        fields.push(format_channel_hours(volt));
        fields.push(format_channel_hours(watt));
        fields.push(format_channel_hours(va));
    }
    fields
}

/// The header line, newline included
pub fn render_header() -> String {
    let mut line = header_fields().join(",");
    line.push('\n');
    line
}

/// One data line, newline included
pub fn render_record(record: &Record) -> String {
    let mut line = record_fields(record).join(",");
    line.push('\n');
    line
}

/// A single conversion pass writing CSV lines to a sink.
///
/// The header has to be written with [`CsvSession::begin`] before any record,
/// and nothing can be written once the session is finished.
pub struct CsvSession<W: Write> {
    writer: csv::Writer<W>,
    state: SessionState,
    records: u64,
}

impl<W: Write> CsvSession<W> {
    pub fn new(inner: W) -> Self {
        let writer = csv::WriterBuilder::new()
            .has_headers(false)
            .terminator(csv::Terminator::Any(b'\n'))
            .from_writer(inner);
        Self {
            writer,
            state: SessionState::NotStarted,
            records: 0,
        }
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Data lines written so far
    pub fn records(&self) -> u64 {
        self.records
    }

    /// Write the header line
    pub fn begin(&mut self) -> Result<()> {
        if self.state != SessionState::NotStarted {
            return Err(self.invalid("write the header"));
        }
        self.writer.write_record(header_fields())?;
        self.state = SessionState::HeaderWritten;
        debug!("CSV header written");
        Ok(())
    }

    pub fn write_record(&mut self, record: &Record) -> Result<()> {
        if !self.state.accepts_records() {
            return Err(self.invalid("write a record"));
        }
        self.writer.write_record(record_fields(record))?;
        self.state = SessionState::DataWritten;
        self.records += 1;
        debug!(
            "Record {} written (revision {}, timestamp {})",
            self.records, record.revision, record.timestamp
        );
        Ok(())
    }

    /// Flush everything written and close the session
    pub fn finish(&mut self) -> Result<()> {
        if !self.state.accepts_records() {
            return Err(self.invalid("finish"));
        }
        self.writer.flush()?;
        self.state = SessionState::Finished;
        debug!("CSV session finished after {} records", self.records);
        Ok(())
    }

    /// Give back the sink, flushing any buffered output
    pub fn into_inner(self) -> Result<W> {
        self.writer
            .into_inner()
            .map_err(|e| ExtractError::Io(e.into_error()))
    }

    fn invalid(&self, operation: &'static str) -> ExtractError {
        ExtractError::InvalidState {
            state: self.state.name(),
            operation,
        }
    }
}

/// Convert a complete data log from `input` to CSV on `output`.
///
/// A truncated final record ends the conversion without an error: every
/// line written before it stays valid, and the report carries
/// [`Termination::IncompleteRecord`]. Any other failure is returned.
pub fn convert<R: Read, W: Write>(input: R, output: W) -> Result<ConversionReport> {
    let mut reader = RecordReader::new(input);
    let mut session = CsvSession::new(output);
    let mut check = SequenceCheck::new();
    let mut report = ConversionReport::default();

    session.begin()?;
    loop {
        match reader.read_record() {
            Ok(Some(record)) => {
                check.observe(&record);
                let key = record.key();
                report.first.get_or_insert(key);
                report.last = Some(key);
                session.write_record(&record)?;
            }
            Ok(None) => break,
            Err(ExtractError::IncompleteRecord {
                expected,
                actual,
                offset,
            }) => {
                warn!(
                    "Incomplete record at offset {offset}: expected {expected} bytes, got {actual} bytes; stopping"
                );
                report.termination = Termination::IncompleteRecord {
                    trailing_bytes: actual,
                };
                break;
            }
            Err(e) => return Err(e),
        }
    }
    session.finish()?;

    report.records = session.records();
    report.bytes_read = reader.pos;
    check.apply(&mut report);
    Ok(report)
}

/// Resolve the output file for `input_path`.
///
/// An explicit output path wins. Otherwise the input's extension is replaced
/// with `.csv` and the file lands in the output directory, or beside the input.
pub fn compute_output_path(input_path: &Path, options: &ExportOptions) -> PathBuf {
    if let Some(ref path) = options.output_path {
        return path.clone();
    }

    let derived = input_path.with_extension(CSV_EXTENSION);
    match (&options.output_dir, derived.file_name()) {
        (Some(dir), Some(name)) => Path::new(dir).join(name),
        _ => derived,
    }
}

/// Convert a data log file on disk
pub fn convert_file(input_path: &Path, options: &ExportOptions) -> Result<FileConversion> {
    let output_path = compute_output_path(input_path, options);
    if same_file(input_path, &output_path) {
        return Err(ExtractError::Export(format!(
            "output path {} would overwrite the input",
            output_path.display()
        )));
    }

    if let Some(parent) = output_path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            fs::create_dir_all(parent)?;
            debug!("Created output directory: {parent:?}");
        }
    }

    let input = BufReader::new(File::open(input_path)?);
    let output = BufWriter::new(File::create(&output_path)?);
    debug!("Converting {input_path:?} -> {output_path:?}");

    let report = convert(input, output)?;
    info!(
        "Converted {} records from {:?} ({} bytes)",
        report.records, input_path, report.bytes_read
    );

    Ok(FileConversion {
        output_path,
        report,
    })
}

fn same_file(a: &Path, b: &Path) -> bool {
    match (a.canonicalize(), b.canonicalize()) {
        (Ok(a), Ok(b)) => a == b,
        _ => a == b,
    }
}
