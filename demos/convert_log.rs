//! Data Log Conversion Example
//!
//! Demonstrates the streaming API: records are pulled one at a time with
//! `RecordReader` for a quick look at the log, then the whole file is
//! converted to CSV with `convert`.
//!
//! Usage: convert_log <datalog.bin> [output.csv]

use datalog_extract::{compute_output_path, convert, ExportOptions, RecordReader, Termination};
use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::{Path, PathBuf};

fn main() -> anyhow::Result<()> {
    let input_file = std::env::args().nth(1).unwrap_or_else(|| {
        println!("Usage: convert_log <datalog.bin> [output.csv]");
        println!("Example: convert_log DATALOG.BIN ./datalog.csv");
        std::process::exit(1);
    });
    let input_path = Path::new(&input_file);

    let options = ExportOptions {
        output_path: std::env::args().nth(2).map(PathBuf::from),
        output_dir: None,
    };
    let output_path = compute_output_path(input_path, &options);

    // Peek at the first few records
    println!("First records in {}:", input_path.display());
    let reader = RecordReader::new(BufReader::new(File::open(input_path)?));
    for record in reader.take(3) {
        match record {
            Ok(record) => println!(
                "  rev {:>8}  ts {:>10}  log {:.6} h  ch1 {:.3} Wh",
                record.revision, record.timestamp, record.log_hours, record.watt_hours[0]
            ),
            Err(e) => {
                println!("  {e}");
                break;
            }
        }
    }

    // Full conversion
    println!("\nExporting to {}...", output_path.display());
    let input = BufReader::new(File::open(input_path)?);
    let output = BufWriter::new(File::create(&output_path)?);
    let report = convert(input, output)?;

    println!("  Records: {}", report.records);
    if let Some(span) = report.span_seconds() {
        println!("  Span: {span} s");
    }
    if let Termination::IncompleteRecord { trailing_bytes } = report.termination {
        println!("  Skipped {trailing_bytes} trailing bytes of an incomplete record");
    }
    if report.has_anomalies() {
        println!(
            "  {} revision gap(s), {} timestamp regression(s)",
            report.revision_gaps, report.timestamp_regressions
        );
    }
    println!("✓ CSV export complete");

    Ok(())
}
