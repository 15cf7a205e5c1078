//! Data log extraction library
//!
//! Decodes the fixed-size binary records written by the energy monitor's SD
//! card data logger and renders them as CSV.
//!
//! # Features
//!
//! - **`cli`** (default): Build the command-line interface binary
//! - **`serde`**: Enable serialization/deserialization of types
//!
//! # Quick Start
//!
//! Convert a log file on disk:
//! ```rust,no_run
//! use datalog_extract::{convert_file, ExportOptions};
//! use std::path::Path;
//!
//! let conversion = convert_file(Path::new("datalog.bin"), &ExportOptions::default()).unwrap();
//! println!("Wrote {} records to {}", conversion.report.records, conversion.output_path.display());
//! ```
//!
//! Decode records from any reader:
//! ```rust,no_run
//! use datalog_extract::RecordReader;
//! use std::fs::File;
//!
//! let reader = RecordReader::new(File::open("datalog.bin").unwrap());
//! for record in reader {
//!     let record = record.unwrap();
//!     println!("{} @ {}: {:.3} Wh", record.revision, record.timestamp, record.watt_hours[0]);
//! }
//! ```
//!
//! # Public API
//!
//! ## Decoding
//! - [`decode`] - Decode one fixed-size chunk into a [`Record`]
//! - [`RecordReader`] - Pull records sequentially from a byte source
//!
//! ## Export
//! - [`render_header`] / [`render_record`] - Text lines for the CSV output
//! - [`CsvSession`] - Header-then-records writer with explicit state
//! - [`convert`] - Convert a whole stream, returning a [`ConversionReport`]
//! - [`convert_file`] - Convert a file on disk
//! - [`compute_output_path`] - Output path derivation

pub mod conversion;
pub mod error;
pub mod export;
pub mod integrity;
pub mod parser;
pub mod types;

pub use conversion::*;
pub use error::*;
pub use export::*;
pub use integrity::*;
pub use parser::*;
pub use types::*;
