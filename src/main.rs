use anyhow::{Context, Result};
use clap::{Arg, ArgAction, Command};
use datalog_extract::{convert_file, ExportOptions, FileConversion, Termination};
use glob::glob;
use log::debug;
use std::path::{Path, PathBuf};

const LONG_VERSION: &str = concat!(
    env!("CARGO_PKG_VERSION"),
    " (",
    env!("VERGEN_GIT_SHA"),
    " ",
    env!("VERGEN_GIT_COMMIT_DATE"),
    ")"
);

fn build_command() -> Command {
    Command::new("datalog_extract")
        .version(env!("CARGO_PKG_VERSION"))
        .long_version(LONG_VERSION)
        .about("Convert binary energy-monitor data logs to CSV.")
        .arg(
            Arg::new("files")
                .help("Data log files to convert (supports globbing). Output defaults to the input path with a .csv extension.")
                .required(true)
                .num_args(1..)
                .index(1),
        )
        .arg(
            Arg::new("output")
                .short('o')
                .long("output")
                .help("Output file (only valid with a single input file)")
                .value_name("FILE"),
        )
        .arg(
            Arg::new("output-dir")
                .long("output-dir")
                .help("Directory for output files (default: same as input file)")
                .value_name("DIR"),
        )
        .arg(
            Arg::new("debug")
                .long("debug")
                .help("Enable debug output and detailed conversion information")
                .action(ArgAction::SetTrue),
        )
}

fn init_logging(debug: bool) {
    let default_filter = if debug { "debug" } else { "warn" };
    let env = env_logger::Env::default().default_filter_or(default_filter);
    let _ = env_logger::Builder::from_env(env)
        .format_timestamp(None)
        .try_init();
}

/// Expand glob patterns; plain paths pass through untouched
fn expand_input_paths(patterns: &[&String]) -> Result<Vec<PathBuf>> {
    let mut paths = Vec::new();
    for pattern in patterns {
        if pattern.contains('*') || pattern.contains('?') {
            let matched = glob(pattern)
                .with_context(|| format!("Invalid glob pattern '{pattern}'"))?
                .collect::<std::result::Result<Vec<_>, _>>()
                .with_context(|| format!("Error expanding glob pattern '{pattern}'"))?;
            debug!("Glob pattern '{pattern}' matched {} files", matched.len());
            paths.extend(matched.into_iter().filter(|p| p.is_file()));
        } else {
            paths.push(PathBuf::from(pattern.as_str()));
        }
    }
    Ok(paths)
}

fn print_summary(path: &Path, conversion: &FileConversion) {
    let report = &conversion.report;
    println!(
        "Exported {} records to: {}",
        report.records,
        conversion.output_path.display()
    );
    if let (Some(first), Some(last)) = (report.first, report.last) {
        let span = report
            .span_seconds()
            .map(|s| format!(" ({s} s)"))
            .unwrap_or_default();
        println!(
            "  Revisions {}..{}, timestamps {}..{}{}",
            first.revision, last.revision, first.timestamp, last.timestamp, span
        );
    }
    if let Termination::IncompleteRecord { trailing_bytes } = report.termination {
        eprintln!(
            "Warning: {path:?} ends with an incomplete record ({trailing_bytes} bytes ignored); the log may be truncated or was not closed cleanly"
        );
    }
    if report.has_anomalies() {
        eprintln!(
            "Warning: {} revision gap(s) and {} timestamp regression(s) in {path:?}",
            report.revision_gaps, report.timestamp_regressions
        );
    }
}

fn main() -> Result<()> {
    let matches = build_command().get_matches();

    let debug = matches.get_flag("debug");
    init_logging(debug);

    let output_path = matches.get_one::<String>("output").map(PathBuf::from);
    let output_dir = matches.get_one::<String>("output-dir").cloned();
    let file_patterns: Vec<&String> = matches
        .get_many::<String>("files")
        .map(|files| files.collect())
        .unwrap_or_default();

    let input_files = match expand_input_paths(&file_patterns) {
        Ok(files) => files,
        Err(e) => {
            eprintln!("Error: {e:#}");
            std::process::exit(1);
        }
    };

    if input_files.is_empty() {
        eprintln!("Error: No input files found. Input patterns were: {file_patterns:?}");
        std::process::exit(1);
    }

    if output_path.is_some() && input_files.len() > 1 {
        eprintln!(
            "Error: --output can only be used with a single input file ({} given)",
            input_files.len()
        );
        std::process::exit(1);
    }

    let export_options = ExportOptions {
        output_path,
        output_dir,
    };
    debug!("Export options: {export_options:?}");

    let mut converted = 0;
    for (index, path) in input_files.iter().enumerate() {
        if index > 0 {
            println!();
        }

        let filename = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("unknown");
        println!("Processing: {filename}");

        match convert_file(path, &export_options)
            .with_context(|| format!("Failed to convert {path:?}"))
        {
            Ok(conversion) => {
                print_summary(path, &conversion);
                converted += 1;
            }
            Err(e) => {
                eprintln!("Error: {e:#}");
                if input_files.len() > 1 {
                    eprintln!("Continuing with next file...");
                }
            }
        }
    }

    if converted == 0 {
        eprintln!(
            "Error: No files were converted out of {} files found.",
            input_files.len()
        );
        std::process::exit(1);
    }

    Ok(())
}
