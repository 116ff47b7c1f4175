//! Account OCR CLI
//!
//! Decodes every matching file in a source directory and writes one
//! `<name>.out` file per source into the destination directory.
//!
//! # Usage
//!
//! ```bash
//! cargo run -- ./scans ./decoded
//! ```
//!
//! # Environment Variables
//!
//! - `RUST_LOG`: Set to `debug` or `warn` to control logging verbosity

use account_ocr::{process_file, Observer, OcrError, Result};
use clap::Parser;
use std::ffi::OsStr;
use std::fs;
use std::path::{Path, PathBuf};
use std::process;

#[derive(Parser)]
#[command(name = "account-ocr", version, about = "Decode ASCII account number scans")]
struct CliArgs {
    /// Directory containing the input files, or a single input file
    #[arg(default_value = ".")]
    source: PathBuf,

    /// Directory for output files (defaults to the source directory)
    destination: Option<PathBuf>,

    /// Extension of input files to pick up from the source directory
    #[arg(long, default_value = "data")]
    extension: String,

    /// Do not echo each decoded account number
    #[arg(short, long, default_value_t = false)]
    quiet: bool,
}

fn main() {
    env_logger::init();

    let args = CliArgs::parse();
    match run(&args) {
        Ok(0) => {}
        Ok(failed) => {
            eprintln!("Error: {} file(s) failed", failed);
            process::exit(1);
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    }
}

/// Processes every input file, returning the number that failed.
fn run(args: &CliArgs) -> Result<usize> {
    if !args.source.exists() {
        return Err(OcrError::MissingSource(args.source.clone()));
    }

    let (files, source_dir) = if args.source.is_dir() {
        (find_inputs(&args.source, &args.extension)?, args.source.clone())
    } else {
        let parent = args
            .source
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or(Path::new("."))
            .to_path_buf();
        (vec![args.source.clone()], parent)
    };
    let destination = args.destination.clone().unwrap_or(source_dir);

    if files.is_empty() {
        println!("No account number *.{} files found.", args.extension);
        return Ok(0);
    }

    fs::create_dir_all(&destination)?;

    let mut failed = 0;
    for file in &files {
        println!("Parsing {}...", file.display());

        let quiet = args.quiet;
        let observer = Observer::new().on_result(move |result| {
            if !quiet {
                println!("{}", result);
            }
        });

        match process_file(file, &destination, observer) {
            Ok(report) => {
                let name = report
                    .source
                    .file_name()
                    .map(|n| n.to_string_lossy().into_owned())
                    .unwrap_or_default();
                println!(
                    "Parsed {} account numbers from {}.",
                    report.results.len(),
                    name
                );
                println!("Generated output file in {}.", destination.display());
            }
            Err(e) => {
                eprintln!("Error: {}: {}", file.display(), e);
                failed += 1;
            }
        }
    }

    Ok(failed)
}

/// Lists files in `dir` with the given extension, sorted by path.
fn find_inputs(dir: &Path, extension: &str) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        if path.is_file() && path.extension() == Some(OsStr::new(extension)) {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}
