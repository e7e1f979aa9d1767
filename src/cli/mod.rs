// CLI module
// Argument parsing, file/directory traversal, and per-document conversion

mod args;

pub use args::CliArgs;

use crate::core::ExtractionEngine;
use crate::io::{write_transactions_csv, PdfiumSource};
use crate::types::ExtractError;
use clap::Parser;
use log::{error, info, warn};
use regex::Regex;
use std::fs::{self, File};
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

/// Parse command-line arguments using clap.
pub fn parse_args() -> CliArgs {
    CliArgs::parse()
}

/// Run the conversion described by the arguments.
pub fn run(args: &CliArgs) -> Result<(), ExtractError> {
    if args.batch {
        convert_directory(&args.path, args.year.as_deref())
    } else {
        convert_file(&args.path, args.year.as_deref()).map(|_| ())
    }
}

fn year_in_path_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(20\d{2})_statements").expect("year regex"))
}

/// Take the statement year from a `<year>_statements` component of the path.
pub fn infer_year_from_path(path: &Path) -> Option<String> {
    year_in_path_re()
        .captures(&path.to_string_lossy())
        .map(|caps| caps[1].to_string())
}

/// Where the CSV for a given PDF goes: same directory, `.pdf` replaced by
/// `_transactions.csv`.
pub fn output_path_for(path: &Path) -> PathBuf {
    let stem = path.file_stem().unwrap_or_default().to_string_lossy();
    path.with_file_name(format!("{}_transactions.csv", stem))
}

/// Convert one PDF, writing its CSV next to it. Returns the number of
/// transactions written.
///
/// A document in which no transactions can be found is reported and skipped
/// (no CSV is written); that is not an error.
pub fn convert_file(path: &Path, year: Option<&str>) -> Result<usize, ExtractError> {
    let year = match year {
        Some(year) => year.to_string(),
        None => infer_year_from_path(path)
            .ok_or_else(|| ExtractError::year_unknown(path.display().to_string()))?,
    };
    info!("using year {} for transactions in {}", year, path.display());

    let source = PdfiumSource::load(path)?;
    let mut engine = ExtractionEngine::new(year);
    let transactions = engine.extract(&source);

    if transactions.is_empty() {
        warn!(
            "{}: no transactions found on any page, skipping output",
            path.display()
        );
        return Ok(0);
    }

    let output_path = output_path_for(path);
    let mut output = File::create(&output_path)?;
    write_transactions_csv(&transactions, &mut output)?;
    info!(
        "wrote {} transactions to {}",
        transactions.len(),
        output_path.display()
    );
    Ok(transactions.len())
}

/// Convert every PDF under a directory tree.
///
/// Documents are independent: a file that fails to convert is logged and the
/// batch moves on.
pub fn convert_directory(directory: &Path, year: Option<&str>) -> Result<(), ExtractError> {
    let mut pdfs = Vec::new();
    collect_pdfs(directory, &mut pdfs)?;
    pdfs.sort();
    info!("converting {} PDFs under {}", pdfs.len(), directory.display());

    for pdf in pdfs {
        if let Err(err) = convert_file(&pdf, year) {
            error!("{}: {}", pdf.display(), err);
        }
    }
    Ok(())
}

fn collect_pdfs(directory: &Path, out: &mut Vec<PathBuf>) -> Result<(), ExtractError> {
    for entry in fs::read_dir(directory)? {
        let path = entry?.path();
        if path.is_dir() {
            collect_pdfs(&path, out)?;
        } else if path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("pdf"))
        {
            out.push(path);
        }
    }
    Ok(())
}
