//! Statement extraction CLI
//!
//! Command-line interface for converting bank statement PDFs to CSV.
//!
//! # Usage
//!
//! ```bash
//! statement-extract 2023_statements/january.pdf
//! statement-extract --year 2024 statement.pdf
//! statement-extract --batch 2023_statements/
//! ```
//!
//! Each converted document writes `<name>_transactions.csv` next to the
//! source PDF. The statement year is taken from `--year`, or inferred from a
//! `<year>_statements` directory component of the path.
//!
//! # Exit Codes
//!
//! - 0: Success (including documents that yielded no transactions)
//! - 1: Fatal error (unreadable PDF, unknown year, I/O failure)

use statement_extract::cli;
use std::process;

fn main() {
    env_logger::init();

    let args = cli::parse_args();
    if let Err(err) = cli::run(&args) {
        eprintln!("Error: {}", err);
        process::exit(1);
    }
}
