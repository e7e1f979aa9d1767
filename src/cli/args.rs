use clap::Parser;
use std::path::PathBuf;

/// Convert bank statement PDFs to transaction CSV files
#[derive(Parser, Debug)]
#[command(name = "statement-extract")]
#[command(about = "Convert bank statement PDF(s) to transaction CSV", long_about = None)]
pub struct CliArgs {
    /// PDF file (or, with --batch, directory) to convert
    #[arg(value_name = "PATH", help = "PDF file or directory to convert")]
    pub path: PathBuf,

    /// Convert every PDF found under the given directory
    #[arg(long = "batch", help = "Convert all PDFs in the specified directory")]
    pub batch: bool,

    /// Statement year for transaction dates
    #[arg(
        long = "year",
        value_name = "YYYY",
        help = "Year to use for transactions (e.g. 2024); inferred from the path when omitted"
    )]
    pub year: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case::single_file(&["statement-extract", "statement.pdf"], false, None)]
    #[case::batch(&["statement-extract", "--batch", "statements/"], true, None)]
    #[case::explicit_year(
        &["statement-extract", "--year", "2024", "statement.pdf"],
        false,
        Some("2024")
    )]
    #[case::batch_with_year(
        &["statement-extract", "--batch", "--year", "2023", "statements/"],
        true,
        Some("2023")
    )]
    fn argument_parsing(
        #[case] args: &[&str],
        #[case] batch: bool,
        #[case] year: Option<&str>,
    ) {
        let parsed = CliArgs::try_parse_from(args).unwrap();
        assert_eq!(parsed.batch, batch);
        assert_eq!(parsed.year.as_deref(), year);
    }

    #[rstest]
    #[case::missing_path(&["statement-extract"])]
    #[case::year_without_value(&["statement-extract", "--year"])]
    fn parsing_errors(#[case] args: &[&str]) {
        assert!(CliArgs::try_parse_from(args).is_err());
    }
}
