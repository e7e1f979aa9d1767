//! Error types for statement extraction.
//!
//! The taxonomy separates recoverable parsing failures (column resolution,
//! missing header anchor — these degrade to "fewer transactions") from
//! per-document fatal conditions (unopenable PDF, unknown statement year) and
//! genuine I/O failures. Nothing here ever aborts a batch run; each document
//! is handled independently.

use thiserror::Error;

/// All failures the extractor can report.
#[derive(Debug, Error)]
pub enum ExtractError {
    /// The column locator could not place every expected column on a page.
    ///
    /// Recoverable: the caller falls back to text-line parsing for the page.
    #[error("could not resolve all statement columns on page {page}")]
    ColumnResolution {
        /// Zero-based page index.
        page: usize,
    },

    /// No three-line transaction header was found on any page.
    ///
    /// Terminal for the document's fallback path: the document yields zero
    /// transactions, but the run continues.
    #[error("no transaction header found on any page")]
    HeaderNotFound,

    /// The source PDF could not be opened or read.
    #[error("failed to open {path}: {message}")]
    PdfOpen { path: String, message: String },

    /// No statement year was supplied and none could be inferred from the
    /// document's path.
    #[error(
        "could not infer statement year from path: {path} \
         (expected a '<year>_statements' directory component, or pass --year)"
    )]
    YearUnknown { path: String },

    /// Underlying I/O failure while reading input or writing output.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV serialization failure.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

impl ExtractError {
    pub fn column_resolution(page: usize) -> Self {
        ExtractError::ColumnResolution { page }
    }

    pub fn pdf_open(path: impl Into<String>, message: impl Into<String>) -> Self {
        ExtractError::PdfOpen {
            path: path.into(),
            message: message.into(),
        }
    }

    pub fn year_unknown(path: impl Into<String>) -> Self {
        ExtractError::YearUnknown { path: path.into() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn column_resolution_message_names_the_page() {
        let err = ExtractError::column_resolution(3);
        assert_eq!(
            err.to_string(),
            "could not resolve all statement columns on page 3"
        );
    }

    #[test]
    fn year_unknown_message_mentions_the_flag() {
        let err = ExtractError::year_unknown("/tmp/statement.pdf");
        assert!(err.to_string().contains("--year"));
        assert!(err.to_string().contains("/tmp/statement.pdf"));
    }

    #[test]
    fn io_errors_convert_via_from() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let err: ExtractError = io.into();
        assert!(matches!(err, ExtractError::Io(_)));
    }
}
