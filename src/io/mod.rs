//! I/O module
//!
//! The boundary layers around the core:
//!
//! - `pdf_source` - pdfium-backed page provider
//! - `csv_format` - transaction CSV output

pub mod csv_format;
pub mod pdf_source;

pub use csv_format::write_transactions_csv;
pub use pdf_source::PdfiumSource;
