//! Bank statement transaction extractor
//! # Overview
//!
//! This library reconstructs tabular transaction records from rendered bank
//! statement pages and serializes them as CSV. Pages arrive as positioned
//! text tokens and/or reflowed text lines, and either representation may be
//! unreliable for any given page, so extraction runs two strategies in a
//! fixed fallback order.
//!
//! # Architecture
//!
//! - [`types`] - Core data types (Token, Column, Transaction, errors)
//! - [`cli`] - CLI argument parsing, traversal, and per-document conversion
//! - [`core`] - Business logic components:
//!   - [`core::engine`] - Document extraction orchestration
//!   - [`core::amount`] - Amount classification heuristics
//!   - [`core::dedup`] - Per-document transaction deduplication
//! - [`strategy`] - Page parsing strategies tried in fallback order:
//!   - [`strategy::positioned`] - Column discovery over positioned tokens
//!   - [`strategy::text_lines`] - Header-anchored text-line reconstruction
//! - [`io`] - The boundary layers (pdfium page provider, CSV output)
//!
//! # Extraction flow
//!
//! For each page the positioned-token parser runs first: it discovers the six
//! statement columns from header tokens and buckets row tokens into them.
//! When any column cannot be located, the page falls back to text-line
//! parsing, anchored by a three-line header pattern located once across the
//! whole document. Transactions from either path are year-qualified and
//! deduplicated by signature before serialization, which collapses rows that
//! repeat across page boundaries.

// Module declarations
pub mod cli;
pub mod core;
pub mod io;
pub mod strategy;
pub mod types;

pub use self::core::{DedupContext, ExtractionEngine, PageSource};
pub use io::{write_transactions_csv, PdfiumSource};
pub use types::{Column, ColumnLayout, ExtractError, PageContent, Token, Transaction};
