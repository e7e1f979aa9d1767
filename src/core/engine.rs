//! Document-level extraction orchestration.
//!
//! The engine drives one document's conversion: it collects every page's
//! reflowed text up front (the header anchor must be located across the whole
//! document before any text-line parsing begins), runs the strategy
//! coordinator page by page, qualifies each transaction's date with the
//! statement year, and filters repeats through the per-document deduplicator.

use crate::core::dedup::DedupContext;
use crate::strategy::{self, text_lines, DocumentContext};
use crate::types::{PageContent, Token, Transaction};
use log::{debug, warn};

/// Per-page content provider, the seam to the PDF extraction layer.
///
/// Implementations may return an empty token list or `None` text for pages
/// that yield nothing; the engine degrades those to zero transactions.
pub trait PageSource {
    /// Number of pages in the document.
    fn page_count(&self) -> usize;

    /// Positioned text tokens for a page, sorted by `(top, x0)`.
    fn positioned_tokens(&self, index: usize) -> Vec<Token>;

    /// Reflowed plain text for a page, `None` when nothing is extractable.
    fn plain_text(&self, index: usize) -> Option<String>;
}

/// Extraction engine for a single document conversion.
///
/// Owns the conversion-scoped state: the statement year used to qualify
/// dates and the deduplication context. Create one engine per document so
/// batch runs cannot leak seen-transaction state between files.
pub struct ExtractionEngine {
    year: String,
    dedup: DedupContext,
}

impl ExtractionEngine {
    /// Create an engine for one document, qualified with the given
    /// four-digit statement year.
    pub fn new(year: impl Into<String>) -> Self {
        ExtractionEngine {
            year: year.into(),
            dedup: DedupContext::new(),
        }
    }

    /// Extract every unique transaction from the document, in page order.
    ///
    /// Pages are processed strictly in document order. A page that neither
    /// strategy can parse contributes nothing; an empty result for the whole
    /// document is reported by the caller, not an error here.
    pub fn extract(&mut self, source: &dyn PageSource) -> Vec<Transaction> {
        let page_count = source.page_count();

        // Pass 1: gather all reflowed text and locate the header anchor, so
        // any page may fall back to text-line parsing afterwards.
        let page_texts: Vec<Option<String>> =
            (0..page_count).map(|i| source.plain_text(i)).collect();
        let header_anchor = text_lines::locate_header(&page_texts);
        if header_anchor.is_none() {
            debug!("no text-mode header anchor in {} pages", page_count);
        }
        let ctx = DocumentContext {
            page_texts: &page_texts,
            header_anchor,
        };

        // Pass 2: reconstruct page by page.
        let mut transactions = Vec::new();
        for index in 0..page_count {
            let page = PageContent {
                tokens: source.positioned_tokens(index),
                text: page_texts[index].clone(),
            };
            let raw = strategy::extract_page(index, &page, &ctx);
            let raw_count = raw.len();

            let mut kept = 0;
            for mut transaction in raw {
                transaction.qualify_year(&self.year);
                if self.dedup.insert(&transaction) {
                    transactions.push(transaction);
                    kept += 1;
                }
            }
            debug!(
                "page {}: {} raw transactions, {} unique, {} duplicates skipped",
                index,
                raw_count,
                kept,
                raw_count - kept
            );
        }

        if transactions.is_empty() {
            warn!("no transactions extracted from any page");
        }
        transactions
    }

    /// Total repeats discarded so far, for diagnostics.
    pub fn duplicates(&self) -> usize {
        self.dedup.duplicates()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// In-memory page source for engine tests.
    struct StaticSource {
        pages: Vec<PageContent>,
    }

    impl PageSource for StaticSource {
        fn page_count(&self) -> usize {
            self.pages.len()
        }

        fn positioned_tokens(&self, index: usize) -> Vec<Token> {
            self.pages[index].tokens.clone()
        }

        fn plain_text(&self, index: usize) -> Option<String> {
            self.pages[index].text.clone()
        }
    }

    fn text_page(text: &str) -> PageContent {
        PageContent {
            tokens: Vec::new(),
            text: Some(text.to_string()),
        }
    }

    const HEADER: &str = "Transaction history\n\
                          Deposits/ Withdrawals/ Ending daily\n\
                          Date Number Description Credits Debits balance\n";

    #[test]
    fn empty_document_extracts_nothing() {
        let source = StaticSource { pages: Vec::new() };
        let mut engine = ExtractionEngine::new("2024");
        assert!(engine.extract(&source).is_empty());
    }

    #[test]
    fn dates_are_year_qualified_before_dedup() {
        let body = format!("{HEADER}1/2 Coffee Shop 4.50\n");
        let source = StaticSource {
            pages: vec![text_page(&body)],
        };
        let mut engine = ExtractionEngine::new("2024");
        let transactions = engine.extract(&source);
        assert_eq!(transactions.len(), 1);
        assert_eq!(transactions[0].date, "1/2/2024");
    }

    #[test]
    fn fallback_pages_reparse_the_anchor_and_dedup_collapses_them() {
        // Both pages lack positioned tokens, so both fall back to the anchor
        // page; the second pass repeats the first's transactions exactly.
        let body = format!("{HEADER}1/2 Coffee Shop 4.50\n1/3 Grocery 23.10\n");
        let source = StaticSource {
            pages: vec![text_page(&body), text_page("overflow page")],
        };
        let mut engine = ExtractionEngine::new("2024");
        let transactions = engine.extract(&source);
        assert_eq!(transactions.len(), 2);
        assert_eq!(engine.duplicates(), 2);
    }

    #[test]
    fn document_without_header_yields_zero_transactions() {
        let source = StaticSource {
            pages: vec![text_page("nothing useful"), text_page("still nothing")],
        };
        let mut engine = ExtractionEngine::new("2024");
        assert!(engine.extract(&source).is_empty());
    }

    #[test]
    fn pages_without_any_content_are_skipped() {
        let source = StaticSource {
            pages: vec![PageContent::default()],
        };
        let mut engine = ExtractionEngine::new("2024");
        assert!(engine.extract(&source).is_empty());
    }
}
