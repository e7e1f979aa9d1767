//! Page parsing strategies.
//!
//! Two independent strategies reconstruct transactions from a page, selected
//! by runtime probing rather than configuration: the positioned-token parser
//! runs first, and when it cannot resolve the statement's column layout the
//! text-line fallback takes over. Both implement the [`PageParser`] trait and
//! are tried in that fixed order by [`extract_page`], so the caller never
//! branches on parser internals.

use crate::types::{ExtractError, PageContent, Transaction};
use log::{debug, warn};

pub mod positioned;
pub mod text_lines;

pub use positioned::PositionedParser;
pub use text_lines::{HeaderAnchor, TextLineParser};

/// Document-wide context shared by every page parse.
///
/// The fallback parser needs more than the current page: the header anchor is
/// located once per document by scanning every page's reflowed text, and the
/// anchor page's text must remain reachable from any page that falls back.
#[derive(Debug)]
pub struct DocumentContext<'a> {
    /// Reflowed text of every page, in document order.
    pub page_texts: &'a [Option<String>],

    /// Location of the three-line transaction header, if any page carries it.
    pub header_anchor: Option<HeaderAnchor>,
}

/// One attempt at extracting the transactions visible on a page.
pub trait PageParser {
    /// Parse a single page into transactions.
    ///
    /// Recoverable failures ([`ExtractError::ColumnResolution`],
    /// [`ExtractError::HeaderNotFound`]) signal the coordinator to try the
    /// next strategy or give up on the page; they never abort the document.
    fn parse(
        &self,
        page_index: usize,
        page: &PageContent,
        ctx: &DocumentContext<'_>,
    ) -> Result<Vec<Transaction>, ExtractError>;
}

/// Run the strategies against one page in fixed fallback order.
///
/// Failure degrades to an empty transaction list; a page that neither
/// strategy can parse simply contributes nothing.
pub fn extract_page(
    page_index: usize,
    page: &PageContent,
    ctx: &DocumentContext<'_>,
) -> Vec<Transaction> {
    match PositionedParser.parse(page_index, page, ctx) {
        Ok(transactions) => {
            debug!(
                "page {}: positioned parse produced {} transactions",
                page_index,
                transactions.len()
            );
            transactions
        }
        Err(ExtractError::ColumnResolution { .. }) => {
            warn!(
                "page {}: could not resolve all columns, falling back to text extraction",
                page_index
            );
            match TextLineParser.parse(page_index, page, ctx) {
                Ok(transactions) => {
                    debug!(
                        "page {}: text fallback produced {} transactions",
                        page_index,
                        transactions.len()
                    );
                    transactions
                }
                Err(err) => {
                    warn!("page {}: text fallback failed: {}", page_index, err);
                    Vec::new()
                }
            }
        }
        Err(err) => {
            warn!("page {}: positioned parse failed: {}", page_index, err);
            Vec::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Token;

    fn text_only_page(text: &str) -> PageContent {
        PageContent {
            tokens: Vec::new(),
            text: Some(text.to_string()),
        }
    }

    #[test]
    fn pages_without_header_tokens_fall_back_to_text() {
        let text = "Transaction history\n\
                    Deposits/ Withdrawals/ Ending daily\n\
                    Date Number Description Credits Debits balance\n\
                    1/2 Payroll Deposit 500.00 1500.00\n";
        let page = text_only_page(text);
        let texts = vec![Some(text.to_string())];
        let ctx = DocumentContext {
            page_texts: &texts,
            header_anchor: text_lines::locate_header(&texts),
        };

        let transactions = extract_page(0, &page, &ctx);
        assert_eq!(transactions.len(), 1);
        assert_eq!(transactions[0].date, "1/2");
        assert_eq!(transactions[0].deposits, "500.00");
    }

    #[test]
    fn unparseable_page_yields_no_transactions() {
        let page = PageContent {
            tokens: vec![Token::new("random noise", 10.0, 10.0)],
            text: Some("no header anywhere".to_string()),
        };
        let texts = vec![page.text.clone()];
        let ctx = DocumentContext {
            page_texts: &texts,
            header_anchor: None,
        };
        assert!(extract_page(0, &page, &ctx).is_empty());
    }
}
