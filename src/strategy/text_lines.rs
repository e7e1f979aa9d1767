//! Text-line fallback parsing.
//!
//! When a page's column layout cannot be resolved, parsing drops to the
//! reflowed text: a document-wide scan locates the one place where the
//! three-line transaction header occurs, and a line scanner reconstructs
//! transactions from the detail region that follows it, merging continuation
//! lines into their parent transaction and pulling amounts out of the token
//! stream with the amount classifier.

use crate::core::amount::{
    assign_amounts, candidate_from_token, clean_amount, is_amount, is_deposit_description,
};
use crate::strategy::{DocumentContext, PageParser};
use crate::types::transaction::date_prefix_re;
use crate::types::{ExtractError, PageContent, Transaction};
use log::debug;

/// Location of the three-line transaction header inside a document: the page
/// that carries it and the index of its third line (the detail-column labels).
/// Detail parsing starts on the next line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HeaderAnchor {
    pub page: usize,
    pub line: usize,
}

/// Labels expected on the financial-column line of the header.
const FINANCIAL_LABELS: [&str; 2] = ["deposits", "withdrawals"];

/// Labels expected on the detail-column line of the header.
const DETAIL_LABELS: [&str; 6] = [
    "date",
    "number",
    "description",
    "credits",
    "debits",
    "balance",
];

/// Lower-case, strip slashes, collapse runs of whitespace.
fn normalize(line: &str) -> String {
    line.to_lowercase()
        .replace('/', "")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

fn is_footer(line: &str) -> bool {
    let lowered = line.to_lowercase();
    lowered.contains("ending balance") || lowered.contains("totals")
}

fn financial_label_hits(line: &str) -> usize {
    let mut hits = FINANCIAL_LABELS
        .iter()
        .filter(|label| line.contains(*label))
        .count();
    if line.contains("ending") && line.contains("daily") {
        hits += 1;
    }
    hits
}

fn detail_label_hits(line: &str) -> usize {
    DETAIL_LABELS
        .iter()
        .filter(|label| line.contains(*label))
        .count()
}

/// Scan every page's text for the first three consecutive normalized lines
/// matching the header pattern: a `transaction history` title line, a
/// financial-column line scoring at least two labels, and a detail-column
/// line scoring at least four.
pub fn locate_header(page_texts: &[Option<String>]) -> Option<HeaderAnchor> {
    for (page, text) in page_texts.iter().enumerate() {
        let Some(text) = text else { continue };
        let lines: Vec<String> = text.lines().map(normalize).collect();
        if lines.len() < 3 {
            continue;
        }
        for i in 0..lines.len() - 2 {
            if lines[i].contains("transaction history")
                && financial_label_hits(&lines[i + 1]) >= 2
                && detail_label_hits(&lines[i + 2]) >= 4
            {
                debug!("header anchor at page {}, line {}", page, i + 2);
                return Some(HeaderAnchor { page, line: i + 2 });
            }
        }
    }
    None
}

/// Parser over reflowed text lines, anchored by the document header.
#[derive(Debug, Clone, Copy)]
pub struct TextLineParser;

impl PageParser for TextLineParser {
    /// Parse the detail region that follows the document's header anchor.
    ///
    /// The region always lives on the anchor page, so every page that falls
    /// back re-produces the same transactions; the per-document deduplicator
    /// collapses the repeats. A page with no text at all yields nothing, and
    /// a document with no anchor fails with [`ExtractError::HeaderNotFound`].
    fn parse(
        &self,
        _page_index: usize,
        page: &PageContent,
        ctx: &DocumentContext<'_>,
    ) -> Result<Vec<Transaction>, ExtractError> {
        if page.text.is_none() {
            // Empty page: zero transactions, skipped.
            return Ok(Vec::new());
        }
        let anchor = ctx.header_anchor.ok_or(ExtractError::HeaderNotFound)?;
        let Some(anchor_text) = ctx.page_texts.get(anchor.page).and_then(Option::as_deref)
        else {
            return Ok(Vec::new());
        };
        let lines: Vec<&str> = anchor_text.lines().collect();
        let start = (anchor.line + 1).min(lines.len());
        Ok(parse_detail_lines(&lines[start..]))
    }
}

/// Line-scanner states: looking for a date-prefixed line, or absorbing
/// continuation lines into the current transaction.
enum ScanState {
    Seeking,
    Absorbing { merged: String },
}

/// Does this line open a new transaction?
fn starts_transaction(line: &str) -> bool {
    line.split_whitespace()
        .next()
        .is_some_and(|first| date_prefix_re().is_match(first))
}

/// Reconstruct transactions from the lines after the header anchor.
///
/// A date-prefixed line opens a transaction; following lines are absorbed as
/// continuation text until the next date line, a blank line, or a footer
/// marker. Footer markers (`ending balance`, `totals`) terminate the scan.
fn parse_detail_lines(lines: &[&str]) -> Vec<Transaction> {
    let mut transactions = Vec::new();
    let mut state = ScanState::Seeking;

    let mut flush = |state: &mut ScanState, transactions: &mut Vec<Transaction>| {
        if let ScanState::Absorbing { merged } = std::mem::replace(state, ScanState::Seeking) {
            transactions.push(build_transaction(&merged));
        }
    };

    for line in lines {
        if is_footer(line) {
            break;
        }
        let trimmed = line.trim();
        if starts_transaction(trimmed) {
            flush(&mut state, &mut transactions);
            state = ScanState::Absorbing {
                merged: trimmed.to_string(),
            };
        } else if trimmed.is_empty() {
            flush(&mut state, &mut transactions);
        } else if let ScanState::Absorbing { merged } = &mut state {
            merged.push(' ');
            merged.push_str(trimmed);
        }
        // Non-blank, non-date lines before the first transaction are skipped.
    }
    flush(&mut state, &mut transactions);
    transactions
}

/// Build one transaction from the merged token stream of a date-prefixed
/// line and its continuations.
fn build_transaction(merged: &str) -> Transaction {
    let tokens: Vec<&str> = merged.split_whitespace().collect();

    let mut candidates = Vec::new();
    let mut description_parts = Vec::new();
    for token in &tokens[1..] {
        match candidate_from_token(token) {
            Some(candidate) => candidates.push(candidate),
            None => description_parts.push(*token),
        }
    }

    let mut transaction = Transaction {
        date: tokens[0].to_string(),
        description: description_parts.join(" "),
        ..Transaction::default()
    };

    let (amount, balance) = assign_amounts(&candidates);
    if let Some(amount) = amount {
        if is_deposit_description(&transaction.description) {
            transaction.deposits = clean_amount(&amount.raw);
        } else {
            transaction.withdrawals = clean_amount(&amount.raw);
        }
    }
    if let Some(balance) = balance {
        transaction.ending_balance = clean_amount(&balance.raw);
    }

    // The token after the date is a reference number when it is not itself
    // amount-shaped. It stays in the description either way.
    if let Some(second) = tokens.get(1) {
        if !is_amount(second) {
            transaction.number = (*second).to_string();
        }
    }

    transaction
}
