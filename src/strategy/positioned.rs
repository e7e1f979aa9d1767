//! Positioned-token parsing: column discovery plus row reconstruction.
//!
//! This is the preferred strategy. It locates the statement's six column
//! headers by clustering header-like tokens on the page, then buckets every
//! remaining token into the column whose horizontal range contains it. The
//! locator's contract is all-or-nothing: if any column cannot be placed the
//! whole page falls back to text-line parsing, because bucketing tokens into
//! partially-known ranges misfiles data silently.

use crate::strategy::{DocumentContext, PageParser};
use crate::types::transaction::date_prefix_re;
use crate::types::{Column, ColumnLayout, ExtractError, PageContent, Token, Transaction};
use log::debug;

/// Fragments of the expected column headers as they appear on the page.
/// Split headers (`Deposits/` + `Credits`) are listed as separate fragments
/// and reassembled by proximity merging.
const HEADER_FRAGMENTS: &[&str] = &[
    "Date",
    "Number",
    "Description",
    "Deposits/",
    "Credits",
    "Withdrawals/",
    "Debits",
    "Ending daily",
    "balance",
];

/// Two header candidates closer than this horizontally are one split label.
const HEADER_MERGE_PROXIMITY: f64 = 20.0;

/// Everything at and below a token containing this is summary/footer content.
const PAGE_FOOTER_MARKER: &str = "Ending balance";

/// Result of a successful column search on one page.
#[derive(Debug)]
struct ResolvedColumns {
    layout: ColumnLayout,
    /// Vertical position of the lowest header token; rows at or above this
    /// are the header furniture itself, not transactions.
    header_bottom: f64,
}

/// Parser over positioned tokens with discovered column boundaries.
#[derive(Debug, Clone, Copy)]
pub struct PositionedParser;

impl PageParser for PositionedParser {
    fn parse(
        &self,
        page_index: usize,
        page: &PageContent,
        _ctx: &DocumentContext<'_>,
    ) -> Result<Vec<Transaction>, ExtractError> {
        let resolved = locate_columns(&page.tokens, page_index)?;
        Ok(reconstruct_rows(&page.tokens, &resolved))
    }
}

/// A header label reassembled from one or two page tokens.
#[derive(Debug, PartialEq)]
struct MergedLabel<'a> {
    label: String,
    x0: f64,
    parts: Vec<&'a Token>,
}

/// Merge horizontally adjacent header candidates into logical labels.
///
/// Candidates must arrive sorted by `x0`. Each candidate absorbs at most the
/// one neighbour that starts within [`HEADER_MERGE_PROXIMITY`] of it; the
/// fragments are trimmed and concatenated without a separator, which is how
/// `Ending daily` + `balance` becomes the dictionary key `Ending dailybalance`.
fn merge_header_labels<'a>(candidates: &[&'a Token]) -> Vec<MergedLabel<'a>> {
    let mut labels = Vec::new();
    let mut i = 0;
    while i < candidates.len() {
        let base = candidates[i];
        let mut label = base.text.trim().to_string();
        let mut parts = vec![base];
        if let Some(next) = candidates.get(i + 1) {
            if (next.x0 - base.x0).abs() < HEADER_MERGE_PROXIMITY {
                label.push_str(next.text.trim());
                parts.push(next);
                i += 1;
            }
        }
        labels.push(MergedLabel {
            label,
            x0: base.x0,
            parts,
        });
        i += 1;
    }
    labels
}

/// Discover the horizontal start of every expected column.
///
/// Fails with [`ExtractError::ColumnResolution`] unless *all* six columns
/// resolve; partial resolution is treated as total failure.
fn locate_columns(tokens: &[Token], page_index: usize) -> Result<ResolvedColumns, ExtractError> {
    let mut candidates: Vec<&Token> = tokens
        .iter()
        .filter(|t| HEADER_FRAGMENTS.iter().any(|fragment| t.text.contains(fragment)))
        .collect();
    if candidates.is_empty() {
        return Err(ExtractError::column_resolution(page_index));
    }
    candidates.sort_by(|a, b| a.x0.total_cmp(&b.x0));

    let mut layout = ColumnLayout::new();
    let mut header_bottom = f64::NEG_INFINITY;
    for merged in merge_header_labels(&candidates) {
        if let Some(column) = Column::from_header_label(&merged.label) {
            layout.set_start(column, merged.x0);
            for token in &merged.parts {
                header_bottom = header_bottom.max(token.top);
            }
        }
    }

    if layout.is_complete() {
        debug!("page {}: resolved columns at {:?}", page_index, layout);
        Ok(ResolvedColumns {
            layout,
            header_bottom,
        })
    } else {
        debug!(
            "page {}: unresolved columns {:?}",
            page_index,
            layout.missing()
        );
        Err(ExtractError::column_resolution(page_index))
    }
}

/// Group tokens into rows by vertical position and assemble a transaction
/// from each row below the header.
fn reconstruct_rows(tokens: &[Token], resolved: &ResolvedColumns) -> Vec<Transaction> {
    let mut sorted: Vec<&Token> = tokens.iter().collect();
    sorted.sort_by(|a, b| a.top.total_cmp(&b.top).then(a.x0.total_cmp(&b.x0)));

    // Tokens rendered at the same top offset form one row.
    let mut rows: Vec<Vec<&Token>> = Vec::new();
    for token in sorted {
        match rows.last_mut() {
            Some(row) if row[0].top == token.top => row.push(token),
            _ => rows.push(vec![token]),
        }
    }

    let mut transactions = Vec::new();
    for row in rows {
        if row[0].top <= resolved.header_bottom {
            continue;
        }

        let mut date = String::new();
        let mut number: Vec<&str> = Vec::new();
        let mut description: Vec<&str> = Vec::new();
        let mut deposits: Vec<&str> = Vec::new();
        let mut withdrawals: Vec<&str> = Vec::new();
        let mut ending_balance: Vec<&str> = Vec::new();

        for token in row {
            if token.text.contains(PAGE_FOOTER_MARKER) {
                // Summary region: this row and everything below is footer.
                return transactions;
            }
            match resolved.layout.column_at(token.x0) {
                Some(Column::Date) => {
                    // Only a date-shaped token may occupy the Date field;
                    // anything else in the range is dropped.
                    if date_prefix_re().is_match(&token.text) {
                        date = token.text.clone();
                    }
                }
                Some(Column::Number) => number.push(&token.text),
                Some(Column::Description) => description.push(&token.text),
                Some(Column::Deposits) => deposits.push(&token.text),
                Some(Column::Withdrawals) => withdrawals.push(&token.text),
                Some(Column::EndingBalance) => ending_balance.push(&token.text),
                // Token outside every column range: dropped, never fatal.
                None => {}
            }
        }

        let transaction = Transaction {
            date,
            number: number.join(" "),
            description: description.join(" "),
            deposits: deposits.join(" "),
            withdrawals: withdrawals.join(" "),
            ending_balance: ending_balance.join(" "),
        };
        if !transaction.is_empty() {
            transactions.push(transaction);
        }
    }
    transactions
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    const DATE_X: f64 = 40.0;
    const NUMBER_X: f64 = 100.0;
    const DESCRIPTION_X: f64 = 160.0;
    const DEPOSITS_X: f64 = 300.0;
    const WITHDRAWALS_X: f64 = 380.0;
    const BALANCE_X: f64 = 460.0;

    /// The six statement headers, with the financial labels split across two
    /// stacked lines the way the source documents render them.
    fn header_tokens() -> Vec<Token> {
        vec![
            Token::new("Date", 50.0, DATE_X),
            Token::new("Number", 50.0, NUMBER_X),
            Token::new("Description", 50.0, DESCRIPTION_X),
            Token::new("Deposits/", 50.0, DEPOSITS_X),
            Token::new("Credits", 62.0, DEPOSITS_X + 2.0),
            Token::new("Withdrawals/", 50.0, WITHDRAWALS_X),
            Token::new("Debits", 62.0, WITHDRAWALS_X + 2.0),
            Token::new("Ending daily", 50.0, BALANCE_X),
            Token::new("balance", 62.0, BALANCE_X + 2.0),
        ]
    }

    fn page_with_rows(rows: Vec<Vec<Token>>) -> Vec<Token> {
        let mut tokens = header_tokens();
        for row in rows {
            tokens.extend(row);
        }
        tokens
    }

    #[test]
    fn all_columns_resolve_from_well_separated_headers() {
        let resolved = locate_columns(&header_tokens(), 0).expect("complete layout");
        assert!(resolved.layout.is_complete());
        assert_eq!(resolved.layout.start(Column::Date), Some(DATE_X));
        assert_eq!(resolved.layout.start(Column::EndingBalance), Some(BALANCE_X));
        assert_eq!(resolved.header_bottom, 62.0);
    }

    #[test]
    fn missing_header_token_fails_resolution_entirely() {
        let mut tokens = header_tokens();
        tokens.retain(|t| t.text != "Number");
        let err = locate_columns(&tokens, 4).unwrap_err();
        assert!(matches!(err, ExtractError::ColumnResolution { page: 4 }));
    }

    #[test]
    fn page_without_header_tokens_fails_resolution() {
        let tokens = vec![Token::new("nothing header-like", 10.0, 10.0)];
        assert!(locate_columns(&tokens, 0).is_err());
    }

    #[rstest]
    #[case(100.0, 110.0, true)] // within 20 units: one split label
    #[case(100.0, 140.0, false)] // too far apart: two labels
    fn header_merge_respects_proximity(#[case] x0: f64, #[case] x1: f64, #[case] merged: bool) {
        let a = Token::new("Ending daily", 50.0, x0);
        let b = Token::new("balance", 62.0, x1);
        let candidates = vec![&a, &b];
        let labels = merge_header_labels(&candidates);
        if merged {
            assert_eq!(labels.len(), 1);
            assert_eq!(labels[0].label, "Ending dailybalance");
            assert_eq!(labels[0].x0, x0);
        } else {
            assert_eq!(labels.len(), 2);
            assert_eq!(labels[0].label, "Ending daily");
            assert_eq!(labels[1].label, "balance");
            assert_eq!(labels[1].x0, x1);
        }
    }

    fn parse(tokens: Vec<Token>) -> Vec<Transaction> {
        let page = PageContent {
            tokens,
            text: None,
        };
        let ctx = DocumentContext {
            page_texts: &[],
            header_anchor: None,
        };
        PositionedParser.parse(0, &page, &ctx).expect("positioned parse")
    }

    #[test]
    fn rows_become_transactions_with_bucketed_fields() {
        let tokens = page_with_rows(vec![
            vec![
                Token::new("1/2", 80.0, DATE_X),
                Token::new("Payroll Deposit ABC Corp", 80.0, DESCRIPTION_X),
                Token::new("500.00", 80.0, DEPOSITS_X + 5.0),
                Token::new("1,500.00", 80.0, BALANCE_X + 5.0),
            ],
            vec![
                Token::new("1/3", 95.0, DATE_X),
                Token::new("1102", 95.0, NUMBER_X),
                Token::new("Check", 95.0, DESCRIPTION_X),
                Token::new("Payment", 95.0, DESCRIPTION_X + 40.0),
                Token::new("40.00", 95.0, WITHDRAWALS_X + 5.0),
                Token::new("1,460.00", 95.0, BALANCE_X + 5.0),
            ],
        ]);

        let transactions = parse(tokens);
        assert_eq!(transactions.len(), 2);

        assert_eq!(transactions[0].date, "1/2");
        assert_eq!(transactions[0].description, "Payroll Deposit ABC Corp");
        assert_eq!(transactions[0].deposits, "500.00");
        assert_eq!(transactions[0].withdrawals, "");
        assert_eq!(transactions[0].ending_balance, "1,500.00");

        assert_eq!(transactions[1].date, "1/3");
        assert_eq!(transactions[1].number, "1102");
        assert_eq!(transactions[1].description, "Check Payment");
        assert_eq!(transactions[1].withdrawals, "40.00");
    }

    #[test]
    fn non_date_token_in_the_date_range_is_dropped() {
        let tokens = page_with_rows(vec![vec![
            Token::new("INV2024", 80.0, DATE_X),
            Token::new("Vendor Invoice", 80.0, DESCRIPTION_X),
        ]]);
        let transactions = parse(tokens);
        assert_eq!(transactions.len(), 1);
        assert_eq!(transactions[0].date, "");
        assert_eq!(transactions[0].description, "Vendor Invoice");
    }

    #[test]
    fn date_shaped_token_in_the_date_range_is_kept() {
        let tokens = page_with_rows(vec![vec![
            Token::new("3/14", 80.0, DATE_X),
            Token::new("Coffee", 80.0, DESCRIPTION_X),
        ]]);
        let transactions = parse(tokens);
        assert_eq!(transactions[0].date, "3/14");
    }

    #[test]
    fn ending_balance_marker_stops_the_page() {
        let tokens = page_with_rows(vec![
            vec![
                Token::new("1/2", 80.0, DATE_X),
                Token::new("Coffee", 80.0, DESCRIPTION_X),
                Token::new("4.50", 80.0, WITHDRAWALS_X),
            ],
            vec![Token::new("Ending balance on 1/31", 110.0, DESCRIPTION_X + 20.0)],
            vec![
                Token::new("1/4", 125.0, DATE_X),
                Token::new("Should not appear", 125.0, DESCRIPTION_X),
            ],
        ]);
        let transactions = parse(tokens);
        assert_eq!(transactions.len(), 1);
        assert_eq!(transactions[0].date, "1/2");
    }

    #[test]
    fn header_rows_do_not_become_transactions() {
        let transactions = parse(header_tokens());
        assert!(transactions.is_empty());
    }
}
