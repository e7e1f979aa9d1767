//! Per-document transaction deduplication.
//!
//! Adjacent statement pages repeat a trailing/leading row (a rendering
//! artifact of the source documents), and a page that falls back to text-line
//! parsing re-produces the anchor page's transactions. Both repeats collapse
//! under a signature check — no page-overlap geometry needed.

use crate::types::Transaction;
use std::collections::HashSet;

/// Seen-transaction state for one document conversion.
///
/// Created fresh per document and passed explicitly into per-page
/// reconstruction, so batch conversion of many documents cannot leak state
/// between them.
#[derive(Debug, Default)]
pub struct DedupContext {
    seen: HashSet<String>,
    duplicates: usize,
}

impl DedupContext {
    pub fn new() -> Self {
        DedupContext::default()
    }

    /// Record a transaction's signature. Returns `true` when the transaction
    /// is new and should be kept, `false` when it repeats one already seen.
    ///
    /// The signature must be computed *after* year qualification, which is
    /// why this takes the finished transaction rather than raw parser output.
    pub fn insert(&mut self, transaction: &Transaction) -> bool {
        if self.seen.insert(transaction.signature()) {
            true
        } else {
            self.duplicates += 1;
            false
        }
    }

    /// How many transactions were discarded as repeats, for diagnostics.
    pub fn duplicates(&self) -> usize {
        self.duplicates
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Transaction {
        Transaction {
            date: "01/05/2024".to_string(),
            description: "Payroll Direct Deposit".to_string(),
            deposits: "500.00".to_string(),
            ..Transaction::default()
        }
    }

    #[test]
    fn first_occurrence_is_kept() {
        let mut ctx = DedupContext::new();
        assert!(ctx.insert(&sample()));
        assert_eq!(ctx.duplicates(), 0);
    }

    #[test]
    fn identical_transaction_is_discarded_once_seen() {
        let mut ctx = DedupContext::new();
        assert!(ctx.insert(&sample()));
        assert!(!ctx.insert(&sample()));
        assert!(!ctx.insert(&sample()));
        assert_eq!(ctx.duplicates(), 2);
    }

    #[test]
    fn differing_amount_is_not_a_duplicate() {
        let mut ctx = DedupContext::new();
        assert!(ctx.insert(&sample()));
        let mut other = sample();
        other.deposits = "600.00".to_string();
        assert!(ctx.insert(&other));
    }

    #[test]
    fn contexts_are_independent() {
        let mut first = DedupContext::new();
        let mut second = DedupContext::new();
        assert!(first.insert(&sample()));
        assert!(second.insert(&sample()));
    }
}
