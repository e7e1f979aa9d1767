//! The reconstructed transaction record.

use regex::Regex;
use serde::Serialize;
use std::sync::OnceLock;

/// Pattern marking a bare statement date (`M/D` through `MM/DD`) at the start
/// of a token. Shared by both parsing paths and by year qualification.
pub fn date_prefix_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^\d{1,2}/\d{1,2}").expect("date regex"))
}

/// One reconstructed ledger entry.
///
/// All fields are kept as strings: amounts are emitted exactly as printed on
/// the statement (minus `,`/`$` noise), and dates start life as `MM/DD` and
/// are rewritten to `MM/DD/YYYY` once the statement year is known.
///
/// At most one of `deposits` / `withdrawals` is non-empty — a transaction is
/// exactly a credit or a debit, never both. A record with every field empty
/// is never emitted.
///
/// The serde renames pin the CSV header row to the exact column labels the
/// downstream consumers expect.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Transaction {
    #[serde(rename = "Date")]
    pub date: String,

    #[serde(rename = "Number")]
    pub number: String,

    #[serde(rename = "Description")]
    pub description: String,

    #[serde(rename = "Deposits/Credits")]
    pub deposits: String,

    #[serde(rename = "Withdrawals/Debits")]
    pub withdrawals: String,

    #[serde(rename = "Ending daily balance")]
    pub ending_balance: String,
}

impl Transaction {
    /// Whether every field is empty. Empty transactions are dropped rather
    /// than emitted.
    pub fn is_empty(&self) -> bool {
        self.date.is_empty()
            && self.number.is_empty()
            && self.description.is_empty()
            && self.deposits.is_empty()
            && self.withdrawals.is_empty()
            && self.ending_balance.is_empty()
    }

    /// Append the statement year to a bare `MM/DD` date.
    ///
    /// Dates that do not start with the `MM/DD` pattern are left untouched.
    pub fn qualify_year(&mut self, year: &str) {
        if date_prefix_re().is_match(&self.date) {
            self.date = format!("{}/{}", self.date, year);
        }
    }

    /// The uniqueness key used to collapse transactions repeated across page
    /// boundaries: `date|description|deposits|withdrawals`.
    ///
    /// Computed after year qualification so repeats of the same row always
    /// agree on the date component.
    pub fn signature(&self) -> String {
        format!(
            "{}|{}|{}|{}",
            self.date, self.description, self.deposits, self.withdrawals
        )
    }
}
