//! Amount classification heuristics.
//!
//! Statement rows mix genuine monetary amounts with reference numbers, check
//! numbers, and transaction ids that *look* numeric. This module decides which
//! tokens are amounts, which of a transaction's amounts is the transaction
//! amount versus the running balance, and whether the amount is a deposit or
//! a withdrawal.
//!
//! The deposit decision is a closed-world keyword policy: descriptions that
//! match none of [`DEPOSIT_KEYWORDS`] default to withdrawals.

use regex::Regex;
use rust_decimal::Decimal;
use std::str::FromStr;
use std::sync::OnceLock;

/// Keywords whose presence in a (lower-cased) description marks the
/// transaction amount as a deposit. Anything else is a withdrawal.
pub const DEPOSIT_KEYWORDS: &[&str] = &[
    "transfer from",
    "deposit",
    "credit",
    "payroll",
    "income",
    "matterfi",
    "refund",
];

/// Amounts above this are assumed to be reference numbers, not money.
const MAX_PLAUSIBLE_AMOUNT: i64 = 100_000;

/// Whole-dollar candidate tokens above this are treated as reference numbers.
const MAX_WHOLE_DOLLAR_CANDIDATE: i64 = 50_000;

/// Minimum value for the leading token of a two-amount pair to be accepted as
/// a balance rather than a stray reference number.
const MIN_LEADING_BALANCE: i64 = 100;

fn exact_amount_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^\d+\.\d{2}$").expect("amount regex"))
}

fn whole_number_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^\d+$").expect("whole number regex"))
}

/// A token that survived candidate extraction: its raw text (as printed,
/// commas and all) and its parsed value.
#[derive(Debug, Clone, PartialEq)]
pub struct AmountCandidate {
    pub raw: String,
    pub value: Decimal,
}

/// Strip formatting noise and keep the token only if it still parses as a
/// number. Returns the cleaned string, or empty when the token is not a
/// usable amount.
pub fn clean_amount(raw: &str) -> String {
    let cleaned = raw.replace(',', "").replace('$', "");
    let cleaned = cleaned.trim();
    if cleaned.is_empty() {
        return String::new();
    }
    match Decimal::from_str(cleaned) {
        Ok(_) => cleaned.to_string(),
        Err(_) => String::new(),
    }
}

/// Does this token look like a monetary amount rather than a reference
/// number, date, or transaction id?
pub fn is_amount(text: &str) -> bool {
    if text.is_empty() {
        return false;
    }
    let cleaned = text.replace(',', "").replace('$', "");
    let cleaned = cleaned.trim();

    let value = match Decimal::from_str(cleaned) {
        Ok(v) => v,
        Err(_) => return false,
    };

    // Very large numbers are reference/transaction ids.
    if value > Decimal::from(MAX_PLAUSIBLE_AMOUNT) {
        return false;
    }

    // Six all-digit characters that decode as a plausible YYMMDD date.
    if cleaned.len() == 6 && cleaned.chars().all(|c| c.is_ascii_digit()) {
        let yy: u32 = cleaned[..2].parse().unwrap_or(0);
        let mm: u32 = cleaned[2..4].parse().unwrap_or(0);
        let dd: u32 = cleaned[4..6].parse().unwrap_or(0);
        if (20..=30).contains(&yy) && (1..=12).contains(&mm) && (1..=31).contains(&dd) {
            return false;
        }
    }

    // Longer all-digit strings are transaction ids.
    if cleaned.len() > 6 && cleaned.chars().all(|c| c.is_ascii_digit()) {
        return false;
    }

    // Currency never carries more than two decimal places.
    if let Some((_, decimals)) = cleaned.split_once('.') {
        if decimals.len() > 2 {
            return false;
        }
    }

    // Card numbers and reference codes mix in letters.
    if cleaned.chars().any(|c| c.is_ascii_alphabetic()) {
        return false;
    }

    true
}

/// Test a description token for candidacy as an amount.
///
/// Candidates are either exact `digits.dd` amounts, or bare integers of at
/// most six digits worth no more than 50 000 whole dollars. Everything else —
/// including over-limit integers, which are almost certainly reference
/// numbers — stays in the description.
pub fn candidate_from_token(token: &str) -> Option<AmountCandidate> {
    let cleaned = token.replace(',', "").replace('$', "");
    if exact_amount_re().is_match(&cleaned) {
        let value = Decimal::from_str(&cleaned).ok()?;
        return Some(AmountCandidate {
            raw: token.to_string(),
            value,
        });
    }
    if whole_number_re().is_match(&cleaned) && cleaned.len() <= 6 {
        let value = Decimal::from_str(&cleaned).ok()?;
        if value <= Decimal::from(MAX_WHOLE_DOLLAR_CANDIDATE) {
            return Some(AmountCandidate {
                raw: token.to_string(),
                value,
            });
        }
    }
    None
}

/// Decide which candidate is the transaction amount and which (if any) is the
/// running balance.
///
/// With two candidates the smaller is the transaction amount and the larger
/// the balance — unless the larger one came *first* in token order and is
/// worth 100 or less, in which case it is more likely a stray reference
/// number and no balance is recorded.
///
/// Only the first two candidates are ever considered; rows carrying three or
/// more numeric tokens lose the extras. That truncation is deliberate
/// fidelity to the observed statement layouts, not an oversight to repair.
pub fn assign_amounts(
    candidates: &[AmountCandidate],
) -> (Option<&AmountCandidate>, Option<&AmountCandidate>) {
    match candidates {
        [] => (None, None),
        [only] => (Some(only), None),
        [first, second, ..] => {
            if first.value < second.value {
                (Some(first), Some(second))
            } else if first.value > Decimal::from(MIN_LEADING_BALANCE) {
                (Some(second), Some(first))
            } else {
                (Some(second), None)
            }
        }
    }
}

/// Closed-world deposit test over the assembled description.
pub fn is_deposit_description(description: &str) -> bool {
    let lowered = description.to_lowercase();
    DEPOSIT_KEYWORDS.iter().any(|kw| lowered.contains(kw))
}
