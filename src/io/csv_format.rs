//! CSV output for extracted transactions.
//!
//! The output mirrors the bank's own downloadable CSV: a fixed header row in
//! the statement's column order and every field quoted, empty or not, so the
//! files diff cleanly against downloads.

use crate::types::{Column, ExtractError, Transaction};
use csv::{QuoteStyle, WriterBuilder};
use std::io::Write;

/// Write the header row and one record per transaction.
///
/// Fields are serialized in the fixed column order (`Date, Number,
/// Description, Deposits/Credits, Withdrawals/Debits, Ending daily balance`);
/// unset fields are written as empty strings. The header is emitted even for
/// an empty transaction list.
pub fn write_transactions_csv(
    transactions: &[Transaction],
    output: &mut dyn Write,
) -> Result<(), ExtractError> {
    let mut writer = WriterBuilder::new()
        .has_headers(false)
        .quote_style(QuoteStyle::Always)
        .from_writer(output);

    writer.write_record(Column::ALL.iter().map(|column| column.label()))?;
    for transaction in transactions {
        writer.serialize(transaction)?;
    }
    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Transaction {
        Transaction {
            date: "1/2/2024".to_string(),
            number: String::new(),
            description: "Payroll Direct Deposit ABC Corp".to_string(),
            deposits: "500.00".to_string(),
            withdrawals: String::new(),
            ending_balance: "1500.00".to_string(),
        }
    }

    #[test]
    fn header_row_is_written_even_with_no_transactions() {
        let mut output = Vec::new();
        write_transactions_csv(&[], &mut output).unwrap();
        assert_eq!(
            String::from_utf8(output).unwrap(),
            "\"Date\",\"Number\",\"Description\",\"Deposits/Credits\",\
             \"Withdrawals/Debits\",\"Ending daily balance\"\n"
        );
    }

    #[test]
    fn every_field_is_quoted_including_empty_ones() {
        let mut output = Vec::new();
        write_transactions_csv(&[sample()], &mut output).unwrap();
        let text = String::from_utf8(output).unwrap();
        let mut lines = text.lines();
        lines.next(); // header
        assert_eq!(
            lines.next().unwrap(),
            "\"1/2/2024\",\"\",\"Payroll Direct Deposit ABC Corp\",\"500.00\",\"\",\"1500.00\""
        );
    }

    #[test]
    fn records_keep_document_order() {
        let mut second = sample();
        second.date = "1/3/2024".to_string();
        second.description = "Grocery".to_string();
        second.deposits = String::new();
        second.withdrawals = "23.10".to_string();
        second.ending_balance = String::new();

        let mut output = Vec::new();
        write_transactions_csv(&[sample(), second], &mut output).unwrap();
        let text = String::from_utf8(output).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[1].contains("Payroll"));
        assert!(lines[2].contains("Grocery"));
    }
}
