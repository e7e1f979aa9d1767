//! Statement columns and their per-page horizontal layout.
//!
//! The target layout family has six columns, always in the same left-to-right
//! order. The positioned-token parser discovers where each column starts on a
//! given page; a layout is only usable when every column was found, because
//! bucketing tokens into partially-known ranges is unreliable.

/// A named logical transaction field, ordered left-to-right on the page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Column {
    Date,
    Number,
    Description,
    Deposits,
    Withdrawals,
    EndingBalance,
}

impl Column {
    /// All columns in physical page order. This order is also the CSV field
    /// order expected by downstream consumers.
    pub const ALL: [Column; 6] = [
        Column::Date,
        Column::Number,
        Column::Description,
        Column::Deposits,
        Column::Withdrawals,
        Column::EndingBalance,
    ];

    /// The output label for this column, as printed in the CSV header.
    pub fn label(self) -> &'static str {
        match self {
            Column::Date => "Date",
            Column::Number => "Number",
            Column::Description => "Description",
            Column::Deposits => "Deposits/Credits",
            Column::Withdrawals => "Withdrawals/Debits",
            Column::EndingBalance => "Ending daily balance",
        }
    }

    /// Map a merged header label (as reassembled from page tokens) to its
    /// column. Merging concatenates trimmed fragments without a separator, so
    /// `Ending daily` + `balance` arrives here as `Ending dailybalance`.
    pub fn from_header_label(label: &str) -> Option<Column> {
        match label {
            "Date" => Some(Column::Date),
            "Number" => Some(Column::Number),
            "Description" => Some(Column::Description),
            "Deposits/Credits" => Some(Column::Deposits),
            "Withdrawals/Debits" => Some(Column::Withdrawals),
            "Ending dailybalance" => Some(Column::EndingBalance),
            _ => None,
        }
    }

    fn index(self) -> usize {
        Column::ALL.iter().position(|c| *c == self).unwrap_or(0)
    }
}

/// Horizontal start positions of the columns on one page.
///
/// `None` means the column could not be located. A layout must be complete
/// before it can bucket tokens; the locator treats partial resolution as
/// total failure.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ColumnLayout {
    starts: [Option<f64>; 6],
}

impl ColumnLayout {
    pub fn new() -> Self {
        ColumnLayout::default()
    }

    /// Record the start position of a column, overwriting any earlier value.
    pub fn set_start(&mut self, column: Column, x0: f64) {
        self.starts[column.index()] = Some(x0);
    }

    pub fn start(&self, column: Column) -> Option<f64> {
        self.starts[column.index()]
    }

    /// Whether every column was resolved on this page.
    pub fn is_complete(&self) -> bool {
        self.starts.iter().all(Option::is_some)
    }

    /// Columns that are still unresolved, for diagnostics.
    pub fn missing(&self) -> Vec<Column> {
        Column::ALL
            .iter()
            .copied()
            .filter(|c| self.start(*c).is_none())
            .collect()
    }

    /// Assign a horizontal position to a column.
    ///
    /// A token belongs to the first column whose range
    /// `[start(column), start(next column))` contains its `x0`; the last
    /// column's range extends to infinity. Only meaningful on a complete
    /// layout.
    pub fn column_at(&self, x0: f64) -> Option<Column> {
        for (i, column) in Column::ALL.iter().enumerate() {
            let lower = self.start(*column)?;
            let upper = Column::ALL
                .get(i + 1)
                .and_then(|next| self.start(*next))
                .unwrap_or(f64::INFINITY);
            if lower <= x0 && x0 < upper {
                return Some(*column);
            }
        }
        None
    }
}
