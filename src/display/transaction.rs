//! Transaction display formatting
//!
//! Register views list transactions with their store index, which is what
//! `edit` and `remove` take.

use crate::models::{dates, Transaction, TransactionKind};

use super::truncate;

/// Format a single transaction for display (register row)
pub fn format_transaction_row(index: usize, txn: &Transaction, symbol: &str) -> String {
    let sign = match txn.kind {
        TransactionKind::Income => "+",
        TransactionKind::Expense => "-",
    };

    format!(
        "{:>4}  {}  {:<28} {:<16} {:>14}",
        index,
        dates::format_date(txn.date),
        truncate(&txn.description, 28),
        truncate(&txn.category, 16),
        format!("{}{}", sign, txn.amount.format_with_symbol(symbol))
    )
}

/// Format an indexed list of transactions as a register
pub fn format_transaction_register<'a, I>(transactions: I, symbol: &str) -> String
where
    I: IntoIterator<Item = (usize, &'a Transaction)>,
{
    let mut rows = transactions.into_iter().peekable();
    if rows.peek().is_none() {
        return "No transactions found.\n".to_string();
    }

    let mut output = String::new();
    output.push_str(&format!(
        "{:>4}  {:<10}  {:<28} {:<16} {:>14}\n",
        "#", "Date", "Description", "Category", "Amount"
    ));
    output.push_str(&"-".repeat(78));
    output.push('\n');

    for (index, txn) in rows {
        output.push_str(&format_transaction_row(index, txn, symbol));
        output.push('\n');
    }

    output
}

/// Format transaction details for display
pub fn format_transaction_details(index: usize, txn: &Transaction, symbol: &str) -> String {
    let mut output = String::new();

    output.push_str(&format!("Transaction: #{}\n", index));
    output.push_str(&format!("Date:        {}\n", dates::format_date(txn.date)));
    output.push_str(&format!("Description: {}\n", txn.description));
    output.push_str(&format!("Type:        {}\n", txn.kind));
    output.push_str(&format!("Amount:      {}\n", txn.amount.format_with_symbol(symbol)));
    output.push_str(&format!("Category:    {}\n", txn.category));

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Money;
    use chrono::NaiveDate;

    fn sample() -> Transaction {
        Transaction {
            description: "Groceries".into(),
            amount: Money::from_cents(4550),
            kind: TransactionKind::Expense,
            category: "Food".into(),
            date: NaiveDate::from_ymd_opt(2024, 1, 10).unwrap(),
        }
    }

    #[test]
    fn test_row() {
        let row = format_transaction_row(3, &sample(), "$");
        assert!(row.starts_with("   3  10-01-2024  Groceries"));
        assert!(row.ends_with("-$45.50"));
    }

    #[test]
    fn test_empty_register() {
        let empty: Vec<(usize, &Transaction)> = Vec::new();
        assert_eq!(format_transaction_register(empty, "$"), "No transactions found.\n");
    }

    #[test]
    fn test_register_lists_rows() {
        let txn = sample();
        let text = format_transaction_register(vec![(0, &txn), (1, &txn)], "$");
        assert_eq!(text.lines().count(), 4);
    }
}
