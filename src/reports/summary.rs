//! Date-range and category summaries

use chrono::NaiveDate;

use super::Totals;
use crate::error::{LedgerError, LedgerResult};
use crate::ledger::{Ledger, TransactionFilter};
use crate::models::{dates, Money, Transaction, TransactionKind};

/// Totals and matching transactions for an inclusive date range
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RangeSummary {
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub totals: Totals,
    pub transactions: Vec<Transaction>,
}

impl RangeSummary {
    pub fn generate(ledger: &Ledger, start: NaiveDate, end: NaiveDate) -> LedgerResult<Self> {
        if start > end {
            return Err(LedgerError::InvalidRange { start, end });
        }
        let transactions = ledger
            .transactions
            .filter(&TransactionFilter::new().date_range(start, end));

        Ok(Self {
            start,
            end,
            totals: Totals::from_transactions(&transactions),
            transactions,
        })
    }

    /// Format the report for terminal display
    pub fn format_terminal(&self, symbol: &str) -> String {
        let mut output = format!(
            "Transactions from {} to {}\n",
            dates::format_date(self.start),
            dates::format_date(self.end)
        );
        output.push_str(&"=".repeat(72));
        output.push('\n');
        output.push_str(&format_rows(&self.transactions, symbol));
        output.push('\n');
        output.push_str(&self.totals.format_lines(symbol));
        output
    }
}

/// Total and matching transactions for one category
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategorySummary {
    pub category: String,
    /// Sum of matching amounts regardless of kind
    pub total: Money,
    pub totals: Totals,
    pub transactions: Vec<Transaction>,
}

impl CategorySummary {
    pub fn generate(ledger: &Ledger, category: &str) -> Self {
        let transactions = ledger
            .transactions
            .filter(&TransactionFilter::new().category(category));

        Self {
            category: category.trim().to_string(),
            total: transactions.iter().map(|t| t.amount).sum(),
            totals: Totals::from_transactions(&transactions),
            transactions,
        }
    }

    /// Format the report for terminal display
    pub fn format_terminal(&self, symbol: &str) -> String {
        let mut output = format!("Category: {}\n", self.category);
        output.push_str(&"=".repeat(72));
        output.push('\n');
        output.push_str(&format_rows(&self.transactions, symbol));
        output.push_str(&format!(
            "\n{:<16} {:>14}\n",
            "Total:",
            self.total.format_with_symbol(symbol)
        ));
        output
    }
}

fn format_rows(transactions: &[Transaction], symbol: &str) -> String {
    if transactions.is_empty() {
        return "No transactions found.\n".to_string();
    }

    let mut output = String::new();
    for txn in transactions {
        let sign = match txn.kind {
            TransactionKind::Income => "+",
            TransactionKind::Expense => "-",
        };
        output.push_str(&format!(
            "{}  {:<28} {:<16} {}{}\n",
            dates::format_date(txn.date),
            txn.description,
            txn.category,
            sign,
            txn.amount.format_with_symbol(symbol)
        ));
    }
    output
}
