//! Reports module for pocket-ledger
//!
//! Read-only aggregations over a [`Ledger`]: the overall balance, monthly
//! breakdowns, date-range and category summaries. Each report renders itself
//! for the terminal with `format_terminal`.

pub mod balance;
pub mod monthly;
pub mod summary;

pub use balance::BalanceReport;
pub use monthly::{BudgetStanding, CategoryBreakdown, MonthlyReport};
pub use summary::{CategorySummary, RangeSummary};

use chrono::NaiveDate;

use crate::error::LedgerResult;
use crate::ledger::Ledger;
use crate::models::{Money, Transaction, TransactionKind};

/// Income, expense and net over a set of transactions
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Totals {
    pub total_income: Money,
    pub total_expense: Money,
    /// total_income - total_expense
    pub net: Money,
}

impl Totals {
    pub fn from_transactions<'a, I>(transactions: I) -> Self
    where
        I: IntoIterator<Item = &'a Transaction>,
    {
        let mut totals = Self::default();
        for txn in transactions {
            match txn.kind {
                TransactionKind::Income => totals.total_income += txn.amount,
                TransactionKind::Expense => totals.total_expense += txn.amount,
            }
        }
        totals.net = totals.total_income - totals.total_expense;
        totals
    }

    fn format_lines(&self, symbol: &str) -> String {
        format!(
            "{:<16} {:>14}\n{:<16} {:>14}\n{:<16} {:>14}\n",
            "Total Income:",
            self.total_income.format_with_symbol(symbol),
            "Total Expense:",
            self.total_expense.format_with_symbol(symbol),
            "Net Balance:",
            self.net.format_with_symbol(symbol),
        )
    }
}

/// Overall balance and exceeded budgets
pub fn balance(ledger: &Ledger) -> BalanceReport {
    BalanceReport::generate(ledger)
}

/// Breakdown for one calendar month; `None` when the month has no transactions
pub fn monthly_report(ledger: &Ledger, year: i32, month: u32) -> LedgerResult<Option<MonthlyReport>> {
    MonthlyReport::generate(ledger, year, month)
}

/// Totals and transactions within an inclusive date range
pub fn range_summary(ledger: &Ledger, start: NaiveDate, end: NaiveDate) -> LedgerResult<RangeSummary> {
    RangeSummary::generate(ledger, start, end)
}

/// Total and transactions for one category, matched case-insensitively
pub fn category_summary(ledger: &Ledger, category: &str) -> CategorySummary {
    CategorySummary::generate(ledger, category)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn txn(units: i64, kind: TransactionKind) -> Transaction {
        Transaction {
            description: "t".into(),
            amount: Money::from_units(units),
            kind,
            category: "c".into(),
            date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
        }
    }

    #[test]
    fn test_totals() {
        let transactions = vec![
            txn(5000, TransactionKind::Income),
            txn(1500, TransactionKind::Expense),
            txn(300, TransactionKind::Expense),
        ];
        let totals = Totals::from_transactions(&transactions);
        assert_eq!(totals.total_income, Money::from_units(5000));
        assert_eq!(totals.total_expense, Money::from_units(1800));
        assert_eq!(totals.net, Money::from_units(3200));
    }

    #[test]
    fn test_totals_empty() {
        let totals = Totals::from_transactions(&Vec::<Transaction>::new());
        assert_eq!(totals, Totals::default());
    }
}
