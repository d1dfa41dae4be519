//! Balance Report
//!
//! Ledger-wide income, expense and net, plus every budget currently over its
//! limit.

use std::collections::BTreeMap;

use super::Totals;
use crate::ledger::{BudgetExcess, Ledger};

/// Balance Report
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BalanceReport {
    pub totals: Totals,
    pub exceeded_budgets: BTreeMap<String, BudgetExcess>,
}

impl BalanceReport {
    /// Generate the report over the whole ledger
    pub fn generate(ledger: &Ledger) -> Self {
        Self {
            totals: Totals::from_transactions(ledger.transactions.iter()),
            exceeded_budgets: ledger.exceeded_budgets(),
        }
    }

    /// Format the report for terminal display
    pub fn format_terminal(&self, symbol: &str) -> String {
        let mut output = String::new();

        output.push_str("Balance\n");
        output.push_str(&"=".repeat(40));
        output.push('\n');
        output.push_str(&self.totals.format_lines(symbol));

        if !self.exceeded_budgets.is_empty() {
            output.push_str("\nBudgets exceeded:\n");
            for (category, excess) in &self.exceeded_budgets {
                output.push_str(&format!(
                    "  {:<20} spent {} of {} (over by {})\n",
                    category,
                    excess.spent.format_with_symbol(symbol),
                    excess.limit.format_with_symbol(symbol),
                    excess.excess.format_with_symbol(symbol),
                ));
            }
        }

        output
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ledger::NewTransaction;
    use crate::models::{Money, TransactionKind};
    use chrono::NaiveDate;

    fn add(ledger: &mut Ledger, description: &str, units: i64, kind: TransactionKind, category: &str, day: u32) {
        ledger
            .transactions
            .add(NewTransaction {
                description: description.into(),
                amount: Money::from_units(units),
                kind,
                category: category.into(),
                date: NaiveDate::from_ymd_opt(2024, 1, day).unwrap(),
            })
            .unwrap();
    }

    #[test]
    fn test_balance_scenario() {
        let mut ledger = Ledger::new();
        add(&mut ledger, "Salary", 5000, TransactionKind::Income, "Work", 1);
        add(&mut ledger, "Rent", 1500, TransactionKind::Expense, "Housing", 5);

        let report = BalanceReport::generate(&ledger);
        assert_eq!(report.totals.total_income, Money::from_units(5000));
        assert_eq!(report.totals.total_expense, Money::from_units(1500));
        assert_eq!(report.totals.net, Money::from_units(3500));
        assert!(report.exceeded_budgets.is_empty());
    }

    #[test]
    fn test_balance_lists_exceeded_budgets() {
        let mut ledger = Ledger::new();
        ledger.budgets.set_budget("Food", Money::from_units(1000)).unwrap();
        add(&mut ledger, "Market", 800, TransactionKind::Expense, "Food", 2);
        add(&mut ledger, "Market", 700, TransactionKind::Expense, "Food", 3);

        let report = BalanceReport::generate(&ledger);
        assert_eq!(report.exceeded_budgets["Food"].excess, Money::from_units(500));

        let text = report.format_terminal("$");
        assert!(text.contains("Net Balance:"));
        assert!(text.contains("-$1500.00"));
        assert!(text.contains("over by $500.00"));
    }

    #[test]
    fn test_balance_of_largest_amounts_is_exact() {
        let mut ledger = Ledger::new();
        for (kind, day) in [
            (TransactionKind::Income, 1),
            (TransactionKind::Income, 2),
            (TransactionKind::Expense, 3),
        ] {
            ledger
                .transactions
                .add(NewTransaction {
                    description: "Windfall".into(),
                    amount: Money::MAX,
                    kind,
                    category: "Misc".into(),
                    date: NaiveDate::from_ymd_opt(2024, 1, day).unwrap(),
                })
                .unwrap();
        }

        let report = BalanceReport::generate(&ledger);
        assert_eq!(report.totals.total_income.cents(), 2 * Money::MAX.cents());
        assert_eq!(report.totals.net, Money::MAX);

        let oversized = ledger.transactions.add(NewTransaction {
            description: "Too much".into(),
            amount: Money::MAX + Money::from_cents(1),
            kind: TransactionKind::Income,
            category: "Misc".into(),
            date: NaiveDate::from_ymd_opt(2024, 1, 4).unwrap(),
        });
        assert!(matches!(oversized, Err(crate::error::LedgerError::OutOfRange(_))));
        assert_eq!(ledger.transactions.len(), 3);
    }
}
