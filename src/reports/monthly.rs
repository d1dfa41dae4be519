//! Monthly Report
//!
//! Totals and a per-category breakdown for one calendar month. Budget
//! standing per category compares the limit against that month's expenses.

use std::collections::BTreeMap;

use chrono::Datelike;

use super::Totals;
use crate::error::LedgerResult;
use crate::ledger::{BudgetExcess, Ledger};
use crate::models::{Money, Transaction, TransactionKind};
use crate::validation::validate_year_month;

/// Where a budgeted category stands for the month
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BudgetStanding {
    /// limit - expense, zero or more
    Remaining(Money),
    /// expense - limit, strictly positive
    Exceeded(Money),
}

/// Breakdown row for one category
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryBreakdown {
    pub category: String,
    pub income: Money,
    pub expense: Money,
    /// `None` when the category has no budget
    pub budget: Option<BudgetStanding>,
}

/// Monthly Report
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonthlyReport {
    pub year: i32,
    pub month: u32,
    pub totals: Totals,
    /// Lexicographic category order
    pub categories: Vec<CategoryBreakdown>,
    pub transaction_count: usize,
    /// Ledger-wide exceeded budgets, independent of the month
    pub exceeded_budgets: BTreeMap<String, BudgetExcess>,
}

impl MonthlyReport {
    /// Generate the report; `Ok(None)` when the month has no transactions
    pub fn generate(ledger: &Ledger, year: i32, month: u32) -> LedgerResult<Option<Self>> {
        validate_year_month(year, month)?;

        let in_month: Vec<&Transaction> = ledger
            .transactions
            .iter()
            .filter(|t| t.date.year() == year && t.date.month() == month)
            .collect();

        if in_month.is_empty() {
            return Ok(None);
        }

        let mut sums: BTreeMap<&str, (Money, Money)> = BTreeMap::new();
        for txn in &in_month {
            let entry = sums.entry(txn.category.as_str()).or_default();
            match txn.kind {
                TransactionKind::Income => entry.0 += txn.amount,
                TransactionKind::Expense => entry.1 += txn.amount,
            }
        }

        let categories = sums
            .into_iter()
            .map(|(category, (income, expense))| CategoryBreakdown {
                category: category.to_string(),
                income,
                expense,
                budget: ledger.budgets.limit(category).map(|limit| {
                    if expense > limit {
                        BudgetStanding::Exceeded(expense - limit)
                    } else {
                        BudgetStanding::Remaining(limit - expense)
                    }
                }),
            })
            .collect();

        Ok(Some(Self {
            year,
            month,
            totals: Totals::from_transactions(in_month.iter().copied()),
            categories,
            transaction_count: in_month.len(),
            exceeded_budgets: ledger.exceeded_budgets(),
        }))
    }

    /// Format the report for terminal display
    pub fn format_terminal(&self, symbol: &str) -> String {
        let mut output = String::new();

        output.push_str(&format!("Monthly Report: {:02}/{:04}\n", self.month, self.year));
        output.push_str(&"=".repeat(72));
        output.push('\n');
        output.push_str(&self.totals.format_lines(symbol));
        output.push_str(&format!("{:<16} {:>14}\n\n", "Transactions:", self.transaction_count));

        output.push_str(&format!(
            "{:<24} {:>14} {:>14} {:>16}\n",
            "Category", "Income", "Expense", "Budget"
        ));
        output.push_str(&"-".repeat(72));
        output.push('\n');

        for row in &self.categories {
            let budget = match row.budget {
                Some(BudgetStanding::Remaining(left)) => {
                    format!("{} left", left.format_with_symbol(symbol))
                }
                Some(BudgetStanding::Exceeded(over)) => {
                    format!("{} over", over.format_with_symbol(symbol))
                }
                None => "-".to_string(),
            };
            output.push_str(&format!(
                "{:<24} {:>14} {:>14} {:>16}\n",
                row.category,
                row.income.format_with_symbol(symbol),
                row.expense.format_with_symbol(symbol),
                budget
            ));
        }

        if !self.exceeded_budgets.is_empty() {
            output.push_str("\nBudgets exceeded (all time):\n");
            for (category, excess) in &self.exceeded_budgets {
                output.push_str(&format!(
                    "  {:<20} over by {}\n",
                    category,
                    excess.excess.format_with_symbol(symbol)
                ));
            }
        }

        output
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::LedgerError;
    use crate::ledger::NewTransaction;
    use chrono::NaiveDate;

    fn add(ledger: &mut Ledger, units: i64, kind: TransactionKind, category: &str, date: NaiveDate) {
        ledger
            .transactions
            .add(NewTransaction {
                description: "entry".into(),
                amount: Money::from_units(units),
                kind,
                category: category.into(),
                date,
            })
            .unwrap();
    }

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn sample_ledger() -> Ledger {
        let mut ledger = Ledger::new();
        ledger.budgets.set_budget("Food", Money::from_units(400)).unwrap();
        ledger.budgets.set_budget("Housing", Money::from_units(1000)).unwrap();
        add(&mut ledger, 5000, TransactionKind::Income, "Work", day(2024, 1, 1));
        add(&mut ledger, 1500, TransactionKind::Expense, "Housing", day(2024, 1, 5));
        add(&mut ledger, 300, TransactionKind::Expense, "Food", day(2024, 1, 10));
        add(&mut ledger, 200, TransactionKind::Expense, "Food", day(2024, 3, 2));
        ledger
    }

    #[test]
    fn test_monthly_breakdown() {
        let ledger = sample_ledger();
        let report = MonthlyReport::generate(&ledger, 2024, 1).unwrap().unwrap();

        assert_eq!(report.transaction_count, 3);
        assert_eq!(report.totals.total_income, Money::from_units(5000));
        assert_eq!(report.totals.total_expense, Money::from_units(1800));
        assert_eq!(report.totals.net, Money::from_units(3200));

        let names: Vec<_> = report.categories.iter().map(|c| c.category.as_str()).collect();
        assert_eq!(names, vec!["Food", "Housing", "Work"]);

        assert_eq!(
            report.categories[0].budget,
            Some(BudgetStanding::Remaining(Money::from_units(100)))
        );
        assert_eq!(
            report.categories[1].budget,
            Some(BudgetStanding::Exceeded(Money::from_units(500)))
        );
        assert_eq!(report.categories[2].budget, None);
        assert_eq!(report.categories[2].income, Money::from_units(5000));
    }

    #[test]
    fn test_monthly_budget_uses_month_expenses_only() {
        let ledger = sample_ledger();
        let march = MonthlyReport::generate(&ledger, 2024, 3).unwrap().unwrap();
        assert_eq!(
            march.categories[0].budget,
            Some(BudgetStanding::Remaining(Money::from_units(200)))
        );
        // ledger-wide status still reports Housing
        assert!(march.exceeded_budgets.contains_key("Housing"));
    }

    #[test]
    fn test_empty_month_is_none() {
        let ledger = sample_ledger();
        assert!(MonthlyReport::generate(&ledger, 2024, 2).unwrap().is_none());
        assert!(MonthlyReport::generate(&Ledger::new(), 2024, 2).unwrap().is_none());
    }

    #[test]
    fn test_invalid_month() {
        assert!(matches!(
            MonthlyReport::generate(&Ledger::new(), 2024, 13),
            Err(LedgerError::OutOfRange(_))
        ));
    }

    #[test]
    fn test_format_terminal() {
        let ledger = sample_ledger();
        let text = MonthlyReport::generate(&ledger, 2024, 1)
            .unwrap()
            .unwrap()
            .format_terminal("$");
        assert!(text.contains("Monthly Report: 01/2024"));
        assert!(text.contains("$100.00 left"));
        assert!(text.contains("$500.00 over"));
    }
}
