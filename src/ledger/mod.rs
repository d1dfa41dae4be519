//! The ledger aggregate
//!
//! A [`Ledger`] owns the transaction store, the budget tracker and the goal
//! tracker. It is a plain value: callers construct one explicitly and pass it
//! to storage, reports and export.

pub mod budgets;
pub mod goals;
pub mod transactions;

use std::collections::BTreeMap;

pub use budgets::{spend_for_category, BudgetExcess, BudgetLine, BudgetTracker};
pub use goals::GoalTracker;
pub use transactions::{NewTransaction, TransactionEdit, TransactionFilter, TransactionStore};

use crate::error::LedgerResult;
use crate::models::{Goal, Money, Transaction};

/// Transactions, budgets and goals persisted together
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Ledger {
    pub transactions: TransactionStore,
    pub budgets: BudgetTracker,
    pub goals: GoalTracker,
}

impl Ledger {
    /// Create an empty ledger
    pub fn new() -> Self {
        Self::default()
    }

    /// Assemble a ledger from stored parts, checking every record
    pub fn from_parts(
        transactions: Vec<Transaction>,
        budgets: BTreeMap<String, Money>,
        goals: BTreeMap<String, Goal>,
    ) -> LedgerResult<Self> {
        Ok(Self {
            transactions: TransactionStore::from_transactions(transactions)?,
            budgets: BudgetTracker::from_limits(budgets)?,
            goals: GoalTracker::from_goals(goals)?,
        })
    }

    pub fn is_empty(&self) -> bool {
        self.transactions.is_empty() && self.budgets.is_empty() && self.goals.is_empty()
    }

    /// Expense total for a budget category across the whole ledger
    pub fn spend_for_category(&self, category: &str) -> Money {
        spend_for_category(category, self.transactions.as_slice())
    }

    /// Budgets currently over their limit
    pub fn exceeded_budgets(&self) -> BTreeMap<String, BudgetExcess> {
        self.budgets.exceeded_budgets(self.transactions.as_slice())
    }

    /// Every budget with its spend, in category order
    pub fn budget_overview(&self) -> Vec<BudgetLine> {
        self.budgets.overview(self.transactions.as_slice())
    }
}
