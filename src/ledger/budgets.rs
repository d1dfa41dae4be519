//! Budget tracker
//!
//! Maps a category name to a spending limit. Spend is always recomputed from
//! the transaction list; nothing is cached.

use std::collections::BTreeMap;

use tracing::debug;

use crate::error::LedgerResult;
use crate::models::{Money, Transaction};
use crate::validation::validate_non_empty;

/// A budget whose spend went over its limit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BudgetExcess {
    pub spent: Money,
    pub limit: Money,
    /// spent - limit, always positive
    pub excess: Money,
}

/// One row of the budget overview
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BudgetLine {
    pub category: String,
    pub limit: Money,
    pub spent: Money,
    /// limit - spent; negative once exceeded
    pub remaining: Money,
    pub exceeded: bool,
}

/// Category budgets keyed by exact category name
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BudgetTracker {
    limits: BTreeMap<String, Money>,
}

impl BudgetTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a tracker from stored limits, checking each one
    pub fn from_limits(limits: BTreeMap<String, Money>) -> LedgerResult<Self> {
        let mut tracker = Self::new();
        for (category, limit) in limits {
            tracker.set_budget(&category, limit)?;
        }
        Ok(tracker)
    }

    /// Set or overwrite the limit for `category`
    pub fn set_budget(&mut self, category: &str, amount: Money) -> LedgerResult<()> {
        amount.ensure_positive("budget limit")?;
        let category = validate_non_empty("category", category)?;
        debug!(category = %category, limit = %amount, "setting budget");
        self.limits.insert(category, amount);
        Ok(())
    }

    pub fn remove_budget(&mut self, category: &str) -> Option<Money> {
        self.limits.remove(category.trim())
    }

    pub fn limit(&self, category: &str) -> Option<Money> {
        self.limits.get(category).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, Money)> {
        self.limits.iter().map(|(c, m)| (c.as_str(), *m))
    }

    pub fn len(&self) -> usize {
        self.limits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.limits.is_empty()
    }

    pub fn as_map(&self) -> &BTreeMap<String, Money> {
        &self.limits
    }

    pub fn spend_for_category(&self, category: &str, transactions: &[Transaction]) -> Money {
        spend_for_category(category, transactions)
    }

    /// Budgets whose expense total is strictly above their limit
    pub fn exceeded_budgets(&self, transactions: &[Transaction]) -> BTreeMap<String, BudgetExcess> {
        self.limits
            .iter()
            .filter_map(|(category, &limit)| {
                let spent = spend_for_category(category, transactions);
                (spent > limit).then(|| {
                    (
                        category.clone(),
                        BudgetExcess {
                            spent,
                            limit,
                            excess: spent - limit,
                        },
                    )
                })
            })
            .collect()
    }

    /// Every budget with its current spend, in category order
    pub fn overview(&self, transactions: &[Transaction]) -> Vec<BudgetLine> {
        self.limits
            .iter()
            .map(|(category, &limit)| {
                let spent = spend_for_category(category, transactions);
                BudgetLine {
                    category: category.clone(),
                    limit,
                    spent,
                    remaining: limit - spent,
                    exceeded: spent > limit,
                }
            })
            .collect()
    }
}

/// Sum of expense amounts whose category equals `category` exactly
pub fn spend_for_category(category: &str, transactions: &[Transaction]) -> Money {
    transactions
        .iter()
        .filter(|t| t.kind.is_expense() && t.category == category)
        .map(|t| t.amount)
        .sum()
}
