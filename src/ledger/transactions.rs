//! Transaction store
//!
//! Holds every transaction in non-decreasing date order. Insertion performs a
//! stable re-sort, so transactions sharing a date keep their insertion order.

use std::collections::BTreeSet;

use chrono::NaiveDate;
use tracing::debug;

use crate::error::{LedgerError, LedgerResult};
use crate::models::{Money, Transaction, TransactionKind};
use crate::validation::validate_non_empty;

/// Input for adding a transaction
#[derive(Debug, Clone)]
pub struct NewTransaction {
    pub description: String,
    pub amount: Money,
    pub kind: TransactionKind,
    pub category: String,
    pub date: NaiveDate,
}

/// Fields to change on an existing transaction; `None` leaves a field alone
#[derive(Debug, Clone, Default)]
pub struct TransactionEdit {
    pub description: Option<String>,
    pub amount: Option<Money>,
    pub kind: Option<TransactionKind>,
}

impl TransactionEdit {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn amount(mut self, amount: Money) -> Self {
        self.amount = Some(amount);
        self
    }

    pub fn kind(mut self, kind: TransactionKind) -> Self {
        self.kind = Some(kind);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.description.is_none() && self.amount.is_none() && self.kind.is_none()
    }
}

/// Options for filtering transactions
///
/// All present criteria must match. Category comparison ignores case and the
/// date range is inclusive on both ends.
#[derive(Debug, Clone, Default)]
pub struct TransactionFilter {
    /// Filter by category
    pub category: Option<String>,
    /// Filter by inclusive date range
    pub date_range: Option<(NaiveDate, NaiveDate)>,
    /// Filter by kind
    pub kind: Option<TransactionKind>,
}

impl TransactionFilter {
    /// Create a new empty filter
    pub fn new() -> Self {
        Self::default()
    }

    /// Filter by category
    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    /// Filter by date range
    pub fn date_range(mut self, start: NaiveDate, end: NaiveDate) -> Self {
        self.date_range = Some((start, end));
        self
    }

    /// Filter by kind
    pub fn kind(mut self, kind: TransactionKind) -> Self {
        self.kind = Some(kind);
        self
    }

    /// Whether a transaction satisfies every criterion
    pub fn matches(&self, txn: &Transaction) -> bool {
        if let Some(category) = &self.category {
            if !txn.category.to_lowercase().eq(&category.trim().to_lowercase()) {
                return false;
            }
        }
        if let Some((start, end)) = self.date_range {
            if txn.date < start || txn.date > end {
                return false;
            }
        }
        if let Some(kind) = self.kind {
            if txn.kind != kind {
                return false;
            }
        }
        true
    }
}

/// Date-ordered collection of transactions
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TransactionStore {
    transactions: Vec<Transaction>,
}

impl TransactionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a store from already-stored records, checking each one
    pub fn from_transactions(transactions: Vec<Transaction>) -> LedgerResult<Self> {
        for txn in &transactions {
            txn.check_invariants()?;
        }
        let mut store = Self { transactions };
        store.sort();
        Ok(store)
    }

    /// Add a transaction and keep the store ordered by date
    pub fn add(&mut self, input: NewTransaction) -> LedgerResult<&Transaction> {
        input.amount.ensure_positive("transaction amount")?;
        let description = validate_non_empty("description", &input.description)?;
        let category = validate_non_empty("category", &input.category)?;

        let txn = Transaction {
            description,
            amount: input.amount,
            kind: input.kind,
            category,
            date: input.date,
        };
        debug!(date = %txn.date, kind = %txn.kind, amount = %txn.amount, "adding transaction");

        self.transactions.push(txn);
        self.sort();

        // The new record is the last one carrying its date
        let position = self
            .transactions
            .partition_point(|t| t.date <= input.date)
            .saturating_sub(1);
        Ok(&self.transactions[position])
    }

    /// Update selected fields of the transaction at `index`
    ///
    /// Every provided field is validated before anything changes.
    pub fn edit(&mut self, index: usize, edit: TransactionEdit) -> LedgerResult<&Transaction> {
        let len = self.transactions.len();
        if index >= len {
            return Err(LedgerError::IndexOutOfRange { index, len });
        }

        let description = edit
            .description
            .as_deref()
            .map(|d| validate_non_empty("description", d))
            .transpose()?;
        if let Some(amount) = edit.amount {
            amount.ensure_positive("transaction amount")?;
        }

        let txn = &mut self.transactions[index];
        if let Some(description) = description {
            txn.description = description;
        }
        if let Some(amount) = edit.amount {
            txn.amount = amount;
        }
        if let Some(kind) = edit.kind {
            txn.kind = kind;
        }
        debug!(index, "edited transaction");

        Ok(&self.transactions[index])
    }

    /// Remove and return the transaction at `index`
    pub fn remove(&mut self, index: usize) -> LedgerResult<Transaction> {
        let len = self.transactions.len();
        if index >= len {
            return Err(LedgerError::IndexOutOfRange { index, len });
        }
        let removed = self.transactions.remove(index);
        debug!(index, description = %removed.description, "removed transaction");
        Ok(removed)
    }

    /// Materialize the transactions matching `filter`, in store order
    pub fn filter(&self, filter: &TransactionFilter) -> Vec<Transaction> {
        self.transactions
            .iter()
            .filter(|txn| filter.matches(txn))
            .cloned()
            .collect()
    }

    pub fn get(&self, index: usize) -> Option<&Transaction> {
        self.transactions.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Transaction> {
        self.transactions.iter()
    }

    pub fn len(&self) -> usize {
        self.transactions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transactions.is_empty()
    }

    pub fn as_slice(&self) -> &[Transaction] {
        &self.transactions
    }

    /// Distinct category names, sorted
    pub fn categories(&self) -> Vec<String> {
        self.transactions
            .iter()
            .map(|t| t.category.clone())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    fn sort(&mut self) {
        // Vec::sort_by_key is stable
        self.transactions.sort_by_key(|t| t.date);
    }
}

impl<'a> IntoIterator for &'a TransactionStore {
    type Item = &'a Transaction;
    type IntoIter = std::slice::Iter<'a, Transaction>;

    fn into_iter(self) -> Self::IntoIter {
        self.transactions.iter()
    }
}
