//! Transaction model
//!
//! Represents a single dated income or expense entry. The kind is a closed
//! enum so a transaction can never carry an unknown type string.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::dates::{self, date_text};
use super::money::Money;
use crate::error::LedgerError;

/// Direction of a transaction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    /// Money coming in
    Income,
    /// Money going out
    Expense,
}

impl TransactionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Income => "income",
            Self::Expense => "expense",
        }
    }

    pub fn is_income(&self) -> bool {
        matches!(self, Self::Income)
    }

    pub fn is_expense(&self) -> bool {
        matches!(self, Self::Expense)
    }
}

impl fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for TransactionKind {
    type Err = LedgerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "income" => Ok(Self::Income),
            "expense" => Ok(Self::Expense),
            _ => Err(LedgerError::InvalidTransactionType(s.trim().to_string())),
        }
    }
}

/// A financial transaction
///
/// Field names match the persisted snapshot record; `kind` is stored as `type`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    /// What the money was for
    pub description: String,

    /// Always strictly positive; the direction comes from `kind`
    pub amount: Money,

    #[serde(rename = "type")]
    pub kind: TransactionKind,

    pub category: String,

    #[serde(with = "date_text")]
    pub date: NaiveDate,
}

impl Transaction {
    /// Signed contribution of this transaction to the balance
    pub fn signed_amount(&self) -> Money {
        match self.kind {
            TransactionKind::Income => self.amount,
            TransactionKind::Expense => -self.amount,
        }
    }

    /// Check the stored invariants: positive amount and non-blank text fields
    pub fn check_invariants(&self) -> Result<(), LedgerError> {
        self.amount.ensure_positive("transaction amount")?;
        if self.description.trim().is_empty() {
            return Err(LedgerError::EmptyField("description"));
        }
        if self.category.trim().is_empty() {
            return Err(LedgerError::EmptyField("category"));
        }
        Ok(())
    }
}

impl fmt::Display for Transaction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {} {} [{}]",
            dates::format_date(self.date),
            self.description,
            self.kind,
            self.amount,
            self.category
        )
    }
}
