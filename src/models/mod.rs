//! Core data models for pocket-ledger
//!
//! This module contains the data structures of the ledger domain: money,
//! transactions, and savings goals, plus the canonical date text forms.

pub mod dates;
pub mod goal;
pub mod money;
pub mod transaction;

pub use goal::{Goal, GoalProgress};
pub use money::Money;
pub use transaction::{Transaction, TransactionKind};
