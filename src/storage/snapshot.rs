//! Snapshot record and integrity digest
//!
//! The persisted document carries transactions, budgets and goals together
//! with a SHA-256 digest and a format version. The digest covers only
//! `{transactions, budgets}`; goals are stored but not covered.
//!
//! Format `2.0` stores every amount as an integer count of cents. Documents
//! with decimal amounts (the `1.x` layout) do not deserialize and load as
//! corrupt.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::error::{LedgerError, LedgerResult};
use crate::ledger::Ledger;
use crate::models::{Goal, Money, Transaction};

/// Current snapshot format version
pub const SNAPSHOT_VERSION: &str = "2.0";

/// Canonical digest input; field order is fixed by the struct
#[derive(Serialize)]
struct DigestInput<'a> {
    transactions: &'a [Transaction],
    budgets: &'a BTreeMap<String, Money>,
}

/// The persisted ledger document
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SnapshotRecord {
    pub transactions: Vec<Transaction>,
    pub budgets: BTreeMap<String, Money>,
    #[serde(default)]
    pub goals: BTreeMap<String, Goal>,
    pub checksum: String,
    pub version: String,
}

impl SnapshotRecord {
    /// Capture a ledger and stamp it with its digest
    pub fn from_ledger(ledger: &Ledger) -> LedgerResult<Self> {
        let transactions = ledger.transactions.as_slice().to_vec();
        let budgets = ledger.budgets.as_map().clone();
        let checksum = compute_digest(&transactions, &budgets)?;

        Ok(Self {
            transactions,
            budgets,
            goals: ledger.goals.as_map().clone(),
            checksum,
            version: SNAPSHOT_VERSION.to_string(),
        })
    }

    /// Check the version and recompute the digest
    pub fn verify(&self) -> LedgerResult<()> {
        if self.version != SNAPSHOT_VERSION {
            return Err(LedgerError::Integrity(format!(
                "unsupported snapshot version '{}'",
                self.version
            )));
        }

        let expected = compute_digest(&self.transactions, &self.budgets)?;
        if expected != self.checksum {
            return Err(LedgerError::Integrity(
                "checksum does not match stored data".into(),
            ));
        }

        Ok(())
    }

    /// Verify and convert into a ledger
    pub fn into_ledger(self) -> LedgerResult<Ledger> {
        self.verify()?;
        Ledger::from_parts(self.transactions, self.budgets, self.goals)
    }

    pub fn to_bytes(&self) -> LedgerResult<Vec<u8>> {
        Ok(serde_json::to_vec_pretty(self)?)
    }

    pub fn from_bytes(bytes: &[u8]) -> LedgerResult<Self> {
        Ok(serde_json::from_slice(bytes)?)
    }
}

/// SHA-256 hex digest over the compact JSON of `{transactions, budgets}`
pub fn compute_digest(
    transactions: &[Transaction],
    budgets: &BTreeMap<String, Money>,
) -> LedgerResult<String> {
    let canonical = serde_json::to_vec(&DigestInput {
        transactions,
        budgets,
    })?;

    let mut hasher = Sha256::new();
    hasher.update(&canonical);
    Ok(hex::encode(hasher.finalize()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ledger::NewTransaction;
    use crate::models::TransactionKind;
    use chrono::NaiveDate;

    fn sample_ledger() -> Ledger {
        let mut ledger = Ledger::new();
        ledger
            .transactions
            .add(NewTransaction {
                description: "Salary".into(),
                amount: Money::from_units(5000),
                kind: TransactionKind::Income,
                category: "Work".into(),
                date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            })
            .unwrap();
        ledger.budgets.set_budget("Food", Money::from_units(400)).unwrap();
        ledger
    }

    #[test]
    fn test_digest_is_hex_sha256() {
        let record = SnapshotRecord::from_ledger(&sample_ledger()).unwrap();
        assert_eq!(record.checksum.len(), 64);
        assert!(record.checksum.chars().all(|c| c.is_ascii_hexdigit()));
        assert_eq!(record.version, SNAPSHOT_VERSION);
    }

    #[test]
    fn test_digest_is_independent_of_budget_insertion_order() {
        let mut a = BTreeMap::new();
        a.insert("Food".to_string(), Money::from_units(1));
        a.insert("Rent".to_string(), Money::from_units(2));
        let mut b = BTreeMap::new();
        b.insert("Rent".to_string(), Money::from_units(2));
        b.insert("Food".to_string(), Money::from_units(1));

        assert_eq!(compute_digest(&[], &a).unwrap(), compute_digest(&[], &b).unwrap());
    }

    #[test]
    fn test_tampered_record_fails_verification() {
        let mut record = SnapshotRecord::from_ledger(&sample_ledger()).unwrap();
        record.budgets.insert("Food".into(), Money::from_units(999));
        assert!(matches!(record.verify(), Err(LedgerError::Integrity(_))));
    }

    #[test]
    fn test_goals_are_not_covered_by_digest() {
        let ledger = sample_ledger();
        let before = SnapshotRecord::from_ledger(&ledger).unwrap();

        let mut with_goal = ledger.clone();
        with_goal
            .goals
            .set_goal_at(
                "Trip",
                Money::from_units(100),
                NaiveDate::from_ymd_opt(2030, 1, 1).unwrap(),
                NaiveDate::from_ymd_opt(2025, 1, 1)
                    .unwrap()
                    .and_hms_opt(0, 0, 0)
                    .unwrap(),
            )
            .unwrap();
        let after = SnapshotRecord::from_ledger(&with_goal).unwrap();

        assert_eq!(before.checksum, after.checksum);
    }

    #[test]
    fn test_unknown_version_rejected() {
        let mut record = SnapshotRecord::from_ledger(&sample_ledger()).unwrap();
        record.version = "1.0".into();
        assert!(matches!(record.verify(), Err(LedgerError::Integrity(_))));
    }

    #[test]
    fn test_bytes_round_trip() {
        let ledger = sample_ledger();
        let bytes = SnapshotRecord::from_ledger(&ledger).unwrap().to_bytes().unwrap();
        let restored = SnapshotRecord::from_bytes(&bytes).unwrap().into_ledger().unwrap();
        assert_eq!(restored, ledger);
    }
}
