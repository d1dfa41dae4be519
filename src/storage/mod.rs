//! Storage layer for pocket-ledger
//!
//! Persists a [`Ledger`] as a single snapshot document with an integrity
//! digest. Saving keeps the previous file as `<path>.bak`. Loading never
//! fails outward: anything unreadable falls back to an empty ledger.

pub mod file_io;
pub mod snapshot;

pub use file_io::{read_json_required, write_bytes_atomic, write_json_atomic};
pub use snapshot::{compute_digest, SnapshotRecord, SNAPSHOT_VERSION};

use std::fmt;
use std::fs;
use std::path::Path;

use tracing::{info, warn};

use crate::config::paths::rolling_backup_path;
use crate::error::{LedgerError, LedgerResult};
use crate::ledger::Ledger;

/// How a load attempt ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadStatus {
    /// No file existed; the ledger is new
    Fresh,
    /// The file was read and its digest matched
    Verified,
    /// The file could not be used; the ledger is new
    Corrupt(String),
}

impl LoadStatus {
    pub fn is_corrupt(&self) -> bool {
        matches!(self, Self::Corrupt(_))
    }
}

impl fmt::Display for LoadStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Fresh => write!(f, "no saved data found, starting a new ledger"),
            Self::Verified => write!(f, "data loaded and verified"),
            Self::Corrupt(reason) => {
                write!(f, "saved data could not be used ({}), starting a new ledger", reason)
            }
        }
    }
}

/// A loaded ledger together with how it was obtained
#[derive(Debug, Clone)]
pub struct LoadOutcome {
    pub ledger: Ledger,
    pub status: LoadStatus,
}

/// Write `ledger` to `path`, moving any existing file to `<path>.bak` first
pub fn save(ledger: &Ledger, path: &Path) -> LedgerResult<()> {
    let bytes = SnapshotRecord::from_ledger(ledger)?.to_bytes()?;

    if path.exists() {
        let backup = rolling_backup_path(path);
        if backup.exists() {
            fs::remove_file(&backup).map_err(|e| {
                LedgerError::Storage(format!(
                    "Failed to remove old backup {}: {}",
                    backup.display(),
                    e
                ))
            })?;
        }
        fs::rename(path, &backup).map_err(|e| {
            LedgerError::Storage(format!(
                "Failed to move {} to {}: {}",
                path.display(),
                backup.display(),
                e
            ))
        })?;
    }

    write_bytes_atomic(path, &bytes)?;

    info!(
        path = %path.display(),
        transactions = ledger.transactions.len(),
        budgets = ledger.budgets.len(),
        goals = ledger.goals.len(),
        "ledger saved"
    );
    Ok(())
}

/// Read and verify the ledger at `path`
///
/// Returns `Ok(None)` when no file exists and an error for anything
/// unreadable, malformed or failing verification.
pub fn try_load(path: &Path) -> LedgerResult<Option<Ledger>> {
    if !path.exists() {
        return Ok(None);
    }

    let bytes = fs::read(path)
        .map_err(|e| LedgerError::Storage(format!("Failed to read {}: {}", path.display(), e)))?;
    let ledger = SnapshotRecord::from_bytes(&bytes)?.into_ledger()?;

    info!(
        path = %path.display(),
        transactions = ledger.transactions.len(),
        "ledger loaded"
    );
    Ok(Some(ledger))
}

/// Load the ledger at `path`, reporting how the load went
pub fn load_with_status(path: &Path) -> LoadOutcome {
    match try_load(path) {
        Ok(Some(ledger)) => LoadOutcome {
            ledger,
            status: LoadStatus::Verified,
        },
        Ok(None) => LoadOutcome {
            ledger: Ledger::new(),
            status: LoadStatus::Fresh,
        },
        Err(e) => {
            warn!(path = %path.display(), error = %e, "discarding unreadable ledger data");
            LoadOutcome {
                ledger: Ledger::new(),
                status: LoadStatus::Corrupt(e.to_string()),
            }
        }
    }
}

/// Load the ledger at `path`, falling back to an empty ledger on any error
pub fn load(path: &Path) -> Ledger {
    load_with_status(path).ledger
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ledger::NewTransaction;
    use crate::models::{Money, TransactionKind};
    use chrono::{NaiveDate, NaiveDateTime};
    use tempfile::TempDir;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn created() -> NaiveDateTime {
        day(2025, 1, 1).and_hms_opt(8, 30, 0).unwrap()
    }

    fn sample_ledger() -> Ledger {
        let mut ledger = Ledger::new();
        let rows = [
            ("Salary", 5000_00, TransactionKind::Income, "Work", day(2024, 1, 1)),
            ("Rent", 1500_00, TransactionKind::Expense, "Housing", day(2024, 1, 5)),
            ("Café, \"latte\"", 4_75, TransactionKind::Expense, "Food", day(2024, 1, 5)),
        ];
        for (description, cents, kind, category, date) in rows {
            ledger
                .transactions
                .add(NewTransaction {
                    description: description.into(),
                    amount: Money::from_cents(cents),
                    kind,
                    category: category.into(),
                    date,
                })
                .unwrap();
        }
        ledger.budgets.set_budget("Food", Money::from_units(400)).unwrap();
        ledger
            .goals
            .set_goal_at("Vacation", Money::from_units(3000), day(2030, 12, 31), created())
            .unwrap();
        ledger.goals.contribute("Vacation", Money::from_units(750)).unwrap();
        ledger
    }

    #[test]
    fn test_round_trip() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("ledger.dat");
        let ledger = sample_ledger();

        save(&ledger, &path).unwrap();
        let outcome = load_with_status(&path);

        assert_eq!(outcome.status, LoadStatus::Verified);
        assert_eq!(outcome.ledger, ledger);
    }

    #[test]
    fn test_missing_file_is_fresh() {
        let temp_dir = TempDir::new().unwrap();
        let outcome = load_with_status(&temp_dir.path().join("absent.dat"));
        assert_eq!(outcome.status, LoadStatus::Fresh);
        assert!(outcome.ledger.is_empty());
    }

    #[test]
    fn test_save_rotates_previous_file_to_bak() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("ledger.dat");
        let backup = rolling_backup_path(&path);

        let first = Ledger::new();
        save(&first, &path).unwrap();
        assert!(!backup.exists());

        let second = sample_ledger();
        save(&second, &path).unwrap();
        assert!(backup.exists());
        assert_eq!(load(&backup), first);
        assert_eq!(load(&path), second);

        // a third save replaces the old backup
        save(&first, &path).unwrap();
        assert_eq!(load(&backup), second);
    }

    #[test]
    fn test_corrupted_checksum_yields_empty_ledger() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("ledger.dat");
        save(&sample_ledger(), &path).unwrap();

        let mut record: SnapshotRecord =
            serde_json::from_slice(&fs::read(&path).unwrap()).unwrap();
        let flipped = if record.checksum.starts_with('0') { "1" } else { "0" };
        record.checksum.replace_range(0..1, flipped);
        fs::write(&path, serde_json::to_vec(&record).unwrap()).unwrap();

        let outcome = load_with_status(&path);
        assert!(outcome.status.is_corrupt());
        assert!(outcome.ledger.is_empty());
    }

    #[test]
    fn test_garbage_file_yields_empty_ledger() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("ledger.dat");
        fs::write(&path, b"\x00\x01 definitely not a ledger").unwrap();

        assert!(load(&path).is_empty());
        assert!(try_load(&path).is_err());
    }

    #[test]
    fn test_stored_invalid_transaction_is_corrupt() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("ledger.dat");

        let mut record = SnapshotRecord::from_ledger(&sample_ledger()).unwrap();
        record.transactions[0].amount = Money::zero();
        record.checksum = compute_digest(&record.transactions, &record.budgets).unwrap();
        fs::write(&path, record.to_bytes().unwrap()).unwrap();

        assert!(load_with_status(&path).status.is_corrupt());
    }

    #[test]
    fn test_loaded_transactions_are_resorted() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("ledger.dat");

        let mut record = SnapshotRecord::from_ledger(&sample_ledger()).unwrap();
        record.transactions.reverse();
        record.checksum = compute_digest(&record.transactions, &record.budgets).unwrap();
        fs::write(&path, record.to_bytes().unwrap()).unwrap();

        let ledger = load(&path);
        let dates: Vec<_> = ledger.transactions.iter().map(|t| t.date).collect();
        let mut sorted = dates.clone();
        sorted.sort();
        assert_eq!(dates, sorted);
    }

    #[test]
    fn test_dates_stored_as_text() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("ledger.dat");
        save(&sample_ledger(), &path).unwrap();

        let value: serde_json::Value = serde_json::from_slice(&fs::read(&path).unwrap()).unwrap();
        assert_eq!(value["transactions"][0]["date"], "01-01-2024");
        assert_eq!(value["transactions"][0]["type"], "income");
        assert_eq!(value["goals"]["Vacation"]["target_date"], "31-12-2030");
        assert_eq!(value["version"], "2.0");
    }

    #[test]
    fn test_amounts_stored_as_integer_cents() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("ledger.dat");
        save(&sample_ledger(), &path).unwrap();

        let value: serde_json::Value = serde_json::from_slice(&fs::read(&path).unwrap()).unwrap();
        assert_eq!(value["transactions"][0]["amount"], serde_json::json!(500000));
        assert!(value["transactions"][0]["amount"].is_i64());
        assert_eq!(value["budgets"]["Food"], serde_json::json!(40000));
        assert_eq!(value["goals"]["Vacation"]["saved_amount"], serde_json::json!(75000));
    }

    #[test]
    fn test_float_amount_document_is_corrupt() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("ledger.dat");
        let legacy = serde_json::json!({
            "transactions": [{
                "description": "Salary",
                "amount": 5000.0,
                "type": "income",
                "category": "Work",
                "date": "01-01-2024"
            }],
            "budgets": {"Food": 400.0},
            "goals": {},
            "checksum": "0",
            "version": "1.0"
        });
        fs::write(&path, serde_json::to_vec(&legacy).unwrap()).unwrap();

        let outcome = load_with_status(&path);
        assert!(outcome.status.is_corrupt());
        assert!(outcome.ledger.is_empty());
    }
}
