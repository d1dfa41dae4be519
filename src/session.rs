//! Ledger session
//!
//! A [`Session`] owns the ledger for the lifetime of one run of the
//! application. Opening a session takes a dated backup of the data file and
//! loads it; every successful mutation made through [`Session::apply`] is
//! saved immediately.

use std::path::PathBuf;

use tracing::{debug, warn};

use crate::backup::{BackupKind, BackupManager, RestoreManager};
use crate::config::{LedgerPaths, Settings};
use crate::error::LedgerResult;
use crate::ledger::Ledger;
use crate::storage::{self, LoadOutcome, LoadStatus};

pub struct Session {
    paths: LedgerPaths,
    settings: Settings,
    ledger: Ledger,
    load_status: LoadStatus,
    session_backup: Option<PathBuf>,
}

impl Session {
    /// Prepare directories, back up the data file and load the ledger
    pub fn open(paths: LedgerPaths, settings: Settings) -> LedgerResult<Self> {
        paths.ensure_directories()?;

        let session_backup =
            BackupManager::new(paths.clone(), settings.backup_retention.clone()).rotate_session()?;

        let LoadOutcome { ledger, status } = storage::load_with_status(&paths.data_file());
        if status.is_corrupt() {
            warn!(%status, "opened session with an empty ledger");
        } else {
            debug!(%status, transactions = ledger.transactions.len(), "session opened");
        }

        Ok(Self {
            paths,
            settings,
            ledger,
            load_status: status,
            session_backup,
        })
    }

    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    /// Direct mutable access; the caller is responsible for calling [`Session::save`]
    pub fn ledger_mut(&mut self) -> &mut Ledger {
        &mut self.ledger
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn paths(&self) -> &LedgerPaths {
        &self.paths
    }

    /// How the ledger was obtained when the session opened
    pub fn load_status(&self) -> &LoadStatus {
        &self.load_status
    }

    /// The session backup taken at open, if there was data to back up
    pub fn session_backup(&self) -> Option<&PathBuf> {
        self.session_backup.as_ref()
    }

    pub fn backup_manager(&self) -> BackupManager {
        BackupManager::new(self.paths.clone(), self.settings.backup_retention.clone())
    }

    pub fn restore_manager(&self) -> RestoreManager {
        RestoreManager::new(self.paths.clone())
    }

    /// Write the ledger to the data file
    pub fn save(&self) -> LedgerResult<()> {
        storage::save(&self.ledger, &self.paths.data_file())
    }

    /// Run a mutation and save only when it succeeded
    ///
    /// Mutators validate before changing anything, so a failed mutation leaves
    /// both the ledger and the data file untouched.
    pub fn apply<T, F>(&mut self, mutation: F) -> LedgerResult<T>
    where
        F: FnOnce(&mut Ledger) -> LedgerResult<T>,
    {
        let value = mutation(&mut self.ledger)?;
        self.save()?;
        Ok(value)
    }

    /// Replace the in-memory ledger with the promoted rolling backup
    pub fn restore_rolling_backup(&mut self) -> LedgerResult<()> {
        self.ledger = self.restore_manager().restore_rolling_backup()?;
        Ok(())
    }

    /// Replace the in-memory ledger with a dated backup and save it
    ///
    /// Session backups are full copies; manual snapshots carry no goals.
    pub fn restore_backup_file(&mut self, filename: &str) -> LedgerResult<()> {
        let info = self.backup_manager().get_backup(filename)?;
        let restore = self.restore_manager();
        self.ledger = match info.kind {
            BackupKind::Session => restore.restore_session_backup(&info.path)?,
            BackupKind::Snapshot => restore.restore_snapshot(&info.path)?,
        };
        self.save()
    }

    /// Save at shutdown
    pub fn close(self) -> LedgerResult<()> {
        self.save()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::LedgerError;
    use crate::ledger::NewTransaction;
    use crate::models::{Money, TransactionKind};
    use chrono::NaiveDate;
    use tempfile::TempDir;

    fn open(temp_dir: &TempDir) -> Session {
        let paths = LedgerPaths::with_base_dir(temp_dir.path().to_path_buf());
        Session::open(paths, Settings::default()).unwrap()
    }

    fn rent() -> NewTransaction {
        NewTransaction {
            description: "Rent".into(),
            amount: Money::from_units(1500),
            kind: TransactionKind::Expense,
            category: "Housing".into(),
            date: NaiveDate::from_ymd_opt(2024, 1, 5).unwrap(),
        }
    }

    #[test]
    fn test_first_open_is_fresh() {
        let temp_dir = TempDir::new().unwrap();
        let session = open(&temp_dir);
        assert_eq!(session.load_status(), &LoadStatus::Fresh);
        assert!(session.session_backup().is_none());
        assert!(session.ledger().is_empty());
    }

    #[test]
    fn test_apply_saves_on_success() {
        let temp_dir = TempDir::new().unwrap();
        let mut session = open(&temp_dir);
        session
            .apply(|ledger| ledger.transactions.add(rent()).map(|_| ()))
            .unwrap();

        let reopened = open(&temp_dir);
        assert_eq!(reopened.load_status(), &LoadStatus::Verified);
        assert_eq!(reopened.ledger().transactions.len(), 1);
        assert!(reopened.session_backup().is_some());
    }

    #[test]
    fn test_apply_failure_does_not_save() {
        let temp_dir = TempDir::new().unwrap();
        let mut session = open(&temp_dir);

        let result = session.apply(|ledger| ledger.budgets.set_budget("Food", Money::zero()));
        assert!(matches!(result, Err(LedgerError::InvalidAmount(_))));
        assert!(!session.paths().data_file().exists());
    }

    #[test]
    fn test_restore_rolling_backup_through_session() {
        let temp_dir = TempDir::new().unwrap();
        let mut session = open(&temp_dir);
        session
            .apply(|ledger| ledger.budgets.set_budget("Food", Money::from_units(100)))
            .unwrap();
        session
            .apply(|ledger| ledger.budgets.set_budget("Food", Money::from_units(200)))
            .unwrap();

        session.restore_rolling_backup().unwrap();
        assert_eq!(
            session.ledger().budgets.limit("Food"),
            Some(Money::from_units(100))
        );
    }

    #[test]
    fn test_restore_snapshot_file() {
        let temp_dir = TempDir::new().unwrap();
        let mut session = open(&temp_dir);
        session.apply(|ledger| ledger.transactions.add(rent()).map(|_| ())).unwrap();
        let snapshot = session.backup_manager().create_snapshot(session.ledger()).unwrap();

        session.apply(|ledger| ledger.transactions.remove(0)).unwrap();
        assert!(session.ledger().transactions.is_empty());

        let filename = snapshot.file_name().unwrap().to_string_lossy().to_string();
        session.restore_backup_file(&filename).unwrap();
        assert_eq!(session.ledger().transactions.len(), 1);
    }

    #[test]
    fn test_close_saves() {
        let temp_dir = TempDir::new().unwrap();
        let mut session = open(&temp_dir);
        session
            .ledger_mut()
            .budgets
            .set_budget("Food", Money::from_units(5))
            .unwrap();
        session.close().unwrap();

        assert_eq!(open(&temp_dir).ledger().budgets.len(), 1);
    }
}
