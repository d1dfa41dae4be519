//! Backup restoration for pocket-ledger
//!
//! Handles promoting the rolling `.bak` file and reading dated backups back
//! into a ledger.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use tracing::{info, warn};

use crate::config::paths::{with_suffix, LedgerPaths};
use crate::error::{LedgerError, LedgerResult};
use crate::ledger::Ledger;
use crate::storage::{self, read_json_required};

use super::manager::ManualSnapshot;

/// Handles restoring from backups
pub struct RestoreManager {
    paths: LedgerPaths,
}

impl RestoreManager {
    /// Create a new RestoreManager
    pub fn new(paths: LedgerPaths) -> Self {
        Self { paths }
    }

    /// Where the current data file is parked while the rolling backup is promoted
    pub fn displaced_data_file(&self) -> PathBuf {
        with_suffix(&self.paths.data_file(), ".tmp")
    }

    /// Promote `<datafile>.bak` to the data file and load it
    ///
    /// The current data file is moved aside to `<datafile>.tmp` first. If the
    /// promoted backup cannot be loaded, both moves are undone.
    pub fn restore_rolling_backup(&self) -> LedgerResult<Ledger> {
        let data_file = self.paths.data_file();
        let backup = self.paths.rolling_backup_file();
        let displaced = self.displaced_data_file();

        if !backup.exists() {
            return Err(LedgerError::backup_not_found(backup.display().to_string()));
        }

        let had_data = data_file.exists();
        if had_data {
            if displaced.exists() {
                fs::remove_file(&displaced).map_err(|e| {
                    LedgerError::Io(format!("Failed to clear {}: {}", displaced.display(), e))
                })?;
            }
            rename(&data_file, &displaced)?;
        }

        if let Err(e) = rename(&backup, &data_file) {
            if had_data {
                let _ = fs::rename(&displaced, &data_file);
            }
            return Err(e);
        }

        match storage::try_load(&data_file) {
            Ok(Some(ledger)) => {
                info!(path = %data_file.display(), "rolling backup restored");
                Ok(ledger)
            }
            outcome => {
                let err = match outcome {
                    Err(e) => e,
                    _ => LedgerError::Storage("restored backup disappeared".into()),
                };
                warn!(error = %err, "rolling backup unusable, reverting restore");
                let _ = fs::rename(&data_file, &backup);
                if had_data {
                    let _ = fs::rename(&displaced, &data_file);
                }
                Err(err)
            }
        }
    }

    /// Read a manual snapshot into a ledger with no goals
    pub fn restore_snapshot(&self, path: &Path) -> LedgerResult<Ledger> {
        let snapshot: ManualSnapshot = read_json_required(path)?;
        let ledger = Ledger::from_parts(snapshot.transactions, snapshot.budgets, BTreeMap::new())?;
        info!(path = %path.display(), "snapshot restored");
        Ok(ledger)
    }

    /// Verify a session backup, then copy it over the data file
    pub fn restore_session_backup(&self, path: &Path) -> LedgerResult<Ledger> {
        let ledger = storage::try_load(path)?
            .ok_or_else(|| LedgerError::backup_not_found(path.display().to_string()))?;

        fs::copy(path, self.paths.data_file())
            .map_err(|e| LedgerError::Io(format!("Failed to restore session backup: {}", e)))?;
        info!(path = %path.display(), "session backup restored");
        Ok(ledger)
    }
}

fn rename(from: &Path, to: &Path) -> LedgerResult<()> {
    fs::rename(from, to).map_err(|e| {
        LedgerError::Io(format!(
            "Failed to move {} to {}: {}",
            from.display(),
            to.display(),
            e
        ))
    })
}
