//! Backup manager for pocket-ledger
//!
//! Two kinds of dated backups live in the backup directory:
//! session backups (`session_YYYYMMDD_HHMMSS.dat`), full copies of the data
//! file taken when a session opens, and manual snapshots
//! (`backup_YYYYMMDD_HHMMSS.dat`) holding only transactions and budgets.
//! A `-N` suffix distinguishes backups of the same kind taken within the same
//! second.

use std::collections::BTreeMap;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::config::paths::LedgerPaths;
use crate::config::settings::BackupRetention;
use crate::error::{LedgerError, LedgerResult};
use crate::ledger::Ledger;
use crate::models::{dates, Money, Transaction};
use crate::storage::write_json_atomic;

const BACKUP_EXTENSION: &str = "dat";
const STAMP_FORMAT: &str = "%Y%m%d_%H%M%S";

/// Which mechanism produced a backup
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BackupKind {
    /// Copy of the data file taken when a session opened
    Session,
    /// Manually requested transactions + budgets snapshot
    Snapshot,
}

impl BackupKind {
    fn prefix(&self) -> &'static str {
        match self {
            Self::Session => "session_",
            Self::Snapshot => "backup_",
        }
    }
}

impl fmt::Display for BackupKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(match self {
            Self::Session => "session",
            Self::Snapshot => "snapshot",
        })
    }
}

/// Metadata about a backup
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackupInfo {
    /// Backup filename
    pub filename: String,
    /// Full path to backup
    pub path: PathBuf,
    pub kind: BackupKind,
    /// When the backup was created (local time, from the filename)
    pub created_at: NaiveDateTime,
    /// Disambiguates backups taken within the same second
    pub sequence: u32,
    /// Size in bytes
    pub size_bytes: u64,
}

/// Contents of a manual snapshot
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManualSnapshot {
    pub transactions: Vec<Transaction>,
    pub budgets: BTreeMap<String, Money>,
}

impl ManualSnapshot {
    pub fn from_ledger(ledger: &Ledger) -> Self {
        Self {
            transactions: ledger.transactions.as_slice().to_vec(),
            budgets: ledger.budgets.as_map().clone(),
        }
    }
}

/// Manages backup creation and retention
pub struct BackupManager {
    /// Path to backup directory
    backup_dir: PathBuf,
    /// Paths to data files
    paths: LedgerPaths,
    /// Retention policy
    retention: BackupRetention,
}

impl BackupManager {
    /// Create a new BackupManager
    pub fn new(paths: LedgerPaths, retention: BackupRetention) -> Self {
        let backup_dir = paths.backup_dir();
        Self {
            backup_dir,
            paths,
            retention,
        }
    }

    /// Copy the current data file into a dated session backup
    ///
    /// Returns `None` when there is no data file yet. Retention is enforced
    /// afterwards.
    pub fn rotate_session(&self) -> LedgerResult<Option<PathBuf>> {
        let data_file = self.paths.data_file();
        if !data_file.exists() {
            debug!("no data file yet, skipping session backup");
            return Ok(None);
        }

        self.ensure_backup_dir()?;
        let backup_path = self.next_path(BackupKind::Session, dates::now())?;

        fs::copy(&data_file, &backup_path)
            .map_err(|e| LedgerError::Io(format!("Failed to write session backup: {}", e)))?;
        info!(path = %backup_path.display(), "session backup created");

        self.enforce_retention()?;
        Ok(Some(backup_path))
    }

    /// Write a manual snapshot of the ledger's transactions and budgets
    pub fn create_snapshot(&self, ledger: &Ledger) -> LedgerResult<PathBuf> {
        self.ensure_backup_dir()?;
        let backup_path = self.next_path(BackupKind::Snapshot, dates::now())?;

        write_json_atomic(&backup_path, &ManualSnapshot::from_ledger(ledger))?;
        info!(path = %backup_path.display(), "snapshot created");

        Ok(backup_path)
    }

    /// List all available backups, newest first
    pub fn list_backups(&self) -> LedgerResult<Vec<BackupInfo>> {
        if !self.backup_dir.exists() {
            return Ok(Vec::new());
        }

        let mut backups = Vec::new();

        for entry in fs::read_dir(&self.backup_dir)
            .map_err(|e| LedgerError::Io(format!("Failed to read backup directory: {}", e)))?
        {
            let entry = entry
                .map_err(|e| LedgerError::Io(format!("Failed to read directory entry: {}", e)))?;

            let path = entry.path();
            if path.extension().is_some_and(|ext| ext == BACKUP_EXTENSION) {
                if let Some(info) = parse_backup_info(&path) {
                    backups.push(info);
                }
            }
        }

        backups.sort_by(|a, b| {
            (b.created_at, b.sequence, &b.filename).cmp(&(a.created_at, a.sequence, &a.filename))
        });

        Ok(backups)
    }

    /// Delete session backups beyond the retention count
    ///
    /// Manual snapshots are never deleted automatically.
    pub fn enforce_retention(&self) -> LedgerResult<Vec<PathBuf>> {
        let mut deleted = Vec::new();

        let stale = self
            .list_backups()?
            .into_iter()
            .filter(|b| b.kind == BackupKind::Session)
            .skip(self.retention.session_count as usize);

        for backup in stale {
            fs::remove_file(&backup.path)
                .map_err(|e| LedgerError::Io(format!("Failed to delete old backup: {}", e)))?;
            debug!(path = %backup.path.display(), "removed old session backup");
            deleted.push(backup.path);
        }

        Ok(deleted)
    }

    /// Get backup directory path
    pub fn backup_dir(&self) -> &PathBuf {
        &self.backup_dir
    }

    /// Get a specific backup by filename
    pub fn get_backup(&self, filename: &str) -> LedgerResult<BackupInfo> {
        let path = self.backup_dir.join(filename);
        if !path.exists() {
            return Err(LedgerError::backup_not_found(filename));
        }
        parse_backup_info(&path).ok_or_else(|| LedgerError::backup_not_found(filename))
    }

    /// Get the most recent backup of any kind
    pub fn get_latest_backup(&self) -> LedgerResult<Option<BackupInfo>> {
        Ok(self.list_backups()?.into_iter().next())
    }

    fn ensure_backup_dir(&self) -> LedgerResult<()> {
        fs::create_dir_all(&self.backup_dir)
            .map_err(|e| LedgerError::Io(format!("Failed to create backup directory: {}", e)))
    }

    /// Name for a new backup of `kind` at `timestamp`
    ///
    /// The sequence always grows within a second, even after retention has
    /// deleted earlier files, so newer backups sort first.
    fn next_path(&self, kind: BackupKind, timestamp: NaiveDateTime) -> LedgerResult<PathBuf> {
        let stem = format!("{}{}", kind.prefix(), timestamp.format(STAMP_FORMAT));
        let next_sequence = self
            .list_backups()?
            .into_iter()
            .filter(|b| b.kind == kind && b.created_at == timestamp)
            .map(|b| b.sequence + 1)
            .max();

        let filename = match next_sequence {
            None => format!("{}.{}", stem, BACKUP_EXTENSION),
            Some(sequence) => format!("{}-{}.{}", stem, sequence, BACKUP_EXTENSION),
        };
        Ok(self.backup_dir.join(filename))
    }
}

/// Parse backup info from a backup file name
fn parse_backup_info(path: &Path) -> Option<BackupInfo> {
    let filename = path.file_name()?.to_string_lossy().to_string();
    let stem = filename.strip_suffix(".dat")?;

    let (kind, rest) = if let Some(rest) = stem.strip_prefix(BackupKind::Session.prefix()) {
        (BackupKind::Session, rest)
    } else {
        (BackupKind::Snapshot, stem.strip_prefix(BackupKind::Snapshot.prefix())?)
    };

    let (stamp, sequence) = match rest.split_once('-') {
        Some((stamp, seq)) => (stamp, seq.parse().ok()?),
        None => (rest, 0),
    };
    let created_at = parse_backup_timestamp(stamp)?;
    let size_bytes = fs::metadata(path).ok()?.len();

    Some(BackupInfo {
        filename,
        path: path.to_path_buf(),
        kind,
        created_at,
        sequence,
        size_bytes,
    })
}

/// Parse a `YYYYMMDD_HHMMSS` stamp
fn parse_backup_timestamp(stamp: &str) -> Option<NaiveDateTime> {
    if stamp.len() != 15 {
        return None;
    }
    NaiveDateTime::parse_from_str(stamp, STAMP_FORMAT).ok()
}
