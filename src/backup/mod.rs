//! Backup system for pocket-ledger
//!
//! Three layers of recovery sit on top of the data file:
//!
//! - `<datafile>.bak`: the previous data file, kept by every save
//! - session backups: dated copies taken whenever a session opens, pruned to
//!   the configured retention count
//! - manual snapshots: transactions and budgets written on request
//!
//! `BackupManager` creates and lists backups; `RestoreManager` brings them
//! back.
//!
//! # Example
//!
//! ```rust,no_run
//! use pocket_ledger::backup::{BackupManager, RestoreManager};
//! use pocket_ledger::config::{settings::BackupRetention, LedgerPaths};
//! use pocket_ledger::ledger::Ledger;
//!
//! # fn main() -> pocket_ledger::error::LedgerResult<()> {
//! let paths = LedgerPaths::new()?;
//! let manager = BackupManager::new(paths.clone(), BackupRetention::default());
//! let snapshot = manager.create_snapshot(&Ledger::new())?;
//!
//! let restore = RestoreManager::new(paths);
//! let ledger = restore.restore_snapshot(&snapshot)?;
//! # let _ = ledger;
//! # Ok(())
//! # }
//! ```

mod manager;
mod restore;

pub use manager::{BackupInfo, BackupKind, BackupManager, ManualSnapshot};
pub use restore::RestoreManager;
