//! Backup CLI commands
//!
//! Implements CLI commands for backup management.

use clap::Subcommand;

use crate::backup::BackupInfo;
use crate::error::{LedgerError, LedgerResult};
use crate::models::dates;
use crate::session::Session;

/// Keyword selecting the rolling `.bak` file instead of a dated backup
const ROLLING: &str = "rolling";

/// Backup subcommands
#[derive(Subcommand)]
pub enum BackupCommands {
    /// Snapshot the current transactions and budgets
    Create,

    /// List all available backups
    List {
        /// Show detailed information
        #[arg(short, long)]
        verbose: bool,
    },

    /// Restore from a backup
    Restore {
        /// Backup filename, 'latest' for the most recent dated backup, or
        /// 'rolling' for the copy kept from the previous save
        backup: String,

        /// Skip confirmation prompt
        #[arg(short, long)]
        force: bool,
    },

    /// Delete session backups beyond the retention count
    Prune,
}

/// Handle a backup command
pub fn handle_backup_command(session: &mut Session, cmd: BackupCommands) -> LedgerResult<()> {
    let manager = session.backup_manager();

    match cmd {
        BackupCommands::Create => {
            let backup_path = manager.create_snapshot(session.ledger())?;
            let filename = backup_path
                .file_name()
                .map(|s| s.to_string_lossy().to_string())
                .unwrap_or_else(|| backup_path.display().to_string());
            println!("Backup created: {}", filename);
            println!("Location: {}", backup_path.display());
        }

        BackupCommands::List { verbose } => {
            let backups = manager.list_backups()?;

            if backups.is_empty() {
                println!("No backups found.");
                println!("Create one with: pocket backup create");
                return Ok(());
            }

            println!("Available Backups");
            println!("=================");
            println!();

            let now = dates::now();
            for (i, backup) in backups.iter().enumerate() {
                let age_str = format_duration(now.signed_duration_since(backup.created_at));

                if verbose {
                    println!(
                        "{}. {} [{}]\n   Created: {}\n   Size: {}\n   Age: {}\n",
                        i + 1,
                        backup.filename,
                        backup.kind,
                        backup.created_at.format("%Y-%m-%d %H:%M:%S"),
                        format_size(backup.size_bytes),
                        age_str,
                    );
                } else {
                    println!(
                        "  {}. {} ({} ago, {}) [{}]",
                        i + 1,
                        backup.filename,
                        age_str,
                        format_size(backup.size_bytes),
                        backup.kind,
                    );
                }
            }

            println!();
            println!("Total: {} backup(s)", backups.len());
        }

        BackupCommands::Restore { backup, force } => {
            if !force {
                println!("WARNING: This will overwrite ALL current data!");
                println!("To proceed, run again with --force flag:");
                println!("  pocket backup restore {} --force", backup);
                return Ok(());
            }

            if backup.eq_ignore_ascii_case(ROLLING) {
                session.restore_rolling_backup()?;
                println!("Restored the previous save.");
            } else {
                let info = resolve_backup(session, &backup)?;
                session.restore_backup_file(&info.filename)?;
                println!("Restored {} backup: {}", info.kind, info.filename);
            }

            let ledger = session.ledger();
            println!(
                "Ledger now holds {} transaction(s), {} budget(s), {} goal(s).",
                ledger.transactions.len(),
                ledger.budgets.len(),
                ledger.goals.len()
            );
        }

        BackupCommands::Prune => {
            let deleted = manager.enforce_retention()?;
            if deleted.is_empty() {
                println!("No backups to prune.");
            } else {
                println!("Deleted {} backup(s).", deleted.len());
            }
        }
    }

    Ok(())
}

/// Resolve a backup identifier to a dated backup
///
/// `latest` skips the session backup taken when this run opened, since it
/// matches the current data.
fn resolve_backup(session: &Session, backup: &str) -> LedgerResult<BackupInfo> {
    let manager = session.backup_manager();

    if backup.eq_ignore_ascii_case("latest") {
        let own = session.session_backup();
        return manager
            .list_backups()?
            .into_iter()
            .find(|b| Some(&b.path) != own)
            .ok_or_else(|| LedgerError::backup_not_found("latest"));
    }

    manager.get_backup(backup)
}

/// Format a duration in human-readable form
fn format_duration(duration: chrono::Duration) -> String {
    let total_seconds = duration.num_seconds().max(0);

    if total_seconds < 60 {
        return format!("{}s", total_seconds);
    }

    let minutes = total_seconds / 60;
    if minutes < 60 {
        return format!("{}m", minutes);
    }

    let hours = minutes / 60;
    if hours < 24 {
        return format!("{}h", hours);
    }

    let days = hours / 24;
    if days < 30 {
        return format!("{}d", days);
    }

    format!("{}mo", days / 30)
}

/// Format a file size in human-readable form
fn format_size(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;

    if bytes >= MB {
        format!("{:.1} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.1} KB", bytes as f64 / KB as f64)
    } else {
        format!("{} B", bytes)
    }
}
