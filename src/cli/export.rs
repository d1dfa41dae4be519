//! CLI commands for data export
//!
//! CSV files of transactions and budget standings.

use clap::Subcommand;
use std::path::PathBuf;

use crate::error::LedgerResult;
use crate::export::{export_budgets_csv_file, export_transactions_csv_file};
use crate::session::Session;

/// Export subcommands
#[derive(Subcommand, Debug)]
pub enum ExportCommands {
    /// Export transactions to CSV
    Transactions {
        /// Output file path
        output: PathBuf,
    },

    /// Export budgets with spend and remaining amount to CSV
    Budgets {
        /// Output file path
        output: PathBuf,
    },
}

/// Handle export commands
pub fn handle_export_command(session: &Session, cmd: ExportCommands) -> LedgerResult<()> {
    match cmd {
        ExportCommands::Transactions { output } => {
            let count = export_transactions_csv_file(session.ledger(), &output)?;
            println!("Exported {} transactions to: {}", count, output.display());
        }
        ExportCommands::Budgets { output } => {
            let count = export_budgets_csv_file(session.ledger(), &output)?;
            println!("Exported {} budgets to: {}", count, output.display());
        }
    }

    Ok(())
}
