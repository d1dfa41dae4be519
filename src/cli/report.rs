//! CLI commands for reports
//!
//! Every report is read-only; nothing here saves the ledger.

use chrono::Datelike;
use clap::Subcommand;

use crate::error::LedgerResult;
use crate::models::dates;
use crate::reports;
use crate::session::Session;
use crate::validation::validate_date_range;

/// Report subcommands
#[derive(Subcommand, Debug)]
pub enum ReportCommands {
    /// Overall income, expense and net balance
    Balance,

    /// Income and expense for one month, broken down by category
    Monthly {
        /// Year (defaults to the current year)
        #[arg(short, long)]
        year: Option<i32>,

        /// Month number 1-12 (defaults to the current month)
        #[arg(short, long)]
        month: Option<u32>,
    },

    /// Totals and transactions between two dates (inclusive)
    Range {
        /// Start date
        start: String,
        /// End date
        end: String,
    },

    /// Totals and transactions for one category
    Category {
        /// Category name (case-insensitive)
        category: String,
    },
}

/// Handle a report command
pub fn handle_report_command(session: &Session, cmd: ReportCommands) -> LedgerResult<()> {
    let symbol = &session.settings().currency_symbol;
    let ledger = session.ledger();

    match cmd {
        ReportCommands::Balance => {
            print!("{}", reports::balance(ledger).format_terminal(symbol));
        }

        ReportCommands::Monthly { year, month } => {
            let today = dates::today();
            let year = year.unwrap_or_else(|| today.year());
            let month = month.unwrap_or_else(|| today.month());

            match reports::monthly_report(ledger, year, month)? {
                Some(report) => print!("{}", report.format_terminal(symbol)),
                None => println!("No transactions found for {:02}/{}.", month, year),
            }
        }

        ReportCommands::Range { start, end } => {
            let (start, end) = validate_date_range(&start, &end, &session.settings().date_format)?;
            print!("{}", reports::range_summary(ledger, start, end)?.format_terminal(symbol));
        }

        ReportCommands::Category { category } => {
            print!("{}", reports::category_summary(ledger, &category).format_terminal(symbol));
        }
    }

    Ok(())
}
