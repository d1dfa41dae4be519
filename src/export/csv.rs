//! CSV Export functionality
//!
//! Exports transactions and budget standings to CSV. Quoting of fields that
//! contain commas, quotes or newlines is left to the `csv` writer.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use tracing::info;

use crate::error::{LedgerError, LedgerResult};
use crate::ledger::Ledger;
use crate::models::dates;

/// Header row for transaction exports
pub const TRANSACTIONS_HEADER: [&str; 5] = ["date", "description", "amount", "type", "category"];

/// Header row for budget exports
pub const BUDGETS_HEADER: [&str; 5] = ["category", "limit", "spent", "remaining", "exceeded"];

/// Write every transaction, in store order
///
/// Returns the number of data rows written.
pub fn export_transactions_csv<W: Write>(ledger: &Ledger, writer: W) -> LedgerResult<usize> {
    let mut csv = csv::WriterBuilder::new()
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(writer);

    csv.write_record(TRANSACTIONS_HEADER)?;

    for txn in ledger.transactions.iter() {
        csv.write_record([
            dates::format_date(txn.date),
            txn.description.clone(),
            txn.amount.to_string(),
            txn.kind.as_str().to_string(),
            txn.category.clone(),
        ])?;
    }

    csv.flush()
        .map_err(|e| LedgerError::Export(format!("CSV flush error: {}", e)))?;
    Ok(ledger.transactions.len())
}

/// Write one row per budget with its current spend
pub fn export_budgets_csv<W: Write>(ledger: &Ledger, writer: W) -> LedgerResult<usize> {
    let mut csv = csv::WriterBuilder::new()
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(writer);

    csv.write_record(BUDGETS_HEADER)?;

    let lines = ledger.budget_overview();
    for line in &lines {
        csv.write_record([
            line.category.clone(),
            line.limit.to_string(),
            line.spent.to_string(),
            line.remaining.to_string(),
            line.exceeded.to_string(),
        ])?;
    }

    csv.flush()
        .map_err(|e| LedgerError::Export(format!("CSV flush error: {}", e)))?;
    Ok(lines.len())
}

/// Create `path` and write the transaction export into it
pub fn export_transactions_csv_file(ledger: &Ledger, path: &Path) -> LedgerResult<usize> {
    let file = File::create(path).map_err(|e| {
        LedgerError::Export(format!("Failed to create {}: {}", path.display(), e))
    })?;
    let rows = export_transactions_csv(ledger, file)?;
    info!(path = %path.display(), rows, "transactions exported");
    Ok(rows)
}

/// Create `path` and write the budget export into it
pub fn export_budgets_csv_file(ledger: &Ledger, path: &Path) -> LedgerResult<usize> {
    let file = File::create(path).map_err(|e| {
        LedgerError::Export(format!("Failed to create {}: {}", path.display(), e))
    })?;
    let rows = export_budgets_csv(ledger, file)?;
    info!(path = %path.display(), rows, "budgets exported");
    Ok(rows)
}
