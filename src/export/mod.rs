//! Export module for pocket-ledger
//!
//! CSV export of transactions and budget standings (spreadsheet-compatible).

pub mod csv;

pub use self::csv::{
    export_budgets_csv, export_budgets_csv_file, export_transactions_csv,
    export_transactions_csv_file,
};
