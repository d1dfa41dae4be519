//! pocket-ledger - personal finance ledger engine
//!
//! This library holds the ledger behind the `pocket` command: dated income and
//! expense transactions, per-category budget limits, savings goals, reports
//! over all of them, and a single-file persistence layer with an integrity
//! digest and backup rotation.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `validation`: Parsing of free-form amount and date text
//! - `models`: Core data models (money, transactions, goals)
//! - `ledger`: Transaction store, budget tracker and goal tracker
//! - `reports`: Balance, monthly, date-range and category reports
//! - `storage`: Checksummed snapshot persistence
//! - `backup`: Session backups, manual snapshots and restore
//! - `export`: CSV export
//! - `session`: Ledger lifecycle for one run of the application
//! - `config`: Configuration and path management
//! - `error`: Custom error types
//!
//! # Example
//!
//! ```rust,no_run
//! use pocket_ledger::config::{paths::LedgerPaths, settings::Settings};
//! use pocket_ledger::Session;
//!
//! let paths = LedgerPaths::new()?;
//! let settings = Settings::load_or_create(&paths)?;
//! let session = Session::open(paths, settings)?;
//! println!("{}", pocket_ledger::reports::balance(session.ledger()).format_terminal("$"));
//! # Ok::<(), pocket_ledger::LedgerError>(())
//! ```

pub mod backup;
pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod export;
pub mod ledger;
pub mod logging;
pub mod models;
pub mod reports;
pub mod session;
pub mod storage;
pub mod validation;

pub use error::{LedgerError, LedgerResult};
pub use ledger::Ledger;
pub use session::Session;
