//! Transaction CLI commands
//!
//! Raw arguments go through the validation layer before they reach the store.

use clap::Subcommand;

use crate::display::{format_transaction_details, format_transaction_register};
use crate::error::{LedgerError, LedgerResult};
use crate::ledger::{NewTransaction, TransactionEdit, TransactionFilter};
use crate::models::{dates, TransactionKind};
use crate::session::Session;
use crate::validation::{validate_amount, validate_date, validate_date_range, AmountRules};

/// Transaction subcommands
#[derive(Subcommand)]
pub enum TransactionCommands {
    /// Record a new transaction
    Add {
        /// Description
        description: String,
        /// Amount (e.g., "45.50" or "1.234,56")
        #[arg(allow_hyphen_values = true)]
        amount: String,
        /// Transaction type: income or expense
        #[arg(short = 't', long = "type")]
        kind: String,
        /// Category name
        #[arg(short, long)]
        category: String,
        /// Transaction date (defaults to today)
        #[arg(short, long)]
        date: Option<String>,
    },

    /// List all transactions in date order
    List,

    /// Show a single transaction
    Show {
        /// Transaction index as shown by `list`
        index: usize,
    },

    /// Edit the description, amount or type of a transaction
    Edit {
        /// Transaction index as shown by `list`
        index: usize,
        /// New description
        #[arg(long)]
        description: Option<String>,
        /// New amount
        #[arg(long, allow_hyphen_values = true)]
        amount: Option<String>,
        /// New type: income or expense
        #[arg(short = 't', long = "type")]
        kind: Option<String>,
    },

    /// Remove a transaction
    Remove {
        /// Transaction index as shown by `list`
        index: usize,
    },

    /// List transactions matching every given criterion
    Filter {
        /// Category (case-insensitive)
        #[arg(short, long)]
        category: Option<String>,
        /// Range start date
        #[arg(long, requires = "to")]
        from: Option<String>,
        /// Range end date
        #[arg(long, requires = "from")]
        to: Option<String>,
        /// Transaction type: income or expense
        #[arg(short = 't', long = "type")]
        kind: Option<String>,
    },

    /// List the categories in use
    Categories,
}

/// Handle a transaction command
pub fn handle_transaction_command(session: &mut Session, cmd: TransactionCommands) -> LedgerResult<()> {
    let symbol = session.settings().currency_symbol.clone();
    let date_format = session.settings().date_format.clone();

    match cmd {
        TransactionCommands::Add {
            description,
            amount,
            kind,
            category,
            date,
        } => {
            let amount = validate_amount(&amount, &AmountRules::positive())?;
            let kind: TransactionKind = kind.parse()?;
            let date = match date {
                Some(raw) => validate_date(&raw, &date_format, false)?,
                None => dates::today(),
            };

            let input = NewTransaction {
                description,
                amount,
                kind,
                category,
                date,
            };
            let added = session.apply(|ledger| ledger.transactions.add(input).cloned())?;

            println!(
                "Added {}: {} ({}) on {}",
                added.kind,
                added.description,
                added.amount.format_with_symbol(&symbol),
                dates::format_date(added.date)
            );
        }

        TransactionCommands::List => {
            let rows = session.ledger().transactions.iter().enumerate();
            print!("{}", format_transaction_register(rows, &symbol));
        }

        TransactionCommands::Show { index } => {
            let store = &session.ledger().transactions;
            let txn = store.get(index).ok_or(LedgerError::IndexOutOfRange {
                index,
                len: store.len(),
            })?;
            print!("{}", format_transaction_details(index, txn, &symbol));
        }

        TransactionCommands::Edit {
            index,
            description,
            amount,
            kind,
        } => {
            let mut edit = TransactionEdit::new();
            if let Some(description) = description {
                edit = edit.description(description);
            }
            if let Some(amount) = amount {
                edit = edit.amount(validate_amount(&amount, &AmountRules::positive())?);
            }
            if let Some(kind) = kind {
                edit = edit.kind(kind.parse()?);
            }
            if edit.is_empty() {
                println!("Nothing to change. Use --description, --amount or --type.");
                return Ok(());
            }

            let updated = session.apply(|ledger| ledger.transactions.edit(index, edit).cloned())?;
            println!("Updated transaction #{}", index);
            print!("{}", format_transaction_details(index, &updated, &symbol));
        }

        TransactionCommands::Remove { index } => {
            let removed = session.apply(|ledger| ledger.transactions.remove(index))?;
            println!(
                "Removed: {} ({}) on {}",
                removed.description,
                removed.amount.format_with_symbol(&symbol),
                dates::format_date(removed.date)
            );
        }

        TransactionCommands::Filter {
            category,
            from,
            to,
            kind,
        } => {
            let mut filter = TransactionFilter::new();
            if let Some(category) = category {
                filter = filter.category(category);
            }
            if let (Some(from), Some(to)) = (from, to) {
                let (start, end) = validate_date_range(&from, &to, &date_format)?;
                filter = filter.date_range(start, end);
            }
            if let Some(kind) = kind {
                filter = filter.kind(kind.parse()?);
            }

            let rows = session
                .ledger()
                .transactions
                .iter()
                .enumerate()
                .filter(|(_, txn)| filter.matches(txn));
            print!("{}", format_transaction_register(rows, &symbol));
        }

        TransactionCommands::Categories => {
            let categories = session.ledger().transactions.categories();
            if categories.is_empty() {
                println!("No categories in use.");
            }
            for category in categories {
                println!("  {}", category);
            }
        }
    }

    Ok(())
}
