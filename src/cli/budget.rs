//! Budget CLI commands
//!
//! Per-category spending limits and the overview of spend against them.

use clap::Subcommand;

use crate::display::format_budget_overview;
use crate::error::{LedgerError, LedgerResult};
use crate::session::Session;
use crate::validation::{validate_amount, AmountRules};

/// Budget subcommands
#[derive(Subcommand)]
pub enum BudgetCommands {
    /// Set (or replace) the limit for a category
    Set {
        /// Category name
        category: String,
        /// Spending limit
        #[arg(allow_hyphen_values = true)]
        amount: String,
    },

    /// Remove the limit for a category
    Remove {
        /// Category name
        category: String,
    },

    /// Show every budget with spend and remaining amount
    List,

    /// Show only the budgets whose spend exceeds the limit
    Exceeded,
}

/// Handle a budget command
pub fn handle_budget_command(session: &mut Session, cmd: BudgetCommands) -> LedgerResult<()> {
    let symbol = session.settings().currency_symbol.clone();

    match cmd {
        BudgetCommands::Set { category, amount } => {
            let limit = validate_amount(&amount, &AmountRules::positive())?;
            session.apply(|ledger| ledger.budgets.set_budget(&category, limit))?;
            println!(
                "Budget for '{}' set to {}",
                category.trim(),
                limit.format_with_symbol(&symbol)
            );
        }

        BudgetCommands::Remove { category } => {
            let removed = session.apply(|ledger| {
                ledger
                    .budgets
                    .remove_budget(&category)
                    .ok_or_else(|| LedgerError::NotFound {
                        entity_type: "Budget",
                        identifier: category.clone(),
                    })
            })?;
            println!(
                "Removed budget for '{}' (was {})",
                category,
                removed.format_with_symbol(&symbol)
            );
        }

        BudgetCommands::List => {
            print!("{}", format_budget_overview(&session.ledger().budget_overview(), &symbol));
        }

        BudgetCommands::Exceeded => {
            let exceeded = session.ledger().exceeded_budgets();
            if exceeded.is_empty() {
                println!("No budgets exceeded.");
                return Ok(());
            }

            for (category, excess) in &exceeded {
                println!(
                    "  {}: spent {} of {} (over by {})",
                    category,
                    excess.spent.format_with_symbol(&symbol),
                    excess.limit.format_with_symbol(&symbol),
                    excess.excess.format_with_symbol(&symbol)
                );
            }
        }
    }

    Ok(())
}
