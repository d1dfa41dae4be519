//! Savings goal CLI commands

use clap::Subcommand;

use crate::display::format_goal_list;
use crate::error::LedgerResult;
use crate::models::dates;
use crate::session::Session;
use crate::validation::{validate_amount, validate_date, AmountRules};

/// Goal subcommands
#[derive(Subcommand)]
pub enum GoalCommands {
    /// Create or replace a savings goal
    Set {
        /// Goal name
        name: String,
        /// Target amount
        #[arg(allow_hyphen_values = true)]
        amount: String,
        /// Target date (today or later)
        date: String,
    },

    /// Add money to a goal
    Contribute {
        /// Goal name
        name: String,
        /// Contribution amount
        #[arg(allow_hyphen_values = true)]
        amount: String,
    },

    /// List all goals with their progress
    List,

    /// Show progress towards one goal
    Progress {
        /// Goal name
        name: String,
    },

    /// Delete a goal
    Remove {
        /// Goal name
        name: String,
    },
}

/// Handle a goal command
pub fn handle_goal_command(session: &mut Session, cmd: GoalCommands) -> LedgerResult<()> {
    let symbol = session.settings().currency_symbol.clone();
    let date_format = session.settings().date_format.clone();

    match cmd {
        GoalCommands::Set { name, amount, date } => {
            let target = validate_amount(&amount, &AmountRules::positive())?;
            let target_date = validate_date(&date, &date_format, true)?;
            let goal = session.apply(|ledger| ledger.goals.set_goal(&name, target, target_date).cloned())?;
            println!(
                "Goal '{}' set: {} by {}",
                name.trim(),
                goal.target_amount.format_with_symbol(&symbol),
                dates::format_date(goal.target_date)
            );
        }

        GoalCommands::Contribute { name, amount } => {
            let amount = validate_amount(&amount, &AmountRules::positive())?;
            let goal = session.apply(|ledger| ledger.goals.contribute(&name, amount).cloned())?;
            println!(
                "Added {} to '{}': {} of {} saved",
                amount.format_with_symbol(&symbol),
                name.trim(),
                goal.saved_amount.format_with_symbol(&symbol),
                goal.target_amount.format_with_symbol(&symbol)
            );
            if goal.is_reached() {
                println!("Goal reached!");
            }
        }

        GoalCommands::List => {
            print!("{}", format_goal_list(&session.ledger().goals, dates::today(), &symbol));
        }

        GoalCommands::Progress { name } => {
            let progress = session.ledger().goals.progress(&name)?;
            println!("Goal:           {}", name.trim());
            println!("Progress:       {:.1}%", progress.percent);
            println!("Remaining:      {}", progress.remaining.format_with_symbol(&symbol));
            if progress.days_remaining >= 0 {
                println!("Days remaining: {}", progress.days_remaining);
            } else {
                println!("Days remaining: overdue by {}", -progress.days_remaining);
            }
        }

        GoalCommands::Remove { name } => {
            session.apply(|ledger| ledger.goals.remove_goal(&name))?;
            println!("Removed goal '{}'", name.trim());
        }
    }

    Ok(())
}
