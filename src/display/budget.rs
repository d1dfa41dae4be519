//! Budget and goal display formatting

use chrono::NaiveDate;

use crate::ledger::{BudgetLine, GoalTracker};
use crate::models::dates;

use super::truncate;

/// Format the budget overview table
pub fn format_budget_overview(lines: &[BudgetLine], symbol: &str) -> String {
    if lines.is_empty() {
        return "No budgets set.\n".to_string();
    }

    let mut output = String::new();
    output.push_str(&format!(
        "{:<20} {:>12} {:>12} {:>12}  {}\n",
        "Category", "Budget", "Spent", "Remaining", "Status"
    ));
    output.push_str(&"-".repeat(70));
    output.push('\n');

    for line in lines {
        let status = if line.exceeded { "EXCEEDED" } else { "OK" };
        output.push_str(&format!(
            "{:<20} {:>12} {:>12} {:>12}  {}\n",
            truncate(&line.category, 20),
            line.limit.format_with_symbol(symbol),
            line.spent.format_with_symbol(symbol),
            line.remaining.format_with_symbol(symbol),
            status
        ));
    }

    output
}

/// Format every goal with its progress as of `today`
pub fn format_goal_list(goals: &GoalTracker, today: NaiveDate, symbol: &str) -> String {
    if goals.is_empty() {
        return "No goals set.\n".to_string();
    }

    let mut output = String::new();
    output.push_str(&format!(
        "{:<20} {:>12} {:>12} {:>8} {:>12}  {}\n",
        "Goal", "Target", "Saved", "Progress", "Remaining", "Deadline"
    ));
    output.push_str(&"-".repeat(84));
    output.push('\n');

    for (name, goal) in goals.iter() {
        let progress = goal.progress_on(today);
        let deadline = if progress.days_remaining >= 0 {
            format!("{} ({} days)", dates::format_date(goal.target_date), progress.days_remaining)
        } else {
            format!("{} (overdue)", dates::format_date(goal.target_date))
        };
        output.push_str(&format!(
            "{:<20} {:>12} {:>12} {:>7.1}% {:>12}  {}\n",
            truncate(name, 20),
            goal.target_amount.format_with_symbol(symbol),
            goal.saved_amount.format_with_symbol(symbol),
            progress.percent,
            progress.remaining.format_with_symbol(symbol),
            deadline
        ));
    }

    output
}
