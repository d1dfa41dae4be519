//! Display formatting for terminal output
//!
//! Plain-text tables for transactions, budgets and goals. Reports render
//! themselves; see [`crate::reports`].

pub mod budget;
pub mod transaction;

pub use budget::{format_budget_overview, format_goal_list};
pub use transaction::{format_transaction_details, format_transaction_register, format_transaction_row};

/// Cut `s` to at most `max_len` characters, marking the cut with `...`
pub fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else if max_len <= 3 {
        ".".repeat(max_len)
    } else {
        let kept: String = s.chars().take(max_len - 3).collect();
        format!("{}...", kept)
    }
}
