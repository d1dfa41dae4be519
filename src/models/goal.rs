//! Savings goal model
//!
//! A goal is a named target amount with a deadline. Progress grows only
//! through explicit positive contributions and is not capped at the target.

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use super::dates::{date_text, timestamp_text};
use super::money::Money;

/// A savings goal record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Goal {
    pub target_amount: Money,

    #[serde(with = "date_text")]
    pub target_date: NaiveDate,

    #[serde(default)]
    pub saved_amount: Money,

    #[serde(with = "timestamp_text")]
    pub created_at: NaiveDateTime,
}

impl Goal {
    pub fn new(target_amount: Money, target_date: NaiveDate, created_at: NaiveDateTime) -> Self {
        Self {
            target_amount,
            target_date,
            saved_amount: Money::zero(),
            created_at,
        }
    }

    /// Progress snapshot as of `today`
    pub fn progress_on(&self, today: NaiveDate) -> GoalProgress {
        GoalProgress {
            percent: self.saved_amount.percent_of(self.target_amount),
            remaining: self.target_amount - self.saved_amount,
            days_remaining: (self.target_date - today).num_days(),
        }
    }

    /// Whether saved funds reached the target
    pub fn is_reached(&self) -> bool {
        self.saved_amount >= self.target_amount
    }
}

/// Derived progress figures for a goal
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GoalProgress {
    /// saved / target * 100; may exceed 100
    pub percent: f64,
    /// target - saved; negative once the goal is over-funded
    pub remaining: Money,
    /// Whole days until the target date; negative when overdue
    pub days_remaining: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn created() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 1, 1)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap()
    }

    #[test]
    fn test_new_goal_starts_empty() {
        let goal = Goal::new(
            Money::from_units(3000),
            NaiveDate::from_ymd_opt(2025, 12, 31).unwrap(),
            created(),
        );
        assert!(goal.saved_amount.is_zero());
        assert!(!goal.is_reached());
    }

    #[test]
    fn test_progress_can_overshoot_and_be_overdue() {
        let mut goal = Goal::new(
            Money::from_units(100),
            NaiveDate::from_ymd_opt(2025, 1, 10).unwrap(),
            created(),
        );
        goal.saved_amount = Money::from_units(150);

        let progress = goal.progress_on(NaiveDate::from_ymd_opt(2025, 1, 15).unwrap());
        assert_eq!(progress.percent, 150.0);
        assert_eq!(progress.remaining, Money::from_units(-50));
        assert_eq!(progress.days_remaining, -5);
        assert!(goal.is_reached());
    }

    #[test]
    fn test_serialization_field_names() {
        let goal = Goal::new(
            Money::from_units(3000),
            NaiveDate::from_ymd_opt(2025, 12, 31).unwrap(),
            created(),
        );
        let value = serde_json::to_value(&goal).unwrap();
        assert_eq!(value["target_amount"], 300000);
        assert_eq!(value["target_date"], "31-12-2025");
        assert_eq!(value["saved_amount"], 0);
        assert_eq!(value["created_at"], "01-01-2025 12:00:00");
    }
}
