//! Goal tracker

use std::collections::BTreeMap;

use chrono::{NaiveDate, NaiveDateTime};
use tracing::debug;

use crate::error::{LedgerError, LedgerResult};
use crate::models::{dates, Goal, GoalProgress, Money};
use crate::validation::validate_non_empty;

/// Savings goals keyed by name
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GoalTracker {
    goals: BTreeMap<String, Goal>,
}

impl GoalTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild from stored goals without re-checking target dates,
    /// which may legitimately have passed since the goal was created
    pub fn from_goals(goals: BTreeMap<String, Goal>) -> LedgerResult<Self> {
        for (name, goal) in &goals {
            validate_non_empty("goal name", name)?;
            goal.target_amount.ensure_positive("goal target")?;
            if goal.saved_amount.is_negative() || !goal.saved_amount.is_within_limit() {
                return Err(LedgerError::InvalidAmount(format!(
                    "goal '{}' has an invalid saved amount {}",
                    name, goal.saved_amount
                )));
            }
        }
        Ok(Self { goals })
    }

    /// Create or replace a goal, stamped with the current time
    pub fn set_goal(
        &mut self,
        name: &str,
        target_amount: Money,
        target_date: NaiveDate,
    ) -> LedgerResult<&Goal> {
        self.set_goal_at(name, target_amount, target_date, dates::now())
    }

    /// Create or replace a goal as of `now`
    ///
    /// A target date equal to today is accepted; earlier dates are not.
    pub fn set_goal_at(
        &mut self,
        name: &str,
        target_amount: Money,
        target_date: NaiveDate,
        now: NaiveDateTime,
    ) -> LedgerResult<&Goal> {
        let name = validate_non_empty("goal name", name)?;
        target_amount.ensure_positive("goal target")?;
        if target_date < now.date() {
            return Err(LedgerError::PastTargetDate(target_date));
        }

        debug!(goal = %name, target = %target_amount, "setting goal");
        let goal = Goal::new(target_amount, target_date, now);
        self.goals.insert(name.clone(), goal);
        Ok(&self.goals[&name])
    }

    /// Add a positive contribution to a goal's saved amount
    pub fn contribute(&mut self, name: &str, amount: Money) -> LedgerResult<&Goal> {
        let goal = self
            .goals
            .get_mut(name.trim())
            .ok_or_else(|| LedgerError::GoalNotFound(name.trim().to_string()))?;
        amount.ensure_positive("contribution")?;

        let saved = goal
            .saved_amount
            .checked_add(amount)
            .filter(Money::is_within_limit)
            .ok_or_else(|| {
                LedgerError::OutOfRange(format!(
                    "saved amount for goal '{}' would exceed {}",
                    name.trim(),
                    Money::MAX
                ))
            })?;
        goal.saved_amount = saved;
        debug!(goal = %name.trim(), saved = %goal.saved_amount, "contributed to goal");
        Ok(goal)
    }

    pub fn progress(&self, name: &str) -> LedgerResult<GoalProgress> {
        self.progress_on(name, dates::today())
    }

    pub fn progress_on(&self, name: &str, today: NaiveDate) -> LedgerResult<GoalProgress> {
        self.get(name)
            .map(|goal| goal.progress_on(today))
            .ok_or_else(|| LedgerError::GoalNotFound(name.trim().to_string()))
    }

    pub fn get(&self, name: &str) -> Option<&Goal> {
        self.goals.get(name.trim())
    }

    pub fn remove_goal(&mut self, name: &str) -> LedgerResult<Goal> {
        self.goals
            .remove(name.trim())
            .ok_or_else(|| LedgerError::GoalNotFound(name.trim().to_string()))
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Goal)> {
        self.goals.iter().map(|(n, g)| (n.as_str(), g))
    }

    pub fn len(&self) -> usize {
        self.goals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.goals.is_empty()
    }

    pub fn as_map(&self) -> &BTreeMap<String, Goal> {
        &self.goals
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn at(y: i32, m: u32, d: u32) -> NaiveDateTime {
        day(y, m, d).and_hms_opt(10, 0, 0).unwrap()
    }

    #[test]
    fn test_set_goal_checks_inputs() {
        let mut goals = GoalTracker::new();
        let now = at(2025, 1, 1);

        assert!(matches!(
            goals.set_goal_at("Trip", Money::from_units(100), day(2024, 12, 31), now),
            Err(LedgerError::PastTargetDate(_))
        ));
        assert!(matches!(
            goals.set_goal_at("Trip", Money::zero(), day(2025, 6, 1), now),
            Err(LedgerError::InvalidAmount(_))
        ));
        assert!(matches!(
            goals.set_goal_at("  ", Money::from_units(100), day(2025, 6, 1), now),
            Err(LedgerError::EmptyField(_))
        ));
        assert!(goals.is_empty());

        // today is a valid target date
        let goal = goals
            .set_goal_at("Trip", Money::from_units(100), day(2025, 1, 1), now)
            .unwrap();
        assert!(goal.saved_amount.is_zero());
        assert_eq!(goal.created_at, now);
    }

    #[test]
    fn test_set_goal_overwrites() {
        let mut goals = GoalTracker::new();
        let now = at(2025, 1, 1);
        goals
            .set_goal_at("Car", Money::from_units(100), day(2025, 6, 1), now)
            .unwrap();
        goals.contribute("Car", Money::from_units(40)).unwrap();
        goals
            .set_goal_at("Car", Money::from_units(200), day(2025, 7, 1), now)
            .unwrap();

        let goal = goals.get("Car").unwrap();
        assert_eq!(goal.target_amount, Money::from_units(200));
        assert!(goal.saved_amount.is_zero());
        assert_eq!(goals.len(), 1);
    }

    #[test]
    fn test_vacation_progress() {
        let mut goals = GoalTracker::new();
        goals
            .set_goal_at(
                "Vacation",
                Money::from_units(3000),
                day(2025, 12, 31),
                at(2025, 1, 1),
            )
            .unwrap();
        goals.contribute("Vacation", Money::from_units(750)).unwrap();

        let progress = goals.progress_on("Vacation", day(2025, 12, 1)).unwrap();
        assert_eq!(progress.percent, 25.0);
        assert_eq!(progress.remaining, Money::from_units(2250));
        assert_eq!(progress.days_remaining, 30);
    }

    #[test]
    fn test_contribute_errors_and_overshoot() {
        let mut goals = GoalTracker::new();
        assert!(matches!(
            goals.contribute("Nope", Money::from_units(1)),
            Err(LedgerError::GoalNotFound(ref n)) if n == "Nope"
        ));

        goals
            .set_goal_at("Fund", Money::from_units(100), day(2025, 2, 1), at(2025, 1, 1))
            .unwrap();
        assert!(matches!(
            goals.contribute("Fund", Money::zero()),
            Err(LedgerError::InvalidAmount(_))
        ));
        goals.contribute("Fund", Money::from_units(150)).unwrap();

        let progress = goals.progress_on("Fund", day(2025, 2, 3)).unwrap();
        assert_eq!(progress.percent, 150.0);
        assert_eq!(progress.remaining, Money::from_units(-50));
        assert_eq!(progress.days_remaining, -2);
    }

    #[test]
    fn test_progress_unknown_goal() {
        let goals = GoalTracker::new();
        assert!(matches!(
            goals.progress("Missing"),
            Err(LedgerError::GoalNotFound(_))
        ));
    }

    #[test]
    fn test_remove_goal() {
        let mut goals = GoalTracker::new();
        goals
            .set_goal_at("Fund", Money::from_units(100), day(2025, 2, 1), at(2025, 1, 1))
            .unwrap();
        assert!(goals.remove_goal("Fund").is_ok());
        assert!(matches!(
            goals.remove_goal("Fund"),
            Err(LedgerError::GoalNotFound(_))
        ));
    }

    #[test]
    fn test_from_goals_accepts_past_target_dates() {
        let mut stored = BTreeMap::new();
        stored.insert(
            "Old".to_string(),
            Goal::new(Money::from_units(10), day(2020, 1, 1), at(2019, 1, 1)),
        );
        let goals = GoalTracker::from_goals(stored).unwrap();
        assert_eq!(goals.len(), 1);
    }

    #[test]
    fn test_contribution_past_limit_is_out_of_range() {
        let mut goals = GoalTracker::new();
        goals
            .set_goal_at("Island", Money::MAX, day(2030, 1, 1), at(2025, 1, 1))
            .unwrap();
        goals.contribute("Island", Money::MAX).unwrap();

        let result = goals.contribute("Island", Money::MAX);
        assert!(matches!(result, Err(LedgerError::OutOfRange(_))));
        assert_eq!(goals.get("Island").unwrap().saved_amount, Money::MAX);

        let too_big = Money::MAX + Money::from_cents(1);
        assert!(matches!(
            goals.set_goal_at("Yacht", too_big, day(2030, 1, 1), at(2025, 1, 1)),
            Err(LedgerError::OutOfRange(_))
        ));
        assert!(matches!(
            goals.contribute("Island", too_big),
            Err(LedgerError::OutOfRange(_))
        ));
    }
}
