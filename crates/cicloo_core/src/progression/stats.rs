//! Aggregate progress statistics for one habit collection.

use crate::model::habit::{Habit, HabitId};
use chrono::NaiveDate;
use serde::Serialize;

/// Habit singled out by a statistic.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HabitHighlight {
    pub habit_id: HabitId,
    pub name: String,
    pub value: u32,
}

impl HabitHighlight {
    fn new(habit: &Habit, value: u32) -> Self {
        Self {
            habit_id: habit.id(),
            name: habit.name().to_string(),
            value,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserStats {
    pub habit_count: usize,
    /// Lifetime XP across all habits, including XP spent on level-ups.
    pub total_xp: u64,
    /// Habits already completed within their current period.
    pub completed_this_period: usize,
    pub total_completions: u64,
    pub highest_level: Option<HabitHighlight>,
    /// `None` when no habit holds a positive streak.
    pub longest_streak: Option<HabitHighlight>,
}

/// Summarizes `habits` as seen on `today`.
///
/// Ties keep the habit that appears first in collection order.
pub fn summarize(habits: &[Habit], today: NaiveDate) -> UserStats {
    let mut highest_level: Option<&Habit> = None;
    let mut longest_streak: Option<&Habit> = None;

    for habit in habits {
        if highest_level.map_or(true, |best| habit.level() > best.level()) {
            highest_level = Some(habit);
        }
        if habit.streak() > longest_streak.map_or(0, Habit::streak) {
            longest_streak = Some(habit);
        }
    }

    UserStats {
        habit_count: habits.len(),
        total_xp: habits.iter().map(Habit::lifetime_xp).sum(),
        completed_this_period: habits
            .iter()
            .filter(|habit| !habit.is_eligible_now(today))
            .count(),
        total_completions: habits
            .iter()
            .map(|habit| u64::from(habit.total_completions()))
            .sum(),
        highest_level: highest_level.map(|habit| HabitHighlight::new(habit, habit.level())),
        longest_streak: longest_streak.map(|habit| HabitHighlight::new(habit, habit.streak())),
    }
}
