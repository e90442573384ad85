//! Property-based checks for the completion and level-up rules.

use chrono::{Days, NaiveDate};
use cicloo_core::{Category, Habit, HabitFields, Priority, Recurrence};
use proptest::collection::vec;
use proptest::prelude::*;

fn recurrence_strategy() -> impl Strategy<Value = Recurrence> {
    prop::sample::select(Recurrence::ALL.to_vec())
}

fn habit(recurrence: Recurrence) -> Habit {
    Habit::new(HabitFields::new(
        "Property habit",
        Category::Productivity,
        recurrence,
        Priority::Medium,
    ))
    .unwrap()
}

fn base_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()
}

proptest! {
    /// XP stays below the level threshold and level never decreases.
    #[test]
    fn xp_below_threshold_and_level_monotonic(
        recurrence in recurrence_strategy(),
        gaps in vec(0u64..40, 1..60)
    ) {
        let mut habit = habit(recurrence);
        let mut today = base_date();
        let mut previous_level = habit.level();

        for gap in gaps {
            today = today + Days::new(gap);
            habit.check_and_reset_streak(today);
            habit.mark_completed(today);

            prop_assert!(habit.xp() < habit.level() * 30);
            prop_assert!(habit.level() >= previous_level);
            previous_level = habit.level();
        }
    }

    /// A second completion on the same day never changes state.
    #[test]
    fn same_day_completion_is_rejected(
        recurrence in recurrence_strategy(),
        offset in 0u64..2000
    ) {
        let mut habit = habit(recurrence);
        let today = base_date() + Days::new(offset);

        prop_assert!(habit.mark_completed(today).is_completed());
        let snapshot = habit.clone();
        prop_assert!(!habit.mark_completed(today).is_completed());
        prop_assert_eq!(habit, snapshot);
    }

    /// Total completions counts exactly the accepted completions.
    #[test]
    fn total_completions_matches_accepted_attempts(
        recurrence in recurrence_strategy(),
        gaps in vec(0u64..10, 1..80)
    ) {
        let mut habit = habit(recurrence);
        let mut today = base_date();
        let mut accepted = 0u32;

        for gap in gaps {
            today = today + Days::new(gap);
            if habit.mark_completed(today).is_completed() {
                accepted += 1;
            }
        }

        prop_assert_eq!(habit.total_completions(), accepted);
        prop_assert!(habit.streak() <= accepted);
    }

    /// Lifetime XP equals the sum of per-completion rewards.
    #[test]
    fn lifetime_xp_equals_rewards(
        recurrence in recurrence_strategy(),
        gaps in vec(1u64..400, 1..30)
    ) {
        let mut habit = habit(recurrence);
        let mut today = base_date();
        let mut rewarded = 0u64;

        for gap in gaps {
            today = today + Days::new(gap);
            if let cicloo_core::CompletionOutcome::Completed { xp_gained, .. } =
                habit.mark_completed(today)
            {
                rewarded += u64::from(xp_gained);
            }
        }

        prop_assert_eq!(habit.lifetime_xp(), rewarded);
    }
}
