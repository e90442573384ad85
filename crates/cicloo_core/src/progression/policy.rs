//! Recurrence policy and progression rules.
//!
//! # Responsibility
//! - Decide whether a habit may be completed on a given day.
//! - Decide whether a streak lapsed since the last completion.
//! - Hold the XP reward table and the level threshold formula.
//!
//! # Invariants
//! - Pure functions of their inputs; no clock reads.
//! - `Custom` never breaks a streak.

use crate::model::habit::Recurrence;
use chrono::{Datelike, Months, NaiveDate};

/// XP needed per level step: level `n` requires `n * XP_BASE_PER_LEVEL`.
pub const XP_BASE_PER_LEVEL: u32 = 30;
pub const MIN_HABIT_NAME_CHARS: usize = 3;
/// Highest level whose threshold fits in `u32`. Levels are capped here.
pub const MAX_LEVEL: u32 = u32::MAX / XP_BASE_PER_LEVEL;

/// Returns the XP threshold to leave `level`.
///
/// Exact for every level up to `MAX_LEVEL`; saturates above it.
pub fn xp_required_for_level(level: u32) -> u32 {
    level.saturating_mul(XP_BASE_PER_LEVEL)
}

/// Returns the XP granted by one completion.
pub fn xp_reward(recurrence: Recurrence) -> u32 {
    match recurrence {
        Recurrence::Daily => 20,
        Recurrence::Weekly => 50,
        Recurrence::Monthly => 150,
        Recurrence::Yearly | Recurrence::Custom => 300,
    }
}

/// Returns whether a completion on `today` falls in a new period.
///
/// - Daily/Custom: different calendar day.
/// - Weekly: different ISO week number or different calendar year.
/// - Monthly: different month or year.
/// - Yearly: different year.
pub fn can_complete_today(
    recurrence: Recurrence,
    last_completion: Option<NaiveDate>,
    today: NaiveDate,
) -> bool {
    let Some(last) = last_completion else {
        return true;
    };

    match recurrence {
        Recurrence::Daily | Recurrence::Custom => last != today,
        Recurrence::Weekly => {
            today.iso_week().week() != last.iso_week().week() || today.year() != last.year()
        }
        Recurrence::Monthly => today.month() != last.month() || today.year() != last.year(),
        Recurrence::Yearly => today.year() != last.year(),
    }
}

/// Returns whether the streak lapsed between `last_completion` and `today`.
///
/// - Daily: more than 1 day elapsed.
/// - Weekly: more than 7 days elapsed.
/// - Monthly: `today` is after `last_completion + 1 month`.
/// - Yearly: `today` is after `last_completion + 1 year`.
/// - Custom: never.
pub fn is_streak_broken(
    recurrence: Recurrence,
    last_completion: NaiveDate,
    today: NaiveDate,
) -> bool {
    let days_elapsed = today.signed_duration_since(last_completion).num_days();
    match recurrence {
        Recurrence::Daily => days_elapsed > 1,
        Recurrence::Weekly => days_elapsed > 7,
        Recurrence::Monthly => is_after_offset(last_completion, today, Months::new(1)),
        Recurrence::Yearly => is_after_offset(last_completion, today, Months::new(12)),
        Recurrence::Custom => false,
    }
}

// Month arithmetic clamps to the last valid day (Jan 31 + 1 month = Feb 28/29).
fn is_after_offset(last_completion: NaiveDate, today: NaiveDate, offset: Months) -> bool {
    last_completion
        .checked_add_months(offset)
        .is_some_and(|deadline| today > deadline)
}
