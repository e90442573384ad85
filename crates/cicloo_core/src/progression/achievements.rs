//! Achievement evaluation over a habit collection.
//!
//! # Responsibility
//! - Check each locked catalog entry against the current habit collection.
//! - Report every achievement unlocked by this pass exactly once.
//!
//! # Invariants
//! - Unlocked achievements are skipped, never re-reported.
//! - Names outside the known catalog are left untouched.

use crate::model::achievement::{
    Achievement, AchievementKind, COLLECTOR_MIN_HABITS, NOVICE_MIN_LEVEL,
    PERSISTENCE_MIN_COMPLETIONS, ROUTINE_MIN_STREAK,
};
use crate::model::habit::Habit;
use log::info;
use serde::Serialize;

/// Notification payload for one newly unlocked achievement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UnlockedAchievement {
    pub name: String,
    pub description: String,
}

/// Returns whether `kind`'s predicate holds for `habits`.
pub fn is_satisfied(kind: AchievementKind, habits: &[Habit]) -> bool {
    match kind {
        AchievementKind::FirstStep => !habits.is_empty(),
        AchievementKind::Collector => habits.len() >= COLLECTOR_MIN_HABITS,
        AchievementKind::SteelPersistence => habits
            .iter()
            .any(|habit| habit.total_completions() >= PERSISTENCE_MIN_COMPLETIONS),
        AchievementKind::RoutineMaster => habits
            .iter()
            .any(|habit| habit.streak() >= ROUTINE_MIN_STREAK),
        AchievementKind::PromisingNovice => habits
            .iter()
            .any(|habit| habit.level() >= NOVICE_MIN_LEVEL),
    }
}

/// Unlocks every locked achievement whose predicate now holds.
///
/// Returns the newly unlocked entries in catalog order.
pub fn evaluate_achievements(
    habits: &[Habit],
    achievements: &mut [Achievement],
) -> Vec<UnlockedAchievement> {
    let mut unlocked = Vec::new();

    for achievement in achievements.iter_mut() {
        if achievement.is_unlocked() {
            continue;
        }
        let Some(kind) = achievement.kind() else {
            continue;
        };
        if !is_satisfied(kind, habits) {
            continue;
        }

        if achievement.unlock() {
            info!(
                "event=achievement_unlocked module=progression status=ok name={:?}",
                achievement.name()
            );
            unlocked.push(UnlockedAchievement {
                name: achievement.name().to_string(),
                description: achievement.description().to_string(),
            });
        }
    }

    unlocked
}
