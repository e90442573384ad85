//! Core habit progression logic for Cicloo.
//! This crate is the single source of truth for streak, XP, level and
//! achievement rules.

pub mod logging;
pub mod model;
pub mod progression;
pub mod repo;
pub mod service;

pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use model::achievement::{
    default_catalog, Achievement, AchievementKind, AchievementValidationError,
};
pub use model::habit::{
    Category, CompletionOutcome, Habit, HabitFields, HabitId, HabitValidationError, Priority,
    Recurrence,
};
pub use model::user::{UserId, UserProfile, UserValidationError};
pub use progression::achievements::{evaluate_achievements, UnlockedAchievement};
pub use progression::policy::{
    can_complete_today, is_streak_broken, xp_required_for_level, xp_reward, MAX_LEVEL,
    XP_BASE_PER_LEVEL,
};
pub use progression::stats::{summarize, HabitHighlight, UserStats};
pub use repo::habit_repo::{HabitRepository, InMemoryHabitRepository, RepoError, RepoResult};
pub use repo::user_repo::{InMemoryUserRepository, UserRepository};
pub use service::clock::{Clock, FixedClock, SystemClock};
pub use service::progression_service::{
    CompletionReport, HabitCreated, ProgressionService, ProgressionServiceError, ServiceResult,
    SessionReport,
};

/// Service wired to in-memory repositories.
pub type InMemoryProgressionService<C> =
    ProgressionService<InMemoryHabitRepository, InMemoryUserRepository, C>;

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
