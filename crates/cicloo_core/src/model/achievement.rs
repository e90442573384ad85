//! Achievement model and fixed catalog.
//!
//! # Responsibility
//! - Define the unlockable milestone record.
//! - Provide the default catalog copied into every new user profile.
//!
//! # Invariants
//! - `name` and `description` are non-blank.
//! - `unlocked` only moves from `false` to `true`.
//! - `name` is the identity key inside one catalog.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Habit count required by `Collector`.
pub const COLLECTOR_MIN_HABITS: usize = 5;
/// Per-habit completions required by `Steel Persistence`.
pub const PERSISTENCE_MIN_COMPLETIONS: u32 = 5;
/// Per-habit streak required by `Routine Master`.
pub const ROUTINE_MIN_STREAK: u32 = 7;
/// Per-habit level required by `Promising Novice`.
pub const NOVICE_MIN_LEVEL: u32 = 5;

/// Milestones known to the evaluator, keyed by display name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AchievementKind {
    FirstStep,
    SteelPersistence,
    RoutineMaster,
    PromisingNovice,
    Collector,
}

impl AchievementKind {
    /// Catalog order as presented to users.
    pub const ALL: [AchievementKind; 5] = [
        Self::FirstStep,
        Self::SteelPersistence,
        Self::RoutineMaster,
        Self::PromisingNovice,
        Self::Collector,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Self::FirstStep => "First Step",
            Self::SteelPersistence => "Steel Persistence",
            Self::RoutineMaster => "Routine Master",
            Self::PromisingNovice => "Promising Novice",
            Self::Collector => "Collector",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            Self::FirstStep => "Create your first habit.",
            Self::SteelPersistence => "Complete a habit 5 times.",
            Self::RoutineMaster => "Keep a 7-day streak on any habit.",
            Self::PromisingNovice => "Reach level 5 on any habit.",
            Self::Collector => "Have 5 active habits at the same time.",
        }
    }

    /// Resolves a catalog entry by exact name.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.name() == name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AchievementValidationError {
    EmptyName,
    EmptyDescription,
}

impl Display for AchievementValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyName => write!(f, "achievement name must not be blank"),
            Self::EmptyDescription => write!(f, "achievement description must not be blank"),
        }
    }
}

impl Error for AchievementValidationError {}

/// One milestone and its unlock state for a single user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Achievement {
    name: String,
    description: String,
    unlocked: bool,
}

impl Achievement {
    /// Creates a locked achievement.
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
    ) -> Result<Self, AchievementValidationError> {
        let name = name.into();
        let description = description.into();
        if name.trim().is_empty() {
            return Err(AchievementValidationError::EmptyName);
        }
        if description.trim().is_empty() {
            return Err(AchievementValidationError::EmptyDescription);
        }

        Ok(Self {
            name,
            description,
            unlocked: false,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn is_unlocked(&self) -> bool {
        self.unlocked
    }

    /// Catalog entry backing this achievement, if the name is known.
    pub fn kind(&self) -> Option<AchievementKind> {
        AchievementKind::from_name(&self.name)
    }

    /// Unlocks the achievement. Returns `true` only on the first call.
    pub fn unlock(&mut self) -> bool {
        if self.unlocked {
            return false;
        }
        self.unlocked = true;
        true
    }
}

impl From<AchievementKind> for Achievement {
    fn from(kind: AchievementKind) -> Self {
        Self {
            name: kind.name().to_string(),
            description: kind.description().to_string(),
            unlocked: false,
        }
    }
}

impl Display for Achievement {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let mark = if self.unlocked { "x" } else { " " };
        write!(f, "[{mark}] {}: {}", self.name, self.description)
    }
}

/// Returns a fresh, fully locked copy of the achievement catalog.
pub fn default_catalog() -> Vec<Achievement> {
    AchievementKind::ALL
        .into_iter()
        .map(Achievement::from)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::{default_catalog, Achievement, AchievementKind, AchievementValidationError};

    #[test]
    fn catalog_is_locked_and_keyed_by_unique_names() {
        let catalog = default_catalog();
        assert_eq!(catalog.len(), AchievementKind::ALL.len());
        assert!(catalog.iter().all(|achievement| !achievement.is_unlocked()));

        let mut names = catalog
            .iter()
            .map(|achievement| achievement.name())
            .collect::<Vec<_>>();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), catalog.len());
    }

    #[test]
    fn unlock_is_one_way() {
        let mut achievement = Achievement::from(AchievementKind::Collector);
        assert!(achievement.unlock());
        assert!(!achievement.unlock());
        assert!(achievement.is_unlocked());
    }

    #[test]
    fn new_rejects_blank_fields() {
        assert_eq!(
            Achievement::new(" ", "desc").unwrap_err(),
            AchievementValidationError::EmptyName
        );
        assert_eq!(
            Achievement::new("Name", "").unwrap_err(),
            AchievementValidationError::EmptyDescription
        );
    }

    #[test]
    fn display_marks_unlock_state() {
        let mut achievement = Achievement::from(AchievementKind::FirstStep);
        assert_eq!(
            achievement.to_string(),
            "[ ] First Step: Create your first habit."
        );
        achievement.unlock();
        assert!(achievement.to_string().starts_with("[x] "));
    }
}
