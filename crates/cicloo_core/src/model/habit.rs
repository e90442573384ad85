//! Habit domain model and progression state machine.
//!
//! # Responsibility
//! - Define the habit record and its enumerated tags.
//! - Own the completion, level-up and streak-reset algorithm for one habit.
//!
//! # Invariants
//! - `name` is trimmed and at least `MIN_HABIT_NAME_CHARS` characters.
//! - `level >= 1` and `xp < xp_required_for_level(level)` after any mutation.
//! - `update_basic_fields` never touches progression counters.
//! - A failed validation leaves the habit unchanged.

use crate::progression::policy::{
    can_complete_today, is_streak_broken, xp_required_for_level, xp_reward, MAX_LEVEL,
    MIN_HABIT_NAME_CHARS, XP_BASE_PER_LEVEL,
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// Opaque habit identifier assigned by the storage collaborator.
///
/// `0` marks a habit that has not been stored yet.
pub type HabitId = u64;

/// Thematic tag for a habit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Health,
    Study,
    Productivity,
    Leisure,
    Finance,
    Relationships,
    Spirituality,
    Career,
    SelfCare,
    Volunteering,
}

impl Category {
    pub const ALL: [Category; 10] = [
        Self::Health,
        Self::Study,
        Self::Productivity,
        Self::Leisure,
        Self::Finance,
        Self::Relationships,
        Self::Spirituality,
        Self::Career,
        Self::SelfCare,
        Self::Volunteering,
    ];

    /// Stable snake_case id, identical to the serde tag.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Health => "health",
            Self::Study => "study",
            Self::Productivity => "productivity",
            Self::Leisure => "leisure",
            Self::Finance => "finance",
            Self::Relationships => "relationships",
            Self::Spirituality => "spirituality",
            Self::Career => "career",
            Self::SelfCare => "self_care",
            Self::Volunteering => "volunteering",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Health => "Health",
            Self::Study => "Study",
            Self::Productivity => "Productivity",
            Self::Leisure => "Leisure",
            Self::Finance => "Finance",
            Self::Relationships => "Relationships",
            Self::Spirituality => "Spirituality",
            Self::Career => "Career",
            Self::SelfCare => "Self-care",
            Self::Volunteering => "Volunteering",
        }
    }
}

/// Cadence defining one completion period.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Recurrence {
    Daily,
    Weekly,
    Monthly,
    Yearly,
    /// Eligible once per calendar day like `Daily`, rewarded like `Yearly`,
    /// and never loses its streak to inactivity.
    Custom,
}

impl Recurrence {
    pub const ALL: [Recurrence; 5] = [
        Self::Daily,
        Self::Weekly,
        Self::Monthly,
        Self::Yearly,
        Self::Custom,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Daily => "daily",
            Self::Weekly => "weekly",
            Self::Monthly => "monthly",
            Self::Yearly => "yearly",
            Self::Custom => "custom",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Daily => "Daily",
            Self::Weekly => "Weekly",
            Self::Monthly => "Monthly",
            Self::Yearly => "Yearly",
            Self::Custom => "Custom",
        }
    }
}

/// User-assigned importance of a habit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    High,
    Medium,
    Low,
}

impl Priority {
    pub const ALL: [Priority; 3] = [Self::High, Self::Medium, Self::Low];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::High => "high",
            Self::Medium => "medium",
            Self::Low => "low",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::High => "High",
            Self::Medium => "Medium",
            Self::Low => "Low",
        }
    }
}

macro_rules! impl_tag_parsing {
    ($tag:ty, $error:ident) => {
        impl FromStr for $tag {
            type Err = HabitValidationError;

            /// Accepts the stable id or the label, case-insensitive.
            fn from_str(value: &str) -> Result<Self, Self::Err> {
                let normalized = value.trim();
                <$tag>::ALL
                    .into_iter()
                    .find(|tag| {
                        tag.as_str().eq_ignore_ascii_case(normalized)
                            || tag.label().eq_ignore_ascii_case(normalized)
                    })
                    .ok_or_else(|| HabitValidationError::$error(normalized.to_string()))
            }
        }

        impl Display for $tag {
            fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.label())
            }
        }
    };
}

impl_tag_parsing!(Category, UnknownCategory);
impl_tag_parsing!(Recurrence, UnknownRecurrence);
impl_tag_parsing!(Priority, UnknownPriority);

/// Validation errors for habit construction, update and decoding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HabitValidationError {
    EmptyName,
    NameTooShort { min: usize, actual: usize },
    UnknownCategory(String),
    UnknownRecurrence(String),
    UnknownPriority(String),
    InvalidLevel(u32),
    XpOutOfRange { xp: u32, required: u32 },
}

impl Display for HabitValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyName => write!(f, "habit name must not be blank"),
            Self::NameTooShort { min, actual } => write!(
                f,
                "habit name must have at least {min} characters, got {actual}"
            ),
            Self::UnknownCategory(value) => write!(f, "unknown habit category `{value}`"),
            Self::UnknownRecurrence(value) => write!(f, "unknown habit recurrence `{value}`"),
            Self::UnknownPriority(value) => write!(f, "unknown habit priority `{value}`"),
            Self::InvalidLevel(level) => {
                write!(f, "habit level must be in 1..={MAX_LEVEL}, got {level}")
            }
            Self::XpOutOfRange { xp, required } => {
                write!(f, "habit xp ({xp}) must be < level threshold ({required})")
            }
        }
    }
}

impl Error for HabitValidationError {}

/// Editable, non-progression fields of a habit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HabitFields {
    pub name: String,
    pub category: Category,
    pub recurrence: Recurrence,
    pub priority: Priority,
}

impl HabitFields {
    pub fn new(
        name: impl Into<String>,
        category: Category,
        recurrence: Recurrence,
        priority: Priority,
    ) -> Self {
        Self {
            name: name.into(),
            category,
            recurrence,
            priority,
        }
    }

    /// Builds fields from raw text input, parsing every tag.
    pub fn parse(
        name: &str,
        category: &str,
        recurrence: &str,
        priority: &str,
    ) -> Result<Self, HabitValidationError> {
        Ok(Self {
            name: name.to_string(),
            category: category.parse()?,
            recurrence: recurrence.parse()?,
            priority: priority.parse()?,
        })
    }
}

/// Result of one completion attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum CompletionOutcome {
    Completed { xp_gained: u32, levels_gained: u32 },
    /// Benign rejection: the habit was already completed in its current period.
    AlreadyCompletedThisPeriod,
}

impl CompletionOutcome {
    pub fn is_completed(self) -> bool {
        matches!(self, Self::Completed { .. })
    }
}

/// One habit and its progression state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "HabitRecord")]
pub struct Habit {
    id: HabitId,
    name: String,
    category: Category,
    recurrence: Recurrence,
    priority: Priority,
    level: u32,
    xp: u32,
    streak: u32,
    total_completions: u32,
    last_completion: Option<NaiveDate>,
}

impl Habit {
    /// Creates a never-completed habit at level 1.
    pub fn new(fields: HabitFields) -> Result<Self, HabitValidationError> {
        let name = validate_name(&fields.name)?;
        Ok(Self {
            id: 0,
            name,
            category: fields.category,
            recurrence: fields.recurrence,
            priority: fields.priority,
            level: 1,
            xp: 0,
            streak: 0,
            total_completions: 0,
            last_completion: None,
        })
    }

    pub fn id(&self) -> HabitId {
        self.id
    }

    /// Assigns the storage identity. Called by repositories on insert.
    pub fn set_id(&mut self, id: HabitId) {
        self.id = id;
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn category(&self) -> Category {
        self.category
    }

    pub fn recurrence(&self) -> Recurrence {
        self.recurrence
    }

    pub fn priority(&self) -> Priority {
        self.priority
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn xp(&self) -> u32 {
        self.xp
    }

    pub fn streak(&self) -> u32 {
        self.streak
    }

    pub fn total_completions(&self) -> u32 {
        self.total_completions
    }

    pub fn last_completion(&self) -> Option<NaiveDate> {
        self.last_completion
    }

    /// XP needed to leave the current level.
    pub fn xp_for_next_level(&self) -> u32 {
        xp_required_for_level(self.level)
    }

    /// XP earned over the habit lifetime, including XP spent on level-ups.
    pub fn lifetime_xp(&self) -> u64 {
        // sum of l * base for l in 1..level
        let level = u64::from(self.level);
        let spent = u64::from(XP_BASE_PER_LEVEL) * level.saturating_sub(1) * level / 2;
        spent + u64::from(self.xp)
    }

    /// Whether the habit may be completed on `today`.
    pub fn is_eligible_now(&self, today: NaiveDate) -> bool {
        can_complete_today(self.recurrence, self.last_completion, today)
    }

    /// Records one completion on `today`.
    ///
    /// Returns `AlreadyCompletedThisPeriod` without mutating anything when the
    /// current period already has a completion.
    pub fn mark_completed(&mut self, today: NaiveDate) -> CompletionOutcome {
        if !self.is_eligible_now(today) {
            return CompletionOutcome::AlreadyCompletedThisPeriod;
        }

        let xp_gained = xp_reward(self.recurrence);
        self.streak = self.streak.saturating_add(1);
        self.total_completions = self.total_completions.saturating_add(1);
        self.last_completion = Some(today);
        let levels_gained = self.resolve_level_ups(xp_gained);

        CompletionOutcome::Completed {
            xp_gained,
            levels_gained,
        }
    }

    /// Resets the streak when the recurrence period lapsed without completion.
    ///
    /// Returns `true` when a non-zero streak was cleared. XP, level and totals
    /// are left untouched.
    pub fn check_and_reset_streak(&mut self, today: NaiveDate) -> bool {
        let Some(last) = self.last_completion else {
            return false;
        };
        if !is_streak_broken(self.recurrence, last, today) {
            return false;
        }

        let had_streak = self.streak > 0;
        self.streak = 0;
        had_streak
    }

    /// Overwrites name, category, priority and recurrence.
    ///
    /// Progression counters and the last completion date are preserved.
    pub fn update_basic_fields(&mut self, fields: HabitFields) -> Result<(), HabitValidationError> {
        let name = validate_name(&fields.name)?;
        self.name = name;
        self.category = fields.category;
        self.priority = fields.priority;
        self.recurrence = fields.recurrence;
        Ok(())
    }

    /// Adds `gained` XP and converts surplus into levels, re-reading the
    /// threshold each step.
    ///
    /// At `MAX_LEVEL` surplus XP is clamped below the threshold.
    fn resolve_level_ups(&mut self, gained: u32) -> u32 {
        let mut pending = u64::from(self.xp) + u64::from(gained);
        let mut levels_gained = 0;
        while self.level < MAX_LEVEL {
            let required = u64::from(xp_required_for_level(self.level));
            if pending < required {
                break;
            }
            pending -= required;
            self.level += 1;
            levels_gained += 1;
        }

        let ceiling = u64::from(xp_required_for_level(self.level)) - 1;
        self.xp = u32::try_from(pending.min(ceiling)).unwrap_or(u32::MAX);
        levels_gained
    }
}

impl Display for Habit {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} | level {} | xp {}/{} | streak {} | {} | {} priority",
            self.name,
            self.level,
            self.xp,
            self.xp_for_next_level(),
            self.streak,
            self.recurrence,
            self.priority
        )
    }
}

/// Wire shape used to validate decoded habits.
#[derive(Deserialize)]
struct HabitRecord {
    id: HabitId,
    name: String,
    category: Category,
    recurrence: Recurrence,
    priority: Priority,
    level: u32,
    xp: u32,
    streak: u32,
    total_completions: u32,
    last_completion: Option<NaiveDate>,
}

impl TryFrom<HabitRecord> for Habit {
    type Error = HabitValidationError;

    fn try_from(record: HabitRecord) -> Result<Self, Self::Error> {
        let name = validate_name(&record.name)?;
        if record.level == 0 || record.level > MAX_LEVEL {
            return Err(HabitValidationError::InvalidLevel(record.level));
        }
        let required = xp_required_for_level(record.level);
        if record.xp >= required {
            return Err(HabitValidationError::XpOutOfRange {
                xp: record.xp,
                required,
            });
        }

        Ok(Self {
            id: record.id,
            name,
            category: record.category,
            recurrence: record.recurrence,
            priority: record.priority,
            level: record.level,
            xp: record.xp,
            streak: record.streak,
            total_completions: record.total_completions,
            last_completion: record.last_completion,
        })
    }
}

fn validate_name(raw: &str) -> Result<String, HabitValidationError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(HabitValidationError::EmptyName);
    }
    let actual = trimmed.chars().count();
    if actual < MIN_HABIT_NAME_CHARS {
        return Err(HabitValidationError::NameTooShort {
            min: MIN_HABIT_NAME_CHARS,
            actual,
        });
    }
    Ok(trimmed.to_string())
}
