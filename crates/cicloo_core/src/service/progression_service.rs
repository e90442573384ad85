//! Progression use-case service.
//!
//! # Responsibility
//! - Run completion, session-entry and habit CRUD flows against repositories.
//! - Re-evaluate achievements after every state change and report unlocks.
//!
//! # Invariants
//! - The clock is read once per operation.
//! - Session entry resets lapsed streaks before evaluating achievements.
//! - Mutated habits and profiles are written back before returning.

use crate::model::achievement::Achievement;
use crate::model::habit::{CompletionOutcome, Habit, HabitFields, HabitId, HabitValidationError};
use crate::model::user::{UserId, UserProfile, UserValidationError};
use crate::progression::achievements::{evaluate_achievements, UnlockedAchievement};
use crate::progression::stats::{summarize, UserStats};
use crate::repo::habit_repo::{HabitRepository, RepoError};
use crate::repo::user_repo::UserRepository;
use crate::service::clock::Clock;
use chrono::NaiveDate;
use log::{debug, info};
use serde::Serialize;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Errors from progression service operations.
#[derive(Debug)]
pub enum ProgressionServiceError {
    /// Habit fields were rejected; nothing was changed.
    Validation(HabitValidationError),
    /// Profile fields were rejected; nothing was stored.
    UserValidation(UserValidationError),
    UserNotFound(UserId),
    HabitNotFound(HabitId),
    Repo(RepoError),
}

impl Display for ProgressionServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::UserValidation(err) => write!(f, "{err}"),
            Self::UserNotFound(id) => write!(f, "user not found: {id}"),
            Self::HabitNotFound(id) => write!(f, "habit not found: {id}"),
            Self::Repo(err) => write!(f, "{err}"),
        }
    }
}

impl Error for ProgressionServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::UserValidation(err) => Some(err),
            Self::Repo(err) => Some(err),
            Self::UserNotFound(_) | Self::HabitNotFound(_) => None,
        }
    }
}

impl From<HabitValidationError> for ProgressionServiceError {
    fn from(value: HabitValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<UserValidationError> for ProgressionServiceError {
    fn from(value: UserValidationError) -> Self {
        Self::UserValidation(value)
    }
}

impl From<RepoError> for ProgressionServiceError {
    fn from(value: RepoError) -> Self {
        match value {
            RepoError::HabitNotFound(id) => Self::HabitNotFound(id),
            RepoError::UserNotFound(id) => Self::UserNotFound(id),
            other => Self::Repo(other),
        }
    }
}

pub type ServiceResult<T> = Result<T, ProgressionServiceError>;

/// Result of creating one habit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HabitCreated {
    pub habit: Habit,
    pub unlocked: Vec<UnlockedAchievement>,
}

/// Result of one "complete habit" action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CompletionReport {
    /// Habit state after the attempt.
    pub habit: Habit,
    pub outcome: CompletionOutcome,
    pub unlocked: Vec<UnlockedAchievement>,
}

/// Result of one "enter session" action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SessionReport {
    pub today: NaiveDate,
    /// Habits whose non-zero streak was cleared for inactivity.
    pub streaks_reset: Vec<HabitId>,
    pub unlocked: Vec<UnlockedAchievement>,
}

/// Progression facade over habit/user repositories and a clock.
pub struct ProgressionService<H: HabitRepository, U: UserRepository, C: Clock> {
    habits: H,
    users: U,
    clock: C,
}

impl<H: HabitRepository, U: UserRepository, C: Clock> ProgressionService<H, U, C> {
    /// Creates a service from repository implementations and a date source.
    pub fn new(habits: H, users: U, clock: C) -> Self {
        Self {
            habits,
            users,
            clock,
        }
    }

    /// Registers a profile seeded with a locked achievement catalog.
    pub fn register_user(&mut self, name: &str, email: &str) -> ServiceResult<UserProfile> {
        let profile = UserProfile::new(name, email)?;
        let stored = self.users.create_user(profile)?;
        info!(
            "event=user_create module=service status=ok user_id={}",
            stored.id
        );
        Ok(stored)
    }

    pub fn get_user(&self, user_id: UserId) -> ServiceResult<UserProfile> {
        self.users
            .get_user(user_id)?
            .ok_or(ProgressionServiceError::UserNotFound(user_id))
    }

    pub fn find_user_by_name(&self, name: &str) -> ServiceResult<Option<UserProfile>> {
        Ok(self.users.find_user_by_name(name)?)
    }

    /// Creates a habit for `user_id`, then re-evaluates achievements.
    pub fn create_habit(
        &mut self,
        user_id: UserId,
        fields: HabitFields,
    ) -> ServiceResult<HabitCreated> {
        let mut user = self.get_user(user_id)?;
        let habit = Habit::new(fields)?;
        let habit = self.habits.create_habit(user_id, habit)?;
        info!(
            "event=habit_create module=service status=ok user_id={} habit_id={} recurrence={}",
            user_id,
            habit.id(),
            habit.recurrence().as_str()
        );

        let unlocked = self.refresh_achievements(&mut user)?;
        Ok(HabitCreated { habit, unlocked })
    }

    /// Lists the user's habits in creation order.
    pub fn list_habits(&self, user_id: UserId) -> ServiceResult<Vec<Habit>> {
        self.get_user(user_id)?;
        Ok(self.habits.list_habits(user_id)?)
    }

    pub fn get_habit(&self, user_id: UserId, habit_id: HabitId) -> ServiceResult<Habit> {
        self.habits
            .get_habit(user_id, habit_id)?
            .ok_or(ProgressionServiceError::HabitNotFound(habit_id))
    }

    /// Case-insensitive lookup by habit name.
    pub fn find_habit_by_name(&self, user_id: UserId, name: &str) -> ServiceResult<Option<Habit>> {
        let name = name.trim();
        Ok(self
            .list_habits(user_id)?
            .into_iter()
            .find(|habit| habit.name().eq_ignore_ascii_case(name)))
    }

    /// Replaces name, category, priority and recurrence of one habit.
    pub fn update_habit(
        &mut self,
        user_id: UserId,
        habit_id: HabitId,
        fields: HabitFields,
    ) -> ServiceResult<Habit> {
        let mut habit = self.get_habit(user_id, habit_id)?;
        habit.update_basic_fields(fields)?;
        self.habits.update_habit(user_id, &habit)?;
        info!(
            "event=habit_update module=service status=ok user_id={} habit_id={}",
            user_id, habit_id
        );
        Ok(habit)
    }

    /// Removes one habit. Unlocked achievements stay unlocked.
    pub fn remove_habit(&mut self, user_id: UserId, habit_id: HabitId) -> ServiceResult<()> {
        self.habits.delete_habit(user_id, habit_id)?;
        info!(
            "event=habit_delete module=service status=ok user_id={} habit_id={}",
            user_id, habit_id
        );
        Ok(())
    }

    pub fn is_eligible_now(&self, user_id: UserId, habit_id: HabitId) -> ServiceResult<bool> {
        let today = self.clock.today();
        Ok(self.get_habit(user_id, habit_id)?.is_eligible_now(today))
    }

    /// Completes one habit for today, then re-evaluates achievements.
    ///
    /// An ineligible habit yields `AlreadyCompletedThisPeriod` and is not
    /// written back.
    pub fn complete_habit(
        &mut self,
        user_id: UserId,
        habit_id: HabitId,
    ) -> ServiceResult<CompletionReport> {
        let today = self.clock.today();
        let mut user = self.get_user(user_id)?;
        let mut habit = self.get_habit(user_id, habit_id)?;

        let outcome = habit.mark_completed(today);
        match outcome {
            CompletionOutcome::Completed {
                xp_gained,
                levels_gained,
            } => {
                self.habits.update_habit(user_id, &habit)?;
                info!(
                    "event=habit_complete module=service status=ok habit_id={} xp_gained={} levels_gained={} level={} streak={}",
                    habit_id,
                    xp_gained,
                    levels_gained,
                    habit.level(),
                    habit.streak()
                );
            }
            CompletionOutcome::AlreadyCompletedThisPeriod => {
                debug!(
                    "event=habit_complete module=service status=skip habit_id={} reason=already_completed_this_period",
                    habit_id
                );
            }
        }

        let unlocked = self.refresh_achievements(&mut user)?;
        Ok(CompletionReport {
            habit,
            outcome,
            unlocked,
        })
    }

    /// Resets lapsed streaks across the collection, then re-evaluates
    /// achievements.
    pub fn enter_session(&mut self, user_id: UserId) -> ServiceResult<SessionReport> {
        let today = self.clock.today();
        let mut user = self.get_user(user_id)?;

        let mut streaks_reset = Vec::new();
        for mut habit in self.habits.list_habits(user_id)? {
            if habit.check_and_reset_streak(today) {
                self.habits.update_habit(user_id, &habit)?;
                info!(
                    "event=streak_reset module=service status=ok habit_id={} recurrence={}",
                    habit.id(),
                    habit.recurrence().as_str()
                );
                streaks_reset.push(habit.id());
            }
        }

        let unlocked = self.refresh_achievements(&mut user)?;
        info!(
            "event=session_enter module=service status=ok user_id={} streaks_reset={} unlocked={}",
            user_id,
            streaks_reset.len(),
            unlocked.len()
        );
        Ok(SessionReport {
            today,
            streaks_reset,
            unlocked,
        })
    }

    /// Runs achievement evaluation without any other state change.
    pub fn evaluate_achievements(
        &mut self,
        user_id: UserId,
    ) -> ServiceResult<Vec<UnlockedAchievement>> {
        let mut user = self.get_user(user_id)?;
        self.refresh_achievements(&mut user)
    }

    pub fn achievements(&self, user_id: UserId) -> ServiceResult<Vec<Achievement>> {
        Ok(self.get_user(user_id)?.achievements)
    }

    pub fn user_stats(&self, user_id: UserId) -> ServiceResult<UserStats> {
        let today = self.clock.today();
        let habits = self.list_habits(user_id)?;
        Ok(summarize(&habits, today))
    }

    fn refresh_achievements(
        &mut self,
        user: &mut UserProfile,
    ) -> ServiceResult<Vec<UnlockedAchievement>> {
        let habits = self.habits.list_habits(user.id)?;
        let unlocked = evaluate_achievements(&habits, &mut user.achievements);
        if !unlocked.is_empty() {
            self.users.update_user(user)?;
        }
        Ok(unlocked)
    }
}
