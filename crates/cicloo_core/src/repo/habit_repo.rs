//! Habit repository contract and in-memory implementation.
//!
//! # Responsibility
//! - Assign habit identities and keep each owner's habits in insertion order.
//! - Store full habit snapshots, progression state included.
//!
//! # Invariants
//! - Ids are unique across owners and never reused.
//! - A habit is only visible through the owner it was created for.

use crate::model::habit::{Habit, HabitId};
use crate::model::user::UserId;
use std::collections::BTreeMap;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository error shared by habit and user storage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RepoError {
    HabitNotFound(HabitId),
    UserNotFound(UserId),
    DuplicateEmail(String),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::HabitNotFound(id) => write!(f, "habit not found: {id}"),
            Self::UserNotFound(id) => write!(f, "user not found: {id}"),
            Self::DuplicateEmail(email) => write!(f, "a user with email `{email}` already exists"),
        }
    }
}

impl Error for RepoError {}

/// Repository interface for per-user habit collections.
pub trait HabitRepository {
    /// Stores `habit` under `owner` and returns it with its assigned id.
    fn create_habit(&mut self, owner: UserId, habit: Habit) -> RepoResult<Habit>;
    fn update_habit(&mut self, owner: UserId, habit: &Habit) -> RepoResult<()>;
    fn get_habit(&self, owner: UserId, id: HabitId) -> RepoResult<Option<Habit>>;
    /// Lists `owner`'s habits in insertion order.
    fn list_habits(&self, owner: UserId) -> RepoResult<Vec<Habit>>;
    fn delete_habit(&mut self, owner: UserId, id: HabitId) -> RepoResult<()>;
}

/// Process-local habit storage.
#[derive(Debug)]
pub struct InMemoryHabitRepository {
    habits: BTreeMap<UserId, Vec<Habit>>,
    next_id: HabitId,
}

impl InMemoryHabitRepository {
    pub fn new() -> Self {
        Self {
            habits: BTreeMap::new(),
            next_id: 1,
        }
    }

    fn find_mut(&mut self, owner: UserId, id: HabitId) -> RepoResult<&mut Habit> {
        self.habits
            .get_mut(&owner)
            .and_then(|habits| habits.iter_mut().find(|habit| habit.id() == id))
            .ok_or(RepoError::HabitNotFound(id))
    }
}

impl Default for InMemoryHabitRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl HabitRepository for InMemoryHabitRepository {
    fn create_habit(&mut self, owner: UserId, mut habit: Habit) -> RepoResult<Habit> {
        habit.set_id(self.next_id);
        self.next_id += 1;
        self.habits.entry(owner).or_default().push(habit.clone());
        Ok(habit)
    }

    fn update_habit(&mut self, owner: UserId, habit: &Habit) -> RepoResult<()> {
        let stored = self.find_mut(owner, habit.id())?;
        *stored = habit.clone();
        Ok(())
    }

    fn get_habit(&self, owner: UserId, id: HabitId) -> RepoResult<Option<Habit>> {
        Ok(self
            .habits
            .get(&owner)
            .and_then(|habits| habits.iter().find(|habit| habit.id() == id))
            .cloned())
    }

    fn list_habits(&self, owner: UserId) -> RepoResult<Vec<Habit>> {
        Ok(self.habits.get(&owner).cloned().unwrap_or_default())
    }

    fn delete_habit(&mut self, owner: UserId, id: HabitId) -> RepoResult<()> {
        let habits = self
            .habits
            .get_mut(&owner)
            .ok_or(RepoError::HabitNotFound(id))?;
        let before = habits.len();
        habits.retain(|habit| habit.id() != id);
        if habits.len() == before {
            return Err(RepoError::HabitNotFound(id));
        }
        Ok(())
    }
}
