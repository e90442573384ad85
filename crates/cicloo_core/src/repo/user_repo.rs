//! User repository contract and in-memory implementation.
//!
//! # Invariants
//! - Emails are unique, compared case-insensitively.
//! - Stored profiles keep their achievement list as last written.

use crate::model::user::{UserId, UserProfile};
use crate::repo::habit_repo::{RepoError, RepoResult};
use std::collections::BTreeMap;

/// Repository interface for user profiles.
pub trait UserRepository {
    /// Stores `user` and returns it with its assigned id.
    fn create_user(&mut self, user: UserProfile) -> RepoResult<UserProfile>;
    fn update_user(&mut self, user: &UserProfile) -> RepoResult<()>;
    fn get_user(&self, id: UserId) -> RepoResult<Option<UserProfile>>;
    /// Case-insensitive lookup by display name.
    fn find_user_by_name(&self, name: &str) -> RepoResult<Option<UserProfile>>;
}

/// Process-local user storage.
#[derive(Debug)]
pub struct InMemoryUserRepository {
    users: BTreeMap<UserId, UserProfile>,
    next_id: UserId,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self {
            users: BTreeMap::new(),
            next_id: 1,
        }
    }
}

impl Default for InMemoryUserRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl UserRepository for InMemoryUserRepository {
    fn create_user(&mut self, mut user: UserProfile) -> RepoResult<UserProfile> {
        let duplicate = self
            .users
            .values()
            .any(|existing| existing.email.eq_ignore_ascii_case(&user.email));
        if duplicate {
            return Err(RepoError::DuplicateEmail(user.email));
        }

        user.id = self.next_id;
        self.next_id += 1;
        self.users.insert(user.id, user.clone());
        Ok(user)
    }

    fn update_user(&mut self, user: &UserProfile) -> RepoResult<()> {
        let stored = self
            .users
            .get_mut(&user.id)
            .ok_or(RepoError::UserNotFound(user.id))?;
        *stored = user.clone();
        Ok(())
    }

    fn get_user(&self, id: UserId) -> RepoResult<Option<UserProfile>> {
        Ok(self.users.get(&id).cloned())
    }

    fn find_user_by_name(&self, name: &str) -> RepoResult<Option<UserProfile>> {
        let name = name.trim();
        Ok(self
            .users
            .values()
            .find(|user| user.name.eq_ignore_ascii_case(name))
            .cloned())
    }
}
