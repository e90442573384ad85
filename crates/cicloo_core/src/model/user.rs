//! User profile model.
//!
//! # Responsibility
//! - Hold the identity fields and the per-user achievement list.
//!
//! # Invariants
//! - `name` is trimmed and at least 3 characters.
//! - `email` matches `EMAIL_RE`.
//! - `achievements` starts as a locked copy of the default catalog.

use crate::model::achievement::{default_catalog, Achievement};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

const MIN_USER_NAME_CHARS: usize = 3;

static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z0-9+_.-]+@(.+)$").expect("valid email regex"));

/// Identifier assigned by the user repository.
pub type UserId = u64;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserValidationError {
    EmptyName,
    NameTooShort { min: usize, actual: usize },
    EmptyEmail,
    InvalidEmail(String),
}

impl Display for UserValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyName => write!(f, "user name must not be blank"),
            Self::NameTooShort { min, actual } => write!(
                f,
                "user name must have at least {min} characters, got {actual}"
            ),
            Self::EmptyEmail => write!(f, "email must not be blank"),
            Self::InvalidEmail(value) => write!(f, "invalid email format: `{value}`"),
        }
    }
}

impl Error for UserValidationError {}

/// A habit owner and their achievement progress.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: UserId,
    pub name: String,
    pub email: String,
    pub achievements: Vec<Achievement>,
}

impl UserProfile {
    /// Creates an unsaved profile (`id == 0`) with a locked catalog copy.
    pub fn new(name: &str, email: &str) -> Result<Self, UserValidationError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(UserValidationError::EmptyName);
        }
        let actual = name.chars().count();
        if actual < MIN_USER_NAME_CHARS {
            return Err(UserValidationError::NameTooShort {
                min: MIN_USER_NAME_CHARS,
                actual,
            });
        }

        let email = email.trim();
        if email.is_empty() {
            return Err(UserValidationError::EmptyEmail);
        }
        if !EMAIL_RE.is_match(email) {
            return Err(UserValidationError::InvalidEmail(email.to_string()));
        }

        Ok(Self {
            id: 0,
            name: name.to_string(),
            email: email.to_string(),
            achievements: default_catalog(),
        })
    }

    pub fn unlocked_achievements(&self) -> impl Iterator<Item = &Achievement> {
        self.achievements
            .iter()
            .filter(|achievement| achievement.is_unlocked())
    }
}
