//! Domain model for habits, achievements and user profiles.
//!
//! # Responsibility
//! - Define canonical data structures used by progression logic.
//! - Reject invalid input before any object exists.
//!
//! # Invariants
//! - Habits are identified by repository-assigned `HabitId`.
//! - Achievements are identified by name within one catalog.

pub mod achievement;
pub mod habit;
pub mod user;
