//! Habit progression rules.
//!
//! # Responsibility
//! - Recurrence eligibility and streak-break policy.
//! - Achievement evaluation over a user's habits.
//! - Aggregate progress statistics.
//!
//! # Invariants
//! - Everything here is a pure computation over in-memory state; callers own
//!   persistence and clock reads.

pub mod achievements;
pub mod policy;
pub mod stats;
