//! Repository layer abstractions and storage implementations.
//!
//! # Responsibility
//! - Define use-case oriented data access contracts.
//! - Keep storage details away from progression orchestration.
//!
//! # Invariants
//! - Repositories assign identities; callers never pick ids.
//! - Missing records surface as semantic `NotFound` errors.

pub mod habit_repo;
pub mod user_repo;
