//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate progression rules and repository calls into use-case APIs.
//! - Keep CLI/UI callers decoupled from storage and clock details.

pub mod clock;
pub mod progression_service;
