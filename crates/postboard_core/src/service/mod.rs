//! Board use-case services.
//!
//! # Responsibility
//! - Orchestrate layout/placement calls into board transitions.
//! - Keep the input layer decoupled from geometry details.
//!
//! # Invariants
//! - Transitions are pure; only `BoardSession` holds mutable state.

pub mod board_session;
pub mod clock;
pub mod renumber;
pub mod transitions;
