//! Domain model for the person service.
//!
//! # Responsibility
//! - Define canonical data structures shared by service and repositories.
//!
//! # Invariants
//! - Records are keyed by `name`; no surrogate id exists.

pub mod person;
