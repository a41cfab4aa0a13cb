//! Repository layer abstractions and persistence implementations.
//!
//! # Responsibility
//! - Define the data access contract the person service depends on.
//! - Isolate SQLite details from service orchestration.
//!
//! # Invariants
//! - Repositories return semantic errors (`NotFound`, `Conflict`) in
//!   addition to DB transport errors.

pub mod person_repo;
