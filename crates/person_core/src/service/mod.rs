//! Core use-case services.
//!
//! # Responsibility
//! - Validate caller input before it reaches storage.
//! - Keep callers decoupled from repository implementations.

pub mod person_service;
