//! Validating CRUD core for `Person` records.
//! Input validation lives in the service; persistence sits behind a repository trait.

pub mod config;
pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use config::{CoreConfig, DatabaseLocation};
pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use model::person::{Gender, Person};
pub use repo::person_repo::{
    InMemoryPersonRepository, PersonRepository, RepoError, RepoResult, SqlitePersonRepository,
};
pub use service::person_service::{
    validate_gender, validate_name, validate_person, PersonService, PersonServiceError,
    PersonValidationError, ServiceResult, GENDER_REQUIRED, NAME_REQUIRED,
};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
