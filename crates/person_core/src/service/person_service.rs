//! Person use-case service.
//!
//! # Responsibility
//! - Validate caller input per operation and aggregate field errors.
//! - Delegate accepted input to the repository.
//!
//! # Invariants
//! - The repository is never called when validation reports an error.
//! - Name errors always precede gender errors.
//! - Repository errors pass through unchanged.

use crate::model::person::{Gender, Person};
use crate::repo::person_repo::{PersonRepository, RepoError};
use log::{debug, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub const NAME_REQUIRED: &str = "Name is required";
pub const GENDER_REQUIRED: &str = "Gender is required";

const ERROR_SEPARATOR: &str = ";";

pub type ServiceResult<T> = Result<T, PersonServiceError>;

/// Aggregate validation failure carrying every field error in check order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersonValidationError {
    errors: Vec<String>,
}

impl PersonValidationError {
    /// Builds an error from collected messages. Returns `None` when empty.
    pub fn from_errors(errors: Vec<String>) -> Option<Self> {
        if errors.is_empty() {
            None
        } else {
            Some(Self { errors })
        }
    }

    /// Field errors in the order checks ran.
    pub fn errors(&self) -> &[String] {
        &self.errors
    }

    pub fn into_errors(self) -> Vec<String> {
        self.errors
    }
}

impl Display for PersonValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.errors.join(ERROR_SEPARATOR))
    }
}

impl Error for PersonValidationError {}

/// Service error for person use-cases.
#[derive(Debug)]
pub enum PersonServiceError {
    /// Input rejected before any repository call.
    Validation(PersonValidationError),
    /// Repository failure, unmodified.
    Repo(RepoError),
}

impl PersonServiceError {
    /// Validation messages, if this is a validation failure.
    pub fn validation_errors(&self) -> Option<&[String]> {
        match self {
            Self::Validation(err) => Some(err.errors()),
            Self::Repo(_) => None,
        }
    }
}

impl Display for PersonServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Repo(err) => write!(f, "{err}"),
        }
    }
}

impl Error for PersonServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Repo(err) => Some(err),
        }
    }
}

impl From<PersonValidationError> for PersonServiceError {
    fn from(value: PersonValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<RepoError> for PersonServiceError {
    fn from(value: RepoError) -> Self {
        Self::Repo(value)
    }
}

/// Name check: absent, empty and whitespace-only names all fail.
pub fn validate_name(name: Option<&str>) -> Option<&'static str> {
    match name {
        Some(value) if !value.trim().is_empty() => None,
        _ => Some(NAME_REQUIRED),
    }
}

/// Gender check: only absence fails.
pub fn validate_gender(gender: Option<Gender>) -> Option<&'static str> {
    match gender {
        Some(_) => None,
        None => Some(GENDER_REQUIRED),
    }
}

/// Full person validation used by insert. Age is never checked.
pub fn validate_person(person: Option<&Person>) -> Vec<String> {
    let (name, gender) = match person {
        Some(person) => (person.name(), person.gender),
        None => (None, None),
    };

    [validate_name(name), validate_gender(gender)]
        .into_iter()
        .flatten()
        .map(str::to_string)
        .collect()
}

fn check(operation: &'static str, errors: Vec<String>) -> Result<(), PersonValidationError> {
    if errors.is_empty() {
        Ok(())
    } else {
        Err(rejected(operation, errors))
    }
}

// `errors` must be non-empty.
fn rejected(operation: &'static str, errors: Vec<String>) -> PersonValidationError {
    warn!(
        "event=person_validate module=service status=rejected op={operation} error_count={}",
        errors.len()
    );
    PersonValidationError { errors }
}

fn name_errors(name: Option<&str>) -> Vec<String> {
    validate_name(name)
        .into_iter()
        .map(str::to_string)
        .collect()
}

fn require_name<'a>(
    operation: &'static str,
    name: Option<&'a str>,
) -> Result<&'a str, PersonValidationError> {
    match name {
        Some(value) if validate_name(name).is_none() => Ok(value),
        _ => Err(rejected(operation, name_errors(name))),
    }
}

/// Person service facade over a repository implementation.
///
/// Holds nothing but the repository, so it is safe to share across threads
/// whenever `R` is.
pub struct PersonService<R: PersonRepository> {
    repo: R,
}

impl<R: PersonRepository> PersonService<R> {
    /// Creates a service using the provided repository implementation.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Borrows the underlying repository.
    pub fn repository(&self) -> &R {
        &self.repo
    }

    pub fn into_repository(self) -> R {
        self.repo
    }

    /// Validates a full person record and inserts it.
    ///
    /// # Contract
    /// - Absent person fails with both name and gender errors, in that order.
    /// - Returns the repository's persisted form on success.
    pub fn insert(&self, person: Option<&Person>) -> ServiceResult<Person> {
        let errors = validate_person(person);
        match person {
            Some(person) if errors.is_empty() => {
                let stored = self.repo.insert(person)?;
                debug!("event=person_insert module=service status=ok");
                Ok(stored)
            }
            _ => Err(rejected("insert", errors).into()),
        }
    }

    /// Replaces an existing person. Only the name is checked.
    pub fn update(&self, person: &Person) -> ServiceResult<()> {
        check("update", name_errors(person.name()))?;
        self.repo.update(person)?;
        debug!("event=person_update module=service status=ok");
        Ok(())
    }

    /// Deletes a person by name.
    pub fn delete(&self, name: Option<&str>) -> ServiceResult<()> {
        let name = require_name("delete", name)?;
        self.repo.delete(name)?;
        debug!("event=person_delete module=service status=ok");
        Ok(())
    }

    /// Fetches a person by name.
    pub fn get(&self, name: Option<&str>) -> ServiceResult<Person> {
        let name = require_name("get", name)?;
        let person = self.repo.get(name)?;
        debug!("event=person_get module=service status=ok");
        Ok(person)
    }
}
