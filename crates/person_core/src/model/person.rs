//! Person domain model.
//!
//! # Responsibility
//! - Define the record validated by the service and persisted by repositories.
//! - Keep every field optional so absent input survives until validation.
//!
//! # Invariants
//! - `name` is the logical primary key once a record is persisted.
//! - `Gender` is a closed set; unknown values never deserialize.

use serde::{Deserialize, Serialize};

/// Two-valued gender marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Gender {
    M,
    F,
}

impl Gender {
    /// Single-letter storage/wire form.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::M => "M",
            Self::F => "F",
        }
    }

    /// Parses the single-letter form. Returns `None` for anything else.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "M" => Some(Self::M),
            "F" => Some(Self::F),
            _ => None,
        }
    }
}

/// Passive person record.
///
/// Constructed empty; callers fill fields directly. Validation lives in the
/// service layer, not here.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Person {
    /// Logical key. Must be non-blank for the service to accept the record.
    #[serde(default)]
    pub name: Option<String>,
    /// Not validated; any value (including negatives) is accepted.
    #[serde(default)]
    pub age: Option<i32>,
    #[serde(default)]
    pub gender: Option<Gender>,
}

impl Person {
    /// Creates a person with every field unset.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a fully populated person.
    pub fn with_fields(name: impl Into<String>, age: i32, gender: Gender) -> Self {
        Self {
            name: Some(name.into()),
            age: Some(age),
            gender: Some(gender),
        }
    }

    /// Returns the name as a borrowed str, if set.
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }
}
