//! Person repository contract and its in-memory and SQLite implementations.
//!
//! # Responsibility
//! - Define the CRUD capability the service delegates to.
//! - Own existence and uniqueness rules; the service never checks them.
//!
//! # Invariants
//! - Records are keyed by `name`; at most one record per key.
//! - Read paths reject invalid persisted state instead of masking it.

use crate::db::schema::{table_columns, table_exists, PERSONS_COLUMNS, PERSONS_TABLE};
use crate::db::DbError;
use crate::model::person::{Gender, Person};
use rusqlite::{ffi, params, Connection, Row};
use std::collections::BTreeMap;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::sync::{Mutex, MutexGuard};

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository error for person persistence operations.
#[derive(Debug)]
pub enum RepoError {
    Db(DbError),
    NotFound(String),
    Conflict(String),
    InvalidData(String),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::NotFound(name) => write!(f, "person not found: {name}"),
            Self::Conflict(name) => write!(f, "person already exists: {name}"),
            Self::InvalidData(message) => write!(f, "invalid person data: {message}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::NotFound(_) | Self::Conflict(_) | Self::InvalidData(_) => None,
        }
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Repository interface for person CRUD operations.
pub trait PersonRepository {
    /// Persists a new person and returns the stored form.
    fn insert(&self, person: &Person) -> RepoResult<Person>;
    /// Replaces the record whose `name` matches.
    fn update(&self, person: &Person) -> RepoResult<()>;
    /// Removes the record with this name.
    fn delete(&self, name: &str) -> RepoResult<()>;
    /// Fetches the record with this name.
    fn get(&self, name: &str) -> RepoResult<Person>;
}

fn require_key(person: &Person) -> RepoResult<&str> {
    person
        .name()
        .ok_or_else(|| RepoError::InvalidData("person record has no name".to_string()))
}

/// Map-backed repository kept in process memory.
///
/// Thread-safe; every operation takes the internal lock for its duration.
#[derive(Debug, Default)]
pub struct InMemoryPersonRepository {
    persons: Mutex<BTreeMap<String, Person>>,
}

impl InMemoryPersonRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored records.
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    // A poisoned map is still structurally valid; every write is a single
    // insert/remove.
    fn lock(&self) -> MutexGuard<'_, BTreeMap<String, Person>> {
        self.persons
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl PersonRepository for InMemoryPersonRepository {
    fn insert(&self, person: &Person) -> RepoResult<Person> {
        let key = require_key(person)?;
        let mut persons = self.lock();
        if persons.contains_key(key) {
            return Err(RepoError::Conflict(key.to_string()));
        }
        persons.insert(key.to_string(), person.clone());
        Ok(person.clone())
    }

    fn update(&self, person: &Person) -> RepoResult<()> {
        let key = require_key(person)?;
        let mut persons = self.lock();
        match persons.get_mut(key) {
            Some(stored) => {
                *stored = person.clone();
                Ok(())
            }
            None => Err(RepoError::NotFound(key.to_string())),
        }
    }

    fn delete(&self, name: &str) -> RepoResult<()> {
        self.lock()
            .remove(name)
            .map(|_| ())
            .ok_or_else(|| RepoError::NotFound(name.to_string()))
    }

    fn get(&self, name: &str) -> RepoResult<Person> {
        self.lock()
            .get(name)
            .cloned()
            .ok_or_else(|| RepoError::NotFound(name.to_string()))
    }
}

/// SQLite-backed person repository.
pub struct SqlitePersonRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqlitePersonRepository<'conn> {
    /// Wraps a connection after checking the `persons` table shape.
    ///
    /// # Errors
    /// - `InvalidData` when the table or one of its columns is missing.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        if !table_exists(conn, PERSONS_TABLE)? {
            return Err(RepoError::InvalidData(format!(
                "missing required table `{PERSONS_TABLE}`"
            )));
        }

        let columns = table_columns(conn, PERSONS_TABLE)?;
        for required in PERSONS_COLUMNS {
            if !columns.iter().any(|column| column == required) {
                return Err(RepoError::InvalidData(format!(
                    "missing required column `{PERSONS_TABLE}.{required}`"
                )));
            }
        }

        Ok(Self { conn })
    }
}

impl PersonRepository for SqlitePersonRepository<'_> {
    fn insert(&self, person: &Person) -> RepoResult<Person> {
        let key = require_key(person)?;
        let result = self.conn.execute(
            "INSERT INTO persons (name, age, gender) VALUES (?1, ?2, ?3);",
            params![key, person.age, person.gender.map(Gender::as_str)],
        );

        match result {
            Ok(_) => self.get(key),
            Err(err) if is_primary_key_violation(&err) => {
                Err(RepoError::Conflict(key.to_string()))
            }
            Err(err) => Err(err.into()),
        }
    }

    fn update(&self, person: &Person) -> RepoResult<()> {
        let key = require_key(person)?;
        let changed = self.conn.execute(
            "UPDATE persons SET age = ?1, gender = ?2 WHERE name = ?3;",
            params![person.age, person.gender.map(Gender::as_str), key],
        )?;

        if changed == 0 {
            return Err(RepoError::NotFound(key.to_string()));
        }
        Ok(())
    }

    fn delete(&self, name: &str) -> RepoResult<()> {
        let changed = self
            .conn
            .execute("DELETE FROM persons WHERE name = ?1;", [name])?;

        if changed == 0 {
            return Err(RepoError::NotFound(name.to_string()));
        }
        Ok(())
    }

    fn get(&self, name: &str) -> RepoResult<Person> {
        let mut stmt = self
            .conn
            .prepare("SELECT name, age, gender FROM persons WHERE name = ?1;")?;
        let mut rows = stmt.query([name])?;
        match rows.next()? {
            Some(row) => parse_person_row(row),
            None => Err(RepoError::NotFound(name.to_string())),
        }
    }
}

fn parse_person_row(row: &Row<'_>) -> RepoResult<Person> {
    let gender = match row.get::<_, Option<String>>("gender")? {
        Some(value) => Some(Gender::parse(&value).ok_or_else(|| {
            RepoError::InvalidData(format!("invalid gender `{value}` in persons.gender"))
        })?),
        None => None,
    };

    Ok(Person {
        name: Some(row.get("name")?),
        age: row.get("age")?,
        gender,
    })
}

fn is_primary_key_violation(err: &rusqlite::Error) -> bool {
    matches!(
        err,
        rusqlite::Error::SqliteFailure(failure, _)
            if failure.extended_code == ffi::SQLITE_CONSTRAINT_PRIMARYKEY
    )
}
