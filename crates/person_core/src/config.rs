//! Host-facing configuration for the person core.
//!
//! # Responsibility
//! - Describe logging and storage settings in one serde-loadable value.
//! - Turn those settings into an initialized logger and an open connection.
//!
//! # Invariants
//! - `validate()` accepts exactly what `init_logging` would accept.

use crate::db::{open_db, open_db_in_memory, DbResult};
use crate::logging::{
    default_log_level, init_logging, normalize_level, normalize_log_dir, LoggingError,
};
use rusqlite::Connection;
use serde::Deserialize;
use std::path::PathBuf;

/// Where the SQLite repository keeps its data.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind", content = "path")]
pub enum DatabaseLocation {
    #[default]
    Memory,
    File(PathBuf),
}

/// Core settings supplied by the embedding host.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct CoreConfig {
    /// One of trace|debug|info|warn|error, case-insensitive.
    pub log_level: String,
    /// Absolute directory for rolling log files. `None` leaves logging off.
    pub log_dir: Option<PathBuf>,
    pub database: DatabaseLocation,
}

impl Default for CoreConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level().to_string(),
            log_dir: None,
            database: DatabaseLocation::default(),
        }
    }
}

impl CoreConfig {
    /// Checks level and directory without touching global logger state.
    pub fn validate(&self) -> Result<(), LoggingError> {
        normalize_level(&self.log_level)?;
        if let Some(dir) = &self.log_dir {
            normalize_log_dir(dir)?;
        }
        Ok(())
    }

    /// Starts file logging when `log_dir` is set. Returns whether it did.
    pub fn init_logging(&self) -> Result<bool, LoggingError> {
        match &self.log_dir {
            Some(dir) => {
                init_logging(&self.log_level, dir)?;
                Ok(true)
            }
            None => {
                normalize_level(&self.log_level)?;
                Ok(false)
            }
        }
    }

    /// Opens the configured database with the `persons` schema applied.
    pub fn open_database(&self) -> DbResult<Connection> {
        match &self.database {
            DatabaseLocation::Memory => open_db_in_memory(),
            DatabaseLocation::File(path) => open_db(path),
        }
    }
}
