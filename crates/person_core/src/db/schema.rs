//! `persons` table definition and bootstrap.

use crate::db::DbResult;
use rusqlite::Connection;

/// Table name owned by the SQLite person repository.
pub const PERSONS_TABLE: &str = "persons";

/// Columns the repository reads and writes.
pub const PERSONS_COLUMNS: &[&str] = &["name", "age", "gender"];

const PERSONS_SCHEMA_SQL: &str = "CREATE TABLE IF NOT EXISTS persons (
    name TEXT PRIMARY KEY NOT NULL,
    age INTEGER NULL,
    gender TEXT NULL CHECK (gender IN ('M', 'F'))
);";

/// Creates the `persons` table when missing. Safe to call repeatedly.
pub fn ensure_schema(conn: &Connection) -> DbResult<()> {
    conn.execute_batch(PERSONS_SCHEMA_SQL)?;
    Ok(())
}

/// Returns whether `table` exists in the main schema.
pub fn table_exists(conn: &Connection, table: &str) -> DbResult<bool> {
    let count: i64 = conn.query_row(
        "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name = ?1;",
        [table],
        |row| row.get(0),
    )?;
    Ok(count > 0)
}

/// Returns column names of `table` in declaration order.
pub fn table_columns(conn: &Connection, table: &str) -> DbResult<Vec<String>> {
    let mut stmt = conn.prepare("SELECT name FROM pragma_table_info(?1);")?;
    let columns = stmt
        .query_map([table], |row| row.get::<_, String>(0))?
        .collect::<Result<Vec<_>, _>>()?;
    Ok(columns)
}
