//! Ordered schema migrations for the dataset store.
//!
//! # Invariants
//! - Versions are strictly increasing and never edited once released.
//! - All pending migrations apply inside one transaction.

use crate::db::{DbError, DbResult};
use rusqlite::Connection;

#[derive(Debug, Clone, Copy)]
struct Migration {
    version: u32,
    sql: &'static str,
}

const MIGRATIONS: &[Migration] = &[Migration {
    version: 1,
    sql: include_str!("0001_diseases.sql"),
}];

/// Newest schema version this binary can read and write.
pub fn latest_version() -> u32 {
    MIGRATIONS.last().map_or(0, |migration| migration.version)
}

/// Reads the schema version recorded in the database.
pub fn current_version(conn: &Connection) -> DbResult<u32> {
    Ok(conn.query_row("PRAGMA user_version;", [], |row| row.get::<_, u32>(0))?)
}

/// Applies every migration newer than the recorded schema version.
pub fn apply_migrations(conn: &mut Connection) -> DbResult<()> {
    let found = current_version(conn)?;
    let supported = latest_version();

    if found > supported {
        return Err(DbError::UnsupportedSchemaVersion { found, supported });
    }
    if found == supported {
        return Ok(());
    }

    let tx = conn.transaction()?;
    for migration in MIGRATIONS.iter().filter(|migration| migration.version > found) {
        tx.execute_batch(migration.sql)?;
        tx.execute_batch(&format!("PRAGMA user_version = {};", migration.version))?;
    }
    tx.commit()?;
    Ok(())
}
