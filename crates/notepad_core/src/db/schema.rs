//! Schema bootstrap.
//!
//! # Responsibility
//! - Create the `folders`/`notes` tables when missing.
//! - Refuse databases written by a newer schema.
//!
//! # Invariants
//! - Bootstrap is idempotent; reopening a current database is a no-op.
//! - There is one schema version. Older files are brought up with
//!   `CREATE ... IF NOT EXISTS`, never migrated step by step.

use crate::db::{DbError, DbResult};
use log::info;
use rusqlite::Connection;

const SCHEMA_SQL: &str = include_str!("schema.sql");

/// Schema version written to `PRAGMA user_version`.
pub const SCHEMA_VERSION: u32 = 1;

/// Creates the tables if needed and stamps the schema version.
pub fn ensure_schema(conn: &mut Connection) -> DbResult<()> {
    let current_version = current_user_version(conn)?;

    if current_version > SCHEMA_VERSION {
        return Err(DbError::UnsupportedSchemaVersion {
            db_version: current_version,
            latest_supported: SCHEMA_VERSION,
        });
    }

    if current_version == SCHEMA_VERSION {
        return Ok(());
    }

    let tx = conn.transaction()?;
    tx.execute_batch(SCHEMA_SQL)?;
    tx.execute_batch(&format!("PRAGMA user_version = {SCHEMA_VERSION};"))?;
    tx.commit()?;

    info!(
        "event=schema_ensure module=db status=ok from_version={} to_version={}",
        current_version, SCHEMA_VERSION
    );
    Ok(())
}

fn current_user_version(conn: &Connection) -> DbResult<u32> {
    let version = conn.query_row("PRAGMA user_version;", [], |row| row.get::<_, u32>(0))?;
    Ok(version)
}
