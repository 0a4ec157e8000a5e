use log::info;
use rusqlite::Connection;
use std::path::Path;

use crate::api_error::{ApiError, ApiResult};

#[derive(Debug, Clone, Copy)]
struct Migration {
    version: u32,
    sql: &'static str,
}

// Migration 2 is additive on purpose: rows created before it exist with
// category backfilled to '' and estimated_hours left NULL (read as 0).
const MIGRATIONS: &[Migration] = &[
    Migration {
        version: 1,
        sql: "CREATE TABLE tasks (
                  id INTEGER PRIMARY KEY AUTOINCREMENT,
                  title TEXT NOT NULL,
                  is_done INTEGER NOT NULL DEFAULT 0,
                  due_date TEXT
              );",
    },
    Migration {
        version: 2,
        sql: "ALTER TABLE tasks
                  ADD COLUMN category TEXT NOT NULL DEFAULT ''
                  CHECK (length(category) <= 50);
              ALTER TABLE tasks
                  ADD COLUMN estimated_hours INTEGER
                  CHECK (estimated_hours IS NULL OR estimated_hours >= 0);",
    },
];

pub fn latest_version() -> u32 {
    MIGRATIONS.last().map_or(0, |migration| migration.version)
}

pub fn open_db(path: impl AsRef<Path>) -> ApiResult<Connection> {
    let mut connection =
        Connection::open(path).map_err(|e| ApiError::Internal(e.to_string()))?;
    configure_connection(&connection)?;
    apply_migrations(&mut connection)?;

    info!("opened task database at schema version {}", latest_version());
    Ok(connection)
}

pub fn open_db_in_memory() -> ApiResult<Connection> {
    let mut connection =
        Connection::open_in_memory().map_err(|e| ApiError::Internal(e.to_string()))?;
    configure_connection(&connection)?;
    apply_migrations(&mut connection)?;
    Ok(connection)
}

fn configure_connection(connection: &Connection) -> ApiResult<()> {
    connection.execute_batch(
        "PRAGMA journal_mode=WAL;
         PRAGMA busy_timeout=5000;
         PRAGMA foreign_keys=ON;",
    )?;
    Ok(())
}

pub fn apply_migrations(connection: &mut Connection) -> ApiResult<()> {
    let current_version = current_user_version(connection)?;
    let latest = latest_version();

    if current_version > latest {
        return Err(ApiError::SchemaVersion {
            db_version: current_version,
            latest_supported: latest,
        });
    }

    if current_version == latest {
        return Ok(());
    }

    let tx = connection.transaction()?;
    for migration in MIGRATIONS {
        if migration.version <= current_version {
            continue;
        }

        tx.execute_batch(migration.sql)?;
        tx.execute_batch(&format!("PRAGMA user_version = {};", migration.version))?;
    }
    tx.commit()?;

    info!(
        "migrated task database from schema version {} to {}",
        current_version, latest
    );
    Ok(())
}

fn current_user_version(connection: &Connection) -> ApiResult<u32> {
    let version = connection.query_row("PRAGMA user_version;", [], |row| row.get(0))?;
    Ok(version)
}
