use log::debug;
use rusqlite::{Connection, OptionalExtension, named_params};

use super::{DbResult, SqlitePool};
use crate::session::{StatePersistence, StoreError};

pub fn get_state(conn: &Connection, key: &str) -> DbResult<Option<String>> {
    let value = conn
        .query_row(
            "SELECT value FROM persisted_state WHERE key = :key",
            named_params! { ":key": key },
            |row| row.get(0),
        )
        .optional()?;
    Ok(value)
}

pub fn put_state(conn: &Connection, key: &str, value: &str) -> DbResult<()> {
    debug!(key = key; "DB: Saving persisted state");

    conn.execute(
        r#"
        INSERT INTO persisted_state (key, value, updated_at)
        VALUES (:key, :value, datetime('now'))
        ON CONFLICT(key) DO UPDATE SET
            value = excluded.value,
            updated_at = excluded.updated_at
        "#,
        named_params! {
            ":key": key,
            ":value": value,
        },
    )?;

    Ok(())
}

pub fn delete_state(conn: &Connection, key: &str) -> DbResult<()> {
    debug!(key = key; "DB: Deleting persisted state");

    conn.execute(
        "DELETE FROM persisted_state WHERE key = :key",
        named_params! { ":key": key },
    )?;

    Ok(())
}

/// Session persistence backed by the `persisted_state` table.
#[derive(Clone)]
pub struct SqlitePersistence {
    pool: SqlitePool,
}

impl SqlitePersistence {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

impl StatePersistence for SqlitePersistence {
    fn load(&self, key: &str) -> Result<Option<String>, StoreError> {
        let conn = self.pool.get().map_err(super::DbError::from)?;
        Ok(get_state(&conn, key)?)
    }

    fn save(&self, key: &str, value: &str) -> Result<(), StoreError> {
        let conn = self.pool.get().map_err(super::DbError::from)?;
        Ok(put_state(&conn, key, value)?)
    }

    fn remove(&self, key: &str) -> Result<(), StoreError> {
        let conn = self.pool.get().map_err(super::DbError::from)?;
        Ok(delete_state(&conn, key)?)
    }
}
