//! Key/value persistence for transient runtime state.
//! The timer state machine is serialized here so it survives across
//! CLI invocations.

use crate::errors::AppResult;
use rusqlite::{Connection, OptionalExtension, params};

pub fn kv_get(conn: &Connection, key: &str) -> AppResult<Option<String>> {
    let value: Option<String> = conn
        .query_row("SELECT value FROM state WHERE key = ?1", [key], |row| {
            row.get(0)
        })
        .optional()?;
    Ok(value)
}

pub fn kv_set(conn: &Connection, key: &str, value: &str) -> AppResult<()> {
    conn.execute(
        "INSERT INTO state (key, value) VALUES (?1, ?2)
         ON CONFLICT(key) DO UPDATE SET value = excluded.value",
        params![key, value],
    )?;
    Ok(())
}
