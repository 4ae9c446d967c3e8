//! SQLite implementation of the per-user key/value slot.

use crate::core::store::KvBackend;
use crate::db::pool::DbPool;
use crate::errors::{AppError, AppResult};
use chrono::Local;
use rusqlite::{OptionalExtension, params};

impl KvBackend for DbPool {
    fn get(&self, key: &str) -> AppResult<Option<String>> {
        let value = self
            .conn
            .query_row("SELECT value FROM kv_store WHERE key = ?1", [key], |row| {
                row.get(0)
            })
            .optional()?;
        Ok(value)
    }

    /// Single statement, so the document is replaced atomically.
    fn set(&mut self, key: &str, value: &str) -> AppResult<()> {
        self.conn
            .execute(
                "INSERT INTO kv_store (key, value, updated_at) VALUES (?1, ?2, ?3)
                 ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at",
                params![key, value, Local::now().to_rfc3339()],
            )
            .map_err(|e| AppError::Persistence(e.to_string()))?;
        Ok(())
    }
}

/// Keys currently stored, in alphabetical order.
pub fn list_keys(pool: &DbPool) -> AppResult<Vec<String>> {
    let mut stmt = pool.conn.prepare("SELECT key FROM kv_store ORDER BY key ASC")?;
    let rows = stmt.query_map([], |row| row.get(0))?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}
