//! Audit trail of organizer changes, stored in the `log` table and printed
//! by `rcompanion log --print`.

use crate::errors::AppResult;
use chrono::Local;
use rusqlite::{Connection, params};

/// Record one audited action.
///
/// `operation` is the verb shown in the log (`add`, `del`, `toggle`, `mark`,
/// `login`, `logout`, `init`, `migration_applied`). `target` is the user the
/// change belongs to, the table for migrations, or empty for `init`.
pub fn ttlog(conn: &Connection, operation: &str, target: &str, message: &str) -> AppResult<()> {
    conn.execute(
        "INSERT INTO log (date, operation, target, message) VALUES (?1, ?2, ?3, ?4)",
        params![Local::now().to_rfc3339(), operation, target.trim(), message],
    )?;
    Ok(())
}
