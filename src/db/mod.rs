mod schema;

use anyhow::{Context, Result};
use rusqlite::{params, Connection, OptionalExtension};
use std::path::Path;

/// SQLite file holding named text slots. The application keeps its whole
/// state as one JSON document in a single slot.
pub(crate) struct Database {
    conn: Connection,
}

impl Database {
    pub(crate) fn open(path: &Path) -> Result<Self> {
        let conn = Connection::open(path)
            .with_context(|| format!("Failed to open database: {}", path.display()))?;
        conn.execute_batch("PRAGMA journal_mode=WAL;")
            .context("Failed to set database pragmas")?;
        let mut db = Self { conn };
        db.migrate().context("Database migration failed")?;
        Ok(db)
    }

    #[cfg(test)]
    pub(crate) fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        let mut db = Self { conn };
        db.migrate()?;
        Ok(db)
    }

    /// Create the schema if needed and stamp its version. A file written
    /// by a newer schema is refused rather than guessed at.
    fn migrate(&mut self) -> Result<()> {
        self.conn.execute_batch(schema::SCHEMA_V1)?;

        let current: Option<i32> = self
            .conn
            .query_row("SELECT version FROM schema_version LIMIT 1", [], |row| {
                row.get(0)
            })
            .optional()
            .context("Failed to read schema version")?;

        match current {
            None => {
                self.conn.execute(
                    "INSERT INTO schema_version (version) VALUES (?1)",
                    params![schema::CURRENT_VERSION],
                )?;
            }
            Some(version) if version > schema::CURRENT_VERSION => {
                anyhow::bail!(
                    "Database schema version {version} is newer than this build supports ({})",
                    schema::CURRENT_VERSION
                );
            }
            Some(_) => {}
        }
        Ok(())
    }

    #[cfg(test)]
    pub(crate) fn schema_version(&self) -> Result<i32> {
        Ok(self
            .conn
            .query_row("SELECT version FROM schema_version LIMIT 1", [], |row| {
                row.get(0)
            })?)
    }

    // ── Slots ─────────────────────────────────────────────────

    pub(crate) fn get_slot(&self, key: &str) -> Result<Option<String>> {
        let value = self
            .conn
            .query_row(
                "SELECT value FROM kv_slots WHERE key = ?1",
                params![key],
                |row| row.get(0),
            )
            .optional()
            .with_context(|| format!("Failed to read slot '{key}'"))?;
        Ok(value)
    }

    /// Insert or overwrite the slot.
    pub(crate) fn put_slot(&self, key: &str, value: &str) -> Result<()> {
        let now = chrono::Local::now().to_rfc3339();
        self.conn
            .execute(
                "INSERT INTO kv_slots (key, value, updated_at) VALUES (?1, ?2, ?3)
                 ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at",
                params![key, value, now],
            )
            .with_context(|| format!("Failed to write slot '{key}'"))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests;
