//! SQLite-backed key-value store.
//!
//! Snapshots live in a single `kv` table at `~/.config/steadfast/steadfast.db`.

use chrono::Utc;
use rusqlite::{params, Connection, OptionalExtension};
use std::path::Path;

use super::{data_dir, migrations, KeyValueStore};
use crate::error::{DatabaseError, Result};

/// SQLite database holding every persisted snapshot.
pub struct SqliteStore {
    conn: Connection,
}

impl SqliteStore {
    /// Get a reference to the underlying SQLite connection.
    pub fn conn(&self) -> &Connection {
        &self.conn
    }

    /// Open the database at `~/.config/steadfast/steadfast.db`.
    ///
    /// Creates the database file and schema if they don't exist.
    ///
    /// # Errors
    /// Returns an error if the database cannot be opened or migrated.
    pub fn open() -> Result<Self> {
        Self::open_at(&data_dir()?.join("steadfast.db"))
    }

    /// Open (or create) the database at `path`.
    pub fn open_at(path: &Path) -> Result<Self> {
        let conn = Connection::open(path).map_err(|source| DatabaseError::OpenFailed {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_connection(conn)
    }

    /// Open an in-memory database.
    pub fn open_memory() -> Result<Self> {
        let conn = Connection::open_in_memory().map_err(DatabaseError::from)?;
        Self::from_connection(conn)
    }

    fn from_connection(conn: Connection) -> Result<Self> {
        migrations::migrate(&conn)
            .map_err(|e| DatabaseError::MigrationFailed(e.to_string()))?;
        Ok(Self { conn })
    }

    /// Keys currently stored, sorted.
    pub fn keys(&self) -> Result<Vec<String>> {
        let mut stmt = self.conn.prepare("SELECT key FROM kv ORDER BY key")?;
        let rows = stmt.query_map([], |row| row.get::<_, String>(0))?;
        let mut keys = Vec::new();
        for row in rows {
            keys.push(row?);
        }
        Ok(keys)
    }
}

impl KeyValueStore for SqliteStore {
    fn load(&self, key: &str) -> Result<Option<String>> {
        let value = self
            .conn
            .query_row("SELECT value FROM kv WHERE key = ?1", params![key], |row| {
                row.get::<_, String>(0)
            })
            .optional()?;
        Ok(value)
    }

    fn save(&self, key: &str, value: &str) -> Result<()> {
        self.conn.execute(
            "INSERT OR REPLACE INTO kv (key, value, updated_at) VALUES (?1, ?2, ?3)",
            params![key, value, Utc::now().to_rfc3339()],
        )?;
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        self.conn
            .execute("DELETE FROM kv WHERE key = ?1", params![key])?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kv_store() {
        let db = SqliteStore::open_memory().unwrap();
        assert!(db.load("test").unwrap().is_none());
        db.save("test", "hello").unwrap();
        assert_eq!(db.load("test").unwrap().unwrap(), "hello");
        db.save("test", "again").unwrap();
        assert_eq!(db.load("test").unwrap().unwrap(), "again");
        db.remove("test").unwrap();
        assert!(db.load("test").unwrap().is_none());
    }

    #[test]
    fn keys_are_sorted() {
        let db = SqliteStore::open_memory().unwrap();
        db.save("journal", "{}").unwrap();
        db.save("disciplines", "{}").unwrap();
        assert_eq!(db.keys().unwrap(), vec!["disciplines", "journal"]);
    }

    #[test]
    fn persists_across_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("steadfast.db");
        {
            let db = SqliteStore::open_at(&path).unwrap();
            db.save("profile", "{\"name\":\"x\"}").unwrap();
        }
        let db = SqliteStore::open_at(&path).unwrap();
        assert_eq!(db.load("profile").unwrap().as_deref(), Some("{\"name\":\"x\"}"));
    }
}
