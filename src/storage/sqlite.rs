//! SQLite storage implementation

use super::schema;
use crate::Result;
use rusqlite::{Connection, OptionalExtension, params};
use std::path::Path;

/// SQLite-backed key→value store for preference records.
///
/// `load` on a key never written returns `None`; callers treat that as
/// "use the default value", not as an error. `save` followed by `load`
/// yields the input unchanged.
pub struct SqliteStore {
    conn: Connection,
}

impl SqliteStore {
    /// Open a database file (creates if doesn't exist)
    pub fn open(path: &Path) -> Result<Self> {
        let conn = Connection::open(path)?;
        let store = Self { conn };
        store.initialize_schema()?;
        Ok(store)
    }

    /// Open an in-memory database (for testing)
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        let store = Self { conn };
        store.initialize_schema()?;
        Ok(store)
    }

    /// Initialize the database schema
    fn initialize_schema(&self) -> Result<()> {
        for stmt in schema::all_schema_statements() {
            self.conn.execute(stmt, [])?;
        }
        Ok(())
    }

    /// Insert or replace a preference record
    pub fn save(&self, key: &str, value: &str) -> Result<()> {
        self.conn.execute(
            r#"
            INSERT OR REPLACE INTO preferences (key, value, updated_at)
            VALUES (?1, ?2, strftime('%s', 'now'))
            "#,
            params![key, value],
        )?;
        Ok(())
    }

    /// Get a preference record by key
    pub fn load(&self, key: &str) -> Result<Option<String>> {
        self.conn
            .query_row(
                "SELECT value FROM preferences WHERE key = ?1",
                [key],
                |row| row.get(0),
            )
            .optional()
            .map_err(Into::into)
    }

    /// Delete a preference record; no-op when the key is absent
    pub fn delete(&self, key: &str) -> Result<()> {
        self.conn
            .execute("DELETE FROM preferences WHERE key = ?1", [key])?;
        Ok(())
    }

    /// All stored keys, ordered
    pub fn keys(&self) -> Result<Vec<String>> {
        let mut stmt = self
            .conn
            .prepare("SELECT key FROM preferences ORDER BY key")?;

        let keys = stmt
            .query_map([], |row| row.get(0))?
            .filter_map(|r| r.ok())
            .collect();

        Ok(keys)
    }

    /// Count all preference records
    pub fn count(&self) -> Result<usize> {
        let count: i64 =
            self.conn
                .query_row("SELECT COUNT(*) FROM preferences", [], |row| row.get(0))?;
        Ok(count as usize)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_save_load_roundtrip() {
        let store = SqliteStore::open_in_memory().unwrap();

        store.save("region", r#"{"country":"Canada","state":null}"#).unwrap();

        let value = store.load("region").unwrap().unwrap();
        assert_eq!(value, r#"{"country":"Canada","state":null}"#);
    }

    #[test]
    fn test_load_missing_key_is_none() {
        let store = SqliteStore::open_in_memory().unwrap();
        assert!(store.load("neverWritten").unwrap().is_none());
    }

    #[test]
    fn test_save_overwrites() {
        let store = SqliteStore::open_in_memory().unwrap();

        store.save("themePref", "light").unwrap();
        store.save("themePref", "dark").unwrap();

        assert_eq!(store.load("themePref").unwrap().unwrap(), "dark");
        assert_eq!(store.count().unwrap(), 1);
    }

    #[test]
    fn test_delete_is_idempotent() {
        let store = SqliteStore::open_in_memory().unwrap();

        store.save("authSkipped", "true").unwrap();
        store.delete("authSkipped").unwrap();
        store.delete("authSkipped").unwrap();

        assert!(store.load("authSkipped").unwrap().is_none());
    }

    #[test]
    fn test_keys_ordered() {
        let store = SqliteStore::open_in_memory().unwrap();

        store.save("themePref", "dark").unwrap();
        store.save("favorites", "[]").unwrap();

        assert_eq!(store.keys().unwrap(), vec!["favorites", "themePref"]);
    }

    #[test]
    fn test_persists_across_connections() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("prefs.db");

        {
            let store = SqliteStore::open(&path).unwrap();
            store.save("region", r#"{"country":"Australia","state":"Victoria"}"#).unwrap();
        }

        let reopened = SqliteStore::open(&path).unwrap();
        assert_eq!(
            reopened.load("region").unwrap().unwrap(),
            r#"{"country":"Australia","state":"Victoria"}"#
        );
    }
}
