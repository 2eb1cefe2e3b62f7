//! SQLite implementation of the response cache

use crate::cache::schema::initialize_schema;
use crate::cache::traits::{CacheError, CacheResult, ResponseCache};
use crate::cache::CachedResponse;
use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, OptionalExtension};
use std::path::Path;

/// SQLite cache backend
pub struct SqliteCache {
    conn: Connection,
}

impl SqliteCache {
    /// Opens or creates the cache database, creating parent directories
    pub fn new(path: &Path) -> CacheResult<Self> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let conn = Connection::open(path)?;
        conn.execute_batch(
            "
            PRAGMA journal_mode = WAL;
            PRAGMA synchronous = NORMAL;
        ",
        )?;
        initialize_schema(&conn)?;

        Ok(Self { conn })
    }

    /// Creates an in-memory cache (for testing)
    #[cfg(test)]
    pub fn new_in_memory() -> CacheResult<Self> {
        let conn = Connection::open_in_memory()?;
        initialize_schema(&conn)?;
        Ok(Self { conn })
    }
}

impl ResponseCache for SqliteCache {
    fn get(&self, key: &str) -> CacheResult<Option<CachedResponse>> {
        let row = self
            .conn
            .query_row(
                "SELECT url, status, body, created_at FROM responses WHERE key = ?1",
                params![key],
                |row| {
                    Ok((
                        row.get::<_, String>(0)?,
                        row.get::<_, u16>(1)?,
                        row.get::<_, Vec<u8>>(2)?,
                        row.get::<_, String>(3)?,
                    ))
                },
            )
            .optional()?;

        let Some((url, status, body, created_at)) = row else {
            return Ok(None);
        };

        let created_at = DateTime::parse_from_rfc3339(&created_at)
            .map_err(|e| CacheError::Corrupt(format!("{}: bad timestamp: {}", url, e)))?
            .with_timezone(&Utc);

        Ok(Some(CachedResponse {
            url,
            status,
            body,
            created_at,
        }))
    }

    fn put(&mut self, key: &str, response: &CachedResponse) -> CacheResult<()> {
        self.conn.execute(
            "INSERT INTO responses (key, url, status, body, created_at) VALUES (?1, ?2, ?3, ?4, ?5)
             ON CONFLICT(key) DO UPDATE SET url = excluded.url, status = excluded.status,
             body = excluded.body, created_at = excluded.created_at",
            params![
                key,
                response.url,
                response.status,
                response.body,
                response.created_at.to_rfc3339()
            ],
        )?;
        Ok(())
    }

    fn clear(&mut self) -> CacheResult<()> {
        self.conn.execute("DELETE FROM responses", [])?;
        Ok(())
    }

    fn len(&self) -> CacheResult<u64> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM responses", [], |row| row.get(0))?;
        Ok(count as u64)
    }
}
