//! Memory Store
//!
//! Core operations for the personal memory system: remembering facts,
//! listing recent ones, querying the full-text index, and deleting.
//! Records are immutable once created — there is no update operation.

use chrono::Utc;
use rusqlite::{params, TransactionBehavior};
use serde::{Deserialize, Serialize};

use crate::services::memory::language;
use crate::services::memory::lexical;
use crate::storage::database::{Database, DbPool};
use crate::utils::error::{AppError, AppResult};

/// One stored fact with its metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Memory {
    /// Unique, monotonically increasing identifier assigned by the store.
    pub id: i64,
    /// The verbatim user-supplied text.
    pub text: String,
    /// Language code inferred from the text at creation time (e.g. "en", "vi").
    pub language: String,
    /// Space-joined tag labels; empty when none were supplied.
    pub tags: String,
    /// Free-form provenance label (which client created the record).
    pub source: String,
    /// UTC creation timestamp, ISO-8601.
    pub created_at: String,
}

impl Memory {
    /// Split the space-joined `tags` column back into individual labels.
    pub fn tag_list(&self) -> Vec<String> {
        self.tags
            .split_whitespace()
            .map(|t| t.to_string())
            .collect()
    }
}

/// A memory paired with its relevance score.
///
/// Scores are on a single scale for all retrieval tiers: higher is
/// better, 0 means no confidence.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoredMemory {
    pub memory: Memory,
    pub score: f64,
}

/// Persistent store of memory records backed by SQLite.
#[derive(Debug, Clone)]
pub struct MemoryStore {
    pool: DbPool,
}

impl MemoryStore {
    /// Create a store from a database instance.
    pub fn new(db: &Database) -> Self {
        Self {
            pool: db.pool().clone(),
        }
    }

    /// Create a store wrapping an existing connection pool.
    pub fn from_pool(pool: DbPool) -> Self {
        Self { pool }
    }

    /// Store a new fact and return its id.
    ///
    /// The text is kept verbatim; its language is inferred. The row
    /// insert and the index update commit as one transaction, so the
    /// index is never visible in a stale state.
    pub fn remember(&self, text: &str, tags: &[&str], source: &str) -> AppResult<i64> {
        if text.trim().is_empty() {
            return Err(AppError::validation("Memory text cannot be empty"));
        }

        let language = language::detect(text);
        let tags_str = tags.join(" ");
        let created_at = Utc::now().to_rfc3339();

        let mut conn = self.get_connection()?;
        // Take the write lock up front: a deferred transaction promotes
        // to a write lock mid-flight, where SQLite reports SQLITE_BUSY
        // without consulting the busy handler.
        let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;
        tx.execute(
            "INSERT INTO memories (text, language, tags, source, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![text, language, tags_str, source, created_at],
        )?;
        let id = tx.last_insert_rowid();
        tx.commit()?;

        Ok(id)
    }

    /// Return up to `limit` records, most recent first.
    ///
    /// Ids are monotonic, so descending id order is creation order.
    pub fn list_recent(&self, limit: usize) -> AppResult<Vec<Memory>> {
        if limit == 0 {
            return Err(AppError::validation("limit must be a positive integer"));
        }

        let conn = self.get_connection()?;
        let mut stmt = conn.prepare(
            "SELECT id, text, language, tags, source, created_at
             FROM memories
             ORDER BY id DESC
             LIMIT ?1",
        )?;

        let rows = stmt
            .query_map(params![limit as i64], row_to_memory)?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(rows)
    }

    /// Query the full-text index and return up to `limit` scored results,
    /// best match first.
    ///
    /// An empty or whitespace-only query yields an empty result, not an
    /// error. A query the index syntax rejects also yields an empty
    /// result (see the lexical ranker), so callers can fall through to
    /// the heuristic matcher.
    pub fn ask(&self, query: &str, limit: usize) -> AppResult<Vec<ScoredMemory>> {
        if query.trim().is_empty() {
            return Ok(Vec::new());
        }
        lexical::search(self, query, limit)
    }

    /// Delete a record and its index entry atomically.
    ///
    /// Deleting a non-existent id is a no-op: the primary purpose is
    /// idempotent cleanup.
    pub fn delete(&self, id: i64) -> AppResult<()> {
        let conn = self.get_connection()?;
        conn.execute("DELETE FROM memories WHERE id = ?1", params![id])?;
        Ok(())
    }

    /// Fetch a single record by id.
    pub fn get(&self, id: i64) -> AppResult<Option<Memory>> {
        let conn = self.get_connection()?;
        let result = conn.query_row(
            "SELECT id, text, language, tags, source, created_at
             FROM memories WHERE id = ?1",
            params![id],
            row_to_memory,
        );

        match result {
            Ok(memory) => Ok(Some(memory)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Total number of stored records.
    pub fn count(&self) -> AppResult<usize> {
        let conn = self.get_connection()?;
        let count: i64 = conn.query_row("SELECT COUNT(*) FROM memories", [], |row| row.get(0))?;
        Ok(count as usize)
    }

    /// Get a connection from the pool
    pub(crate) fn get_connection(
        &self,
    ) -> AppResult<r2d2::PooledConnection<r2d2_sqlite::SqliteConnectionManager>> {
        self.pool
            .get()
            .map_err(|e| AppError::database(format!("Failed to get connection: {}", e)))
    }
}

/// Convert a database row to a Memory
pub(crate) fn row_to_memory(row: &rusqlite::Row) -> rusqlite::Result<Memory> {
    Ok(Memory {
        id: row.get(0)?,
        text: row.get(1)?,
        language: row.get(2)?,
        tags: row.get(3)?,
        source: row.get(4)?,
        created_at: row.get(5)?,
    })
}
