//! SQLite Database
//!
//! Embedded database for persistent memory storage using rusqlite with
//! r2d2 connection pooling. The schema consists of one `memories` table
//! and one `memories_fts` FTS5 index kept in sync by triggers, so an
//! insert or delete and its index update always commit as one atomic
//! unit and a reader never observes the index out of sync with the rows.

use std::path::Path;

use r2d2::Pool;
use r2d2_sqlite::SqliteConnectionManager;

use crate::utils::error::{AppError, AppResult};
use crate::utils::paths::{database_path, ensure_dir};

/// Type alias for the connection pool
pub type DbPool = Pool<SqliteConnectionManager>;

/// Database service owning the SQLite connection pool
#[derive(Clone)]
pub struct Database {
    pool: DbPool,
}

impl Database {
    /// Create a database from an existing connection pool.
    pub fn from_pool(pool: DbPool) -> Self {
        Self { pool }
    }

    /// Create an in-memory database for testing.
    ///
    /// Uses an in-memory SQLite database with the same schema as the
    /// production database. The pool is capped at one connection so all
    /// callers share the same in-memory state.
    pub fn new_in_memory() -> AppResult<Self> {
        let manager = SqliteConnectionManager::memory();
        let pool = Pool::builder()
            .max_size(1)
            .build(manager)
            .map_err(|e| AppError::database(format!("Failed to create connection pool: {}", e)))?;

        let db = Self { pool };
        db.init_schema()?;
        Ok(db)
    }

    /// Create a new database instance at the default per-user path
    /// (or `MNEMO_DB_PATH` when set) with connection pooling.
    pub fn new() -> AppResult<Self> {
        let db_path = database_path()?;
        Self::new_with_path(&db_path)
    }

    /// Create a new database instance backed by the given file
    pub fn new_with_path(db_path: &Path) -> AppResult<Self> {
        if let Some(parent) = db_path.parent() {
            ensure_dir(parent)?;
        }

        // Writers from different pooled connections contend on the file
        // lock. WAL lets readers proceed alongside a writer, and the
        // busy timeout makes lock contention a short wait instead of an
        // immediate SQLITE_BUSY error.
        let manager = SqliteConnectionManager::file(db_path).with_init(|conn| {
            conn.query_row("PRAGMA journal_mode=WAL", [], |_row| Ok(()))?;
            conn.busy_timeout(std::time::Duration::from_secs(5))
        });
        let pool = Pool::builder()
            .max_size(10)
            .build(manager)
            .map_err(|e| AppError::database(format!("Failed to create connection pool: {}", e)))?;

        let db = Self { pool };
        db.init_schema()?;
        Ok(db)
    }

    /// Initialize the database schema
    fn init_schema(&self) -> AppResult<()> {
        let conn = self
            .pool
            .get()
            .map_err(|e| AppError::database(format!("Failed to get connection: {}", e)))?;

        // Create memories table
        conn.execute(
            "CREATE TABLE IF NOT EXISTS memories (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                text TEXT NOT NULL,
                language TEXT NOT NULL,
                tags TEXT NOT NULL DEFAULT '',
                source TEXT NOT NULL DEFAULT '',
                created_at TEXT NOT NULL
            )",
            [],
        )?;

        // FTS5 external-content index over the searchable columns.
        // unicode61 with diacritics removal so that, e.g., Vietnamese
        // text matches with or without accent marks.
        conn.execute_batch(
            "CREATE VIRTUAL TABLE IF NOT EXISTS memories_fts USING fts5(
                text, tags, source, language,
                content='memories', content_rowid='id',
                tokenize='unicode61 remove_diacritics 2'
            );",
        )?;

        // Triggers keep the index transactionally in sync with the table.
        // Records are immutable once created, so only insert and delete
        // need mirroring.
        conn.execute_batch(
            "CREATE TRIGGER IF NOT EXISTS memories_ai AFTER INSERT ON memories BEGIN
                INSERT INTO memories_fts(rowid, text, tags, source, language)
                VALUES (new.id, new.text, new.tags, new.source, new.language);
            END;
            CREATE TRIGGER IF NOT EXISTS memories_ad AFTER DELETE ON memories BEGIN
                INSERT INTO memories_fts(memories_fts, rowid, text, tags, source, language)
                VALUES ('delete', old.id, old.text, old.tags, old.source, old.language);
            END;",
        )?;

        Ok(())
    }

    /// Get access to the connection pool
    pub fn pool(&self) -> &DbPool {
        &self.pool
    }
}

impl std::fmt::Debug for Database {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Database").finish()
    }
}
