//! Lexical Ranking
//!
//! BM25-ranked full-text search over the memories index. Queries are
//! passed to FTS5 verbatim, so bare terms, quoted phrases, and boolean
//! operators all work. A query the index syntax rejects degrades to an
//! empty result instead of an error, which lets callers fall through to
//! the heuristic matcher.

use rusqlite::params;

use crate::services::memory::store::{row_to_memory, MemoryStore, ScoredMemory};
use crate::utils::error::AppResult;

/// Run a full-text query and return up to `limit` results, best first.
///
/// SQLite's `bm25()` reports lower-is-better negative values; scores are
/// negated here so every retrieval path shares one higher-is-better
/// scale with 0 meaning no confidence. Ranking ties break toward the
/// more recent record.
pub fn search(store: &MemoryStore, query: &str, limit: usize) -> AppResult<Vec<ScoredMemory>> {
    let conn = store.get_connection()?;

    let mut stmt = conn.prepare(
        "SELECT m.id, m.text, m.language, m.tags, m.source, m.created_at,
                bm25(memories_fts) AS rank
         FROM memories_fts
         JOIN memories m ON m.id = memories_fts.rowid
         WHERE memories_fts MATCH ?1
         ORDER BY rank ASC, m.id DESC
         LIMIT ?2",
    )?;

    let result = stmt.query_map(params![query, limit as i64], |row| {
        let memory = row_to_memory(row)?;
        let rank: f64 = row.get(6)?;
        Ok(ScoredMemory {
            memory,
            score: -rank,
        })
    });

    // FTS5 reports malformed query syntax (unbalanced quotes, stray
    // operators) as an execution error. That is a property of the user's
    // input, not a storage failure, so absorb it and let the caller's
    // fallback chain take over.
    match result {
        Ok(rows) => match rows.collect::<Result<Vec<_>, _>>() {
            Ok(scored) => Ok(scored),
            Err(e) => {
                tracing::warn!("Full-text query failed, returning no results: {}", e);
                Ok(Vec::new())
            }
        },
        Err(e) => {
            tracing::warn!("Full-text query failed, returning no results: {}", e);
            Ok(Vec::new())
        }
    }
}
