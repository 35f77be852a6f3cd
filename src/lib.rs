//! mnemo — a personal memory store.
//!
//! Store short facts ("remember that my sister's number is 555-1234")
//! and retrieve them later by asking questions. Persistence is SQLite
//! with an FTS5 full-text index; retrieval degrades gracefully from
//! BM25 ranking through a heuristic matcher to a most-recent guess, and
//! every answer is labeled with the tier that produced it.
//!
//! ```no_run
//! use mnemo::{Database, MemoryStore, RetrievalEngine};
//!
//! # fn main() -> mnemo::AppResult<()> {
//! let db = Database::new()?;
//! let store = MemoryStore::new(&db);
//! store.remember("the wifi password is hunter2", &["home"], "cli")?;
//!
//! let engine = RetrievalEngine::new(store);
//! let outcome = engine.answer("what is the wifi password?", 5)?;
//! println!("{}: {:?}", outcome.tier, outcome.results);
//! # Ok(())
//! # }
//! ```

pub mod services;
pub mod storage;
pub mod utils;

pub use services::memory::{
    ConfidenceTier, ConversationContext, HeuristicMatcher, HeuristicWeights, Memory, MemoryStore,
    RetrievalConfig, RetrievalEngine, RetrievalOutcome, ScoredMemory, Turn,
};
pub use storage::database::{Database, DbPool};
pub use utils::error::{AppError, AppResult};
