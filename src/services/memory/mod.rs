//! Memory Service
//!
//! A personal memory system: users store short facts and later retrieve
//! them by asking questions. Storage is a SQLite table with an FTS5
//! index kept in sync by triggers; retrieval is tiered, degrading from
//! BM25-ranked full-text search to a heuristic bag-of-words matcher to
//! a most-recent-record guess.

pub mod context;
pub mod heuristic;
pub mod language;
pub mod lexical;
pub mod retrieval;
pub mod store;

pub use context::{ConversationContext, Turn};
pub use heuristic::{HeuristicMatcher, HeuristicWeights};
pub use retrieval::{ConfidenceTier, RetrievalConfig, RetrievalEngine, RetrievalOutcome};
pub use store::{Memory, MemoryStore, ScoredMemory};
