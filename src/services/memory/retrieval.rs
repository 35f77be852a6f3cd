//! Tiered Retrieval
//!
//! Orchestrates the retrieval paths over the memory store so a question
//! always gets the best available answer. The tiers degrade in order:
//! full-text BM25 ranking, then the heuristic matcher over a recent
//! window, then the single most recent record as a last resort. Each
//! answer carries a tier label so callers can tell a ranked hit from a
//! guess.

use serde::{Deserialize, Serialize};

use crate::services::memory::heuristic::{HeuristicMatcher, HeuristicWeights};
use crate::services::memory::store::{MemoryStore, ScoredMemory};
use crate::utils::error::AppResult;

/// Which retrieval path produced an answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConfidenceTier {
    /// Full-text index hit, BM25-ranked.
    Lexical,
    /// Bag-of-words heuristic match over the recent window.
    Heuristic,
    /// Nothing matched; the most recent record is offered as a guess.
    LastResort,
    /// The store is empty or the query produced nothing at all.
    NoMatch,
}

impl std::fmt::Display for ConfidenceTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            ConfidenceTier::Lexical => "lexical",
            ConfidenceTier::Heuristic => "heuristic",
            ConfidenceTier::LastResort => "last_resort",
            ConfidenceTier::NoMatch => "no_match",
        };
        write!(f, "{}", label)
    }
}

/// The result of a retrieval: scored memories plus the tier that
/// produced them. `results` is empty exactly when `tier` is `NoMatch`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetrievalOutcome {
    pub results: Vec<ScoredMemory>,
    pub tier: ConfidenceTier,
}

impl RetrievalOutcome {
    fn no_match() -> Self {
        Self {
            results: Vec::new(),
            tier: ConfidenceTier::NoMatch,
        }
    }
}

/// Tuning knobs for the retrieval engine.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetrievalConfig {
    /// How many recent records the heuristic tier considers.
    pub recent_window: usize,
    /// Scoring table for the heuristic tier.
    pub weights: HeuristicWeights,
}

impl Default for RetrievalConfig {
    fn default() -> Self {
        Self {
            recent_window: 20,
            weights: HeuristicWeights::default(),
        }
    }
}

/// Retrieval orchestrator over a memory store.
#[derive(Debug, Clone)]
pub struct RetrievalEngine {
    store: MemoryStore,
    matcher: HeuristicMatcher,
    config: RetrievalConfig,
}

impl RetrievalEngine {
    /// Create an engine with the default configuration.
    pub fn new(store: MemoryStore) -> Self {
        Self::with_config(store, RetrievalConfig::default())
    }

    /// Create an engine with explicit tuning.
    pub fn with_config(store: MemoryStore, config: RetrievalConfig) -> Self {
        let matcher = HeuristicMatcher::new(config.weights.clone());
        Self {
            store,
            matcher,
            config,
        }
    }

    /// Access the underlying store.
    pub fn store(&self) -> &MemoryStore {
        &self.store
    }

    /// Answer a question from stored memories.
    ///
    /// Tries the full-text index first; on no hits, scores a window of
    /// recent records with the heuristic matcher; on no accepted match,
    /// falls back to the most recent record at zero confidence. An empty
    /// store (or an empty query over an empty store) yields `NoMatch`.
    pub fn answer(&self, query: &str, limit: usize) -> AppResult<RetrievalOutcome> {
        let lexical = self.store.ask(query, limit)?;
        if !lexical.is_empty() {
            return Ok(RetrievalOutcome {
                results: lexical,
                tier: ConfidenceTier::Lexical,
            });
        }

        if self.store.count()? == 0 {
            return Ok(RetrievalOutcome::no_match());
        }

        tracing::debug!("No full-text hits, trying heuristic match");
        let recent = self.store.list_recent(self.config.recent_window)?;

        if !query.trim().is_empty() {
            if let Some((memory, score)) = self.matcher.best_match(query, &recent) {
                return Ok(RetrievalOutcome {
                    results: vec![ScoredMemory {
                        memory: memory.clone(),
                        score: score as f64,
                    }],
                    tier: ConfidenceTier::Heuristic,
                });
            }
        }

        // Last resort: surface the newest record at zero confidence so
        // the caller still has something to show.
        tracing::debug!("No heuristic match, falling back to most recent record");
        match recent.into_iter().next() {
            Some(memory) => Ok(RetrievalOutcome {
                results: vec![ScoredMemory { memory, score: 0.0 }],
                tier: ConfidenceTier::LastResort,
            }),
            None => Ok(RetrievalOutcome::no_match()),
        }
    }
}
