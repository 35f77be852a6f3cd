//! Heuristic Memory Matching
//!
//! A deterministic bag-of-words scorer used when the full-text index
//! finds nothing. It tolerates small vocabulary mismatches the index
//! misses: stop words are stripped from the query, exact and partial
//! token overlap earn points, and a few common categories of personal
//! facts (phone numbers, rooms, meetings, colors, names) earn a topical
//! bonus. All scoring weights live in one named configuration struct so
//! every caller shares the same table.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::services::memory::store::Memory;

/// Stop words removed from the query before scoring. Candidate text keeps
/// all of its tokens so stop words in stored facts still count when echoed
/// as content.
const STOP_WORDS: &[&str] = &[
    "what", "who", "when", "where", "why", "how", "which", "whose", "is", "are", "was", "were",
    "do", "does", "did", "can", "could", "would", "will", "should", "the", "a", "an", "and", "or",
    "but", "in", "on", "at", "to", "for", "of", "with", "by", "from", "up", "down", "out", "off",
    "over", "under", "again", "further", "then", "once", "here", "there", "all", "any", "both",
    "each", "few", "more", "most", "other", "some", "such", "no", "nor", "not", "only", "own",
    "same", "so", "than", "too", "very", "just", "now",
];

/// Topical boost pairs: when the query mentions the first token and the
/// candidate mentions any of the echo tokens, the candidate earns a bonus.
/// These are common categories of personal facts worth privileging.
const TOPIC_BOOSTS: &[(&str, &[&str])] = &[
    ("phone", &["phone", "number"]),
    ("room", &["room"]),
    ("meeting", &["meeting"]),
    ("color", &["color"]),
    ("name", &["name", "called"]),
];

/// Scoring weights for the heuristic matcher.
///
/// The defaults preserve the empirically chosen values this scorer has
/// always used; they are carried here as configuration rather than
/// literals so callers can tune them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HeuristicWeights {
    /// Points per query term found verbatim in the candidate's token set.
    pub exact_match: u32,
    /// Points per query term in a substring relation with a candidate token.
    pub partial_match: u32,
    /// Bonus per matching topical pair (see `TOPIC_BOOSTS`).
    pub topic_boost: u32,
    /// Constant added to every accepted candidate's reported score.
    pub presence_bonus: u32,
    /// Minimum signal score (before the presence bonus) for a candidate
    /// to be accepted as a match.
    pub accept_threshold: u32,
    /// Minimum token length (chars) for partial substring credit, applied
    /// to both sides so tiny tokens cannot fabricate signal.
    pub min_partial_len: usize,
}

impl Default for HeuristicWeights {
    fn default() -> Self {
        Self {
            exact_match: 3,
            partial_match: 1,
            topic_boost: 5,
            presence_bonus: 1,
            accept_threshold: 1,
            min_partial_len: 4,
        }
    }
}

/// Bag-of-words matcher over a bounded window of candidate memories.
#[derive(Debug, Clone)]
pub struct HeuristicMatcher {
    weights: HeuristicWeights,
}

impl HeuristicMatcher {
    /// Create a matcher with the given scoring weights.
    pub fn new(weights: HeuristicWeights) -> Self {
        Self { weights }
    }

    /// Create a matcher with the default scoring table.
    pub fn with_defaults() -> Self {
        Self::new(HeuristicWeights::default())
    }

    /// Returns a reference to the scoring weights.
    pub fn weights(&self) -> &HeuristicWeights {
        &self.weights
    }

    /// Compute the signal score of a candidate text against a query.
    ///
    /// Signal is exact-token overlap, partial substring overlap, and
    /// topical boosts; the presence bonus is not included here.
    pub fn score(&self, query: &str, candidate: &str) -> u32 {
        let query_tokens = tokenize(query);
        let query_terms = content_terms(&query_tokens);
        let candidate_tokens = tokenize(candidate);
        let candidate_set: HashSet<&str> =
            candidate_tokens.iter().map(|s| s.as_str()).collect();

        let mut score = 0u32;

        for term in &query_terms {
            if candidate_set.contains(term.as_str()) {
                score += self.weights.exact_match;
            }
            if char_len(term) >= self.weights.min_partial_len {
                let partial = candidate_tokens.iter().any(|word| {
                    char_len(word) >= self.weights.min_partial_len
                        && (word.contains(term.as_str()) || term.contains(word.as_str()))
                });
                if partial {
                    score += self.weights.partial_match;
                }
            }
        }

        // Topical boosts use the raw query tokens: a boost keyword like
        // "name" must fire even though stop-word stripping never drops it.
        let query_set: HashSet<&str> = query_tokens.iter().map(|s| s.as_str()).collect();
        for (topic, echoes) in TOPIC_BOOSTS {
            if query_set.contains(topic) && echoes.iter().any(|e| candidate_set.contains(e)) {
                score += self.weights.topic_boost;
            }
        }

        score
    }

    /// Find the best-scoring candidate for a query.
    ///
    /// Candidates must be ordered most-recent-first (as returned by
    /// `MemoryStore::list_recent`); ties keep the more recent record.
    /// Returns `None` unless the best candidate's signal score reaches
    /// the accept threshold. The returned score includes the presence
    /// bonus.
    pub fn best_match<'a>(&self, query: &str, candidates: &'a [Memory]) -> Option<(&'a Memory, u32)> {
        let mut best: Option<(&Memory, u32)> = None;

        for memory in candidates {
            let signal = self.score(query, &memory.text);
            match best {
                Some((_, best_signal)) if signal <= best_signal => {}
                _ => best = Some((memory, signal)),
            }
        }

        match best {
            Some((memory, signal)) if signal >= self.weights.accept_threshold => {
                Some((memory, signal + self.weights.presence_bonus))
            }
            _ => None,
        }
    }
}

/// Split text into lowercase word tokens, stripping punctuation.
/// Unicode-aware: alphanumeric runs in any script form tokens.
pub fn tokenize(text: &str) -> Vec<String> {
    text.to_lowercase()
        .split(|c: char| !c.is_alphanumeric())
        .filter(|s| !s.is_empty())
        .map(|s| s.to_string())
        .collect()
}

/// Filter tokens down to content terms: drop stop words and very short
/// tokens that carry no matching signal.
fn content_terms(tokens: &[String]) -> Vec<String> {
    tokens
        .iter()
        .filter(|t| !STOP_WORDS.contains(&t.as_str()) && char_len(t) > 2)
        .cloned()
        .collect()
}

fn char_len(s: &str) -> usize {
    s.chars().count()
}
