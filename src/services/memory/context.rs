//! Conversation Context
//!
//! A bounded rolling window of recent conversation turns. This is
//! ephemeral session state, never persisted; the memory store holds
//! anything worth keeping.

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

const DEFAULT_CAPACITY: usize = 10;

/// One user/assistant exchange.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Turn {
    pub user: String,
    pub assistant: String,
}

/// Rolling window of the most recent conversation turns.
///
/// Pushing beyond capacity silently drops the oldest turn.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConversationContext {
    turns: VecDeque<Turn>,
    capacity: usize,
}

impl Default for ConversationContext {
    fn default() -> Self {
        Self::new()
    }
}

impl ConversationContext {
    /// Create a context with the default window size.
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    /// Create a context holding at most `capacity` turns. A capacity of
    /// zero keeps nothing.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            turns: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Record one exchange, evicting the oldest if the window is full.
    pub fn push_turn(&mut self, user: impl Into<String>, assistant: impl Into<String>) {
        if self.capacity == 0 {
            return;
        }
        if self.turns.len() == self.capacity {
            self.turns.pop_front();
        }
        self.turns.push_back(Turn {
            user: user.into(),
            assistant: assistant.into(),
        });
    }

    /// The retained turns, oldest first.
    pub fn turns(&self) -> impl Iterator<Item = &Turn> {
        self.turns.iter()
    }

    pub fn len(&self) -> usize {
        self.turns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }

    /// Drop all retained turns.
    pub fn clear(&mut self) {
        self.turns.clear();
    }
}
