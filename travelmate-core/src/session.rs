//! In-memory session history
//!
//! An explicit, caller-owned store: the orchestrator receives it by mutable
//! reference instead of reaching into framework-global state. Lifetime is the
//! session; nothing is persisted.

use crate::models::Turn;
use serde::{Deserialize, Serialize};

/// Ordered list of completed exchanges, oldest first
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ChatSession {
    turns: Vec<Turn>,
}

impl ChatSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a completed turn; insertion order is display order
    pub fn push(&mut self, turn: Turn) {
        self.turns.push(turn);
    }

    /// Drop the whole history
    pub fn clear(&mut self) {
        self.turns.clear();
    }

    pub fn turns(&self) -> &[Turn] {
        &self.turns
    }

    pub fn last(&self) -> Option<&Turn> {
        self.turns.last()
    }

    pub fn len(&self) -> usize {
        self.turns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }
}
