//! Session high score
//!
//! Kept in memory for the lifetime of the program. Only ever raised, and only
//! when a run ends (win, loss or abandonment).

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HighScore {
    best: u64,
}

impl HighScore {
    pub fn new() -> Self {
        Self { best: 0 }
    }

    pub fn get(&self) -> u64 {
        self.best
    }

    /// Check if a score would set a new high score
    pub fn qualifies(&self, score: u64) -> bool {
        score > self.best
    }

    /// Record a finished run's score
    /// Returns true if it became the new high score
    pub fn commit(&mut self, score: u64) -> bool {
        if !self.qualifies(score) {
            return false;
        }
        self.best = score;
        true
    }
}
