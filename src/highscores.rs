//! High score leaderboard system
//!
//! Persisted as JSON, tracks top 10 scores.

use std::path::Path;
use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::session::SessionEnd;

/// Maximum number of high scores to keep
pub const MAX_HIGH_SCORES: usize = 10;

/// Name recorded until the player enters one
pub const PLACEHOLDER_NAME: &str = "<ENTER NAME>";

#[derive(Debug, Error)]
pub enum HighScoreError {
    #[error("failed to access high score file: {0}")]
    Io(#[from] std::io::Error),
    #[error("malformed high score file: {0}")]
    Json(#[from] serde_json::Error),
}

/// A single high score entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HighScoreEntry {
    /// Player's score
    pub score: u64,
    /// Player's name
    pub name: String,
    /// Unix timestamp (ms) when achieved
    pub timestamp: f64,
}

/// High score leaderboard
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct HighScores {
    pub entries: Vec<HighScoreEntry>,
}

impl HighScores {
    /// Create empty leaderboard
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Check if a score qualifies for the leaderboard (ties with the lowest
    /// entry qualify)
    pub fn qualifies(&self, score: u64) -> bool {
        if score == 0 {
            return false;
        }
        if self.entries.len() < MAX_HIGH_SCORES {
            return true;
        }
        self.entries.last().map(|e| score >= e.score).unwrap_or(true)
    }

    /// Get the rank a score would achieve (1-indexed, None if doesn't qualify)
    pub fn potential_rank(&self, score: u64) -> Option<usize> {
        if !self.qualifies(score) {
            return None;
        }
        let rank = self.entries.iter().position(|e| score >= e.score);
        Some(rank.unwrap_or(self.entries.len()) + 1)
    }

    /// Add a new score to the leaderboard (if it qualifies). A new score ranks
    /// above older entries with the same score.
    /// Returns the rank achieved (1-indexed) or None if didn't qualify
    pub fn add_score(&mut self, score: u64, name: &str, timestamp: f64) -> Option<usize> {
        let rank = self.potential_rank(score)?;
        self.entries.insert(
            rank - 1,
            HighScoreEntry {
                score,
                name: name.to_string(),
                timestamp,
            },
        );

        // Trim to max size
        self.entries.truncate(MAX_HIGH_SCORES);

        Some(rank)
    }

    /// Check if the leaderboard is empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Get the top score (if any)
    pub fn top_score(&self) -> Option<u64> {
        self.entries.first().map(|e| e.score)
    }

    /// Load high scores from a JSON file; a missing file is an empty board
    pub fn load(path: &Path) -> Result<Self, HighScoreError> {
        if !path.exists() {
            log::info!("No high scores at {}, starting fresh", path.display());
            return Ok(Self::new());
        }
        let json = std::fs::read_to_string(path)?;
        let mut scores: HighScores = serde_json::from_str(&json)?;
        scores.entries.sort_by(|a, b| b.score.cmp(&a.score));
        scores.entries.truncate(MAX_HIGH_SCORES);
        log::info!("Loaded {} high scores", scores.entries.len());
        Ok(scores)
    }

    /// Save high scores as JSON
    pub fn save(&self, path: &Path) -> Result<(), HighScoreError> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        log::info!("High scores saved ({} entries)", self.entries.len());
        Ok(())
    }
}

impl SessionEnd for HighScores {
    fn game_finished(&mut self, final_score: u64) {
        match self.add_score(final_score, PLACEHOLDER_NAME, now_millis()) {
            Some(rank) => log::info!("New high score {} at rank {}", final_score, rank),
            None => log::info!("Score {} did not make the leaderboard", final_score),
        }
    }
}

/// Milliseconds since the Unix epoch (0 if the clock is before it)
fn now_millis() -> f64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as f64)
        .unwrap_or(0.0)
}
