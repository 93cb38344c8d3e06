//! Leaderboard
//!
//! Top 10 session scores, persisted through `persistence`.

use serde::{Deserialize, Serialize};

use crate::persistence;
use crate::sim::Theme;

/// Maximum number of high scores to keep
pub const MAX_HIGH_SCORES: usize = 10;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HighScoreEntry {
    pub score: u64,
    /// Theme the session was played on
    pub theme: Theme,
    /// Wall-clock time (ms since the Unix epoch) the session ended
    pub timestamp_ms: f64,
}

/// Entries sorted by score, highest first
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HighScores {
    pub entries: Vec<HighScoreEntry>,
}

impl HighScores {
    const STORAGE_KEY: &'static str = "fruit_slash_highscores";

    pub fn new() -> Self {
        Self::default()
    }

    /// Zero never qualifies; otherwise the board must have room or the
    /// score must beat the lowest entry
    pub fn qualifies(&self, score: u64) -> bool {
        if score == 0 {
            return false;
        }
        if self.entries.len() < MAX_HIGH_SCORES {
            return true;
        }
        self.entries.last().is_none_or(|e| score > e.score)
    }

    /// 1-based rank the score would take, ties placing below existing entries
    pub fn potential_rank(&self, score: u64) -> Option<usize> {
        if !self.qualifies(score) {
            return None;
        }
        let pos = self.entries.iter().position(|e| score > e.score);
        Some(pos.unwrap_or(self.entries.len()) + 1)
    }

    /// Insert a score, returning its rank if it made the board
    pub fn add_score(&mut self, score: u64, theme: Theme, timestamp_ms: f64) -> Option<usize> {
        let rank = self.potential_rank(score)?;
        self.entries.insert(
            rank - 1,
            HighScoreEntry {
                score,
                theme,
                timestamp_ms,
            },
        );
        self.entries.truncate(MAX_HIGH_SCORES);
        Some(rank)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn top_score(&self) -> Option<u64> {
        self.entries.first().map(|e| e.score)
    }

    /// Load the stored board; a missing or corrupt board starts fresh
    pub fn load() -> Self {
        match persistence::load_json::<HighScores>(Self::STORAGE_KEY) {
            Ok(Some(mut scores)) => {
                scores.entries.sort_by(|a, b| b.score.cmp(&a.score));
                scores.entries.truncate(MAX_HIGH_SCORES);
                log::info!("Loaded {} high scores", scores.entries.len());
                scores
            }
            Ok(None) => Self::new(),
            Err(e) => {
                log::warn!("Discarding stored high scores: {e:#}");
                Self::new()
            }
        }
    }

    pub fn save(&self) -> anyhow::Result<()> {
        persistence::save_json(Self::STORAGE_KEY, self)?;
        log::info!("High scores saved ({} entries)", self.entries.len());
        Ok(())
    }
}
