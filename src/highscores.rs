//! High score leaderboard
//!
//! Tracks the best finished runs for the lifetime of the process. Nothing is
//! written to disk.

use serde::{Deserialize, Serialize};

/// Maximum number of high scores to keep
pub const MAX_HIGH_SCORES: usize = 10;

/// A single high score entry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HighScoreEntry {
    /// Best score reached during the run
    pub score: i64,
    /// Level the run ended on
    pub level: u32,
}

/// High score leaderboard, sorted descending by score
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

    /// Whether a finished run with this score would get a slot
    pub fn qualifies(&self, score: i64) -> bool {
        self.potential_rank(score).is_some()
    }

    /// 1-based slot a run would take. Runs that scored nothing never place,
    /// and ties sort below existing entries.
    pub fn potential_rank(&self, score: i64) -> Option<usize> {
        if score <= 0 {
            return None;
        }
        let above = self.entries.partition_point(|e| e.score >= score);
        (above < MAX_HIGH_SCORES).then_some(above + 1)
    }

    /// Add a finished run (if it qualifies).
    /// Returns the rank achieved (1-indexed) or None if it didn't qualify
    pub fn add_score(&mut self, score: i64, level: u32) -> Option<usize> {
        let rank = self.potential_rank(score)?;
        self.entries.insert(rank - 1, HighScoreEntry { score, level });
        self.entries.truncate(MAX_HIGH_SCORES);
        Some(rank)
    }

    /// Check if the leaderboard is empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Get the top score (if any)
    pub fn top_score(&self) -> Option<i64> {
        self.entries.first().map(|e| e.score)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_and_negative_never_qualify() {
        let mut scores = HighScores::new();
        assert_eq!(scores.add_score(0, 1), None);
        assert_eq!(scores.add_score(-40, 1), None);
        assert!(scores.is_empty());
    }

    #[test]
    fn test_sorted_insert() {
        let mut scores = HighScores::new();
        assert_eq!(scores.add_score(100, 1), Some(1));
        assert_eq!(scores.add_score(300, 2), Some(1));
        assert_eq!(scores.add_score(200, 1), Some(2));
        let order: Vec<i64> = scores.entries.iter().map(|e| e.score).collect();
        assert_eq!(order, vec![300, 200, 100]);
        assert_eq!(scores.top_score(), Some(300));
    }

    #[test]
    fn test_tie_ranks_below_existing() {
        let mut scores = HighScores::new();
        scores.add_score(300, 2);
        scores.add_score(200, 1);
        assert_eq!(scores.add_score(200, 3), Some(3));
        assert_eq!(scores.entries[1].level, 1);
        assert_eq!(scores.entries[2].level, 3);
    }

    #[test]
    fn test_full_board_trims() {
        let mut scores = HighScores::new();
        for i in 1..=MAX_HIGH_SCORES as i64 {
            scores.add_score(i * 10, 1);
        }
        // Ties with the lowest entry don't make the cut
        assert!(!scores.qualifies(10));
        assert_eq!(scores.potential_rank(55), Some(6));
        assert_eq!(scores.add_score(1000, 3), Some(1));
        assert_eq!(scores.entries.len(), MAX_HIGH_SCORES);
        assert_eq!(scores.entries.last().map(|e| e.score), Some(20));
    }
}
