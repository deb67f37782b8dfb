//! Leaderboard
//!
//! Best scores across all players, highest first, persisted through a
//! `KeyValueStore`.

use serde::{Deserialize, Serialize};

use crate::consts::LEADERBOARD_SIZE;
use crate::persistence::{KeyValueStore, StoreError, load_json, save_json};

/// A single leaderboard entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaderboardEntry {
    pub name: String,
    pub score: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Leaderboard {
    pub entries: Vec<LeaderboardEntry>,
}

impl Leaderboard {
    pub const STORAGE_KEY: &'static str = "egg_catcher_leaderboard";

    pub fn new() -> Self {
        Self::default()
    }

    /// Check if a score would make the board
    pub fn qualifies(&self, score: u64) -> bool {
        if self.entries.len() < LEADERBOARD_SIZE {
            return true;
        }
        self.entries.last().is_none_or(|e| score > e.score)
    }

    /// Rank a score would achieve (1-indexed, None if it doesn't qualify).
    /// Ties rank below existing entries.
    pub fn potential_rank(&self, score: u64) -> Option<usize> {
        if !self.qualifies(score) {
            return None;
        }
        let pos = self.entries.iter().position(|e| score > e.score);
        Some(pos.unwrap_or(self.entries.len()) + 1)
    }

    /// Insert a score and trim to size. Returns the rank achieved, if any.
    pub fn add_score(&mut self, name: &str, score: u64) -> Option<usize> {
        let rank = self.potential_rank(score)?;
        self.entries.insert(
            rank - 1,
            LeaderboardEntry {
                name: name.to_string(),
                score,
            },
        );
        self.entries.truncate(LEADERBOARD_SIZE);
        Some(rank)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn top_score(&self) -> Option<u64> {
        self.entries.first().map(|e| e.score)
    }

    /// Load from a store, starting fresh when absent or unreadable
    pub fn load(store: &impl KeyValueStore) -> Self {
        match load_json::<Leaderboard>(store, Self::STORAGE_KEY) {
            Some(mut board) => {
                log::info!("Loaded {} leaderboard entries", board.entries.len());
                board.entries.sort_by(|a, b| b.score.cmp(&a.score));
                board.entries.truncate(LEADERBOARD_SIZE);
                board
            }
            None => Self::new(),
        }
    }

    pub fn save(&self, store: &mut impl KeyValueStore) -> Result<(), StoreError> {
        save_json(store, Self::STORAGE_KEY, self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::MemoryStore;

    fn names(board: &Leaderboard) -> Vec<&str> {
        board.entries.iter().map(|e| e.name.as_str()).collect()
    }

    #[test]
    fn test_keeps_top_five_descending() {
        let mut board = Leaderboard::new();
        for (i, score) in [30, 10, 50, 20, 40, 5, 60].into_iter().enumerate() {
            board.add_score(&format!("p{}", i), score);
        }
        let scores: Vec<u64> = board.entries.iter().map(|e| e.score).collect();
        assert_eq!(scores, vec![60, 50, 40, 30, 20]);
        assert_eq!(board.top_score(), Some(60));
    }

    #[test]
    fn test_ties_rank_below_existing() {
        let mut board = Leaderboard::new();
        board.add_score("first", 10);
        assert_eq!(board.add_score("second", 10), Some(2));
        assert_eq!(names(&board), vec!["first", "second"]);
    }

    #[test]
    fn test_full_board_rejects_low_scores() {
        let mut board = Leaderboard::new();
        for score in [50, 40, 30, 20, 10] {
            board.add_score("p", score);
        }
        assert!(!board.qualifies(10));
        assert_eq!(board.add_score("late", 10), None);
        assert_eq!(board.potential_rank(45), Some(2));
        assert_eq!(board.add_score("late", 45), Some(2));
        assert_eq!(board.entries.len(), LEADERBOARD_SIZE);
        assert_eq!(board.entries.last().map(|e| e.score), Some(20));
    }

    #[test]
    fn test_store_roundtrip() {
        let mut store = MemoryStore::new();
        assert!(Leaderboard::load(&store).is_empty());
        let mut board = Leaderboard::new();
        board.add_score("ann", 12);
        board.save(&mut store).unwrap();
        assert_eq!(Leaderboard::load(&store), board);
    }
}
