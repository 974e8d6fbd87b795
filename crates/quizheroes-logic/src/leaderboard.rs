//! Leaderboard ranking and best-score consolidation.
//!
//! A leaderboard is an ordered view over score entries: sorted by score
//! descending with a *stable* sort, so entries tied on score keep their
//! insertion order. The ordering is derived, never persisted — boards are
//! rebuilt from storage rows via [`Leaderboard::from_entries`] and kept
//! sorted incrementally from there.
//!
//! Best-score boards hold at most one current entry per player;
//! [`Leaderboard::consolidate`] maintains that invariant with
//! update-or-add semantics that never lower a recorded score.
//!
//! Ranking is dense competition ranking: players tied on score share a
//! rank, and the sequence skips numbers after a tie group (scores
//! `[100, 90, 90, 80]` rank `1, 2, 2, 4`).

use serde::{Deserialize, Serialize};

/// What a leaderboard measures. Parsed case-insensitively from the stored
/// category tag; unrecognized tags keep the raw value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Category {
    Score,
    Time,
    CardsCollected,
    Stars,
    CompletedLevels,
    Other(String),
}

impl Category {
    pub fn parse(raw: &str) -> Self {
        match raw.to_ascii_lowercase().as_str() {
            "score" => Self::Score,
            "time" => Self::Time,
            "cards_collected" => Self::CardsCollected,
            "stars" => Self::Stars,
            "completed_levels" => Self::CompletedLevels,
            _ => Self::Other(raw.to_string()),
        }
    }

    /// Human description for board headers.
    pub fn description(&self) -> &str {
        match self {
            Self::Score => "Highest score",
            Self::Time => "Fastest time",
            Self::CardsCollected => "Cards collected",
            Self::Stars => "Stars earned",
            Self::CompletedLevels => "Levels completed",
            Self::Other(raw) => raw,
        }
    }

    /// Display form of a score under this category: times as `m:ss`,
    /// stars with a star mark, everything else a plain number.
    pub fn format_score(&self, score: u32) -> String {
        match self {
            Self::Time => format!("{}:{:02}", score / 60, score % 60),
            Self::Stars => format!("{} ★", score),
            _ => score.to_string(),
        }
    }
}

/// One score entry. `entry_id` 0 means not yet assigned by storage.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LeaderboardEntry {
    pub entry_id: u64,
    pub leaderboard_id: u64,
    pub player_id: u64,
    /// Cached display name so boards render without a player lookup.
    pub player_name: String,
    pub score: u32,
    /// Caller-supplied timestamp (unix seconds); the engine owns no clock.
    pub date: i64,
}

/// Ordered score board. Entries stay sorted by score descending at all
/// times; mutation goes through the methods below.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Leaderboard {
    pub leaderboard_id: u64,
    /// Level this board belongs to; `None` for the global board.
    pub level_id: Option<u64>,
    /// Raw category tag; see [`Category::parse`].
    pub category: String,
    pub name: String,
    entries: Vec<LeaderboardEntry>,
}

impl Leaderboard {
    pub fn new(
        leaderboard_id: u64,
        level_id: Option<u64>,
        category: impl Into<String>,
        name: impl Into<String>,
    ) -> Self {
        Self {
            leaderboard_id,
            level_id,
            category: category.into(),
            name: name.into(),
            entries: Vec::new(),
        }
    }

    /// Build a board from entries loaded out of storage, restoring the
    /// sorted order. The sort is stable: equal scores keep load order.
    pub fn from_entries(
        leaderboard_id: u64,
        level_id: Option<u64>,
        category: impl Into<String>,
        name: impl Into<String>,
        entries: Vec<LeaderboardEntry>,
    ) -> Self {
        let mut board = Self {
            leaderboard_id,
            level_id,
            category: category.into(),
            name: name.into(),
            entries,
        };
        board.resort();
        board
    }

    pub fn category(&self) -> Category {
        Category::parse(&self.category)
    }

    /// Global boards span all levels.
    pub fn is_global(&self) -> bool {
        self.level_id.is_none()
    }

    /// Entries in rank order (score descending, ties in insertion order).
    pub fn entries(&self) -> &[LeaderboardEntry] {
        &self.entries
    }

    pub fn entry_count(&self) -> usize {
        self.entries.len()
    }

    /// Append an entry and restore the order.
    pub fn add_entry(&mut self, mut entry: LeaderboardEntry) {
        entry.leaderboard_id = self.leaderboard_id;
        self.entries.push(entry);
        self.resort();
    }

    /// Remove an entry by id. Returns whether anything was removed.
    pub fn remove_entry(&mut self, entry_id: u64) -> bool {
        let before = self.entries.len();
        self.entries.retain(|e| e.entry_id != entry_id);
        self.entries.len() != before
    }

    /// Record a score for a player, keeping only their best.
    ///
    /// Inserts a new entry when the player has none; replaces score and
    /// timestamp when the new score is strictly better; otherwise a
    /// no-op. Never lowers a recorded score, so replaying an old session
    /// result is safe. Returns `true` when the board changed.
    pub fn consolidate(
        &mut self,
        player_id: u64,
        player_name: &str,
        score: u32,
        date: i64,
    ) -> bool {
        match self.entries.iter().position(|e| e.player_id == player_id) {
            Some(idx) => {
                if score > self.entries[idx].score {
                    self.entries[idx].score = score;
                    self.entries[idx].date = date;
                    self.resort();
                    true
                } else {
                    false
                }
            }
            None => {
                self.add_entry(LeaderboardEntry {
                    entry_id: 0,
                    leaderboard_id: self.leaderboard_id,
                    player_id,
                    player_name: player_name.to_string(),
                    score,
                    date,
                });
                true
            }
        }
    }

    /// Dense competition rank: 1 + the number of entries with a strictly
    /// greater score than the player's best. `None` if the player has no
    /// entry.
    pub fn rank(&self, player_id: u64) -> Option<u32> {
        let best = self.player_best_score(player_id)?;
        let above = self.entries.iter().filter(|e| e.score > best).count();
        Some(above as u32 + 1)
    }

    /// The player's best recorded score, or `None` if absent.
    pub fn player_best_score(&self, player_id: u64) -> Option<u32> {
        self.entries
            .iter()
            .filter(|e| e.player_id == player_id)
            .map(|e| e.score)
            .max()
    }

    /// The first `min(limit, len)` entries; a non-positive limit yields
    /// an empty slice.
    pub fn top_entries(&self, limit: i32) -> &[LeaderboardEntry] {
        if limit <= 0 {
            return &[];
        }
        let count = (limit as usize).min(self.entries.len());
        &self.entries[..count]
    }

    /// Best score on the board, 0 when empty.
    pub fn top_score(&self) -> u32 {
        self.entries.first().map(|e| e.score).unwrap_or(0)
    }

    // Vec::sort_by is stable, which is what gives ties their documented
    // insertion-order tie-break.
    fn resort(&mut self) {
        self.entries.sort_by(|a, b| b.score.cmp(&a.score));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(player_id: u64, name: &str, score: u32) -> LeaderboardEntry {
        LeaderboardEntry {
            entry_id: player_id,
            leaderboard_id: 0,
            player_id,
            player_name: name.into(),
            score,
            date: 1_700_000_000,
        }
    }

    fn board_with_ties() -> Leaderboard {
        let mut board = Leaderboard::new(1, None, "score", "Global");
        board.add_entry(entry(1, "A", 100));
        board.add_entry(entry(2, "B", 90));
        board.add_entry(entry(3, "C", 90));
        board.add_entry(entry(4, "D", 80));
        board
    }

    #[test]
    fn entries_sorted_descending() {
        let board = board_with_ties();
        let scores: Vec<u32> = board.entries().iter().map(|e| e.score).collect();
        assert_eq!(scores, vec![100, 90, 90, 80]);
    }

    #[test]
    fn ties_keep_insertion_order() {
        let board = board_with_ties();
        assert_eq!(board.entries()[1].player_name, "B");
        assert_eq!(board.entries()[2].player_name, "C");
    }

    #[test]
    fn dense_competition_ranks() {
        let board = board_with_ties();
        assert_eq!(board.rank(1), Some(1));
        assert_eq!(board.rank(2), Some(2));
        assert_eq!(board.rank(3), Some(2));
        assert_eq!(board.rank(4), Some(4));
    }

    #[test]
    fn rank_of_absent_player_is_none() {
        let board = board_with_ties();
        assert_eq!(board.rank(99), None);
    }

    #[test]
    fn consolidate_inserts_then_only_improves() {
        let mut board = Leaderboard::new(1, None, "score", "Global");
        assert!(board.consolidate(7, "P", 50, 10));
        assert_eq!(board.player_best_score(7), Some(50));

        // Worse score is a no-op, idempotently.
        assert!(!board.consolidate(7, "P", 40, 20));
        assert_eq!(board.player_best_score(7), Some(50));
        assert_eq!(board.entries()[0].date, 10);

        // Better score replaces score and timestamp.
        assert!(board.consolidate(7, "P", 60, 30));
        assert_eq!(board.player_best_score(7), Some(60));
        assert_eq!(board.entries()[0].date, 30);
        assert_eq!(board.entry_count(), 1);
    }

    #[test]
    fn consolidate_equal_score_is_noop() {
        let mut board = Leaderboard::new(1, None, "score", "Global");
        board.consolidate(7, "P", 50, 10);
        assert!(!board.consolidate(7, "P", 50, 99));
        assert_eq!(board.entries()[0].date, 10);
    }

    #[test]
    fn consolidate_reorders_board() {
        let mut board = board_with_ties();
        board.consolidate(4, "D", 95, 50);
        assert_eq!(board.rank(4), Some(2));
        assert_eq!(board.rank(2), Some(3));
    }

    #[test]
    fn top_entries_limits() {
        let board = board_with_ties();
        assert_eq!(board.top_entries(2).len(), 2);
        assert_eq!(board.top_entries(2)[0].player_name, "A");
        assert_eq!(board.top_entries(100).len(), 4);
        assert!(board.top_entries(0).is_empty());
        assert!(board.top_entries(-3).is_empty());
    }

    #[test]
    fn top_score_and_counts() {
        let board = board_with_ties();
        assert_eq!(board.top_score(), 100);
        assert_eq!(board.entry_count(), 4);

        let empty = Leaderboard::new(2, Some(5), "score", "Level 5");
        assert_eq!(empty.top_score(), 0);
        assert!(!empty.is_global());
    }

    #[test]
    fn remove_entry_by_id() {
        let mut board = board_with_ties();
        assert!(board.remove_entry(2));
        assert!(!board.remove_entry(2));
        assert_eq!(board.entry_count(), 3);
        assert_eq!(board.rank(3), Some(2));
    }

    #[test]
    fn from_entries_restores_order() {
        let rows = vec![entry(4, "D", 80), entry(1, "A", 100), entry(2, "B", 90)];
        let board = Leaderboard::from_entries(1, None, "score", "Global", rows);
        assert_eq!(board.entries()[0].player_name, "A");
        assert_eq!(board.top_score(), 100);
    }

    #[test]
    fn historical_entries_rank_by_best() {
        // add_entry permits multiple historical rows for one player;
        // rank and best-score use the best of them.
        let mut board = Leaderboard::new(1, None, "score", "Global");
        board.add_entry(entry(1, "A", 40));
        board.add_entry(entry(1, "A", 70));
        board.add_entry(entry(2, "B", 60));
        assert_eq!(board.player_best_score(1), Some(70));
        assert_eq!(board.rank(1), Some(1));
        assert_eq!(board.rank(2), Some(2));
    }

    #[test]
    fn category_parse_and_format() {
        assert_eq!(Category::parse("SCORE"), Category::Score);
        assert_eq!(Category::parse("time"), Category::Time);
        assert_eq!(Category::parse("cards_collected"), Category::CardsCollected);
        assert_eq!(
            Category::parse("speedrun"),
            Category::Other("speedrun".into())
        );

        assert_eq!(Category::Time.format_score(95), "1:35");
        assert_eq!(Category::Stars.format_score(3), "3 ★");
        assert_eq!(Category::Score.format_score(1234), "1234");
        assert_eq!(Category::parse("speedrun").description(), "speedrun");
    }
}
