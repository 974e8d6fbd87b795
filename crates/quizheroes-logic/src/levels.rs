//! Level content — difficulty tiers, unlock gating, and score ceilings.

use crate::puzzles::Puzzle;
use crate::quizzes::Quiz;
use crate::scoring::{self, ScoringConfig};
use serde::{Deserialize, Serialize};

/// Stars a level can award at most, regardless of content.
pub const MAX_STARS: u32 = 3;

/// Difficulty tier used by levels and quiz questions. Parsed
/// case-insensitively; unrecognized strings keep the raw value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
    Expert,
    Unknown(String),
}

impl Difficulty {
    pub fn parse(raw: &str) -> Self {
        match raw.to_ascii_lowercase().as_str() {
            "easy" => Self::Easy,
            "medium" => Self::Medium,
            "hard" => Self::Hard,
            "expert" => Self::Expert,
            _ => Self::Unknown(raw.to_string()),
        }
    }

    /// Numeric tier for sorting: 1 (easy) through 4 (expert), 0 for
    /// unrecognized strings.
    pub fn value(&self) -> u32 {
        match self {
            Self::Easy => 1,
            Self::Medium => 2,
            Self::Hard => 3,
            Self::Expert => 4,
            Self::Unknown(_) => 0,
        }
    }

    /// Points one quiz question at this difficulty is worth.
    /// Unrecognized difficulties fall back to the easy value.
    pub fn question_points(&self) -> u32 {
        match self {
            Self::Easy => 10,
            Self::Medium => 20,
            Self::Hard => 30,
            Self::Expert => 50,
            Self::Unknown(_) => 10,
        }
    }
}

/// Stars earned for a score against a ceiling: one per full third of the
/// maximum, capped at [`MAX_STARS`]. A zero ceiling yields zero stars.
pub fn stars_for_score(score: u32, max_score: u32) -> u32 {
    if max_score == 0 {
        return 0;
    }
    ((score as u64 * MAX_STARS as u64) / max_score as u64).min(MAX_STARS as u64) as u32
}

/// What a player must have done before a level opens up.
///
/// Stored as a string in content (`""` or `"level:<id>"`); anything that
/// fails to parse locks the level rather than silently opening it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum UnlockRequirement {
    /// No requirement; unlocked from the start.
    Always,
    /// Requires the given level id to be completed.
    CompletedLevel(u64),
    /// Unparseable requirement string, kept for diagnostics. Locked.
    Invalid(String),
}

impl UnlockRequirement {
    pub fn parse(raw: &str) -> Self {
        if raw.is_empty() {
            return Self::Always;
        }
        if let Some(id) = raw.strip_prefix("level:") {
            if let Ok(id) = id.parse::<u64>() {
                return Self::CompletedLevel(id);
            }
        }
        Self::Invalid(raw.to_string())
    }

    /// Check against the set of levels the player has completed.
    pub fn is_met(&self, completed_levels: &[u64]) -> bool {
        match self {
            Self::Always => true,
            Self::CompletedLevel(id) => completed_levels.contains(id),
            Self::Invalid(_) => false,
        }
    }
}

/// A game level grouping puzzles and quizzes under one difficulty.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Level {
    pub level_id: u64,
    pub name: String,
    pub description: String,
    /// Raw difficulty string; see [`Difficulty::parse`].
    pub difficulty: String,
    /// Raw unlock requirement; see [`UnlockRequirement::parse`].
    pub unlock_requirement: String,
    pub puzzles: Vec<Puzzle>,
    pub quizzes: Vec<Quiz>,
}

impl Level {
    pub fn difficulty(&self) -> Difficulty {
        Difficulty::parse(&self.difficulty)
    }

    pub fn unlock_requirement(&self) -> UnlockRequirement {
        UnlockRequirement::parse(&self.unlock_requirement)
    }

    /// Whether the level is open given the player's completed level ids.
    pub fn is_unlocked(&self, completed_levels: &[u64]) -> bool {
        self.unlock_requirement().is_met(completed_levels)
    }

    pub fn puzzle_count(&self) -> usize {
        self.puzzles.len()
    }

    pub fn quiz_count(&self) -> usize {
        self.quizzes.len()
    }

    /// Attach a puzzle, claiming it for this level.
    pub fn add_puzzle(&mut self, mut puzzle: Puzzle) {
        puzzle.level_id = self.level_id;
        self.puzzles.push(puzzle);
    }

    pub fn remove_puzzle(&mut self, puzzle_id: u64) -> bool {
        let before = self.puzzles.len();
        self.puzzles.retain(|p| p.puzzle_id != puzzle_id);
        self.puzzles.len() != before
    }

    /// Attach a quiz, claiming it for this level.
    pub fn add_quiz(&mut self, mut quiz: Quiz) {
        quiz.level_id = self.level_id;
        self.quizzes.push(quiz);
    }

    pub fn remove_quiz(&mut self, quiz_id: u64) -> bool {
        let before = self.quizzes.len();
        self.quizzes.retain(|q| q.quiz_id != quiz_id);
        self.quizzes.len() != before
    }

    pub fn max_stars(&self) -> u32 {
        MAX_STARS
    }

    /// Score ceiling across every puzzle and quiz in the level.
    pub fn max_score(&self, config: &ScoringConfig) -> u32 {
        let per_activity = scoring::max_score(config);
        (self.puzzles.len() + self.quizzes.len()) as u32 * per_activity
    }
}
