//! SpacetimeDB table definitions for the QuizHeroes backend.
//!
//! Rows mirror the plain value types in `quizheroes-logic`; conversion
//! helpers live next to the reducers. The engine itself never touches
//! these — it only sees values built from them.

use spacetimedb::{table, Identity, Timestamp};

// ============================================================================
// PLAYERS & CHARACTERS
// ============================================================================

/// Live client connections.
#[table(name = connected_client, public)]
pub struct ConnectedClient {
    #[primary_key]
    pub identity: Identity,
    pub player_id: Option<u64>,
    pub connected_at: Timestamp,
}

/// Registered player account.
#[table(name = player, public)]
pub struct Player {
    #[primary_key]
    #[auto_inc]
    pub player_id: u64,
    #[unique]
    pub identity: Identity,
    pub username: String,
    pub registered_at: Timestamp,
}

/// A player's hero. One per player.
#[table(name = character, public)]
#[derive(Clone)]
pub struct CharacterRow {
    #[primary_key]
    #[auto_inc]
    pub character_id: u64,
    #[unique]
    pub player_id: u64,
    pub name: String,
    pub level: u32,
    pub experience: u64,
    pub intelligence: u32,
    pub strength: u32,
    pub agility: u32,
    pub wisdom: u32,
}

// ============================================================================
// CONTENT
// ============================================================================

/// Collectible card definition.
#[table(name = card, public)]
pub struct CardRow {
    #[primary_key]
    #[auto_inc]
    pub card_id: u64,
    pub name: String,
    pub description: String,
    pub category_id: u64,
    /// Raw rarity string, classified by the logic crate on use.
    pub rarity: String,
}

/// Ability attached to a card.
#[table(name = ability, public)]
pub struct AbilityRow {
    #[primary_key]
    #[auto_inc]
    pub ability_id: u64,
    #[index(btree)]
    pub card_id: u64,
    pub name: String,
    pub description: String,
    /// Raw effect type string, classified by the logic crate on use.
    pub effect_type: String,
    pub effect_value: i32,
}

/// Game level grouping puzzles and quizzes.
#[table(name = level, public)]
pub struct LevelRow {
    #[primary_key]
    #[auto_inc]
    pub level_id: u64,
    pub name: String,
    pub description: String,
    pub difficulty: String,
    /// `""` or `"level:<id>"`; parsed by the logic crate.
    pub unlock_requirement: String,
}

#[table(name = puzzle, public)]
pub struct PuzzleRow {
    #[primary_key]
    #[auto_inc]
    pub puzzle_id: u64,
    #[index(btree)]
    pub level_id: u64,
    pub name: String,
    pub description: String,
    pub puzzle_type: String,
    pub data: String,
    pub solution: Option<String>,
    /// Seconds; non-positive means untimed.
    pub time_limit: i32,
}

#[table(name = quiz, public)]
pub struct QuizRow {
    #[primary_key]
    #[auto_inc]
    pub quiz_id: u64,
    #[index(btree)]
    pub level_id: u64,
    pub name: String,
    pub description: String,
    pub time_limit: i32,
}

#[table(name = question, public)]
pub struct QuestionRow {
    #[primary_key]
    #[auto_inc]
    pub question_id: u64,
    #[index(btree)]
    pub quiz_id: u64,
    pub text: String,
    pub difficulty: String,
}

#[table(name = answer, public)]
pub struct AnswerRow {
    #[primary_key]
    #[auto_inc]
    pub answer_id: u64,
    #[index(btree)]
    pub question_id: u64,
    pub text: String,
    pub is_correct: bool,
}

// ============================================================================
// PROGRESS & LEADERBOARDS
// ============================================================================

/// Per-player, per-level progress.
#[table(name = level_progress, public)]
#[derive(Clone)]
pub struct LevelProgressRow {
    #[primary_key]
    #[auto_inc]
    pub progress_id: u64,
    #[index(btree)]
    pub player_id: u64,
    pub level_id: u64,
    pub completed: bool,
    pub stars: u32,
    pub best_score: u32,
    pub completed_at: Option<Timestamp>,
}

/// Leaderboard header. `level_id` None marks the global board.
#[table(name = leaderboard, public)]
pub struct LeaderboardRow {
    #[primary_key]
    #[auto_inc]
    pub leaderboard_id: u64,
    pub level_id: Option<u64>,
    pub category: String,
    pub name: String,
}

/// Best-score entry rows. The consolidation reducer maintains at most
/// one row per (leaderboard, player).
#[table(name = leaderboard_entry, public)]
#[derive(Clone)]
pub struct LeaderboardEntryRow {
    #[primary_key]
    #[auto_inc]
    pub entry_id: u64,
    #[index(btree)]
    pub leaderboard_id: u64,
    pub player_id: u64,
    /// Cached display name so clients render boards without a join.
    pub player_name: String,
    pub score: u32,
    pub date: Timestamp,
}
