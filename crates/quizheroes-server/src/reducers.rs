//! Client-facing reducers for registration, play sessions, and boards.
//!
//! Each reducer is one transaction. Best-score consolidation does its
//! read-compare-write inside that transaction, so two sessions submitting
//! for the same player cannot lose an update to each other.

use crate::content::{insert_content, ContentPack};
use crate::tables::*;
use quizheroes_logic::abilities::{effective_value, Ability, EffectKind};
use quizheroes_logic::leaderboard::{Leaderboard, LeaderboardEntry};
use quizheroes_logic::levels::{stars_for_score, UnlockRequirement};
use quizheroes_logic::progression::{self, Character, ProgressionConfig};
use quizheroes_logic::puzzles::Puzzle;
use quizheroes_logic::quizzes::{Answer, AnswerPick, Question, Quiz};
use quizheroes_logic::scoring::{self, ScoringConfig};
use spacetimedb::{reducer, ReducerContext, SpacetimeType, Table};

/// One picked answer in a quiz submission.
#[derive(SpacetimeType, Debug, Clone)]
pub struct QuizPick {
    pub question_id: u64,
    pub answer_id: u64,
}

// ============================================================================
// LIFECYCLE
// ============================================================================

#[reducer(init)]
pub fn init(ctx: &ReducerContext) {
    // The global board exists from day one; per-level boards are created
    // on content import.
    ctx.db.leaderboard().insert(LeaderboardRow {
        leaderboard_id: 0,
        level_id: None,
        category: "score".to_string(),
        name: "Global high scores".to_string(),
    });
    log::info!("QuizHeroes module initialized");
}

#[reducer(client_connected)]
pub fn client_connected(ctx: &ReducerContext) {
    log::info!("Client connected: {:?}", ctx.sender);
    let player_id = ctx
        .db
        .player()
        .identity()
        .find(ctx.sender)
        .map(|p| p.player_id);
    ctx.db.connected_client().insert(ConnectedClient {
        identity: ctx.sender,
        player_id,
        connected_at: ctx.timestamp,
    });
}

#[reducer(client_disconnected)]
pub fn client_disconnected(ctx: &ReducerContext) {
    log::info!("Client disconnected: {:?}", ctx.sender);
    if let Some(client) = ctx.db.connected_client().identity().find(ctx.sender) {
        ctx.db.connected_client().identity().delete(client.identity);
    }
}

// ============================================================================
// PLAYERS & CHARACTERS
// ============================================================================

/// Register the connected identity as a player.
#[reducer]
pub fn register_player(ctx: &ReducerContext, username: String) {
    if ctx.db.player().identity().find(ctx.sender).is_some() {
        log::warn!("identity {:?} is already registered", ctx.sender);
        return;
    }

    let player_id = ctx
        .db
        .player()
        .insert(Player {
            player_id: 0,
            identity: ctx.sender,
            username: username.clone(),
            registered_at: ctx.timestamp,
        })
        .player_id;

    if let Some(mut client) = ctx.db.connected_client().identity().find(ctx.sender) {
        client.player_id = Some(player_id);
        ctx.db.connected_client().identity().update(client);
    }

    log::info!("Registered player '{}' (id {})", username, player_id);
}

/// Create the player's hero: level 1, default attributes.
#[reducer]
pub fn create_character(ctx: &ReducerContext, name: String) {
    let Some(player) = ctx.db.player().identity().find(ctx.sender) else {
        log::warn!("create_character from unregistered identity {:?}", ctx.sender);
        return;
    };
    if ctx.db.character().player_id().find(player.player_id).is_some() {
        log::warn!("player {} already has a character", player.player_id);
        return;
    }

    let hero = Character::new(player.player_id, name);
    let row = ctx.db.character().insert(CharacterRow {
        character_id: 0,
        player_id: hero.player_id,
        name: hero.name.clone(),
        level: hero.level,
        experience: hero.experience,
        intelligence: hero.intelligence,
        strength: hero.strength,
        agility: hero.agility,
        wisdom: hero.wisdom,
    });

    log::info!(
        "Character '{}' created with id {} for player {}",
        hero.name,
        row.character_id,
        player.player_id
    );
}

/// Grant experience directly (quest rewards, admin tooling).
#[reducer]
pub fn gain_experience(ctx: &ReducerContext, amount: u64) {
    let Some(player) = ctx.db.player().identity().find(ctx.sender) else {
        return;
    };
    award_experience(ctx, player.player_id, amount);
}

/// Resolve an ability's effective value for the caller's character.
///
/// Pure computation over current attributes; nothing is persisted. The
/// result lands in the session log for the battle layer to consume.
#[reducer]
pub fn use_ability(ctx: &ReducerContext, ability_id: u64) {
    let Some(player) = ctx.db.player().identity().find(ctx.sender) else {
        return;
    };
    let Some(row) = ctx.db.ability().ability_id().find(ability_id) else {
        log::warn!("ability {} does not exist", ability_id);
        return;
    };
    let Some(character) = ctx.db.character().player_id().find(player.player_id) else {
        log::warn!("player {} has no character", player.player_id);
        return;
    };

    let ability = Ability {
        ability_id: row.ability_id,
        card_id: row.card_id,
        name: row.name,
        description: row.description,
        effect_type: row.effect_type,
        effect_value: row.effect_value,
    };
    if let EffectKind::Unclassified(raw) = ability.effect_kind() {
        log::warn!(
            "ability '{}' has unclassified effect type '{}'; resolving with no bonus",
            ability.name,
            raw
        );
    }

    let hero = character_value(&character);
    let value = effective_value(&ability, &hero);
    log::info!(
        "player {} used '{}' ({:?}) for {}",
        player.player_id,
        ability.name,
        ability.effect_kind(),
        value
    );
}

// ============================================================================
// PLAY SESSIONS
// ============================================================================

/// Submit a puzzle attempt: check the solution, score it, award
/// experience, and consolidate the leaderboards.
#[reducer]
pub fn submit_puzzle_result(
    ctx: &ReducerContext,
    puzzle_id: u64,
    solution: String,
    solve_time_secs: u32,
) {
    let Some(player) = ctx.db.player().identity().find(ctx.sender) else {
        log::warn!("puzzle submission from unregistered identity {:?}", ctx.sender);
        return;
    };
    let Some(row) = ctx.db.puzzle().puzzle_id().find(puzzle_id) else {
        log::warn!("puzzle {} does not exist", puzzle_id);
        return;
    };

    let puzzle = Puzzle {
        puzzle_id: row.puzzle_id,
        level_id: row.level_id,
        name: row.name,
        description: row.description,
        puzzle_type: row.puzzle_type,
        data: row.data,
        solution: row.solution,
        time_limit: row.time_limit,
    };

    if !level_unlocked_for(ctx, player.player_id, puzzle.level_id) {
        log::warn!(
            "player {} submitted puzzle {} on locked level {}",
            player.player_id,
            puzzle_id,
            puzzle.level_id
        );
        return;
    }

    let config = ScoringConfig::default();
    let is_correct = puzzle.check_solution(&solution);
    let score = puzzle.score(solve_time_secs, is_correct, &config);

    log::info!(
        "player {} puzzle {}: correct={} time={}s score={}",
        player.player_id,
        puzzle_id,
        is_correct,
        solve_time_secs,
        score
    );

    finish_session(
        ctx,
        &player,
        puzzle.level_id,
        score,
        scoring::max_score(&config),
        is_correct,
    );
}

/// Submit a quiz attempt: grade the picks, score them, award experience,
/// and consolidate the leaderboards.
#[reducer]
pub fn submit_quiz_result(
    ctx: &ReducerContext,
    quiz_id: u64,
    picks: Vec<QuizPick>,
    solve_time_secs: u32,
) {
    let Some(player) = ctx.db.player().identity().find(ctx.sender) else {
        log::warn!("quiz submission from unregistered identity {:?}", ctx.sender);
        return;
    };
    let Some(quiz) = load_quiz(ctx, quiz_id) else {
        log::warn!("quiz {} does not exist", quiz_id);
        return;
    };

    if !level_unlocked_for(ctx, player.player_id, quiz.level_id) {
        log::warn!(
            "player {} submitted quiz {} on locked level {}",
            player.player_id,
            quiz_id,
            quiz.level_id
        );
        return;
    }

    let config = ScoringConfig::default();
    let picks: Vec<AnswerPick> = picks
        .iter()
        .map(|p| AnswerPick {
            question_id: p.question_id,
            answer_id: p.answer_id,
        })
        .collect();
    let correct = quiz.count_correct(&picks);
    let score = quiz.score(correct, solve_time_secs, &config);
    let passed = correct == quiz.question_count() && correct > 0;

    log::info!(
        "player {} quiz {}: {}/{} correct, time={}s score={}",
        player.player_id,
        quiz_id,
        correct,
        quiz.question_count(),
        solve_time_secs,
        score
    );

    finish_session(
        ctx,
        &player,
        quiz.level_id,
        score,
        scoring::max_score(&config),
        passed,
    );
}

// ============================================================================
// CONTENT
// ============================================================================

/// Load a JSON content pack (cards, levels, puzzles, quizzes).
#[reducer]
pub fn import_content(ctx: &ReducerContext, json: String) {
    match serde_json::from_str::<ContentPack>(&json) {
        Ok(pack) => {
            let (cards, levels) = insert_content(ctx, pack);
            log::info!("content import: {} cards, {} levels", cards, levels);
        }
        Err(e) => {
            log::warn!("content import rejected: {}", e);
        }
    }
}

// ============================================================================
// SESSION PLUMBING
// ============================================================================

/// Apply everything a finished session produces: experience, level
/// progress, and leaderboard consolidation.
fn finish_session(
    ctx: &ReducerContext,
    player: &Player,
    level_id: u64,
    score: u32,
    activity_max_score: u32,
    completed: bool,
) {
    if score > 0 {
        award_experience(ctx, player.player_id, score as u64);
    }

    record_progress(
        ctx,
        player.player_id,
        level_id,
        score,
        activity_max_score,
        completed,
    );

    // Zero-score attempts never reach a board; an empty entry would only
    // occupy a rank slot.
    if score == 0 {
        return;
    }

    for board in ctx
        .db
        .leaderboard()
        .iter()
        .filter(|b| b.level_id.is_none() || b.level_id == Some(level_id))
    {
        consolidate_best_score(ctx, board.leaderboard_id, player.player_id, score);
        if let Some(rank) = board_rank(ctx, board.leaderboard_id, player.player_id) {
            log::info!(
                "player {} is rank {} on board '{}'",
                player.player_id,
                rank,
                board.name
            );
        }
    }
}

/// Add experience to the player's character, applying level-ups one step
/// at a time as the engine requires.
fn award_experience(ctx: &ReducerContext, player_id: u64, amount: u64) {
    let Some(mut row) = ctx.db.character().player_id().find(player_id) else {
        log::warn!("player {} has no character to receive experience", player_id);
        return;
    };

    let config = ProgressionConfig::default();
    let mut hero = character_value(&row);
    let levels_gained = progression::add_experience_cascading(&mut hero, amount, &config);

    row.level = hero.level;
    row.experience = hero.experience;
    row.intelligence = hero.intelligence;
    row.strength = hero.strength;
    row.agility = hero.agility;
    row.wisdom = hero.wisdom;
    ctx.db.character().character_id().update(row);

    if levels_gained > 0 {
        log::info!(
            "character of player {} reached level {} (+{} XP)",
            player_id,
            hero.level,
            amount
        );
    }
}

/// Update-or-insert per-level progress, keeping the best score and the
/// first completion.
fn record_progress(
    ctx: &ReducerContext,
    player_id: u64,
    level_id: u64,
    score: u32,
    activity_max_score: u32,
    completed: bool,
) {
    let stars = stars_for_score(score, activity_max_score);
    let existing = ctx
        .db
        .level_progress()
        .player_id()
        .filter(player_id)
        .find(|p| p.level_id == level_id);

    match existing {
        Some(mut progress) => {
            if score > progress.best_score {
                progress.best_score = score;
            }
            if stars > progress.stars {
                progress.stars = stars;
            }
            if completed && !progress.completed {
                progress.completed = true;
                progress.completed_at = Some(ctx.timestamp);
            }
            ctx.db.level_progress().progress_id().update(progress);
        }
        None => {
            ctx.db.level_progress().insert(LevelProgressRow {
                progress_id: 0,
                player_id,
                level_id,
                completed,
                stars,
                best_score: score,
                completed_at: completed.then_some(ctx.timestamp),
            });
        }
    }
}

/// Whether the level's unlock requirement is met for the player.
fn level_unlocked_for(ctx: &ReducerContext, player_id: u64, level_id: u64) -> bool {
    let Some(level) = ctx.db.level().level_id().find(level_id) else {
        // Content rows can reference levels not yet imported; treat as open.
        return true;
    };
    match UnlockRequirement::parse(&level.unlock_requirement) {
        UnlockRequirement::Always => true,
        UnlockRequirement::CompletedLevel(required) => ctx
            .db
            .level_progress()
            .player_id()
            .filter(player_id)
            .any(|p| p.level_id == required && p.completed),
        UnlockRequirement::Invalid(raw) => {
            log::warn!(
                "level {} has unparseable unlock requirement '{}'; treating as locked",
                level_id,
                raw
            );
            false
        }
    }
}

/// Keep only the best score per player on a board.
///
/// Runs inside the calling reducer's transaction: the read, compare, and
/// write are one atomic step, which is what makes concurrent submissions
/// for the same player safe.
fn consolidate_best_score(ctx: &ReducerContext, leaderboard_id: u64, player_id: u64, score: u32) {
    let existing = ctx
        .db
        .leaderboard_entry()
        .leaderboard_id()
        .filter(leaderboard_id)
        .find(|e| e.player_id == player_id);

    match existing {
        Some(mut entry) => {
            // Never lower a recorded best; equal scores keep the older date.
            if score > entry.score {
                entry.score = score;
                entry.date = ctx.timestamp;
                ctx.db.leaderboard_entry().entry_id().update(entry);
            }
        }
        None => {
            ctx.db.leaderboard_entry().insert(LeaderboardEntryRow {
                entry_id: 0,
                leaderboard_id,
                player_id,
                player_name: resolve_player_name(ctx, player_id),
                score,
                date: ctx.timestamp,
            });
        }
    }
}

/// Compute a player's dense rank on a board by rebuilding the ordered
/// view from the entry rows.
fn board_rank(ctx: &ReducerContext, leaderboard_id: u64, player_id: u64) -> Option<u32> {
    let header = ctx.db.leaderboard().leaderboard_id().find(leaderboard_id)?;
    let entries: Vec<LeaderboardEntry> = ctx
        .db
        .leaderboard_entry()
        .leaderboard_id()
        .filter(leaderboard_id)
        .map(|e| LeaderboardEntry {
            entry_id: e.entry_id,
            leaderboard_id: e.leaderboard_id,
            player_id: e.player_id,
            player_name: e.player_name,
            score: e.score,
            date: e.date.to_micros_since_unix_epoch() / 1_000_000,
        })
        .collect();
    let board = Leaderboard::from_entries(
        header.leaderboard_id,
        header.level_id,
        header.category,
        header.name,
        entries,
    );
    board.rank(player_id)
}

/// Display name for an entry row; boards cache it so clients render
/// without a join.
fn resolve_player_name(ctx: &ReducerContext, player_id: u64) -> String {
    ctx.db
        .player()
        .player_id()
        .find(player_id)
        .map(|p| p.username)
        .unwrap_or_else(|| format!("player-{}", player_id))
}

fn character_value(row: &CharacterRow) -> Character {
    Character {
        character_id: row.character_id,
        player_id: row.player_id,
        name: row.name.clone(),
        level: row.level,
        experience: row.experience,
        intelligence: row.intelligence,
        strength: row.strength,
        agility: row.agility,
        wisdom: row.wisdom,
    }
}

/// Rebuild a quiz value, with its questions and answers, from the rows.
fn load_quiz(ctx: &ReducerContext, quiz_id: u64) -> Option<Quiz> {
    let row = ctx.db.quiz().quiz_id().find(quiz_id)?;
    let mut quiz = Quiz {
        quiz_id: row.quiz_id,
        level_id: row.level_id,
        name: row.name,
        description: row.description,
        time_limit: row.time_limit,
        questions: Vec::new(),
    };

    for q in ctx.db.question().quiz_id().filter(quiz_id) {
        let answers: Vec<Answer> = ctx
            .db
            .answer()
            .question_id()
            .filter(q.question_id)
            .map(|a| Answer {
                answer_id: a.answer_id,
                question_id: a.question_id,
                text: a.text,
                is_correct: a.is_correct,
            })
            .collect();
        quiz.questions.push(Question {
            question_id: q.question_id,
            quiz_id: q.quiz_id,
            text: q.text,
            difficulty: q.difficulty,
            answers,
        });
    }

    Some(quiz)
}
