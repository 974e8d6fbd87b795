//! Content pack import.
//!
//! Cards, levels, puzzles, and quizzes are authored as JSON and loaded
//! through the `import_content` reducer. Classification problems (typo'd
//! effect types, rarities, difficulties) are logged here once at import
//! time; at play time they silently degrade to the neutral value, per the
//! engine's rules.

use crate::tables::*;
use quizheroes_logic::abilities::EffectKind;
use quizheroes_logic::cards::Rarity;
use quizheroes_logic::levels::Difficulty;
use serde::Deserialize;
use spacetimedb::{ReducerContext, Table};

#[derive(Debug, Deserialize)]
pub struct ContentPack {
    #[serde(default)]
    pub cards: Vec<CardSpec>,
    #[serde(default)]
    pub levels: Vec<LevelSpec>,
}

#[derive(Debug, Deserialize)]
pub struct CardSpec {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub category_id: u64,
    pub rarity: String,
    #[serde(default)]
    pub abilities: Vec<AbilitySpec>,
}

#[derive(Debug, Deserialize)]
pub struct AbilitySpec {
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub effect_type: String,
    pub effect_value: i32,
}

#[derive(Debug, Deserialize)]
pub struct LevelSpec {
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub difficulty: String,
    #[serde(default)]
    pub unlock_requirement: String,
    #[serde(default)]
    pub puzzles: Vec<PuzzleSpec>,
    #[serde(default)]
    pub quizzes: Vec<QuizSpec>,
}

#[derive(Debug, Deserialize)]
pub struct PuzzleSpec {
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub puzzle_type: String,
    #[serde(default)]
    pub data: String,
    pub solution: Option<String>,
    #[serde(default)]
    pub time_limit: i32,
}

#[derive(Debug, Deserialize)]
pub struct QuizSpec {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub time_limit: i32,
    #[serde(default)]
    pub questions: Vec<QuestionSpec>,
}

#[derive(Debug, Deserialize)]
pub struct QuestionSpec {
    pub text: String,
    pub difficulty: String,
    pub answers: Vec<AnswerSpec>,
}

#[derive(Debug, Deserialize)]
pub struct AnswerSpec {
    pub text: String,
    #[serde(default)]
    pub is_correct: bool,
}

/// Insert a parsed content pack into the tables. Returns (cards, levels)
/// inserted.
pub fn insert_content(ctx: &ReducerContext, pack: ContentPack) -> (usize, usize) {
    let card_count = pack.cards.len();
    let level_count = pack.levels.len();

    for spec in pack.cards {
        if let Rarity::Unknown(raw) = Rarity::parse(&spec.rarity) {
            log::warn!("card '{}' has unrecognized rarity '{}'", spec.name, raw);
        }
        let card_id = ctx
            .db
            .card()
            .insert(CardRow {
                card_id: 0,
                name: spec.name,
                description: spec.description,
                category_id: spec.category_id,
                rarity: spec.rarity,
            })
            .card_id;

        for ability in spec.abilities {
            if let EffectKind::Unclassified(raw) = EffectKind::parse(&ability.effect_type) {
                log::warn!(
                    "ability '{}' has unclassified effect type '{}'; it will resolve with no bonus",
                    ability.name,
                    raw
                );
            }
            ctx.db.ability().insert(AbilityRow {
                ability_id: 0,
                card_id,
                name: ability.name,
                description: ability.description,
                effect_type: ability.effect_type,
                effect_value: ability.effect_value,
            });
        }
    }

    for spec in pack.levels {
        if let Difficulty::Unknown(raw) = Difficulty::parse(&spec.difficulty) {
            log::warn!("level '{}' has unrecognized difficulty '{}'", spec.name, raw);
        }
        let level_id = ctx
            .db
            .level()
            .insert(LevelRow {
                level_id: 0,
                name: spec.name.clone(),
                description: spec.description,
                difficulty: spec.difficulty,
                unlock_requirement: spec.unlock_requirement,
            })
            .level_id;

        for puzzle in spec.puzzles {
            ctx.db.puzzle().insert(PuzzleRow {
                puzzle_id: 0,
                level_id,
                name: puzzle.name,
                description: puzzle.description,
                puzzle_type: puzzle.puzzle_type,
                data: puzzle.data,
                solution: puzzle.solution,
                time_limit: puzzle.time_limit,
            });
        }

        for quiz in spec.quizzes {
            let quiz_id = ctx
                .db
                .quiz()
                .insert(QuizRow {
                    quiz_id: 0,
                    level_id,
                    name: quiz.name,
                    description: quiz.description,
                    time_limit: quiz.time_limit,
                })
                .quiz_id;

            for question in quiz.questions {
                if let Difficulty::Unknown(raw) = Difficulty::parse(&question.difficulty) {
                    log::warn!(
                        "question '{}' has unrecognized difficulty '{}'",
                        question.text,
                        raw
                    );
                }
                let question_id = ctx
                    .db
                    .question()
                    .insert(QuestionRow {
                        question_id: 0,
                        quiz_id,
                        text: question.text,
                        difficulty: question.difficulty,
                    })
                    .question_id;

                for answer in question.answers {
                    ctx.db.answer().insert(AnswerRow {
                        answer_id: 0,
                        question_id,
                        text: answer.text,
                        is_correct: answer.is_correct,
                    });
                }
            }
        }

        // Every level gets its own score board alongside the global one.
        ctx.db.leaderboard().insert(LeaderboardRow {
            leaderboard_id: 0,
            level_id: Some(level_id),
            category: "score".to_string(),
            name: format!("{} high scores", spec.name),
        });
    }

    (card_count, level_count)
}
