//! QuizHeroes Headless Validation Harness
//!
//! Validates pure game logic and content data without SpacetimeDB.
//! Runs entirely in-process — no DB, no networking, no rendering.
//!
//! Usage:
//!   cargo run -p quizheroes-simtest
//!   cargo run -p quizheroes-simtest -- --verbose

use quizheroes_logic::abilities::{effective_value, Ability, EffectKind};
use quizheroes_logic::cards::Rarity;
use quizheroes_logic::leaderboard::{Category, Leaderboard, LeaderboardEntry};
use quizheroes_logic::levels::{stars_for_score, Difficulty, UnlockRequirement};
use quizheroes_logic::progression::{
    add_experience, add_experience_cascading, percent_to_next_level, required_experience,
    Character, ProgressionConfig,
};
use quizheroes_logic::quizzes::{Answer, AnswerPick, Question, Quiz};
use quizheroes_logic::scoring::{self, ScoringConfig};
use serde::Deserialize;

// ── Content fixture (same JSON shape the server imports) ────────────────
const CONTENT_JSON: &str = include_str!("../../../data/sample_content.json");

#[derive(Debug, Deserialize)]
struct ContentPack {
    cards: Vec<CardSpec>,
    levels: Vec<LevelSpec>,
}

#[derive(Debug, Deserialize)]
struct CardSpec {
    name: String,
    rarity: String,
    #[serde(default)]
    abilities: Vec<AbilitySpec>,
}

#[derive(Debug, Deserialize)]
struct AbilitySpec {
    name: String,
    effect_type: String,
    effect_value: i32,
}

#[derive(Debug, Deserialize)]
struct LevelSpec {
    name: String,
    difficulty: String,
    #[serde(default)]
    unlock_requirement: String,
    #[serde(default)]
    puzzles: Vec<PuzzleSpec>,
    #[serde(default)]
    quizzes: Vec<QuizSpec>,
}

#[derive(Debug, Deserialize)]
struct PuzzleSpec {
    name: String,
    solution: Option<String>,
    time_limit: i32,
}

#[derive(Debug, Deserialize)]
struct QuizSpec {
    name: String,
    time_limit: i32,
    questions: Vec<QuestionSpec>,
}

#[derive(Debug, Deserialize)]
struct QuestionSpec {
    text: String,
    difficulty: String,
    answers: Vec<AnswerSpec>,
}

#[derive(Debug, Deserialize)]
struct AnswerSpec {
    text: String,
    #[serde(default)]
    is_correct: bool,
}

// ── Test harness ────────────────────────────────────────────────────────

struct TestResult {
    name: String,
    passed: bool,
    detail: String,
}

fn check(name: &str, passed: bool, detail: String) -> TestResult {
    TestResult {
        name: name.into(),
        passed,
        detail,
    }
}

fn main() {
    let verbose = std::env::args().any(|a| a == "--verbose");
    println!("=== QuizHeroes Validation Harness ===\n");

    let mut results = Vec::new();

    // 1. Experience curve & leveling
    results.extend(validate_progression(verbose));

    // 2. Ability classification & resolution
    results.extend(validate_abilities(verbose));

    // 3. Timed scoring grid
    results.extend(validate_scoring(verbose));

    // 4. Leaderboard ordering, ranks, consolidation
    results.extend(validate_leaderboard(verbose));

    // 5. Content fixture end-to-end
    results.extend(validate_content(verbose));

    // ── Summary ──
    println!();
    let passed = results.iter().filter(|r| r.passed).count();
    let failed = results.iter().filter(|r| !r.passed).count();
    let total = results.len();

    for r in &results {
        let icon = if r.passed { "✓" } else { "✗" };
        if !r.passed || verbose {
            println!("  {} {}: {}", icon, r.name, r.detail);
        }
    }

    println!(
        "\n=== RESULT: {}/{} passed, {} failed ===",
        passed, total, failed
    );

    if failed > 0 {
        std::process::exit(1);
    }
}

// ── 1. Progression ──────────────────────────────────────────────────────

fn validate_progression(verbose: bool) -> Vec<TestResult> {
    println!("--- Experience Curve & Leveling ---");
    let mut results = Vec::new();
    let config = ProgressionConfig::default();

    let anchors = [(1u32, 0u64), (2, 1000), (3, 2100), (4, 3300), (5, 4600)];
    let anchors_ok = anchors
        .iter()
        .all(|&(level, xp)| required_experience(level) == xp);
    results.push(check(
        "curve_anchors",
        anchors_ok,
        format!("{:?}", anchors),
    ));

    let mut monotonic = true;
    for level in 1..1000 {
        if required_experience(level + 1) <= required_experience(level) {
            monotonic = false;
            break;
        }
    }
    results.push(check(
        "curve_strictly_increasing",
        monotonic,
        "levels 1..1000".into(),
    ));

    let mut hero = Character::new(1, "Sweep");
    let leveled = add_experience(&mut hero, 2500, &config);
    results.push(check(
        "single_step_level_up",
        leveled && hero.level == 2,
        format!("2500 XP at once → level {}", hero.level),
    ));

    let mut hero2 = Character::new(1, "Cascade");
    let gained = add_experience_cascading(&mut hero2, 2500, &config);
    results.push(check(
        "cascade_level_up",
        gained == 2 && hero2.level == 3,
        format!("2500 XP cascaded → level {}", hero2.level),
    ));

    let attributes_ok = hero2.strength == 5 + gained && hero2.wisdom == 5 + gained;
    results.push(check(
        "attributes_grow_per_level",
        attributes_ok,
        format!("strength {} after {} level-ups", hero2.strength, gained),
    ));

    let mut percent_ok = true;
    let mut probe = Character::new(1, "Percent");
    for step in 0..40 {
        let p = percent_to_next_level(&probe);
        if p > 100 {
            percent_ok = false;
            break;
        }
        add_experience(&mut probe, 137 * step, &config);
    }
    results.push(check(
        "percent_always_in_bounds",
        percent_ok,
        "0..=100 over a grind".into(),
    ));

    if verbose {
        println!(
            "  level thresholds: {:?}",
            (1..=8u32)
                .map(required_experience)
                .collect::<Vec<_>>()
        );
    }

    results
}

// ── 2. Abilities ────────────────────────────────────────────────────────

fn validate_abilities(_verbose: bool) -> Vec<TestResult> {
    println!("--- Ability Classification & Resolution ---");
    let mut results = Vec::new();

    let cases = [
        ("damage", EffectKind::Attack),
        ("ATTACK", EffectKind::Attack),
        ("Heal", EffectKind::Healing),
        ("healing", EffectKind::Healing),
        ("BUFF", EffectKind::Buff),
        ("debuff", EffectKind::Debuff),
    ];
    let classify_ok = cases
        .iter()
        .all(|(raw, expected)| &EffectKind::parse(raw) == expected);
    results.push(check(
        "classification_sweep",
        classify_ok,
        format!("{} known spellings", cases.len()),
    ));

    let unknown = EffectKind::parse("mystery");
    results.push(check(
        "unknown_effect_carries_raw",
        unknown == EffectKind::Unclassified("mystery".into()),
        format!("{:?}", unknown),
    ));

    let mut hero = Character::new(1, "Resolver");
    hero.strength = 15;
    hero.wisdom = 10;
    hero.intelligence = 25;

    let ability = |effect_type: &str, value: i32| Ability {
        ability_id: 0,
        card_id: 0,
        name: "probe".into(),
        description: String::new(),
        effect_type: effect_type.into(),
        effect_value: value,
    };

    let resolution = [
        ("damage", 10, 13),
        ("healing", 20, 22),
        ("buff", 5, 10),
        ("debuff", -5, 0),
        ("mystery", 42, 42),
    ];
    let resolve_ok = resolution
        .iter()
        .all(|&(kind, base, expected)| effective_value(&ability(kind, base), &hero) == expected);
    results.push(check(
        "effective_value_dispatch",
        resolve_ok,
        "strength/wisdom/intelligence bonuses".into(),
    ));

    results
}

// ── 3. Scoring ──────────────────────────────────────────────────────────

fn validate_scoring(verbose: bool) -> Vec<TestResult> {
    println!("--- Timed Scoring ---");
    let mut results = Vec::new();
    let config = ScoringConfig::default();

    results.push(check(
        "max_score_contract",
        scoring::max_score(&config) == 150,
        "base 100 + 50% time bonus".into(),
    ));

    let puzzle_cases = [
        (0u32, true, 100i32, 150u32),
        (50, true, 100, 125),
        (100, true, 100, 100),
        (400, true, 100, 100),
        (0, true, 0, 100),
        (0, false, 100, 0),
    ];
    let puzzle_ok = puzzle_cases.iter().all(|&(time, correct, limit, expected)| {
        scoring::puzzle_score(time, correct, limit, &config) == expected
    });
    results.push(check(
        "puzzle_score_grid",
        puzzle_ok,
        format!("{} cases", puzzle_cases.len()),
    ));

    let quiz_cases = [
        (5u32, 10u32, 0u32, 60i32, 75u32),
        (10, 10, 0, 60, 150),
        (10, 10, 60, 60, 100),
        (0, 10, 0, 60, 0),
        (3, 0, 0, 60, 0),
        (1, 3, 0, 0, 33),
    ];
    let quiz_ok = quiz_cases
        .iter()
        .all(|&(correct, total, time, limit, expected)| {
            scoring::quiz_score(correct, total, time, limit, &config) == expected
        });
    results.push(check(
        "quiz_score_grid",
        quiz_ok,
        format!("{} cases", quiz_cases.len()),
    ));

    // Bonus never exceeds half of base anywhere on a fine sweep.
    let mut ceiling_ok = true;
    for time in 0..=120u32 {
        let s = scoring::puzzle_score(time, true, 120, &config);
        if !(100..=150).contains(&s) {
            ceiling_ok = false;
            break;
        }
    }
    results.push(check(
        "score_within_ceiling_sweep",
        ceiling_ok,
        "0..=120s against 120s limit".into(),
    ));

    if verbose {
        let curve: Vec<u32> = (0..=6)
            .map(|i| scoring::puzzle_score(i * 20, true, 120, &config))
            .collect();
        println!("  score by solve time (20s steps): {:?}", curve);
    }

    results
}

// ── 4. Leaderboard ──────────────────────────────────────────────────────

fn validate_leaderboard(_verbose: bool) -> Vec<TestResult> {
    println!("--- Leaderboard Ranking & Consolidation ---");
    let mut results = Vec::new();

    let entry = |player_id: u64, name: &str, score: u32| LeaderboardEntry {
        entry_id: player_id,
        leaderboard_id: 1,
        player_id,
        player_name: name.into(),
        score,
        date: 0,
    };

    let mut board = Leaderboard::new(1, None, "score", "Global");
    board.add_entry(entry(1, "A", 100));
    board.add_entry(entry(2, "B", 90));
    board.add_entry(entry(3, "C", 90));
    board.add_entry(entry(4, "D", 80));

    let order: Vec<&str> = board
        .entries()
        .iter()
        .map(|e| e.player_name.as_str())
        .collect();
    results.push(check(
        "stable_tie_order",
        order == ["A", "B", "C", "D"],
        format!("{:?}", order),
    ));

    let ranks = (1..=4u64).map(|p| board.rank(p)).collect::<Vec<_>>();
    results.push(check(
        "dense_competition_ranks",
        ranks == vec![Some(1), Some(2), Some(2), Some(4)],
        format!("{:?}", ranks),
    ));

    results.push(check(
        "absent_player_unranked",
        board.rank(99).is_none() && board.player_best_score(99).is_none(),
        "sentinel, not error".into(),
    ));

    let mut best = Leaderboard::new(2, Some(1), "score", "Level 1");
    let first = best.consolidate(7, "P", 50, 10);
    let worse = best.consolidate(7, "P", 40, 20);
    let better = best.consolidate(7, "P", 60, 30);
    results.push(check(
        "consolidation_keeps_best",
        first && !worse && better && best.player_best_score(7) == Some(60),
        format!("best {:?} after 50/40/60", best.player_best_score(7)),
    ));
    results.push(check(
        "consolidation_single_entry",
        best.entry_count() == 1,
        format!("{} entries for one player", best.entry_count()),
    ));

    results.push(check(
        "top_entries_limits",
        board.top_entries(2).len() == 2
            && board.top_entries(0).is_empty()
            && board.top_entries(-1).is_empty()
            && board.top_entries(100).len() == 4,
        "limit 2 / 0 / -1 / 100".into(),
    ));

    results.push(check(
        "category_formatting",
        Category::Time.format_score(95) == "1:35" && Category::Stars.format_score(2) == "2 ★",
        "time and stars forms".into(),
    ));

    results
}

// ── 5. Content fixture ──────────────────────────────────────────────────

fn validate_content(verbose: bool) -> Vec<TestResult> {
    println!("--- Content Fixture ---");
    let mut results = Vec::new();
    let config = ScoringConfig::default();

    let pack: ContentPack = match serde_json::from_str(CONTENT_JSON) {
        Ok(p) => p,
        Err(e) => {
            results.push(check(
                "content_parse",
                false,
                format!("JSON parse error: {}", e),
            ));
            return results;
        }
    };
    results.push(check(
        "content_parse",
        !pack.cards.is_empty() && !pack.levels.is_empty(),
        format!("{} cards, {} levels", pack.cards.len(), pack.levels.len()),
    ));

    // Rarities: the fixture deliberately includes a typo'd one.
    let unknown_rarities: Vec<&str> = pack
        .cards
        .iter()
        .filter(|c| matches!(Rarity::parse(&c.rarity), Rarity::Unknown(_)))
        .map(|c| c.name.as_str())
        .collect();
    results.push(check(
        "typo_rarity_degrades",
        unknown_rarities == ["Paper Sprite"],
        format!("{:?}", unknown_rarities),
    ));

    // Unclassified abilities resolve flat.
    let hero = Character::new(1, "Probe");
    let mut unclassified = 0;
    for card in &pack.cards {
        for spec in &card.abilities {
            let ability = Ability {
                ability_id: 0,
                card_id: 0,
                name: spec.name.clone(),
                description: String::new(),
                effect_type: spec.effect_type.clone(),
                effect_value: spec.effect_value,
            };
            if let EffectKind::Unclassified(_) = ability.effect_kind() {
                unclassified += 1;
                if effective_value(&ability, &hero) != spec.effect_value {
                    results.push(check(
                        "unclassified_resolves_flat",
                        false,
                        format!("'{}' gained a bonus", spec.name),
                    ));
                    return results;
                }
            }
        }
    }
    results.push(check(
        "unclassified_resolves_flat",
        unclassified == 1,
        format!("{} unclassified ability", unclassified),
    ));

    // Unlock chain: second level requires the first.
    let locked = &pack.levels[1];
    let unlock = UnlockRequirement::parse(&locked.unlock_requirement);
    results.push(check(
        "unlock_chain",
        unlock == UnlockRequirement::CompletedLevel(1)
            && !unlock.is_met(&[])
            && unlock.is_met(&[1]),
        format!("'{}' needs {:?}", locked.name, unlock),
    ));

    let known_difficulties = pack
        .levels
        .iter()
        .all(|l| Difficulty::parse(&l.difficulty).value() > 0);
    results.push(check(
        "level_difficulties_known",
        known_difficulties,
        format!("{} levels", pack.levels.len()),
    ));

    // Grade the fixture quiz end-to-end: two right, one wrong, half time.
    let spec = &pack.levels[0].quizzes[0];
    let mut quiz = Quiz {
        quiz_id: 1,
        level_id: 1,
        name: spec.name.clone(),
        description: String::new(),
        time_limit: spec.time_limit,
        questions: Vec::new(),
    };
    for (qi, q) in spec.questions.iter().enumerate() {
        let question_id = qi as u64 + 1;
        if let Difficulty::Unknown(raw) = Difficulty::parse(&q.difficulty) {
            results.push(check(
                "fixture_difficulties_known",
                false,
                format!("'{}' has difficulty '{}'", q.text, raw),
            ));
            return results;
        }
        let answers = q
            .answers
            .iter()
            .enumerate()
            .map(|(ai, a)| Answer {
                answer_id: question_id * 10 + ai as u64,
                question_id,
                text: a.text.clone(),
                is_correct: a.is_correct,
            })
            .collect();
        quiz.add_question(Question {
            question_id,
            quiz_id: 0,
            text: q.text.clone(),
            difficulty: q.difficulty.clone(),
            answers,
        });
    }

    let picks = [
        AnswerPick {
            question_id: 1,
            answer_id: 10, // "12", correct
        },
        AnswerPick {
            question_id: 2,
            answer_id: 20, // "52", wrong
        },
        AnswerPick {
            question_id: 3,
            answer_id: 30, // "289", correct
        },
    ];
    let correct = quiz.count_correct(&picks);
    let score = quiz.score(correct, 60, &config);
    // base floor(2/3 · 100) = 66, bonus floor(66 · 0.5 · 0.5) = 16
    results.push(check(
        "fixture_quiz_grades",
        correct == 2 && score == 82,
        format!("{}/3 correct, score {}", correct, score),
    ));

    results.push(check(
        "fixture_quiz_stars",
        stars_for_score(score, scoring::max_score(&config)) == 1,
        format!("score {} of 150", score),
    ));

    // Puzzle solution from the fixture.
    let puzzle = &pack.levels[0].puzzles[0];
    let solves = puzzle.solution.as_deref() == Some("STAR");
    results.push(check(
        "fixture_puzzle_solution",
        solves && puzzle.time_limit > 0,
        format!("'{}'", puzzle.name),
    ));

    if verbose {
        println!(
            "  fixture quiz total points: {}",
            quiz.total_points()
        );
    }

    results
}
