//! Timed scoring shared by puzzles and quizzes.
//!
//! Both activity kinds score the same way: a base score from correctness
//! (all-or-nothing for puzzles, proportional for quizzes) plus a bonus for
//! unused time. Finishing instantly is worth up to +50% of base; finishing
//! at or past the limit earns no bonus. A non-positive time limit means
//! the activity is untimed.

use serde::{Deserialize, Serialize};

/// Tunable scoring knobs.
///
/// Defaults encode the shipped contract: 100 base points and up to half of
/// base again as time bonus, for a 150-point ceiling.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoringConfig {
    /// Points for a fully correct activity before the time bonus.
    pub base_score: u32,
    /// Fraction of base granted at 100% unused time.
    pub time_bonus_factor: f64,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            base_score: 100,
            time_bonus_factor: 0.5,
        }
    }
}

/// Highest score a single activity can award.
///
/// A fixed contract callers use to normalize progress displays; it does
/// not depend on actual performance.
pub fn max_score(config: &ScoringConfig) -> u32 {
    config.base_score + (config.base_score as f64 * config.time_bonus_factor) as u32
}

/// Bonus for unused time: `floor(base · (1 − solve/limit) · factor)`.
///
/// Zero when the base is zero, the activity is untimed, or time ran out.
pub fn time_bonus(
    base: u32,
    solve_time_secs: u32,
    time_limit_secs: i32,
    config: &ScoringConfig,
) -> u32 {
    if base == 0 || time_limit_secs <= 0 || solve_time_secs as i64 >= time_limit_secs as i64 {
        return 0;
    }
    let remaining = 1.0 - solve_time_secs as f64 / time_limit_secs as f64;
    (base as f64 * remaining * config.time_bonus_factor) as u32
}

/// Score a puzzle attempt. An incorrect solution scores 0 regardless of
/// time spent.
pub fn puzzle_score(
    solve_time_secs: u32,
    is_correct: bool,
    time_limit_secs: i32,
    config: &ScoringConfig,
) -> u32 {
    if !is_correct {
        return 0;
    }
    config.base_score + time_bonus(config.base_score, solve_time_secs, time_limit_secs, config)
}

/// Score a quiz attempt from the number of correct answers.
///
/// Base is the correct fraction of `base_score`, floored. An empty quiz
/// scores 0.
pub fn quiz_score(
    correct_answers: u32,
    total_answers: u32,
    solve_time_secs: u32,
    time_limit_secs: i32,
    config: &ScoringConfig,
) -> u32 {
    if total_answers == 0 {
        return 0;
    }
    let accuracy = correct_answers as f64 / total_answers as f64;
    let base = (accuracy * config.base_score as f64) as u32;
    base + time_bonus(base, solve_time_secs, time_limit_secs, config)
}

/// Whether a stored time limit actually times the activity.
pub fn has_time_limit(time_limit_secs: i32) -> bool {
    time_limit_secs > 0
}

/// Display form of a time limit: `m:ss`, or "unlimited" for untimed.
pub fn format_time_limit(time_limit_secs: i32) -> String {
    if time_limit_secs <= 0 {
        return "unlimited".to_string();
    }
    format!("{}:{:02}", time_limit_secs / 60, time_limit_secs % 60)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn max_score_contract() {
        assert_eq!(max_score(&ScoringConfig::default()), 150);
    }

    #[test]
    fn instant_correct_puzzle_hits_ceiling() {
        let config = ScoringConfig::default();
        assert_eq!(puzzle_score(0, true, 100, &config), 150);
    }

    #[test]
    fn at_limit_earns_base_only() {
        let config = ScoringConfig::default();
        assert_eq!(puzzle_score(100, true, 100, &config), 100);
    }

    #[test]
    fn over_limit_earns_base_only() {
        let config = ScoringConfig::default();
        assert_eq!(puzzle_score(250, true, 100, &config), 100);
    }

    #[test]
    fn incorrect_puzzle_scores_zero() {
        let config = ScoringConfig::default();
        assert_eq!(puzzle_score(0, false, 100, &config), 0);
        assert_eq!(puzzle_score(5, false, 0, &config), 0);
    }

    #[test]
    fn untimed_puzzle_earns_base_only() {
        let config = ScoringConfig::default();
        assert_eq!(puzzle_score(42, true, 0, &config), 100);
        assert_eq!(puzzle_score(42, true, -1, &config), 100);
    }

    #[test]
    fn halfway_time_bonus_floors() {
        let config = ScoringConfig::default();
        // 30 of 100 seconds used: bonus = 100 * 0.7 * 0.5 = 35
        assert_eq!(puzzle_score(30, true, 100, &config), 135);
        // 1 of 3 seconds used: bonus = floor(100 * (2/3) * 0.5) = 33
        assert_eq!(puzzle_score(1, true, 3, &config), 133);
    }

    #[test]
    fn quiz_half_correct_instant() {
        let config = ScoringConfig::default();
        // base 50, bonus 25
        assert_eq!(quiz_score(5, 10, 0, 60, &config), 75);
    }

    #[test]
    fn quiz_empty_scores_zero() {
        let config = ScoringConfig::default();
        assert_eq!(quiz_score(0, 0, 0, 60, &config), 0);
    }

    #[test]
    fn quiz_zero_correct_scores_zero() {
        let config = ScoringConfig::default();
        // base 0 suppresses the time bonus too
        assert_eq!(quiz_score(0, 10, 0, 60, &config), 0);
    }

    #[test]
    fn quiz_full_marks_instant_hits_ceiling() {
        let config = ScoringConfig::default();
        assert_eq!(quiz_score(10, 10, 0, 60, &config), 150);
    }

    #[test]
    fn quiz_base_floors_fraction() {
        let config = ScoringConfig::default();
        // 1/3 correct → base floor(33.33) = 33, untimed
        assert_eq!(quiz_score(1, 3, 0, 0, &config), 33);
    }

    #[test]
    fn time_limit_helpers() {
        assert!(has_time_limit(1));
        assert!(!has_time_limit(0));
        assert!(!has_time_limit(-5));
        assert_eq!(format_time_limit(90), "1:30");
        assert_eq!(format_time_limit(605), "10:05");
        assert_eq!(format_time_limit(0), "unlimited");
    }
}
