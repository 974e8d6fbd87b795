//! Puzzle content — solution checking and scoring glue.

use crate::scoring::{self, ScoringConfig};
use serde::{Deserialize, Serialize};

/// A single puzzle. The board content in `data` is opaque to the engine;
/// only the solution string and time limit matter here.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Puzzle {
    pub puzzle_id: u64,
    pub level_id: u64,
    pub name: String,
    pub description: String,
    /// Free-form puzzle type tag (e.g. "word_search", "matching").
    pub puzzle_type: String,
    /// Serialized board/content, interpreted by the client.
    pub data: String,
    /// Expected solution; `None` while authoring.
    pub solution: Option<String>,
    /// Seconds; non-positive means untimed.
    pub time_limit: i32,
}

impl Puzzle {
    /// Exact-match check. A puzzle with no stored solution never matches.
    pub fn check_solution(&self, submitted: &str) -> bool {
        self.solution.as_deref() == Some(submitted)
    }

    pub fn has_time_limit(&self) -> bool {
        scoring::has_time_limit(self.time_limit)
    }

    /// Score an attempt at this puzzle.
    pub fn score(&self, solve_time_secs: u32, is_correct: bool, config: &ScoringConfig) -> u32 {
        scoring::puzzle_score(solve_time_secs, is_correct, self.time_limit, config)
    }

    pub fn max_score(&self, config: &ScoringConfig) -> u32 {
        scoring::max_score(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn puzzle(solution: Option<&str>, time_limit: i32) -> Puzzle {
        Puzzle {
            puzzle_id: 1,
            level_id: 1,
            name: "Anagram".into(),
            description: String::new(),
            puzzle_type: "anagram".into(),
            data: "RTSA".into(),
            solution: solution.map(String::from),
            time_limit,
        }
    }

    #[test]
    fn solution_check_is_exact() {
        let p = puzzle(Some("STAR"), 60);
        assert!(p.check_solution("STAR"));
        assert!(!p.check_solution("star"));
        assert!(!p.check_solution("RATS "));
    }

    #[test]
    fn missing_solution_never_matches() {
        let p = puzzle(None, 60);
        assert!(!p.check_solution(""));
        assert!(!p.check_solution("anything"));
    }

    #[test]
    fn scoring_glue() {
        let config = ScoringConfig::default();
        let p = puzzle(Some("STAR"), 100);
        assert_eq!(p.score(0, true, &config), 150);
        assert_eq!(p.score(100, true, &config), 100);
        assert_eq!(p.score(0, false, &config), 0);
        assert_eq!(p.max_score(&config), 150);
        assert!(p.has_time_limit());
        assert!(!puzzle(None, 0).has_time_limit());
    }
}
