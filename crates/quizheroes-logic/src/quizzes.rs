//! Quiz content — questions, answers, and grading.
//!
//! Questions carry a difficulty tier and a set of answers, exactly one of
//! which should be marked correct. Grading is pure: the caller supplies
//! the player's picks and gets a correct count back, which feeds the
//! timed scoring formula in [`crate::scoring`].

use crate::levels::Difficulty;
use crate::scoring::{self, ScoringConfig};
use serde::{Deserialize, Serialize};

/// One answer option on a question.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Answer {
    pub answer_id: u64,
    pub question_id: u64,
    pub text: String,
    pub is_correct: bool,
}

/// A quiz question with its answer options.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Question {
    pub question_id: u64,
    pub quiz_id: u64,
    pub text: String,
    /// Raw difficulty string; see [`Difficulty::parse`].
    pub difficulty: String,
    pub answers: Vec<Answer>,
}

impl Question {
    pub fn difficulty(&self) -> Difficulty {
        Difficulty::parse(&self.difficulty)
    }

    /// Points this question is worth, by difficulty.
    pub fn points(&self) -> u32 {
        self.difficulty().question_points()
    }

    /// The answer marked correct, if any.
    pub fn correct_answer(&self) -> Option<&Answer> {
        self.answers.iter().find(|a| a.is_correct)
    }

    pub fn has_correct_answer(&self) -> bool {
        self.correct_answer().is_some()
    }

    /// Whether the given answer id is the correct one. An id that is not
    /// on this question is simply wrong, never an error.
    pub fn is_correct_answer(&self, answer_id: u64) -> bool {
        self.answers
            .iter()
            .find(|a| a.answer_id == answer_id)
            .map(|a| a.is_correct)
            .unwrap_or(false)
    }

    /// Shuffle answer order deterministically from `seed` (e.g. a session
    /// id), so a reconnecting client sees the same order again.
    pub fn shuffle_answers(&mut self, seed: u64) {
        // Mix the question id in so every question in a session gets its
        // own permutation from one seed.
        let mut state = seed
            .wrapping_mul(0x9E37_79B9_7F4A_7C15)
            .wrapping_add(self.question_id)
            | 1;
        for i in (1..self.answers.len()).rev() {
            let j = (next_rand(&mut state) % (i as u64 + 1)) as usize;
            self.answers.swap(i, j);
        }
    }
}

// xorshift64* — deterministic and plenty for display shuffling.
fn next_rand(state: &mut u64) -> u64 {
    let mut x = *state;
    x ^= x >> 12;
    x ^= x << 25;
    x ^= x >> 27;
    *state = x;
    x.wrapping_mul(0x2545_F491_4F6C_DD1D)
}

/// A player's chosen answer for one question.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct AnswerPick {
    pub question_id: u64,
    pub answer_id: u64,
}

/// A quiz: an ordered list of questions under one time limit.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Quiz {
    pub quiz_id: u64,
    pub level_id: u64,
    pub name: String,
    pub description: String,
    /// Seconds; non-positive means untimed.
    pub time_limit: i32,
    pub questions: Vec<Question>,
}

impl Quiz {
    pub fn question_count(&self) -> u32 {
        self.questions.len() as u32
    }

    /// Sum of per-question difficulty points.
    pub fn total_points(&self) -> u32 {
        self.questions.iter().map(|q| q.points()).sum()
    }

    /// Attach a question, claiming it for this quiz.
    pub fn add_question(&mut self, mut question: Question) {
        question.quiz_id = self.quiz_id;
        self.questions.push(question);
    }

    pub fn remove_question(&mut self, question_id: u64) -> bool {
        let before = self.questions.len();
        self.questions.retain(|q| q.question_id != question_id);
        self.questions.len() != before
    }

    /// Grade a set of picks: one per question, unknown question or answer
    /// ids count as wrong.
    pub fn count_correct(&self, picks: &[AnswerPick]) -> u32 {
        picks
            .iter()
            .filter(|pick| {
                self.questions
                    .iter()
                    .find(|q| q.question_id == pick.question_id)
                    .map(|q| q.is_correct_answer(pick.answer_id))
                    .unwrap_or(false)
            })
            .count() as u32
    }

    pub fn has_time_limit(&self) -> bool {
        scoring::has_time_limit(self.time_limit)
    }

    /// Score an attempt with `correct_answers` correct out of this quiz's
    /// questions.
    pub fn score(&self, correct_answers: u32, solve_time_secs: u32, config: &ScoringConfig) -> u32 {
        scoring::quiz_score(
            correct_answers,
            self.question_count(),
            solve_time_secs,
            self.time_limit,
            config,
        )
    }

    pub fn max_score(&self, config: &ScoringConfig) -> u32 {
        scoring::max_score(config)
    }
}
