//! QuizHeroes Server - SpacetimeDB Module
//!
//! Educational card/quiz game backend running as a SpacetimeDB module.
//! All persistence and session handling lives here as tables and
//! reducers; scoring, progression, and ranking math comes from
//! `quizheroes-logic`. Clients are thin renderers that subscribe to the
//! tables.

mod content;
mod reducers;
mod tables;

pub use reducers::*;
pub use tables::*;
