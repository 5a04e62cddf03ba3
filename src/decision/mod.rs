//! Probability → bot/human decision.

mod engine;

pub use engine::{DecisionEngine, ScoredAuthor, Verdict};
