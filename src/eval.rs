//! Confusion counts and the asymmetric detection score.

use crate::config::{EvaluationConfig, ScoreWeights};
use crate::driver::ScoredSet;
use crate::ingest::Dataset;
use serde::{Deserialize, Serialize};
use tracing::debug;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Confusion {
    pub tp: u64,
    #[serde(rename = "fn")]
    pub fn_: u64,
    pub fp: u64,
    pub tn: u64,
}

impl Confusion {
    /// Tally `(predicted, actual)` pairs.
    pub fn from_pairs(pairs: impl IntoIterator<Item = (bool, bool)>) -> Self {
        let mut c = Confusion::default();
        for (predicted, actual) in pairs {
            match (predicted, actual) {
                (true, true) => c.tp += 1,
                (false, true) => c.fn_ += 1,
                (true, false) => c.fp += 1,
                (false, false) => c.tn += 1,
            }
        }
        c
    }

    /// `tp_reward * TP - fn_penalty * FN - fp_penalty * FP`
    pub fn score(&self, w: &ScoreWeights) -> i64 {
        w.tp_reward * self.tp as i64 - w.fn_penalty * self.fn_ as i64 - w.fp_penalty * self.fp as i64
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvalReport {
    pub label: String,
    pub confusion: Confusion,
    pub score: i64,
    /// Authors left out because they had no ground truth
    pub excluded: u64,
}

pub struct Evaluator {
    config: EvaluationConfig,
}

impl Evaluator {
    pub fn new(config: EvaluationConfig) -> Self {
        Self { config }
    }

    /// Compare decisions against `truth.bots`. Authors outside the bot set are
    /// negatives, unless `absent_as_negative` is off and they are also missing
    /// from `truth.users`, in which case they are skipped.
    pub fn evaluate(&self, label: &str, scored: &ScoredSet, truth: &Dataset) -> EvalReport {
        let mut excluded = 0;
        let pairs: Vec<(bool, bool)> = scored
            .authors
            .iter()
            .filter_map(|s| {
                let id = s.author_id();
                let actual = truth.is_bot(id);
                if !actual && !self.config.absent_as_negative && !truth.users.contains(id) {
                    excluded += 1;
                    return None;
                }
                Some((s.is_bot(), actual))
            })
            .collect();

        let confusion = Confusion::from_pairs(pairs);
        let score = confusion.score(&self.config.weights);
        debug!(label, ?confusion, score, excluded, "evaluated");
        EvalReport {
            label: label.to_string(),
            confusion,
            score,
            excluded,
        }
    }
}
