//! Turns bot probabilities into decisions with a configurable confidence threshold.

use crate::config::DecisionConfig;
use crate::features::AuthorFeatures;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Verdict {
    Human,
    Bot,
}

impl Verdict {
    pub fn from_probability(probability: f64, config: &DecisionConfig) -> Self {
        if probability >= config.threshold {
            Verdict::Bot
        } else {
            Verdict::Human
        }
    }
}

/// Feature vector with the model's opinion attached
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoredAuthor {
    #[serde(flatten)]
    pub features: AuthorFeatures,
    pub probability: f64,
    pub verdict: Verdict,
}

impl ScoredAuthor {
    pub fn author_id(&self) -> &str {
        &self.features.author_id
    }

    pub fn is_bot(&self) -> bool {
        self.verdict == Verdict::Bot
    }
}

pub struct DecisionEngine {
    config: DecisionConfig,
}

impl DecisionEngine {
    pub fn new(config: DecisionConfig) -> Self {
        Self { config }
    }

    pub fn decide(&self, features: AuthorFeatures, probability: f64) -> ScoredAuthor {
        ScoredAuthor {
            features,
            probability,
            verdict: Verdict::from_probability(probability, &self.config),
        }
    }

    /// Re-apply the threshold to already scored authors.
    pub fn relabel(&self, scored: &mut [ScoredAuthor]) {
        for s in scored {
            s.verdict = Verdict::from_probability(s.probability, &self.config);
        }
    }

    pub fn threshold(&self) -> f64 {
        self.config.threshold
    }
}
