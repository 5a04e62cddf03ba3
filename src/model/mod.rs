//! Supervised bot classifier. The pipeline only sees the two traits below;
//! [`RandomForest`] is the bundled implementation.

mod forest;
mod tree;

pub use forest::{ForestModel, RandomForest};
pub use tree::DecisionTree;

use crate::error::ScorerResult;
use ndarray::Array2;

/// Trains a model from a feature matrix and binary labels (`true` = bot).
pub trait Classifier: Send + Sync {
    type Model: ProbabilityModel;

    fn fit(&self, features: &Array2<f64>, labels: &[bool]) -> ScorerResult<Self::Model>;

    fn name(&self) -> &str;
}

/// A fitted model producing P(bot) per row, each in [0, 1].
pub trait ProbabilityModel: Send + Sync {
    fn predict_proba(&self, features: &Array2<f64>) -> ScorerResult<Vec<f64>>;
}
