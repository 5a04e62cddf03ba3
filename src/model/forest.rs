//! Class-balanced random forest: bootstrap-weighted CART trees trained in
//! parallel, probabilities averaged across trees.

use super::tree::{DecisionTree, TreeParams};
use super::{Classifier, ProbabilityModel};
use crate::config::ModelConfig;
use crate::error::{ScorerError, ScorerResult};
use ndarray::Array2;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use rayon::prelude::*;
use tracing::{debug, warn};

pub struct RandomForest {
    config: ModelConfig,
}

pub struct ForestModel {
    trees: Vec<DecisionTree>,
    n_features: usize,
}

impl RandomForest {
    pub fn new(config: ModelConfig) -> Self {
        Self { config }
    }

    /// Per-class sample weights `(human, bot)`. Balanced: n / (2 * n_class).
    fn class_weights(&self, labels: &[bool]) -> (f64, f64) {
        let n = labels.len() as f64;
        let bots = labels.iter().filter(|&&b| b).count() as f64;
        let humans = n - bots;
        if !self.config.balanced || bots == 0.0 || humans == 0.0 {
            return (1.0, 1.0);
        }
        (n / (2.0 * humans), n / (2.0 * bots))
    }
}

impl Classifier for RandomForest {
    type Model = ForestModel;

    fn fit(&self, features: &Array2<f64>, labels: &[bool]) -> ScorerResult<ForestModel> {
        let n = features.nrows();
        if n == 0 {
            return Err(ScorerError::Model("cannot fit on an empty feature matrix".to_string()));
        }
        if labels.len() != n {
            return Err(ScorerError::Model(format!(
                "{} feature rows but {} labels",
                n,
                labels.len()
            )));
        }
        let bots = labels.iter().filter(|&&b| b).count();
        if bots == 0 || bots == n {
            warn!(rows = n, bots, "training labels contain a single class");
        }

        let (w_human, w_bot) = self.class_weights(labels);
        let params = TreeParams {
            max_features: ((features.ncols() as f64).sqrt() as usize).max(1),
            max_depth: self.config.max_depth,
            min_samples_split: self.config.min_samples_split.max(2),
        };

        let mut master = ChaCha8Rng::seed_from_u64(self.config.seed);
        let seeds: Vec<u64> = (0..self.config.n_trees).map(|_| master.gen()).collect();

        let trees: Vec<DecisionTree> = seeds
            .into_par_iter()
            .map(|seed| {
                let mut rng = ChaCha8Rng::seed_from_u64(seed);
                let mut weights = vec![0.0; n];
                for _ in 0..n {
                    weights[rng.gen_range(0..n)] += 1.0;
                }
                for (w, &is_bot) in weights.iter_mut().zip(labels) {
                    *w *= if is_bot { w_bot } else { w_human };
                }
                DecisionTree::grow(features, labels, &weights, params, &mut rng)
            })
            .collect();

        debug!(
            trees = trees.len(),
            rows = n,
            bots,
            max_features = params.max_features,
            "forest trained"
        );
        Ok(ForestModel {
            trees,
            n_features: features.ncols(),
        })
    }

    fn name(&self) -> &str {
        "random_forest"
    }
}

impl ForestModel {
    pub fn n_trees(&self) -> usize {
        self.trees.len()
    }
}

impl ProbabilityModel for ForestModel {
    fn predict_proba(&self, features: &Array2<f64>) -> ScorerResult<Vec<f64>> {
        if features.ncols() != self.n_features {
            return Err(ScorerError::Model(format!(
                "model trained on {} columns, got {}",
                self.n_features,
                features.ncols()
            )));
        }
        let n_trees = self.trees.len() as f64;
        Ok((0..features.nrows())
            .into_par_iter()
            .map(|r| {
                let row = features.row(r);
                let sum: f64 = self.trees.iter().map(|t| t.predict_row(row)).sum();
                (sum / n_trees).clamp(0.0, 1.0)
            })
            .collect())
    }
}
