//! Training/inference driver: fit on one dataset's feature table, score another's.

use crate::config::ScorerConfig;
use crate::decision::{DecisionEngine, ScoredAuthor};
use crate::error::{ScorerError, ScorerResult};
use crate::features::FeatureExtractor;
use crate::ingest::Dataset;
use crate::model::{Classifier, ProbabilityModel, RandomForest};
use std::collections::BTreeMap;
use tracing::info;

/// Scored test authors, ordered by author id.
#[derive(Debug, Clone, Default)]
pub struct ScoredSet {
    pub authors: Vec<ScoredAuthor>,
}

impl ScoredSet {
    pub fn probability_map(&self) -> BTreeMap<String, f64> {
        self.authors
            .iter()
            .map(|s| (s.author_id().to_string(), s.probability))
            .collect()
    }

    /// Ids predicted as bots at the threshold the set was decided with.
    pub fn detections(&self) -> Vec<&str> {
        self.authors
            .iter()
            .filter(|s| s.is_bot())
            .map(|s| s.author_id())
            .collect()
    }

    pub fn len(&self) -> usize {
        self.authors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.authors.is_empty()
    }
}

pub struct Driver<C: Classifier> {
    extractor: FeatureExtractor,
    classifier: C,
    engine: DecisionEngine,
}

impl Driver<RandomForest> {
    pub fn from_config(config: &ScorerConfig) -> Self {
        Self::new(
            FeatureExtractor::new(config.features.clone()),
            RandomForest::new(config.model.clone()),
            DecisionEngine::new(config.decision.clone()),
        )
    }
}

impl<C: Classifier> Driver<C> {
    pub fn new(extractor: FeatureExtractor, classifier: C, engine: DecisionEngine) -> Self {
        Self {
            extractor,
            classifier,
            engine,
        }
    }

    /// Fit on `train`; label = author in the dataset's bot set.
    pub fn fit(&self, train: &Dataset) -> ScorerResult<C::Model> {
        if train.posts.is_empty() {
            return Err(ScorerError::NoData {
                stage: "training ingestion".to_string(),
            });
        }
        let (_, matrix) = self.extractor.extract_matrix(&train.posts)?;
        let labels: Vec<bool> = matrix.author_ids.iter().map(|a| train.is_bot(a)).collect();
        info!(
            classifier = self.classifier.name(),
            authors = matrix.n_rows(),
            bots = labels.iter().filter(|&&b| b).count(),
            "training"
        );
        self.classifier.fit(&matrix.values, &labels)
    }

    pub fn predict(&self, model: &C::Model, test: &Dataset) -> ScorerResult<ScoredSet> {
        if test.posts.is_empty() {
            return Err(ScorerError::NoData {
                stage: "test ingestion".to_string(),
            });
        }
        let (rows, matrix) = self.extractor.extract_matrix(&test.posts)?;
        let probabilities = model.predict_proba(&matrix.values)?;
        let authors: Vec<ScoredAuthor> = rows
            .into_iter()
            .zip(probabilities)
            .map(|(features, p)| self.engine.decide(features, p))
            .collect();
        let set = ScoredSet { authors };
        info!(
            authors = set.len(),
            flagged = set.detections().len(),
            threshold = self.engine.threshold(),
            "scored"
        );
        Ok(set)
    }

    pub fn run(&self, train: &Dataset, test: &Dataset) -> ScorerResult<ScoredSet> {
        let model = self.fit(train)?;
        self.predict(&model, test)
    }

    pub fn engine(&self) -> &DecisionEngine {
        &self.engine
    }
}
