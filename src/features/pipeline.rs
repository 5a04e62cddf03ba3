//! Feature extraction pipeline: posts → per-author partitions → feature vectors → matrix.

use super::{AuthorFeatures, FeatureColumn};
use crate::config::FeaturesConfig;
use crate::error::{ScorerError, ScorerResult};
use crate::ingest::Post;
use ndarray::Array2;
use rayon::prelude::*;
use std::collections::BTreeMap;
use tracing::info;

pub struct FeatureExtractor {
    config: FeaturesConfig,
}

impl FeatureExtractor {
    pub fn new(config: FeaturesConfig) -> Self {
        Self { config }
    }

    /// One vector per distinct author, ordered by author id.
    pub fn extract(&self, posts: &[Post]) -> ScorerResult<Vec<AuthorFeatures>> {
        if posts.is_empty() {
            return Err(ScorerError::NoData {
                stage: "feature extraction".to_string(),
            });
        }

        let mut by_author: BTreeMap<&str, Vec<&Post>> = BTreeMap::new();
        for p in posts {
            by_author.entry(p.author_id.as_str()).or_default().push(p);
        }
        info!(authors = by_author.len(), posts = posts.len(), "extracting features");

        let trigger_words = &self.config.trigger_words;
        Ok(by_author
            .into_par_iter()
            .map(|(author, group)| AuthorFeatures::from_posts(author, &group, trigger_words))
            .collect())
    }

    /// Extract and project onto the configured model columns.
    pub fn extract_matrix(&self, posts: &[Post]) -> ScorerResult<(Vec<AuthorFeatures>, FeatureMatrix)> {
        let rows = self.extract(posts)?;
        let matrix = FeatureMatrix::from_rows(&rows, &self.config.model_columns)?;
        Ok((rows, matrix))
    }
}

/// Row-major model input: one row per author over an explicit column subset.
#[derive(Debug, Clone)]
pub struct FeatureMatrix {
    pub author_ids: Vec<String>,
    pub columns: Vec<FeatureColumn>,
    pub values: Array2<f64>,
}

impl FeatureMatrix {
    pub fn from_rows(rows: &[AuthorFeatures], columns: &[FeatureColumn]) -> ScorerResult<Self> {
        let data: Vec<f64> = rows
            .iter()
            .flat_map(|r| columns.iter().map(move |&c| r.value(c)))
            .collect();
        let values = Array2::from_shape_vec((rows.len(), columns.len()), data)
            .map_err(|e| ScorerError::Model(format!("feature matrix shape: {}", e)))?;
        Ok(Self {
            author_ids: rows.iter().map(|r| r.author_id.clone()).collect(),
            columns: columns.to_vec(),
            values,
        })
    }

    pub fn n_rows(&self) -> usize {
        self.values.nrows()
    }
}
