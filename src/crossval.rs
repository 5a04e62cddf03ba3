//! Two-fold swap: fit on A / score B, fit on B / score A, so every author in
//! the combined corpus is scored by a model that never saw their posts.

use crate::driver::{Driver, ScoredSet};
use crate::error::ScorerResult;
use crate::eval::{EvalReport, Evaluator};
use crate::ingest::Dataset;
use crate::model::Classifier;
use std::collections::BTreeMap;
use tracing::{info, warn};

pub struct FoldOutcome {
    /// Name of the dataset this fold scored
    pub label: String,
    pub scored: ScoredSet,
    pub report: EvalReport,
}

pub struct CrossValidation {
    pub folds: [FoldOutcome; 2],
    /// Union of both folds' probabilities
    pub merged: BTreeMap<String, f64>,
}

/// Union of fold probability maps. Later maps win on a shared author.
pub fn merge_probability_maps<'a>(
    maps: impl IntoIterator<Item = &'a BTreeMap<String, f64>>,
) -> BTreeMap<String, f64> {
    let mut merged = BTreeMap::new();
    let mut overlap = 0usize;
    for map in maps {
        for (author, &p) in map {
            if merged.insert(author.clone(), p).is_some() {
                overlap += 1;
            }
        }
    }
    if overlap > 0 {
        warn!(overlap, "authors scored in more than one fold; later fold kept");
    }
    merged
}

pub fn run_cross_validation<C: Classifier>(
    driver: &Driver<C>,
    evaluator: &Evaluator,
    first: &Dataset,
    second: &Dataset,
) -> ScorerResult<CrossValidation> {
    let fold = |train: &Dataset, test: &Dataset, label: &str| -> ScorerResult<FoldOutcome> {
        info!(fold = label, "fold started");
        let scored = driver.run(train, test)?;
        let report = evaluator.evaluate(label, &scored, test);
        info!(
            fold = label,
            tp = report.confusion.tp,
            fp = report.confusion.fp,
            fn_ = report.confusion.fn_,
            score = report.score,
            "fold complete"
        );
        Ok(FoldOutcome {
            label: label.to_string(),
            scored,
            report,
        })
    };

    let (a, b) = rayon::join(
        || fold(second, first, "first"),
        || fold(first, second, "second"),
    );
    let folds = [a?, b?];

    let maps: Vec<_> = folds.iter().map(|f| f.scored.probability_map()).collect();
    let merged = merge_probability_maps(&maps);
    info!(authors = merged.len(), "fold probabilities merged");
    Ok(CrossValidation { folds, merged })
}
