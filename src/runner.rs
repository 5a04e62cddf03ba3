//! Pipeline entry point: ingest → extract → fit → predict → evaluate → export.

use crate::config::ScorerConfig;
use crate::crossval::run_cross_validation;
use crate::driver::Driver;
use crate::error::ScorerResult;
use crate::eval::{EvalReport, Evaluator};
use crate::export;
use crate::ingest::load_dataset;
use crate::model::RandomForest;
use serde::Serialize;
use std::collections::BTreeMap;
use tracing::{info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RunMode {
    Single,
    CrossValidation,
}

#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
    pub mode: RunMode,
    pub threshold: f64,
    /// Author → P(bot) for every scored author
    pub scores: BTreeMap<String, f64>,
    /// Authors at or above the threshold (single mode)
    pub detections: Vec<String>,
    /// Empty when the scored data had no ground truth
    pub evaluations: Vec<EvalReport>,
}

pub fn run(config: &ScorerConfig) -> ScorerResult<RunReport> {
    config.validate()?;
    if config.cross_validation.enabled {
        run_folds(config)
    } else {
        run_single(config)
    }
}

fn run_single(config: &ScorerConfig) -> ScorerResult<RunReport> {
    let driver = Driver::<RandomForest>::from_config(config);
    let evaluator = Evaluator::new(config.evaluation.clone());

    let train = load_dataset(&config.train)?;
    if train.bots.is_empty() {
        warn!("training ground truth is empty; every author will be labeled human");
    }
    let test = load_dataset(&config.test)?;
    let scored = driver.run(&train, &test)?;

    let evaluations = if !test.bots.is_empty() {
        let report = evaluator.evaluate("test", &scored, &test);
        info!(
            tp = report.confusion.tp,
            fp = report.confusion.fp,
            fn_ = report.confusion.fn_,
            score = report.score,
            "evaluation"
        );
        vec![report]
    } else {
        if config.test.is_labeled() {
            warn!("test ground truth configured but no bot ids loaded; evaluation skipped");
        } else {
            info!("no test ground truth; evaluation skipped");
        }
        Vec::new()
    };

    let scores = scored.probability_map();
    let detections: Vec<String> = scored.detections().into_iter().map(String::from).collect();
    export::write_scores(&config.output.scores_path(), &scores)?;
    export::write_detections(&config.output.detections_path(), &detections)?;

    Ok(RunReport {
        mode: RunMode::Single,
        threshold: driver.engine().threshold(),
        scores,
        detections,
        evaluations,
    })
}

fn run_folds(config: &ScorerConfig) -> ScorerResult<RunReport> {
    let cv = &config.cross_validation;
    let driver = Driver::<RandomForest>::from_config(config);
    let evaluator = Evaluator::new(config.evaluation.clone());

    let first = load_dataset(&cv.first)?;
    let second = load_dataset(&cv.second)?;
    let outcome = run_cross_validation(&driver, &evaluator, &first, &second)?;

    export::write_scores(&config.output.scores_path(), &outcome.merged)?;

    if let (Some(dataset_out), Some(bots_out)) = (&cv.merged_dataset, &cv.merged_bots) {
        let posts: Vec<_> = cv.first.posts.iter().chain(&cv.second.posts).collect();
        let bots: Vec<_> = cv.first.bots.iter().chain(&cv.second.bots).collect();
        export::merge_datasets(&posts, &bots, dataset_out, bots_out)?;
    }

    let [a, b] = outcome.folds;
    Ok(RunReport {
        mode: RunMode::CrossValidation,
        threshold: driver.engine().threshold(),
        scores: outcome.merged,
        detections: Vec::new(),
        evaluations: vec![a.report, b.report],
    })
}
