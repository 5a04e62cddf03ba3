//! Bot scorer: behavioral bot-likelihood scoring for social-media authors.
//!
//! Modular structure:
//! - [`ingest`]: Post collections and known-bot id lists
//! - [`features`]: Per-author behavioral feature extraction
//! - [`model`]: Classifier contract and the class-balanced random forest
//! - [`decision`]: Confidence threshold
//! - [`driver`]: Fit on one feature table, score another
//! - [`eval`]: Confusion counts and weighted score
//! - [`crossval`]: Two-fold swap over two labeled datasets
//! - [`export`]: Probability map, detections, merged dataset files
//! - [`runner`]: Pipeline entry point
//! - [`logging`]: Structured logging

pub mod config;
pub mod crossval;
pub mod decision;
pub mod driver;
pub mod error;
pub mod eval;
pub mod export;
pub mod features;
pub mod ingest;
pub mod logging;
pub mod model;
pub mod runner;

pub use config::ScorerConfig;
pub use decision::{DecisionEngine, ScoredAuthor, Verdict};
pub use driver::{Driver, ScoredSet};
pub use error::{ScorerError, ScorerResult};
pub use eval::{Confusion, EvalReport, Evaluator};
pub use features::{AuthorFeatures, FeatureColumn, FeatureExtractor};
pub use ingest::{Dataset, Post};
pub use logging::StructuredLogger;
pub use model::{Classifier, ProbabilityModel, RandomForest};
pub use runner::{run, RunMode, RunReport};
