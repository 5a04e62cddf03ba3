//! Scorer configuration. Every tunable of a run lives here and is passed
//! explicitly into [`crate::runner::run`].

use crate::error::{ScorerError, ScorerResult};
use crate::features::FeatureColumn;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ScorerConfig {
    /// Labeled posts the model is fitted on (single mode)
    pub train: DatasetSource,
    /// Posts to score; `bots` may be empty, which disables evaluation
    pub test: DatasetSource,
    /// Two-fold swap mode over two labeled datasets
    pub cross_validation: CrossValidationConfig,
    /// Feature extraction parameters
    pub features: FeaturesConfig,
    /// Ensemble parameters
    pub model: ModelConfig,
    /// Bot/human cutoff
    pub decision: DecisionConfig,
    /// Scoring weights and absent-author policy
    pub evaluation: EvaluationConfig,
    /// Export locations and naming tokens
    pub output: OutputConfig,
    /// Logging
    pub log: LogConfig,
}

/// One logical dataset: post files appended in order, bot files unioned.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DatasetSource {
    pub posts: Vec<PathBuf>,
    pub bots: Vec<PathBuf>,
}

impl DatasetSource {
    pub fn new(posts: impl Into<PathBuf>, bots: impl Into<PathBuf>) -> Self {
        Self {
            posts: vec![posts.into()],
            bots: vec![bots.into()],
        }
    }

    pub fn is_labeled(&self) -> bool {
        !self.bots.is_empty()
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CrossValidationConfig {
    pub enabled: bool,
    pub first: DatasetSource,
    pub second: DatasetSource,
    /// Where to write the merged posts/users document, if anywhere
    pub merged_dataset: Option<PathBuf>,
    /// Where to write the merged ground truth, if anywhere
    pub merged_bots: Option<PathBuf>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FeaturesConfig {
    /// Spam/promotional phrases counted by the trigger-word density
    pub trigger_words: Vec<String>,
    /// Columns fed to the model, in order
    pub model_columns: Vec<FeatureColumn>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelConfig {
    pub n_trees: usize,
    pub seed: u64,
    /// `None` grows trees until leaves are pure
    pub max_depth: Option<usize>,
    pub min_samples_split: usize,
    /// Reweight classes inversely to their frequency
    pub balanced: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DecisionConfig {
    /// Probability at or above which an author is flagged (0.0–1.0).
    /// Higher trades recall for precision.
    pub threshold: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EvaluationConfig {
    pub weights: ScoreWeights,
    /// Treat authors missing from the ground truth as humans. When false,
    /// only authors listed in the dataset's `users` are counted as negatives.
    pub absent_as_negative: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoreWeights {
    pub tp_reward: i64,
    pub fn_penalty: i64,
    pub fp_penalty: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub dir: PathBuf,
    /// Probability map, relative to `dir` unless absolute
    pub scores_file: PathBuf,
    pub team_name: String,
    pub lang: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    pub level: String,
    pub json: bool,
}

pub const DEFAULT_TRIGGER_WORDS: &[&str] = &[
    "check my bio",
    "follow me",
    "click",
    "free",
    "giveaway",
    "win",
    "bet",
    "stream",
    "live",
    "crypto",
    "nft",
    "limited time",
    "official",
    "update",
    "breaking",
    "news",
    "alert",
];

impl Default for FeaturesConfig {
    fn default() -> Self {
        Self {
            trigger_words: DEFAULT_TRIGGER_WORDS.iter().map(|w| w.to_string()).collect(),
            model_columns: FeatureColumn::MODEL_DEFAULT.to_vec(),
        }
    }
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            n_trees: 500,
            seed: 42,
            max_depth: None,
            min_samples_split: 2,
            balanced: true,
        }
    }
}

impl Default for DecisionConfig {
    fn default() -> Self {
        Self { threshold: 0.55 }
    }
}

impl Default for EvaluationConfig {
    fn default() -> Self {
        Self {
            weights: ScoreWeights::default(),
            absent_as_negative: true,
        }
    }
}

impl Default for ScoreWeights {
    fn default() -> Self {
        Self {
            tp_reward: 4,
            fn_penalty: 1,
            fp_penalty: 2,
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("."),
            scores_file: PathBuf::from("scores.json"),
            team_name: "MyTeam".to_string(),
            lang: "en".to_string(),
        }
    }
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: false,
        }
    }
}

impl OutputConfig {
    pub fn scores_path(&self) -> PathBuf {
        self.dir.join(&self.scores_file)
    }

    /// `{dir}/{team}.detections.{lang}.txt`
    pub fn detections_path(&self) -> PathBuf {
        self.dir
            .join(format!("{}.detections.{}.txt", self.team_name, self.lang))
    }
}

impl ScorerConfig {
    /// Load from JSON file if present; otherwise return default.
    pub fn load(path: &Path) -> ScorerResult<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let data = std::fs::read_to_string(path).map_err(|source| ScorerError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Self = serde_json::from_str(&data).map_err(|source| ScorerError::Json {
            path: path.to_path_buf(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> ScorerResult<()> {
        let t = self.decision.threshold;
        if !(0.0..=1.0).contains(&t) {
            return Err(ScorerError::InvalidConfig(format!(
                "decision.threshold must be within [0, 1], got {}",
                t
            )));
        }
        if self.features.model_columns.is_empty() {
            return Err(ScorerError::InvalidConfig(
                "features.model_columns is empty".to_string(),
            ));
        }
        if self.model.n_trees == 0 {
            return Err(ScorerError::InvalidConfig("model.n_trees must be > 0".to_string()));
        }
        let cv = &self.cross_validation;
        if cv.merged_dataset.is_some() != cv.merged_bots.is_some() {
            return Err(ScorerError::InvalidConfig(
                "cross_validation.merged_dataset and merged_bots must be set together".to_string(),
            ));
        }
        Ok(())
    }
}
