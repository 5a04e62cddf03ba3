use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ScorerError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid json in {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("{source_path}: post #{index} is missing required field `{field}`")]
    MissingField {
        source_path: PathBuf,
        index: usize,
        field: &'static str,
    },

    #[error("{source_path}: post #{index} has invalid `{field}`: {reason}")]
    InvalidField {
        source_path: PathBuf,
        index: usize,
        field: &'static str,
        reason: String,
    },

    #[error("{source_path}: post #{index} has unparsable `created_at` value {value:?}")]
    InvalidTimestamp {
        source_path: PathBuf,
        index: usize,
        value: String,
    },

    #[error("no data: {stage} produced no posts")]
    NoData { stage: String },

    #[error("invalid config: {0}")]
    InvalidConfig(String),

    #[error("model error: {0}")]
    Model(String),

    #[error("json error: {0}")]
    Serialize(#[from] serde_json::Error),
}

pub type ScorerResult<T> = Result<T, ScorerError>;
