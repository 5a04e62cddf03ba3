//! Per-author behavioral feature extraction from raw posts.

mod behavioral;
mod pipeline;

pub use behavioral::AuthorFeatures;
pub use pipeline::{FeatureExtractor, FeatureMatrix};

use serde::{Deserialize, Serialize};

/// Numeric columns of [`AuthorFeatures`], addressable by name so the model
/// input subset can be configured.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FeatureColumn {
    VocabDiversity,
    RepetitionRatio,
    TextLenStd,
    AvgTextLen,
    PunctDensity,
    TriggerWordDensity,
    LinkDensity,
    MentionDensity,
    HashtagDensity,
    TimeStdDev,
    MinTimeGap,
    ActiveHourCount,
    MaxTweetsOneHour,
    TotalPosts,
}

impl FeatureColumn {
    pub const ALL: [FeatureColumn; 14] = [
        FeatureColumn::VocabDiversity,
        FeatureColumn::RepetitionRatio,
        FeatureColumn::TextLenStd,
        FeatureColumn::AvgTextLen,
        FeatureColumn::PunctDensity,
        FeatureColumn::TriggerWordDensity,
        FeatureColumn::LinkDensity,
        FeatureColumn::MentionDensity,
        FeatureColumn::HashtagDensity,
        FeatureColumn::TimeStdDev,
        FeatureColumn::MinTimeGap,
        FeatureColumn::ActiveHourCount,
        FeatureColumn::MaxTweetsOneHour,
        FeatureColumn::TotalPosts,
    ];

    /// Default model input: everything except raw mean length and post count.
    pub const MODEL_DEFAULT: [FeatureColumn; 12] = [
        FeatureColumn::VocabDiversity,
        FeatureColumn::RepetitionRatio,
        FeatureColumn::TextLenStd,
        FeatureColumn::TriggerWordDensity,
        FeatureColumn::LinkDensity,
        FeatureColumn::MentionDensity,
        FeatureColumn::HashtagDensity,
        FeatureColumn::TimeStdDev,
        FeatureColumn::MinTimeGap,
        FeatureColumn::ActiveHourCount,
        FeatureColumn::MaxTweetsOneHour,
        FeatureColumn::PunctDensity,
    ];

    pub fn name(self) -> &'static str {
        match self {
            FeatureColumn::VocabDiversity => "vocab_diversity",
            FeatureColumn::RepetitionRatio => "repetition_ratio",
            FeatureColumn::TextLenStd => "text_len_std",
            FeatureColumn::AvgTextLen => "avg_text_len",
            FeatureColumn::PunctDensity => "punct_density",
            FeatureColumn::TriggerWordDensity => "trigger_word_density",
            FeatureColumn::LinkDensity => "link_density",
            FeatureColumn::MentionDensity => "mention_density",
            FeatureColumn::HashtagDensity => "hashtag_density",
            FeatureColumn::TimeStdDev => "time_std_dev",
            FeatureColumn::MinTimeGap => "min_time_gap",
            FeatureColumn::ActiveHourCount => "active_hour_count",
            FeatureColumn::MaxTweetsOneHour => "max_tweets_one_hour",
            FeatureColumn::TotalPosts => "total_posts",
        }
    }
}

impl std::fmt::Display for FeatureColumn {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
