//! Behavioral statistics over one author's posts.

use super::FeatureColumn;
use crate::ingest::Post;
use chrono::Timelike;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

/// Sentinel for temporal statistics of single-post authors.
const INSUFFICIENT: f64 = -1.0;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AuthorFeatures {
    pub author_id: String,
    /// Distinct tokens / total tokens
    pub vocab_diversity: f64,
    /// 1 - distinct bodies / posts
    pub repetition_ratio: f64,
    pub text_len_std: f64,
    pub avg_text_len: f64,
    /// Per-post densities
    pub punct_density: f64,
    pub trigger_word_density: f64,
    pub link_density: f64,
    pub mention_density: f64,
    pub hashtag_density: f64,
    /// Inter-post gaps in seconds; -1 when the author posted once
    pub time_std_dev: f64,
    pub min_time_gap: f64,
    pub active_hour_count: usize,
    pub max_tweets_one_hour: usize,
    pub total_posts: usize,
}

impl AuthorFeatures {
    /// Compute the vector for one author. `posts` must be non-empty.
    pub fn from_posts(author_id: &str, posts: &[&Post], trigger_words: &[String]) -> Self {
        let total = posts.len();
        let n = total as f64;

        let lengths: Vec<f64> = posts
            .iter()
            .map(|p| p.text_or_empty().chars().count() as f64)
            .collect();
        let full_text = posts
            .iter()
            .map(|p| p.text_or_empty())
            .collect::<Vec<_>>()
            .join(" ")
            .to_lowercase();

        let tokens: Vec<&str> = full_text.split_whitespace().collect();
        let vocab_diversity = if tokens.is_empty() {
            0.0
        } else {
            let unique: HashSet<&str> = tokens.iter().copied().collect();
            unique.len() as f64 / tokens.len() as f64
        };

        // Null bodies do not count as a distinct text.
        let unique_texts: HashSet<&str> = posts.iter().filter_map(|p| p.text.as_deref()).collect();
        let repetition_ratio = 1.0 - unique_texts.len() as f64 / n;

        let punct = full_text
            .chars()
            .filter(|c| matches!(c, '!' | '?' | '.'))
            .count();
        let triggers: usize = trigger_words
            .iter()
            .filter(|w| !w.is_empty())
            .map(|w| full_text.matches(w.to_lowercase().as_str()).count())
            .sum();

        let mut features = AuthorFeatures {
            author_id: author_id.to_string(),
            vocab_diversity,
            repetition_ratio,
            text_len_std: if total > 1 { sample_std(&lengths) } else { 0.0 },
            avg_text_len: lengths.iter().sum::<f64>() / n,
            punct_density: punct as f64 / n,
            trigger_word_density: triggers as f64 / n,
            link_density: full_text.matches("http").count() as f64 / n,
            mention_density: full_text.matches('@').count() as f64 / n,
            hashtag_density: full_text.matches('#').count() as f64 / n,
            time_std_dev: INSUFFICIENT,
            min_time_gap: INSUFFICIENT,
            active_hour_count: 1,
            max_tweets_one_hour: 1,
            total_posts: total,
        };

        if total > 1 {
            let mut times: Vec<_> = posts.iter().map(|p| p.created_at).collect();
            times.sort();
            let gaps: Vec<f64> = times
                .windows(2)
                .map(|w| gap_seconds(w[1] - w[0]))
                .collect();
            features.time_std_dev = sample_std(&gaps);
            features.min_time_gap = gaps.iter().copied().fold(f64::INFINITY, f64::min);

            let mut per_hour: HashMap<u32, usize> = HashMap::new();
            for p in posts {
                *per_hour.entry(p.created_at.hour()).or_default() += 1;
            }
            features.active_hour_count = per_hour.len();
            features.max_tweets_one_hour = per_hour.values().copied().max().unwrap_or(1);
        }

        features.sanitize();
        features
    }

    pub fn value(&self, column: FeatureColumn) -> f64 {
        match column {
            FeatureColumn::VocabDiversity => self.vocab_diversity,
            FeatureColumn::RepetitionRatio => self.repetition_ratio,
            FeatureColumn::TextLenStd => self.text_len_std,
            FeatureColumn::AvgTextLen => self.avg_text_len,
            FeatureColumn::PunctDensity => self.punct_density,
            FeatureColumn::TriggerWordDensity => self.trigger_word_density,
            FeatureColumn::LinkDensity => self.link_density,
            FeatureColumn::MentionDensity => self.mention_density,
            FeatureColumn::HashtagDensity => self.hashtag_density,
            FeatureColumn::TimeStdDev => self.time_std_dev,
            FeatureColumn::MinTimeGap => self.min_time_gap,
            FeatureColumn::ActiveHourCount => self.active_hour_count as f64,
            FeatureColumn::MaxTweetsOneHour => self.max_tweets_one_hour as f64,
            FeatureColumn::TotalPosts => self.total_posts as f64,
        }
    }

    /// Coerce any undefined statistic to 0.
    fn sanitize(&mut self) {
        for v in [
            &mut self.vocab_diversity,
            &mut self.repetition_ratio,
            &mut self.text_len_std,
            &mut self.avg_text_len,
            &mut self.punct_density,
            &mut self.trigger_word_density,
            &mut self.link_density,
            &mut self.mention_density,
            &mut self.hashtag_density,
            &mut self.time_std_dev,
            &mut self.min_time_gap,
        ] {
            if !v.is_finite() {
                *v = 0.0;
            }
        }
    }
}

/// Fractional seconds at microsecond precision; millisecond precision past
/// the ~292k-year microsecond range.
fn gap_seconds(gap: chrono::Duration) -> f64 {
    match gap.num_microseconds() {
        Some(us) => us as f64 / 1e6,
        None => gap.num_milliseconds() as f64 / 1e3,
    }
}

/// Sample standard deviation (n - 1). NaN for fewer than two values.
fn sample_std(values: &[f64]) -> f64 {
    if values.len() < 2 {
        return f64::NAN;
    }
    let n = values.len() as f64;
    let mean = values.iter().sum::<f64>() / n;
    let var = values.iter().map(|&x| (x - mean).powi(2)).sum::<f64>() / (n - 1.0);
    var.sqrt()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sample_std_matches_textbook() {
        let s = sample_std(&[2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0]);
        assert!((s - 2.138_089_935).abs() < 1e-6);
        assert!(sample_std(&[3.0]).is_nan());
    }
}
