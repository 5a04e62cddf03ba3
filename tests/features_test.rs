//! Feature extractor properties: sentinels, ratios, densities, temporal stats.

mod common;

use bot_scorer::config::FeaturesConfig;
use bot_scorer::features::{AuthorFeatures, FeatureColumn, FeatureExtractor, FeatureMatrix};
use bot_scorer::ingest::Post;
use bot_scorer::ScorerError;
use common::{at, bot_posts, human_posts, labeled_corpus, post};
use std::collections::HashSet;

fn extract(posts: &[Post]) -> Vec<AuthorFeatures> {
    FeatureExtractor::new(FeaturesConfig::default())
        .extract(posts)
        .unwrap()
}

fn single(posts: &[Post]) -> AuthorFeatures {
    let mut rows = extract(posts);
    assert_eq!(rows.len(), 1);
    rows.remove(0)
}

fn close(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

#[test]
fn one_vector_per_distinct_author() {
    let (posts, _) = labeled_corpus("t", 6, 4);
    let rows = extract(&posts);

    let input: HashSet<&str> = posts.iter().map(|p| p.author_id.as_str()).collect();
    let output: HashSet<&str> = rows.iter().map(|r| r.author_id.as_str()).collect();
    assert_eq!(rows.len(), output.len(), "duplicate author in output");
    assert_eq!(input, output);
    // Ordered by author id.
    assert!(rows.windows(2).all(|w| w[0].author_id < w[1].author_id));
}

#[test]
fn single_post_author_uses_sentinels() {
    let f = single(&[post("solo", at(1, 9, 0, 0), Some("just one post here"))]);
    assert_eq!(f.text_len_std, 0.0);
    assert_eq!(f.time_std_dev, -1.0);
    assert_eq!(f.min_time_gap, -1.0);
    assert_eq!(f.active_hour_count, 1);
    assert_eq!(f.max_tweets_one_hour, 1);
    assert_eq!(f.total_posts, 1);
    assert_eq!(f.repetition_ratio, 0.0);
}

#[test]
fn identical_texts_give_repetition_one_minus_inverse_n() {
    let f = single(&bot_posts("rep", 3, "same words again"));
    assert!((f.repetition_ratio - 2.0 / 3.0).abs() < 1e-9);
    assert_eq!(f.text_len_std, 0.0);

    let f = single(&bot_posts("rep", 20, "follow me"));
    assert!(close(f.repetition_ratio, 0.95));
}

#[test]
fn vocab_diversity_bounds() {
    let f = single(&human_posts("h", 5, 0));
    assert!(f.vocab_diversity > 0.0 && f.vocab_diversity <= 1.0);

    // "a a b" + "A b" -> tokens a a b a b, distinct {a, b}
    let f = single(&[
        post("v", at(1, 1, 0, 0), Some("a a b")),
        post("v", at(1, 2, 0, 0), Some("A b")),
    ]);
    assert!(close(f.vocab_diversity, 2.0 / 5.0));

    let f = single(&[
        post("empty", at(1, 1, 0, 0), None),
        post("empty", at(1, 2, 0, 0), Some("")),
        post("empty", at(1, 3, 0, 0), Some("   ")),
    ]);
    assert_eq!(f.vocab_diversity, 0.0);
    assert_eq!(f.avg_text_len, 1.0);
}

#[test]
fn null_text_counts_as_empty() {
    let f = single(&[
        post("n", at(1, 1, 0, 0), None),
        post("n", at(1, 2, 0, 0), Some("abcd")),
    ]);
    assert_eq!(f.avg_text_len, 2.0);
    assert!(close(f.text_len_std, 8.0_f64.sqrt()));
    // The null body is not a distinct text: 1 - 1/2.
    assert!(close(f.repetition_ratio, 0.5));
}

#[test]
fn text_length_counts_characters() {
    let f = single(&[post("u", at(1, 1, 0, 0), Some("héllo wörld"))]);
    assert_eq!(f.avg_text_len, 11.0);
}

#[test]
fn densities_scale_linearly() {
    let base = "follow me http://a.test @amy #tag!";
    let doubled = "follow me http://a.test @amy #tag! follow me http://b.test @bob #more?";
    let once = single(&[
        post("d", at(1, 1, 0, 0), Some(base)),
        post("d", at(1, 2, 0, 0), Some(base)),
    ]);
    let twice = single(&[
        post("d", at(1, 1, 0, 0), Some(doubled)),
        post("d", at(1, 2, 0, 0), Some(doubled)),
    ]);

    assert!(close(once.link_density, 1.0));
    assert!(close(once.mention_density, 1.0));
    assert!(close(once.hashtag_density, 1.0));
    // "." in the urls plus the trailing "!"
    assert!(close(once.punct_density, 2.0));
    assert!(close(once.trigger_word_density, 1.0));
    assert!(close(twice.link_density, 2.0 * once.link_density));
    assert!(close(twice.mention_density, 2.0 * once.mention_density));
    assert!(close(twice.hashtag_density, 2.0 * once.hashtag_density));
    assert!(close(twice.punct_density, 2.0 * once.punct_density));
    assert!(close(
        twice.trigger_word_density,
        2.0 * once.trigger_word_density
    ));
}

#[test]
fn gaps_keep_sub_millisecond_precision() {
    let start = at(1, 10, 0, 0);
    let f = single(&[
        post("m", start, Some("a")),
        post("m", start + chrono::Duration::microseconds(1_000_250), Some("b")),
        post("m", start + chrono::Duration::microseconds(3_000_750), Some("c")),
    ]);
    assert_eq!(f.min_time_gap, 1.00025);
    // gaps 1.00025 and 2.0005
    let expected = (2.0005f64 - 1.00025) / 2f64.sqrt();
    assert!(close(f.time_std_dev, expected));
}

#[test]
fn trigger_phrases_count_independently() {
    let config = FeaturesConfig {
        trigger_words: vec!["follow me".into(), "follow".into(), "free".into()],
        ..FeaturesConfig::default()
    };
    let rows = FeatureExtractor::new(config)
        .extract(&[
            post("t", at(1, 1, 0, 0), Some("FOLLOW ME for freedom")),
            post("t", at(1, 2, 0, 0), Some("free free")),
        ])
        .unwrap();
    // follow me: 1, follow: 1, free: 3 -> 5 over 2 posts
    assert!(close(rows[0].trigger_word_density, 2.5));
}

#[test]
fn default_triggers_ignore_clean_text() {
    let f = single(&human_posts("clean", 5, 3));
    assert_eq!(f.trigger_word_density, 0.0);
    assert_eq!(f.link_density, 0.0);
}

#[test]
fn temporal_statistics() {
    let f = single(&[
        post("t", at(1, 10, 1, 30), Some("c")),
        post("t", at(1, 10, 0, 0), Some("a")),
        post("t", at(1, 10, 0, 30), Some("b")),
        post("t", at(1, 12, 0, 0), Some("d")),
    ]);
    // gaps after sorting: 30, 60, 7110
    let gaps = [30.0_f64, 60.0, 7110.0];
    let mean = gaps.iter().sum::<f64>() / 3.0;
    let std = (gaps.iter().map(|g| (g - mean).powi(2)).sum::<f64>() / 2.0).sqrt();
    assert!(close(f.time_std_dev, std));
    assert_eq!(f.min_time_gap, 30.0);
    assert_eq!(f.active_hour_count, 2);
    assert_eq!(f.max_tweets_one_hour, 3);
}

#[test]
fn two_posts_have_zero_gap_spread() {
    let f = single(&[
        post("t", at(1, 10, 0, 0), Some("a")),
        post("t", at(1, 11, 0, 0), Some("b")),
    ]);
    assert_eq!(f.time_std_dev, 0.0);
    assert_eq!(f.min_time_gap, 3600.0);
}

#[test]
fn every_feature_is_finite() {
    let (posts, _) = labeled_corpus("f", 5, 5);
    for row in extract(&posts) {
        for column in FeatureColumn::ALL {
            assert!(row.value(column).is_finite(), "{} of {}", column, row.author_id);
        }
    }
}

#[test]
fn empty_collection_is_no_data() {
    let err = FeatureExtractor::new(FeaturesConfig::default())
        .extract(&[])
        .unwrap_err();
    assert!(matches!(err, ScorerError::NoData { .. }));
}

#[test]
fn matrix_uses_configured_columns_in_order() {
    let (posts, _) = labeled_corpus("m", 3, 2);
    let extractor = FeatureExtractor::new(FeaturesConfig::default());
    let (rows, matrix) = extractor.extract_matrix(&posts).unwrap();

    assert_eq!(matrix.values.dim(), (5, 12));
    assert_eq!(matrix.columns, FeatureColumn::MODEL_DEFAULT.to_vec());
    assert!(!matrix.columns.contains(&FeatureColumn::AvgTextLen));
    for (r, row) in rows.iter().enumerate() {
        assert_eq!(matrix.author_ids[r], row.author_id);
        for (c, column) in matrix.columns.iter().enumerate() {
            assert_eq!(matrix.values[[r, c]], row.value(*column));
        }
    }

    let narrow = FeatureMatrix::from_rows(&rows, &[FeatureColumn::TotalPosts]).unwrap();
    assert_eq!(narrow.values.dim(), (5, 1));
}
