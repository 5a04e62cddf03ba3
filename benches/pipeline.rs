//! Pipeline benchmark: posts → per-author feature vectors.

use bot_scorer::config::FeaturesConfig;
use bot_scorer::features::FeatureExtractor;
use bot_scorer::ingest::Post;
use chrono::{Duration, TimeZone, Utc};
use criterion::{black_box, criterion_group, criterion_main, Criterion};

fn make_dummy_posts(authors: usize, per_author: usize) -> Vec<Post> {
    let start = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
    (0..authors)
        .flat_map(|a| {
            (0..per_author).map(move |i| {
                let text = format!("post {} from user_{} #tag @friend http://x.test/{}", i, a, i);
                Post::new(
                    format!("user_{}", a),
                    start + Duration::minutes((a * 7 + i * 13) as i64),
                    Some(text.as_str()),
                )
            })
        })
        .collect()
}

fn bench_feature_extraction(c: &mut Criterion) {
    let extractor = FeatureExtractor::new(FeaturesConfig::default());
    let posts = make_dummy_posts(100, 20);

    c.bench_function("extract_100_authors_20_posts", |b| {
        b.iter(|| black_box(extractor.extract(black_box(&posts)).unwrap()))
    });
}

fn bench_feature_matrix(c: &mut Criterion) {
    let extractor = FeatureExtractor::new(FeaturesConfig::default());
    let posts = make_dummy_posts(500, 10);

    c.bench_function("extract_matrix_500_authors", |b| {
        b.iter(|| black_box(extractor.extract_matrix(black_box(&posts)).unwrap()))
    });
}

criterion_group!(benches, bench_feature_extraction, bench_feature_matrix);
criterion_main!(benches);
