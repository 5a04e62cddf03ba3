#![allow(dead_code)]

use bot_scorer::ingest::Post;
use chrono::{DateTime, TimeZone, Utc};
use serde_json::{json, Value};
use std::path::{Path, PathBuf};

/// Everyday sentences free of every default trigger phrase.
pub const HUMAN_LINES: [&str; 10] = [
    "morning coffee tastes good",
    "walked the dog around the park",
    "reading a book about history",
    "cooking pasta for dinner tonight",
    "sunny day at the beach",
    "my sister got a new puppy",
    "finished the marathon training run",
    "planted tomatoes in the garden",
    "watched a movie with my family",
    "the bus was late again today",
];

pub const BOT_LINES: [&str; 4] = [
    "follow me for daily deals",
    "follow me now",
    "check my bio and follow me",
    "follow me for free crypto tips",
];

pub fn at(day: u32, hour: u32, minute: u32, second: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 3, day, hour, minute, second).unwrap()
}

pub fn post(author: &str, when: DateTime<Utc>, text: Option<&str>) -> Post {
    Post::new(author, when, text)
}

/// `n` (<= 5) distinct sentences, each in its own hour.
pub fn human_posts(author: &str, n: usize, seed: usize) -> Vec<Post> {
    (0..n)
        .map(|k| {
            let line = HUMAN_LINES[(seed + k) % HUMAN_LINES.len()];
            post(author, at(1, 7 + 3 * k as u32, (seed * 7 % 60) as u32, 0), Some(line))
        })
        .collect()
}

/// `n` (<= 20) copies of `text` inside one hour.
pub fn bot_posts(author: &str, n: usize, text: &str) -> Vec<Post> {
    (0..n)
        .map(|k| post(author, at(1, 14, 3 * k as u32, 0), Some(text)))
        .collect()
}

/// `humans` + `bots` authors named `{prefix}h{i}` / `{prefix}b{i}`; returns posts and bot ids.
pub fn labeled_corpus(prefix: &str, humans: usize, bots: usize) -> (Vec<Post>, Vec<String>) {
    let mut posts = Vec::new();
    let mut bot_ids = Vec::new();
    for i in 0..humans {
        posts.extend(human_posts(&format!("{}h{}", prefix, i), 4 + i % 2, i));
    }
    for i in 0..bots {
        let id = format!("{}b{}", prefix, i);
        posts.extend(bot_posts(&id, 15 + i % 6, BOT_LINES[i % BOT_LINES.len()]));
        bot_ids.push(id);
    }
    (posts, bot_ids)
}

pub fn posts_json(posts: &[Post]) -> Value {
    Value::Array(
        posts
            .iter()
            .map(|p| {
                json!({
                    "author_id": p.author_id,
                    "created_at": p.created_at.to_rfc3339(),
                    "text": p.text,
                })
            })
            .collect(),
    )
}

pub fn write(dir: &Path, name: &str, contents: &str) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, contents).unwrap();
    path
}

/// Writes `{name}.json` as `{"posts": [...], "users": [...]}` and `{name}.bots.txt`.
pub fn write_dataset(dir: &Path, name: &str, posts: &[Post], bots: &[String]) -> (PathBuf, PathBuf) {
    let mut authors: Vec<&str> = posts.iter().map(|p| p.author_id.as_str()).collect();
    authors.sort();
    authors.dedup();
    let doc = json!({
        "id": name,
        "lang": "en",
        "posts": posts_json(posts),
        "users": authors.iter().map(|a| json!({ "id": a })).collect::<Vec<_>>(),
    });
    let data = write(dir, &format!("{}.json", name), &doc.to_string());
    let truth = write(dir, &format!("{}.bots.txt", name), &(bots.join("\n") + "\n"));
    (data, truth)
}
