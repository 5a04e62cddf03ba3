//! Result files: probability map, detections list, merged dataset.

use crate::error::{ScorerError, ScorerResult};
use serde_json::{Map, Value};
use std::collections::{BTreeMap, BTreeSet, HashSet};
use std::path::Path;
use tracing::info;

fn io_err(path: &Path) -> impl FnOnce(std::io::Error) -> ScorerError + '_ {
    move |source| ScorerError::Io {
        path: path.to_path_buf(),
        source,
    }
}

fn write_file(path: &Path, contents: &[u8]) -> ScorerResult<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(io_err(parent))?;
    }
    std::fs::write(path, contents).map_err(io_err(path))
}

fn lines(ids: impl IntoIterator<Item = impl AsRef<str>>) -> String {
    ids.into_iter().fold(String::new(), |mut out, id| {
        out.push_str(id.as_ref());
        out.push('\n');
        out
    })
}

/// `{"author_id": probability, ...}`
pub fn write_scores(path: &Path, scores: &BTreeMap<String, f64>) -> ScorerResult<()> {
    let json = serde_json::to_vec(scores)?;
    write_file(path, &json)?;
    info!(path = %path.display(), authors = scores.len(), "probability map written");
    Ok(())
}

pub fn read_scores(path: &Path) -> ScorerResult<BTreeMap<String, f64>> {
    let data = std::fs::read(path).map_err(io_err(path))?;
    serde_json::from_slice(&data).map_err(|source| ScorerError::Json {
        path: path.to_path_buf(),
        source,
    })
}

/// One detected author id per line.
pub fn write_detections<S: AsRef<str>>(path: &Path, ids: &[S]) -> ScorerResult<()> {
    write_file(path, lines(ids).as_bytes())?;
    info!(path = %path.display(), bots = ids.len(), "detections written");
    Ok(())
}

/// Combine post collection documents and ground-truth files.
///
/// The merged document keeps every top-level key of the first input except
/// `posts`/`users`, then records `id`, `total_users`, `total_posts`, the
/// appended posts and the users deduplicated by `id` (first occurrence wins).
/// The merged ground truth is sorted and deduplicated.
pub fn merge_datasets(
    dataset_paths: &[impl AsRef<Path>],
    bot_paths: &[impl AsRef<Path>],
    output_dataset: &Path,
    output_bots: &Path,
) -> ScorerResult<()> {
    let mut meta: Option<Map<String, Value>> = None;
    let mut posts: Vec<Value> = Vec::new();
    let mut users: Vec<Value> = Vec::new();
    let mut seen_users: HashSet<String> = HashSet::new();

    for path in dataset_paths {
        let path = path.as_ref();
        let data = std::fs::read(path).map_err(io_err(path))?;
        let doc: Value = serde_json::from_slice(&data).map_err(|source| ScorerError::Json {
            path: path.to_path_buf(),
            source,
        })?;
        let mut obj = match doc {
            Value::Object(obj) => obj,
            // A bare list carries posts only.
            Value::Array(list) => {
                posts.extend(list);
                continue;
            }
            _ => continue,
        };

        if let Some(Value::Array(list)) = obj.remove("posts") {
            posts.extend(list);
        }
        if let Some(Value::Array(list)) = obj.remove("users") {
            for user in list {
                let id = match user.get("id") {
                    Some(Value::String(s)) => s.clone(),
                    Some(other) => other.to_string(),
                    None => continue,
                };
                if seen_users.insert(id) {
                    users.push(user);
                }
            }
        }
        if meta.is_none() {
            meta = Some(obj);
        }
    }

    let mut merged = meta.unwrap_or_default();
    merged.insert("id".to_string(), Value::from("merged"));
    merged.insert("total_users".to_string(), Value::from(users.len()));
    merged.insert("total_posts".to_string(), Value::from(posts.len()));
    let (n_users, n_posts) = (users.len(), posts.len());
    merged.insert("posts".to_string(), Value::Array(posts));
    merged.insert("users".to_string(), Value::Array(users));

    write_file(output_dataset, &serde_json::to_vec(&Value::Object(merged))?)?;
    info!(
        path = %output_dataset.display(),
        users = n_users,
        posts = n_posts,
        "merged dataset written"
    );

    let mut bots: BTreeSet<String> = BTreeSet::new();
    for path in bot_paths {
        let path = path.as_ref();
        let data = std::fs::read_to_string(path).map_err(io_err(path))?;
        bots.extend(
            data.lines()
                .map(str::trim)
                .filter(|l| !l.is_empty())
                .map(String::from),
        );
    }
    write_file(output_bots, lines(&bots).as_bytes())?;
    info!(path = %output_bots.display(), bots = bots.len(), "merged ground truth written");
    Ok(())
}
