//! Source files → posts and ground truth. Missing files are skipped with a
//! warning; malformed records abort the run.

use super::{parse_timestamp, Dataset, Post};
use crate::config::DatasetSource;
use crate::error::{ScorerError, ScorerResult};
use serde_json::Value;
use std::collections::BTreeSet;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Read a file, mapping not-found to `None`.
fn read_optional(path: &Path) -> ScorerResult<Option<String>> {
    match std::fs::read_to_string(path) {
        Ok(s) => Ok(Some(s)),
        Err(e) if e.kind() == ErrorKind::NotFound => {
            warn!(path = %path.display(), "file not found; skipping");
            Ok(None)
        }
        Err(source) => Err(ScorerError::Io {
            path: path.to_path_buf(),
            source,
        }),
    }
}

/// Parsed post collection document: `[...]` or `{"posts": [...], "users": [...]}`.
struct SourceDocument {
    records: Vec<Value>,
    user_ids: Vec<String>,
}

impl SourceDocument {
    fn from_value(value: Value, path: &Path) -> Self {
        match value {
            Value::Array(records) => Self {
                records,
                user_ids: Vec::new(),
            },
            Value::Object(mut obj) => {
                let records = match obj.remove("posts") {
                    Some(Value::Array(records)) => records,
                    _ => {
                        warn!(path = %path.display(), "object without a `posts` list; no posts taken");
                        Vec::new()
                    }
                };
                let user_ids = match obj.get("users") {
                    Some(Value::Array(users)) => users
                        .iter()
                        .filter_map(|u| u.get("id").and_then(id_string))
                        .collect(),
                    _ => Vec::new(),
                };
                Self { records, user_ids }
            }
            _ => {
                warn!(path = %path.display(), "document is neither a list nor an object; no posts taken");
                Self {
                    records: Vec::new(),
                    user_ids: Vec::new(),
                }
            }
        }
    }
}

/// Author ids are strings; numeric ids are rendered verbatim.
fn id_string(v: &Value) -> Option<String> {
    match v {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// Present, non-null value of `field`.
fn required<'v>(
    record: &'v Value,
    field: &'static str,
    path: &Path,
    index: usize,
) -> ScorerResult<&'v Value> {
    match record.get(field) {
        None | Some(Value::Null) => Err(ScorerError::MissingField {
            source_path: path.to_path_buf(),
            index,
            field,
        }),
        Some(v) => Ok(v),
    }
}

fn post_from_record(record: &Value, path: &Path, index: usize) -> ScorerResult<Post> {
    let invalid = |field, reason: &str| ScorerError::InvalidField {
        source_path: path.to_path_buf(),
        index,
        field,
        reason: reason.to_string(),
    };

    let author_id = id_string(required(record, "author_id", path, index)?)
        .ok_or_else(|| invalid("author_id", "expected a non-empty string or number"))?;
    let raw_ts = required(record, "created_at", path, index)?
        .as_str()
        .ok_or_else(|| invalid("created_at", "expected a timestamp string"))?;
    let created_at = parse_timestamp(raw_ts).ok_or_else(|| ScorerError::InvalidTimestamp {
        source_path: path.to_path_buf(),
        index,
        value: raw_ts.to_string(),
    })?;
    let text = record.get("text").and_then(Value::as_str).map(String::from);

    Ok(Post {
        author_id,
        created_at,
        text,
    })
}

fn load_document(path: &Path) -> ScorerResult<Option<SourceDocument>> {
    let Some(data) = read_optional(path)? else {
        return Ok(None);
    };
    let value: Value = serde_json::from_str(&data).map_err(|source| ScorerError::Json {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(Some(SourceDocument::from_value(value, path)))
}

fn append_sources(
    paths: &[PathBuf],
    posts: &mut Vec<Post>,
    users: &mut BTreeSet<String>,
) -> ScorerResult<()> {
    for path in paths {
        let Some(doc) = load_document(path)? else {
            continue;
        };
        for (index, record) in doc.records.iter().enumerate() {
            posts.push(post_from_record(record, path, index)?);
        }
        users.extend(doc.user_ids);
        debug!(path = %path.display(), count = doc.records.len(), "loaded posts");
    }
    Ok(())
}

/// Load and append posts from every path, in order. No deduplication.
pub fn load_posts(paths: &[PathBuf]) -> ScorerResult<Vec<Post>> {
    let mut posts = Vec::new();
    append_sources(paths, &mut posts, &mut BTreeSet::new())?;
    Ok(posts)
}

/// Union of newline-delimited id files. Lines are trimmed; blanks ignored.
pub fn load_bot_ids(paths: &[PathBuf]) -> ScorerResult<BTreeSet<String>> {
    let mut ids = BTreeSet::new();
    for path in paths {
        let Some(data) = read_optional(path)? else {
            continue;
        };
        ids.extend(
            data.lines()
                .map(str::trim)
                .filter(|l| !l.is_empty())
                .map(String::from),
        );
    }
    Ok(ids)
}

pub fn load_dataset(source: &DatasetSource) -> ScorerResult<Dataset> {
    let mut dataset = Dataset::default();
    append_sources(&source.posts, &mut dataset.posts, &mut dataset.users)?;
    dataset.bots = load_bot_ids(&source.bots)?;
    debug!(
        posts = dataset.posts.len(),
        bots = dataset.bots.len(),
        users = dataset.users.len(),
        "dataset loaded"
    );
    Ok(dataset)
}
