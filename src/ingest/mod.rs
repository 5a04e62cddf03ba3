//! Post ingestion: JSON post collections and newline-delimited ground truth.

mod loader;
mod timestamp;

pub use loader::{load_bot_ids, load_dataset, load_posts};
pub use timestamp::parse_timestamp;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// One authored item. Record metadata beyond these fields is dropped.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Post {
    pub author_id: String,
    pub created_at: DateTime<Utc>,
    pub text: Option<String>,
}

impl Post {
    pub fn new(author_id: impl Into<String>, created_at: DateTime<Utc>, text: Option<&str>) -> Self {
        Self {
            author_id: author_id.into(),
            created_at,
            text: text.map(String::from),
        }
    }

    /// Body with missing text read as empty
    pub fn text_or_empty(&self) -> &str {
        self.text.as_deref().unwrap_or("")
    }
}

/// Posts of one logical dataset plus its ground truth.
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    pub posts: Vec<Post>,
    /// Known-bot author ids
    pub bots: BTreeSet<String>,
    /// Ids from the documents' `users` lists
    pub users: BTreeSet<String>,
}

impl Dataset {
    pub fn is_bot(&self, author_id: &str) -> bool {
        self.bots.contains(author_id)
    }
}
