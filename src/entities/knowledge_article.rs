//! Knowledge-base article entity.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A knowledge-base article. `views` is a running counter that only grows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KnowledgeArticle {
    /// Unique id, assigned by the store's article sequence
    pub id: u64,
    /// Title
    pub title: String,
    /// Body text
    pub content: String,
    /// Free-form tags
    #[serde(default)]
    pub tags: Vec<String>,
    /// Creation time
    pub created_at: DateTime<Utc>,
    /// Number of times the article was opened
    #[serde(default)]
    pub views: u64,
    /// Last time the article was opened
    #[serde(default)]
    pub last_accessed: Option<DateTime<Utc>>,
}

/// Input for creating an article.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewArticle {
    /// Title
    pub title: String,
    /// Body text
    pub content: String,
    /// Tags, already split
    pub tags: Vec<String>,
}
