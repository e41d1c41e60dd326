use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::User;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct FileAttachment {
    pub name: String,
    pub mime_type: String,
    pub url: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Comment {
    pub id: String,
    pub user: User,
    pub content: String,
    pub timestamp: DateTime<Utc>,
    pub likes: u32,
}

/// A feed entry. `images` and `files`, when present, are non-empty: an
/// empty list is normalized to `None` at every mutation boundary.
/// Comments are kept oldest-first, the opposite order from the feed itself.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Post {
    pub id: String,
    pub user: User,
    pub content: String,
    pub images: Option<Vec<String>>,
    pub files: Option<Vec<FileAttachment>>,
    pub timestamp: DateTime<Utc>,
    pub likes: u32,
    pub liked_by_user: bool,
    pub comments: Vec<Comment>,
}

/// Empty media lists collapse to "absent".
pub fn non_empty<T>(items: Vec<T>) -> Option<Vec<T>> {
    if items.is_empty() {
        None
    } else {
        Some(items)
    }
}
