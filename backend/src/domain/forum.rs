//! Forum post read model.

use chrono::{DateTime, Utc};
use uuid::Uuid;

use super::{Comment, OwnerProfile, Slug};

/// Persisted forum post with its owner projection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ForumPost {
    pub id: Uuid,
    pub slug: Slug,
    pub title: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub owner: OwnerProfile,
}

/// Forum post detail with aggregates and comments (newest first).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ForumPostDetail {
    pub post: ForumPost,
    pub vote_count: u64,
    pub comment_count: u64,
    pub comments: Vec<Comment>,
}
