//! Driving ports for appending and listing comments.

use async_trait::async_trait;
use chrono::Utc;
use uuid::Uuid;

use crate::domain::{Comment, EntityKind, Error, Identity, Slug};

/// Request to append a comment. `content` is validated by the service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddCommentRequest {
    pub kind: EntityKind,
    pub slug: Slug,
    pub author: Identity,
    pub content: String,
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CommentCommand: Send + Sync {
    async fn add_comment(&self, request: AddCommentRequest) -> Result<Comment, Error>;
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CommentQuery: Send + Sync {
    /// Comments for the entity, newest first.
    async fn list_comments(&self, kind: EntityKind, slug: Slug) -> Result<Vec<Comment>, Error>;
}

/// Command echoing the submitted comment back without storing it.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureCommentCommand;

#[async_trait]
impl CommentCommand for FixtureCommentCommand {
    async fn add_comment(&self, request: AddCommentRequest) -> Result<Comment, Error> {
        let now = Utc::now();
        Ok(Comment {
            id: Uuid::new_v4(),
            content: request.content,
            created_at: now,
            updated_at: now,
            author: request.author.author_profile(),
        })
    }
}

/// Query returning no comments.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureCommentQuery;

#[async_trait]
impl CommentQuery for FixtureCommentQuery {
    async fn list_comments(&self, _kind: EntityKind, _slug: Slug) -> Result<Vec<Comment>, Error> {
        Ok(Vec::new())
    }
}
