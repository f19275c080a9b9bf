//! Port for append-only comment rows.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{Comment, CommentContent, EntityKind, UserId};

use super::define_port_error;

define_port_error! {
    /// Errors raised by comment repository adapters.
    pub enum CommentRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } => "comment repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "comment repository query failed: {message}",
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CommentRepository: Send + Sync {
    /// Store a comment and return it joined with its author projection.
    async fn insert_comment(
        &self,
        kind: EntityKind,
        entity_id: Uuid,
        author: &UserId,
        content: &CommentContent,
    ) -> Result<Comment, CommentRepositoryError>;

    /// Comments for the entity, newest first.
    async fn list_comments(
        &self,
        kind: EntityKind,
        entity_id: Uuid,
    ) -> Result<Vec<Comment>, CommentRepositoryError>;
}

/// Repository holding no comments; inserts are rejected.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureCommentRepository;

#[async_trait]
impl CommentRepository for FixtureCommentRepository {
    async fn insert_comment(
        &self,
        _kind: EntityKind,
        _entity_id: Uuid,
        _author: &UserId,
        _content: &CommentContent,
    ) -> Result<Comment, CommentRepositoryError> {
        Err(CommentRepositoryError::query(
            "fixture repository does not store comments",
        ))
    }

    async fn list_comments(
        &self,
        _kind: EntityKind,
        _entity_id: Uuid,
    ) -> Result<Vec<Comment>, CommentRepositoryError> {
        Ok(Vec::new())
    }
}
