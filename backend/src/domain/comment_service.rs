//! Comment append engine.
//!
//! Content is validated before any lookup so rejected input never reaches
//! storage. Persisted entities store comments through the comment repository;
//! entities without a row keep them in the fallback store.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use serde_json::json;
use tracing::{debug, info};
use uuid::Uuid;

use crate::domain::engagement_support::{
    entity_not_found, map_comment_error, map_fallback_error, resolve_entity,
};
use crate::domain::ports::{
    AddCommentRequest, CommentCommand, CommentQuery, CommentRepository, FallbackStore,
    VotableEntityRepository,
};
use crate::domain::{
    COMMENT_MAX_CHARS, Comment, CommentContent, CommentValidationError, EntityKind, Error,
    FallbackKey, Identity, Slug,
};

/// Comment service implementing [`CommentCommand`] and [`CommentQuery`].
#[derive(Clone)]
pub struct CommentService<E, C, F> {
    entities: Arc<E>,
    comments: Arc<C>,
    fallback: Arc<F>,
}

impl<E, C, F> CommentService<E, C, F> {
    pub fn new(entities: Arc<E>, comments: Arc<C>, fallback: Arc<F>) -> Self {
        Self {
            entities,
            comments,
            fallback,
        }
    }
}

fn map_content_error(error: CommentValidationError) -> Error {
    let code = match error {
        CommentValidationError::Empty => "empty_content",
        CommentValidationError::TooLong { .. } => "content_too_long",
    };
    Error::invalid_request(error.to_string()).with_details(json!({
        "field": "content",
        "code": code,
        "maxLength": COMMENT_MAX_CHARS,
    }))
}

impl<E, C, F> CommentService<E, C, F>
where
    E: VotableEntityRepository,
    C: CommentRepository,
    F: FallbackStore,
{
    async fn append_fallback(
        &self,
        kind: EntityKind,
        slug: &Slug,
        author: &Identity,
        content: CommentContent,
    ) -> Result<Comment, Error> {
        if !self.fallback.is_enabled() {
            return Err(entity_not_found(kind, slug));
        }

        let key = FallbackKey::new(kind, slug);
        let mut record = self
            .fallback
            .get(&key)
            .await
            .map_err(map_fallback_error)?
            .unwrap_or_default();
        let now = Utc::now();
        let comment = Comment {
            id: Uuid::new_v4(),
            content: content.into(),
            created_at: now,
            updated_at: now,
            author: author.author_profile(),
        };
        record.push_comment(comment.clone());
        self.fallback
            .put(&key, record)
            .await
            .map_err(map_fallback_error)?;

        info!(key = %key, comment_id = %comment.id, "comment served by fallback store");
        Ok(comment)
    }
}

#[async_trait]
impl<E, C, F> CommentCommand for CommentService<E, C, F>
where
    E: VotableEntityRepository,
    C: CommentRepository,
    F: FallbackStore,
{
    async fn add_comment(&self, request: AddCommentRequest) -> Result<Comment, Error> {
        let AddCommentRequest {
            kind,
            slug,
            author,
            content,
        } = request;
        let content = CommentContent::new(content).map_err(map_content_error)?;

        let Some(entity) = resolve_entity(self.entities.as_ref(), kind, &slug).await? else {
            return self.append_fallback(kind, &slug, &author, content).await;
        };

        let comment = self
            .comments
            .insert_comment(entity.kind, entity.id, author.user_id(), &content)
            .await
            .map_err(map_comment_error)?;
        debug!(kind = %kind, slug = %slug, comment_id = %comment.id, "comment appended");
        Ok(comment)
    }
}

#[async_trait]
impl<E, C, F> CommentQuery for CommentService<E, C, F>
where
    E: VotableEntityRepository,
    C: CommentRepository,
    F: FallbackStore,
{
    async fn list_comments(&self, kind: EntityKind, slug: Slug) -> Result<Vec<Comment>, Error> {
        if let Some(entity) = resolve_entity(self.entities.as_ref(), kind, &slug).await? {
            return self
                .comments
                .list_comments(entity.kind, entity.id)
                .await
                .map_err(map_comment_error);
        }

        if !self.fallback.is_enabled() {
            return Err(entity_not_found(kind, &slug));
        }
        let record = self
            .fallback
            .get(&FallbackKey::new(kind, &slug))
            .await
            .map_err(map_fallback_error)?;
        Ok(record
            .map(|record| record.comments_newest_first())
            .unwrap_or_default())
    }
}

#[cfg(test)]
#[path = "comment_service_tests.rs"]
mod tests;
