//! Port for forum post rows.

use async_trait::async_trait;

use crate::domain::{ForumPost, ForumPostListQuery, ForumPostSummary, Paginated, Slug};

use super::define_port_error;

define_port_error! {
    /// Errors raised by forum post repository adapters.
    pub enum ForumPostRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } => "forum post repository connection failed: {message}",
        /// Query failed during execution.
        Query { message: String } => "forum post repository query failed: {message}",
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ForumPostRepository: Send + Sync {
    async fn find_by_slug(
        &self,
        slug: &Slug,
    ) -> Result<Option<ForumPost>, ForumPostRepositoryError>;

    /// One page of forum posts matching `query`, with vote and comment counts.
    async fn list(
        &self,
        query: &ForumPostListQuery,
    ) -> Result<Paginated<ForumPostSummary>, ForumPostRepositoryError>;
}

/// Repository with no forum posts.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureForumPostRepository;

#[async_trait]
impl ForumPostRepository for FixtureForumPostRepository {
    async fn find_by_slug(
        &self,
        _slug: &Slug,
    ) -> Result<Option<ForumPost>, ForumPostRepositoryError> {
        Ok(None)
    }

    async fn list(
        &self,
        query: &ForumPostListQuery,
    ) -> Result<Paginated<ForumPostSummary>, ForumPostRepositoryError> {
        Ok(Paginated::empty(query.page))
    }
}
