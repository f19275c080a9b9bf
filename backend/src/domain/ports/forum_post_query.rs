//! Driving port for forum post detail reads and listings.

use async_trait::async_trait;

use crate::domain::{
    Error, ForumPostDetail, ForumPostListQuery, ForumPostSummary, Paginated, Slug,
};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ForumPostQuery: Send + Sync {
    /// Forum post detail. Absent slugs are `not_found`.
    async fn get_forum_post(&self, slug: Slug) -> Result<ForumPostDetail, Error>;

    /// One page of persisted forum posts.
    async fn list_forum_posts(
        &self,
        query: ForumPostListQuery,
    ) -> Result<Paginated<ForumPostSummary>, Error>;
}

/// Query with no forum posts.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureForumPostQuery;

#[async_trait]
impl ForumPostQuery for FixtureForumPostQuery {
    async fn get_forum_post(&self, slug: Slug) -> Result<ForumPostDetail, Error> {
        Err(Error::not_found(format!("forum post {slug} not found")))
    }

    async fn list_forum_posts(
        &self,
        query: ForumPostListQuery,
    ) -> Result<Paginated<ForumPostSummary>, Error> {
        Ok(Paginated::empty(query.page))
    }
}
