//! Forum post detail and listing service.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::debug;

use crate::domain::engagement_support::{map_comment_error, map_vote_error};
use crate::domain::ports::{
    CommentRepository, ForumPostQuery, ForumPostRepository, ForumPostRepositoryError,
    VoteRepository,
};
use crate::domain::{
    EntityKind, Error, ForumPostDetail, ForumPostListQuery, ForumPostSummary, Paginated, Slug,
};

/// Forum service implementing [`ForumPostQuery`].
#[derive(Clone)]
pub struct ForumPostService<P, V, C> {
    posts: Arc<P>,
    votes: Arc<V>,
    comments: Arc<C>,
}

impl<P, V, C> ForumPostService<P, V, C> {
    pub fn new(posts: Arc<P>, votes: Arc<V>, comments: Arc<C>) -> Self {
        Self {
            posts,
            votes,
            comments,
        }
    }
}

fn map_post_error(error: ForumPostRepositoryError) -> Error {
    match error {
        ForumPostRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("forum post repository unavailable: {message}"))
        }
        ForumPostRepositoryError::Query { message } => {
            Error::internal(format!("forum post repository error: {message}"))
        }
    }
}

#[async_trait]
impl<P, V, C> ForumPostQuery for ForumPostService<P, V, C>
where
    P: ForumPostRepository,
    V: VoteRepository,
    C: CommentRepository,
{
    async fn get_forum_post(&self, slug: Slug) -> Result<ForumPostDetail, Error> {
        let post = self
            .posts
            .find_by_slug(&slug)
            .await
            .map_err(map_post_error)?
            .ok_or_else(|| Error::not_found(format!("forum post {slug} not found")))?;

        let vote_count = self
            .votes
            .count_votes(EntityKind::ForumPost, post.id)
            .await
            .map_err(map_vote_error)?;
        let comments = self
            .comments
            .list_comments(EntityKind::ForumPost, post.id)
            .await
            .map_err(map_comment_error)?;

        Ok(ForumPostDetail {
            post,
            vote_count,
            comment_count: comments.len() as u64,
            comments,
        })
    }

    async fn list_forum_posts(
        &self,
        query: ForumPostListQuery,
    ) -> Result<Paginated<ForumPostSummary>, Error> {
        let listing = self.posts.list(&query).await.map_err(map_post_error)?;
        debug!(
            page = listing.page.page(),
            returned = listing.items.len(),
            total = listing.total,
            sort = %query.sort,
            "forum posts listed"
        );
        Ok(listing)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use mockall::predicate::eq;
    use uuid::Uuid;

    use crate::domain::ports::{
        FixtureCommentRepository, FixtureVoteRepository, MockCommentRepository,
        MockForumPostRepository, MockVoteRepository,
    };
    use crate::domain::service_test_helpers::{identity, slug, stored_comment};
    use crate::domain::{
        AuthorProfile, ErrorCode, ForumPost, ForumSort, OwnerProfile, PageRequest, UserId,
    };

    fn post_row() -> ForumPost {
        ForumPost {
            id: Uuid::new_v4(),
            slug: slug("rust-tips"),
            title: "Rust tips".to_owned(),
            content: "Share your favourite iterator tricks.".to_owned(),
            created_at: Utc::now(),
            owner: OwnerProfile {
                author: AuthorProfile {
                    id: UserId::random(),
                    name: Some("Grace Hopper".to_owned()),
                    image: None,
                },
                bio: None,
            },
        }
    }

    #[tokio::test]
    async fn detail_combines_counts_and_comments() {
        let row = post_row();
        let post_id = row.id;
        let rows = vec![stored_comment(&identity("Ada"), "Use windows()")];

        let mut posts = MockForumPostRepository::new();
        let found = row.clone();
        posts
            .expect_find_by_slug()
            .return_once(move |_| Ok(Some(found)));
        let mut votes = MockVoteRepository::new();
        votes
            .expect_count_votes()
            .with(eq(EntityKind::ForumPost), eq(post_id))
            .return_once(|_, _| Ok(2));
        let mut comments = MockCommentRepository::new();
        let listed = rows.clone();
        comments
            .expect_list_comments()
            .return_once(move |_, _| Ok(listed));
        let service = ForumPostService::new(Arc::new(posts), Arc::new(votes), Arc::new(comments));

        let detail = service
            .get_forum_post(slug("rust-tips"))
            .await
            .expect("detail");

        assert_eq!(detail.post, row);
        assert_eq!(detail.vote_count, 2);
        assert_eq!(detail.comment_count, 1);
        assert_eq!(detail.comments, rows);
    }

    #[tokio::test]
    async fn missing_posts_are_not_found() {
        let mut posts = MockForumPostRepository::new();
        posts.expect_find_by_slug().return_once(|_| Ok(None));
        let service = ForumPostService::new(
            Arc::new(posts),
            Arc::new(FixtureVoteRepository),
            Arc::new(FixtureCommentRepository),
        );

        let error = service
            .get_forum_post(slug("ghost"))
            .await
            .expect_err("absent post");

        assert_eq!(error.code(), ErrorCode::NotFound);
    }

    #[tokio::test]
    async fn listing_returns_the_repository_page() {
        let query = ForumPostListQuery {
            page: PageRequest::first(10).expect("page"),
            sort: ForumSort::Active,
            search: None,
        };
        let summary = ForumPostSummary {
            post: post_row(),
            vote_count: 1,
            comment_count: 5,
        };
        let page = Paginated {
            items: vec![summary.clone()],
            page: query.page,
            total: 1,
        };
        let mut posts = MockForumPostRepository::new();
        posts
            .expect_list()
            .with(eq(query.clone()))
            .return_once(move |_| Ok(page));
        let service = ForumPostService::new(
            Arc::new(posts),
            Arc::new(FixtureVoteRepository),
            Arc::new(FixtureCommentRepository),
        );

        let listing = service.list_forum_posts(query).await.expect("listing");

        assert_eq!(listing.items, vec![summary]);
        assert_eq!(listing.total_pages(), 1);
    }

    #[tokio::test]
    async fn listing_connection_failures_are_unavailable() {
        let mut posts = MockForumPostRepository::new();
        posts
            .expect_list()
            .return_once(|_| Err(ForumPostRepositoryError::connection("refused")));
        let service = ForumPostService::new(
            Arc::new(posts),
            Arc::new(FixtureVoteRepository),
            Arc::new(FixtureCommentRepository),
        );

        let error = service
            .list_forum_posts(ForumPostListQuery {
                page: PageRequest::first(10).expect("page"),
                sort: ForumSort::Newest,
                search: None,
            })
            .await
            .expect_err("connection failure");

        assert_eq!(error.code(), ErrorCode::ServiceUnavailable);
    }
}
