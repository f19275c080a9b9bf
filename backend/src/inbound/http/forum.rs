//! Forum listing and forum post detail handlers.
//!
//! ```text
//! GET /api/v1/forum?page=1&limit=10&sort=active&search=rust
//! GET /api/v1/forum/{slug}
//! ```

use actix_web::{get, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{
    FORUM_PAGE_SIZE, ForumPostDetail, ForumPostListQuery, ForumPostSummary, Paginated,
};
use crate::inbound::http::ApiResult;
use crate::inbound::http::comments::{AuthorResponse, CommentResponse, comment_responses};
use crate::inbound::http::projects::{OwnerResponse, PaginationResponse};
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{parse_page_request, parse_search, parse_slug, parse_sort};

/// Query parameters for the forum listing.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct ListForumPostsQuery {
    pub page: Option<String>,
    pub limit: Option<String>,
    pub sort: Option<String>,
    pub search: Option<String>,
}

/// Forum post row on the listing page.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ForumPostSummaryResponse {
    pub id: String,
    pub slug: String,
    pub title: String,
    pub content: String,
    pub created_at: String,
    pub owner: AuthorResponse,
    pub vote_count: u64,
    pub comment_count: u64,
}

impl From<ForumPostSummary> for ForumPostSummaryResponse {
    fn from(summary: ForumPostSummary) -> Self {
        let ForumPostSummary {
            post,
            vote_count,
            comment_count,
        } = summary;
        Self {
            id: post.id.to_string(),
            slug: post.slug.into(),
            title: post.title,
            content: post.content,
            created_at: post.created_at.to_rfc3339(),
            owner: post.owner.author.into(),
            vote_count,
            comment_count,
        }
    }
}

/// One page of forum posts.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ListForumPostsResponse {
    pub posts: Vec<ForumPostSummaryResponse>,
    pub pagination: PaginationResponse,
}

impl From<Paginated<ForumPostSummary>> for ListForumPostsResponse {
    fn from(listing: Paginated<ForumPostSummary>) -> Self {
        let pagination = PaginationResponse::from(&listing);
        Self {
            posts: listing
                .items
                .into_iter()
                .map(ForumPostSummaryResponse::from)
                .collect(),
            pagination,
        }
    }
}

/// Forum post with vote and comment aggregates.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ForumPostDetailResponse {
    pub id: String,
    pub slug: String,
    pub title: String,
    pub content: String,
    pub created_at: String,
    pub owner: OwnerResponse,
    pub vote_count: u64,
    pub comment_count: u64,
    pub comments: Vec<CommentResponse>,
}

impl From<ForumPostDetail> for ForumPostDetailResponse {
    fn from(detail: ForumPostDetail) -> Self {
        let ForumPostDetail {
            post,
            vote_count,
            comment_count,
            comments,
        } = detail;
        Self {
            id: post.id.to_string(),
            slug: post.slug.into(),
            title: post.title,
            content: post.content,
            created_at: post.created_at.to_rfc3339(),
            owner: post.owner.into(),
            vote_count,
            comment_count,
            comments: comment_responses(comments),
        }
    }
}

/// List persisted forum posts.
#[utoipa::path(
    get,
    path = "/api/v1/forum",
    params(
        ("page" = Option<u32>, Query, description = "One-based page number, default 1"),
        ("limit" = Option<u32>, Query, description = "Posts per page, default 10, max 50"),
        ("sort" = Option<String>, Query, description = "newest, popular or active"),
        ("search" = Option<String>, Query, description = "Matches title and content")
    ),
    responses(
        (status = 200, description = "Forum page", body = ListForumPostsResponse),
        (status = 400, description = "Invalid query", body = ErrorSchema),
        (status = 503, description = "Service unavailable", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["forum"],
    operation_id = "listForumPosts",
    security([])
)]
#[get("/forum")]
pub async fn list_forum_posts(
    state: web::Data<HttpState>,
    query: web::Query<ListForumPostsQuery>,
) -> ApiResult<web::Json<ListForumPostsResponse>> {
    let query = query.into_inner();
    let request = ForumPostListQuery {
        page: parse_page_request(query.page.as_deref(), query.limit.as_deref(), FORUM_PAGE_SIZE)?,
        sort: parse_sort(query.sort.as_deref())?,
        search: parse_search(query.search.as_deref())?,
    };
    let listing = state.forum_posts.list_forum_posts(request).await?;
    Ok(web::Json(listing.into()))
}

/// Fetch a forum post with its aggregates and comments.
#[utoipa::path(
    get,
    path = "/api/v1/forum/{slug}",
    params(("slug" = String, Path, description = "Forum post slug")),
    responses(
        (status = 200, description = "Forum post detail", body = ForumPostDetailResponse),
        (status = 400, description = "Invalid slug", body = ErrorSchema),
        (status = 404, description = "Forum post not found", body = ErrorSchema)
    ),
    tags = ["forum"],
    operation_id = "getForumPost",
    security([])
)]
#[get("/forum/{slug}")]
pub async fn get_forum_post(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<ForumPostDetailResponse>> {
    let slug = parse_slug(&path)?;
    let detail = state.forum_posts.get_forum_post(slug).await?;
    Ok(web::Json(detail.into()))
}
