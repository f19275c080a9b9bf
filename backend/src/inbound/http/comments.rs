//! Comment append and listing handlers.
//!
//! ```text
//! GET  /api/v1/projects/{slug}/comments
//! POST /api/v1/projects/{slug}/comments {"content":"Lovely work"}
//! GET  /api/v1/forum/{slug}/comments
//! POST /api/v1/forum/{slug}/comments
//! ```

use actix_web::{HttpResponse, get, post, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::ports::AddCommentRequest;
use crate::domain::{AuthorProfile, Comment, EntityKind};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{parse_json_body, parse_slug};

/// Request body for adding a comment.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AddCommentBody {
    /// Comment text, 1 to 1000 characters and not only whitespace.
    #[serde(default)]
    #[schema(example = "Lovely work")]
    pub content: String,
}

/// Minimal author projection.
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AuthorResponse {
    pub id: String,
    pub name: Option<String>,
    pub image: Option<String>,
}

impl From<AuthorProfile> for AuthorResponse {
    fn from(author: AuthorProfile) -> Self {
        Self {
            id: author.id.to_string(),
            name: author.name,
            image: author.image,
        }
    }
}

/// Stored comment with its author.
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CommentResponse {
    pub id: String,
    pub content: String,
    /// RFC 3339 timestamp.
    pub created_at: String,
    pub updated_at: String,
    pub author: AuthorResponse,
}

impl From<Comment> for CommentResponse {
    fn from(comment: Comment) -> Self {
        Self {
            id: comment.id.to_string(),
            content: comment.content,
            created_at: comment.created_at.to_rfc3339(),
            updated_at: comment.updated_at.to_rfc3339(),
            author: comment.author.into(),
        }
    }
}

pub(crate) fn comment_responses(comments: Vec<Comment>) -> Vec<CommentResponse> {
    comments.into_iter().map(CommentResponse::from).collect()
}

async fn add(
    kind: EntityKind,
    state: &HttpState,
    session: &SessionContext,
    raw_slug: &str,
    raw_body: &[u8],
) -> ApiResult<HttpResponse> {
    // The session is checked before the body is decoded.
    let author = session.require_identity()?;
    let body: AddCommentBody = parse_json_body(raw_body)?;
    let slug = parse_slug(raw_slug)?;
    let comment = state
        .comments
        .add_comment(AddCommentRequest {
            kind,
            slug,
            author,
            content: body.content,
        })
        .await?;
    Ok(HttpResponse::Created().json(CommentResponse::from(comment)))
}

async fn list(
    kind: EntityKind,
    state: &HttpState,
    raw_slug: &str,
) -> ApiResult<web::Json<Vec<CommentResponse>>> {
    let slug = parse_slug(raw_slug)?;
    let comments = state.comments_query.list_comments(kind, slug).await?;
    Ok(web::Json(comment_responses(comments)))
}

/// Add a comment to a project.
#[utoipa::path(
    post,
    path = "/api/v1/projects/{slug}/comments",
    params(("slug" = String, Path, description = "Project slug")),
    request_body = AddCommentBody,
    responses(
        (status = 201, description = "Comment stored", body = CommentResponse),
        (status = 400, description = "Invalid content or slug", body = ErrorSchema),
        (status = 401, description = "Login required", body = ErrorSchema),
        (status = 404, description = "Project not found", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["projects"],
    operation_id = "addProjectComment"
)]
#[post("/projects/{slug}/comments")]
pub async fn add_project_comment(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
    body: web::Bytes,
) -> ApiResult<HttpResponse> {
    add(EntityKind::Project, &state, &session, &path, &body).await
}

/// List a project's comments, newest first.
#[utoipa::path(
    get,
    path = "/api/v1/projects/{slug}/comments",
    params(("slug" = String, Path, description = "Project slug")),
    responses(
        (status = 200, description = "Comments, newest first", body = [CommentResponse]),
        (status = 400, description = "Invalid slug", body = ErrorSchema),
        (status = 404, description = "Project not found", body = ErrorSchema)
    ),
    tags = ["projects"],
    operation_id = "listProjectComments",
    security([])
)]
#[get("/projects/{slug}/comments")]
pub async fn list_project_comments(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<Vec<CommentResponse>>> {
    list(EntityKind::Project, &state, &path).await
}

/// Add a comment to a forum post.
#[utoipa::path(
    post,
    path = "/api/v1/forum/{slug}/comments",
    params(("slug" = String, Path, description = "Forum post slug")),
    request_body = AddCommentBody,
    responses(
        (status = 201, description = "Comment stored", body = CommentResponse),
        (status = 400, description = "Invalid content or slug", body = ErrorSchema),
        (status = 401, description = "Login required", body = ErrorSchema),
        (status = 404, description = "Forum post not found", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["forum"],
    operation_id = "addForumComment"
)]
#[post("/forum/{slug}/comments")]
pub async fn add_forum_comment(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
    body: web::Bytes,
) -> ApiResult<HttpResponse> {
    add(EntityKind::ForumPost, &state, &session, &path, &body).await
}

/// List a forum post's comments, newest first.
#[utoipa::path(
    get,
    path = "/api/v1/forum/{slug}/comments",
    params(("slug" = String, Path, description = "Forum post slug")),
    responses(
        (status = 200, description = "Comments, newest first", body = [CommentResponse]),
        (status = 400, description = "Invalid slug", body = ErrorSchema),
        (status = 404, description = "Forum post not found", body = ErrorSchema)
    ),
    tags = ["forum"],
    operation_id = "listForumComments",
    security([])
)]
#[get("/forum/{slug}/comments")]
pub async fn list_forum_comments(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<Vec<CommentResponse>>> {
    list(EntityKind::ForumPost, &state, &path).await
}
