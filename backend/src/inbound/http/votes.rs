//! Vote toggle and vote-status handlers.
//!
//! ```text
//! POST /api/v1/projects/{slug}/vote
//! GET  /api/v1/projects/{slug}/voted
//! POST /api/v1/forum/{slug}/vote
//! GET  /api/v1/forum/{slug}/voted
//! ```
//!
//! Both entity kinds share one implementation; the per-kind handlers only
//! pin the [`EntityKind`] and carry the OpenAPI description.

use actix_web::{get, post, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::EntityKind;
use crate::domain::ports::{ToggleVoteRequest, VoteOutcome};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::parse_slug;

/// Result of a vote toggle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct VoteResponse {
    /// Whether the caller has a vote after the toggle.
    pub voted: bool,
    /// Fresh count of votes on the entity.
    #[schema(example = 1)]
    pub vote_count: u64,
}

impl From<VoteOutcome> for VoteResponse {
    fn from(outcome: VoteOutcome) -> Self {
        Self {
            voted: outcome.voted,
            vote_count: outcome.vote_count,
        }
    }
}

/// Whether the caller currently has a vote.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct VotedResponse {
    pub voted: bool,
}

async fn toggle(
    kind: EntityKind,
    state: &HttpState,
    session: &SessionContext,
    raw_slug: &str,
) -> ApiResult<web::Json<VoteResponse>> {
    let identity = session.require_identity()?;
    let slug = parse_slug(raw_slug)?;
    let outcome = state
        .votes
        .toggle_vote(ToggleVoteRequest {
            kind,
            slug,
            user: identity.user_id().clone(),
        })
        .await?;
    Ok(web::Json(VoteResponse::from(outcome)))
}

async fn voted(
    kind: EntityKind,
    state: &HttpState,
    session: &SessionContext,
    raw_slug: &str,
) -> ApiResult<web::Json<VotedResponse>> {
    let slug = parse_slug(raw_slug)?;
    let voted = state
        .votes_query
        .has_voted(kind, slug, session.user_id())
        .await?;
    Ok(web::Json(VotedResponse { voted }))
}

/// Toggle the caller's vote on a project.
#[utoipa::path(
    post,
    path = "/api/v1/projects/{slug}/vote",
    params(("slug" = String, Path, description = "Project slug")),
    responses(
        (status = 200, description = "Vote toggled", body = VoteResponse),
        (status = 400, description = "Invalid slug", body = ErrorSchema),
        (status = 401, description = "Login required", body = ErrorSchema),
        (status = 404, description = "Project not found", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["projects"],
    operation_id = "toggleProjectVote"
)]
#[post("/projects/{slug}/vote")]
pub async fn toggle_project_vote(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
) -> ApiResult<web::Json<VoteResponse>> {
    toggle(EntityKind::Project, &state, &session, &path).await
}

/// Whether the caller has voted on a project. Anonymous callers get `false`.
#[utoipa::path(
    get,
    path = "/api/v1/projects/{slug}/voted",
    params(("slug" = String, Path, description = "Project slug")),
    responses(
        (status = 200, description = "Vote status", body = VotedResponse),
        (status = 400, description = "Invalid slug", body = ErrorSchema)
    ),
    tags = ["projects"],
    operation_id = "projectVoteStatus"
)]
#[get("/projects/{slug}/voted")]
pub async fn project_vote_status(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
) -> ApiResult<web::Json<VotedResponse>> {
    voted(EntityKind::Project, &state, &session, &path).await
}

/// Toggle the caller's vote on a forum post.
#[utoipa::path(
    post,
    path = "/api/v1/forum/{slug}/vote",
    params(("slug" = String, Path, description = "Forum post slug")),
    responses(
        (status = 200, description = "Vote toggled", body = VoteResponse),
        (status = 400, description = "Invalid slug", body = ErrorSchema),
        (status = 401, description = "Login required", body = ErrorSchema),
        (status = 404, description = "Forum post not found", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["forum"],
    operation_id = "toggleForumVote"
)]
#[post("/forum/{slug}/vote")]
pub async fn toggle_forum_vote(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
) -> ApiResult<web::Json<VoteResponse>> {
    toggle(EntityKind::ForumPost, &state, &session, &path).await
}

/// Whether the caller has voted on a forum post.
#[utoipa::path(
    get,
    path = "/api/v1/forum/{slug}/voted",
    params(("slug" = String, Path, description = "Forum post slug")),
    responses(
        (status = 200, description = "Vote status", body = VotedResponse),
        (status = 400, description = "Invalid slug", body = ErrorSchema)
    ),
    tags = ["forum"],
    operation_id = "forumVoteStatus"
)]
#[get("/forum/{slug}/voted")]
pub async fn forum_vote_status(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
) -> ApiResult<web::Json<VotedResponse>> {
    voted(EntityKind::ForumPost, &state, &session, &path).await
}

#[cfg(test)]
#[path = "votes_tests.rs"]
mod tests;
