//! Project submission and project detail handlers.
//!
//! ```text
//! GET  /api/v1/projects?page=1&limit=9&status=beta&sort=popular&search=rust
//! POST /api/v1/projects {"name":"Code Craft","tagline":"...","description":"...","status":"beta"}
//! GET  /api/v1/projects/{slug}
//! ```

use actix_web::{HttpResponse, get, post, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{
    NewProject, OwnerProfile, PROJECT_PAGE_SIZE, Paginated, ProjectDetail, ProjectDraft,
    ProjectListQuery, ProjectSummary,
};
use crate::inbound::http::ApiResult;
use crate::inbound::http::comments::{AuthorResponse, CommentResponse, comment_responses};
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{
    map_project_validation_error, parse_json_body, parse_page_request, parse_search, parse_slug,
    parse_sort, parse_status_filter,
};

/// Request payload for submitting a project.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct CreateProjectRequest {
    #[schema(example = "Code Craft")]
    pub name: String,
    #[schema(example = "Sharpen your tools")]
    pub tagline: String,
    pub description: String,
    pub website: Option<String>,
    pub github: Option<String>,
    /// One of `development`, `beta`, `launched`.
    #[schema(example = "beta")]
    pub status: String,
}

impl From<CreateProjectRequest> for ProjectDraft {
    fn from(value: CreateProjectRequest) -> Self {
        Self {
            name: value.name,
            tagline: value.tagline,
            description: value.description,
            website: value.website,
            github: value.github,
            status: value.status,
        }
    }
}

/// Slug the new project is reachable under.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateProjectResponse {
    #[schema(example = "code-craft")]
    pub slug: String,
}

/// Owner projection with biography.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OwnerResponse {
    #[serde(flatten)]
    pub author: AuthorResponse,
    pub bio: Option<String>,
}

impl From<OwnerProfile> for OwnerResponse {
    fn from(owner: OwnerProfile) -> Self {
        Self {
            author: owner.author.into(),
            bio: owner.bio,
        }
    }
}

/// Project detail with vote and comment aggregates.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProjectDetailResponse {
    pub id: String,
    pub slug: String,
    pub name: String,
    pub tagline: String,
    pub description: String,
    pub website: Option<String>,
    pub github: Option<String>,
    pub status: String,
    pub created_at: String,
    pub owner: OwnerResponse,
    pub vote_count: u64,
    pub comment_count: u64,
    /// Newest first.
    pub comments: Vec<CommentResponse>,
}

impl From<ProjectDetail> for ProjectDetailResponse {
    fn from(detail: ProjectDetail) -> Self {
        let ProjectDetail {
            project,
            vote_count,
            comment_count,
            comments,
        } = detail;
        Self {
            id: project.id.to_string(),
            slug: project.slug.into(),
            name: project.name,
            tagline: project.tagline,
            description: project.description,
            website: project.website,
            github: project.github,
            status: project.status.to_string(),
            created_at: project.created_at.to_rfc3339(),
            owner: project.owner.into(),
            vote_count,
            comment_count,
            comments: comment_responses(comments),
        }
    }
}

/// Query parameters for the project listing.
///
/// Values arrive as strings so that malformed numbers are reported through
/// the JSON error envelope.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct ListProjectsQuery {
    pub page: Option<String>,
    pub limit: Option<String>,
    pub status: Option<String>,
    pub sort: Option<String>,
    pub search: Option<String>,
}

/// Position of a page within the filtered set.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PaginationResponse {
    pub page: u32,
    pub limit: u32,
    pub total: u64,
    pub total_pages: u64,
}

impl<T> From<&Paginated<T>> for PaginationResponse {
    fn from(listing: &Paginated<T>) -> Self {
        Self {
            page: listing.page.page(),
            limit: listing.page.limit(),
            total: listing.total,
            total_pages: listing.total_pages(),
        }
    }
}

/// Project card shown on the listing page.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProjectSummaryResponse {
    pub id: String,
    pub slug: String,
    pub name: String,
    pub tagline: String,
    pub website: Option<String>,
    pub github: Option<String>,
    pub status: String,
    pub created_at: String,
    pub owner: AuthorResponse,
    pub vote_count: u64,
    pub comment_count: u64,
}

impl From<ProjectSummary> for ProjectSummaryResponse {
    fn from(summary: ProjectSummary) -> Self {
        let ProjectSummary {
            project,
            vote_count,
            comment_count,
        } = summary;
        Self {
            id: project.id.to_string(),
            slug: project.slug.into(),
            name: project.name,
            tagline: project.tagline,
            website: project.website,
            github: project.github,
            status: project.status.to_string(),
            created_at: project.created_at.to_rfc3339(),
            owner: project.owner.author.into(),
            vote_count,
            comment_count,
        }
    }
}

/// One page of projects.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ListProjectsResponse {
    pub projects: Vec<ProjectSummaryResponse>,
    pub pagination: PaginationResponse,
}

impl From<Paginated<ProjectSummary>> for ListProjectsResponse {
    fn from(listing: Paginated<ProjectSummary>) -> Self {
        let pagination = PaginationResponse::from(&listing);
        Self {
            projects: listing
                .items
                .into_iter()
                .map(ProjectSummaryResponse::from)
                .collect(),
            pagination,
        }
    }
}

/// List persisted projects, newest first unless another sort is requested.
#[utoipa::path(
    get,
    path = "/api/v1/projects",
    params(
        ("page" = Option<u32>, Query, description = "One-based page number, default 1"),
        ("limit" = Option<u32>, Query, description = "Projects per page, default 9, max 50"),
        ("status" = Option<String>, Query, description = "development, beta, launched or all"),
        ("sort" = Option<String>, Query, description = "newest, popular or trending"),
        ("search" = Option<String>, Query, description = "Matches name, tagline and description")
    ),
    responses(
        (status = 200, description = "Project page", body = ListProjectsResponse),
        (status = 400, description = "Invalid query", body = ErrorSchema),
        (status = 503, description = "Service unavailable", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["projects"],
    operation_id = "listProjects",
    security([])
)]
#[get("/projects")]
pub async fn list_projects(
    state: web::Data<HttpState>,
    query: web::Query<ListProjectsQuery>,
) -> ApiResult<web::Json<ListProjectsResponse>> {
    let query = query.into_inner();
    let request = ProjectListQuery {
        page: parse_page_request(
            query.page.as_deref(),
            query.limit.as_deref(),
            PROJECT_PAGE_SIZE,
        )?,
        status: parse_status_filter(query.status.as_deref())?,
        sort: parse_sort(query.sort.as_deref())?,
        search: parse_search(query.search.as_deref())?,
    };
    let listing = state.projects_query.list_projects(request).await?;
    Ok(web::Json(listing.into()))
}

/// Submit a project owned by the caller.
#[utoipa::path(
    post,
    path = "/api/v1/projects",
    request_body = CreateProjectRequest,
    responses(
        (status = 201, description = "Project created", body = CreateProjectResponse),
        (status = 400, description = "Invalid submission", body = ErrorSchema),
        (status = 401, description = "Login required", body = ErrorSchema),
        (status = 409, description = "Slug taken concurrently", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["projects"],
    operation_id = "createProject"
)]
#[post("/projects")]
pub async fn create_project(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Bytes,
) -> ApiResult<HttpResponse> {
    let owner = session.require_identity()?;
    let request: CreateProjectRequest = parse_json_body(&payload)?;
    let project = NewProject::try_from_draft(request.into())
        .map_err(|err| map_project_validation_error(&err))?;
    let slug = state
        .projects
        .create_project(owner.user_id().clone(), project)
        .await?;
    Ok(HttpResponse::Created().json(CreateProjectResponse { slug: slug.into() }))
}

/// Fetch a project with its aggregates and comments.
#[utoipa::path(
    get,
    path = "/api/v1/projects/{slug}",
    params(("slug" = String, Path, description = "Project slug")),
    responses(
        (status = 200, description = "Project detail", body = ProjectDetailResponse),
        (status = 400, description = "Invalid slug", body = ErrorSchema),
        (status = 404, description = "Project not found", body = ErrorSchema)
    ),
    tags = ["projects"],
    operation_id = "getProject",
    security([])
)]
#[get("/projects/{slug}")]
pub async fn get_project(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<ProjectDetailResponse>> {
    let slug = parse_slug(&path)?;
    let detail = state.projects_query.get_project(slug).await?;
    Ok(web::Json(detail.into()))
}
