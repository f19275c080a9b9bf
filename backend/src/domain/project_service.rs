//! Project submission, detail and listing services.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::json;
use tracing::debug;

use crate::domain::engagement_support::{map_comment_error, map_vote_error};
use crate::domain::ports::{
    CommentRepository, ProjectCommand, ProjectQuery, ProjectRepository, ProjectRepositoryError,
    VoteRepository,
};
use crate::domain::{
    EntityKind, Error, NewProject, Paginated, ProjectDetail, ProjectListQuery, ProjectSummary, Slug,
    UserId,
};

/// Project service implementing [`ProjectCommand`] and [`ProjectQuery`].
#[derive(Clone)]
pub struct ProjectService<P, V, C> {
    projects: Arc<P>,
    votes: Arc<V>,
    comments: Arc<C>,
}

impl<P, V, C> ProjectService<P, V, C> {
    pub fn new(projects: Arc<P>, votes: Arc<V>, comments: Arc<C>) -> Self {
        Self {
            projects,
            votes,
            comments,
        }
    }
}

fn map_project_error(error: ProjectRepositoryError) -> Error {
    match error {
        ProjectRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("project repository unavailable: {message}"))
        }
        ProjectRepositoryError::Query { message } => {
            Error::internal(format!("project repository error: {message}"))
        }
        ProjectRepositoryError::DuplicateSlug { slug } => {
            Error::conflict("project slug already taken").with_details(json!({
                "field": "slug",
                "value": slug,
                "code": "duplicate_slug",
            }))
        }
    }
}

impl<P, V, C> ProjectService<P, V, C>
where
    P: ProjectRepository,
{
    async fn available_slug(&self, name: &str) -> Result<Slug, Error> {
        let base = Slug::derive(name).map_err(|err| {
            Error::invalid_request(format!("name cannot be turned into a slug: {err}"))
                .with_details(json!({ "field": "name", "code": "invalid_slug" }))
        })?;
        let taken = self
            .projects
            .slug_exists(&base)
            .await
            .map_err(map_project_error)?;
        if !taken {
            return Ok(base);
        }
        let suffixed = base.with_random_suffix(&mut rand::thread_rng());
        debug!(base = %base, slug = %suffixed, "project slug taken; using suffixed slug");
        Ok(suffixed)
    }
}

#[async_trait]
impl<P, V, C> ProjectCommand for ProjectService<P, V, C>
where
    P: ProjectRepository,
    V: VoteRepository,
    C: CommentRepository,
{
    async fn create_project(&self, owner: UserId, project: NewProject) -> Result<Slug, Error> {
        let slug = self.available_slug(project.name()).await?;
        self.projects
            .create(&owner, &slug, &project)
            .await
            .map_err(map_project_error)?;
        debug!(slug = %slug, owner = %owner, "project created");
        Ok(slug)
    }
}

#[async_trait]
impl<P, V, C> ProjectQuery for ProjectService<P, V, C>
where
    P: ProjectRepository,
    V: VoteRepository,
    C: CommentRepository,
{
    async fn get_project(&self, slug: Slug) -> Result<ProjectDetail, Error> {
        let project = self
            .projects
            .find_by_slug(&slug)
            .await
            .map_err(map_project_error)?
            .ok_or_else(|| Error::not_found(format!("project {slug} not found")))?;

        let vote_count = self
            .votes
            .count_votes(EntityKind::Project, project.id)
            .await
            .map_err(map_vote_error)?;
        let comments = self
            .comments
            .list_comments(EntityKind::Project, project.id)
            .await
            .map_err(map_comment_error)?;

        Ok(ProjectDetail {
            project,
            vote_count,
            comment_count: comments.len() as u64,
            comments,
        })
    }

    async fn list_projects(
        &self,
        query: ProjectListQuery,
    ) -> Result<Paginated<ProjectSummary>, Error> {
        let listing = self
            .projects
            .list(&query)
            .await
            .map_err(map_project_error)?;
        debug!(
            page = listing.page.page(),
            returned = listing.items.len(),
            total = listing.total,
            sort = %query.sort,
            "projects listed"
        );
        Ok(listing)
    }
}
