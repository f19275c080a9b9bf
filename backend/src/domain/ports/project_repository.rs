//! Port for project rows.

use async_trait::async_trait;

use crate::domain::{
    NewProject, Paginated, Project, ProjectListQuery, ProjectSummary, Slug, UserId,
};

use super::define_port_error;

define_port_error! {
    /// Errors raised by project repository adapters.
    pub enum ProjectRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } => "project repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "project repository query failed: {message}",
        /// Another project already uses the slug.
        DuplicateSlug { slug: String } => "project slug already taken: {slug}",
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProjectRepository: Send + Sync {
    async fn slug_exists(&self, slug: &Slug) -> Result<bool, ProjectRepositoryError>;

    /// Insert a project owned by `owner` under `slug`.
    async fn create(
        &self,
        owner: &UserId,
        slug: &Slug,
        project: &NewProject,
    ) -> Result<(), ProjectRepositoryError>;

    async fn find_by_slug(&self, slug: &Slug) -> Result<Option<Project>, ProjectRepositoryError>;

    /// One page of projects matching `query`, with vote and comment counts.
    async fn list(
        &self,
        query: &ProjectListQuery,
    ) -> Result<Paginated<ProjectSummary>, ProjectRepositoryError>;
}

/// Repository with no projects that accepts and forgets creations.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureProjectRepository;

#[async_trait]
impl ProjectRepository for FixtureProjectRepository {
    async fn slug_exists(&self, _slug: &Slug) -> Result<bool, ProjectRepositoryError> {
        Ok(false)
    }

    async fn create(
        &self,
        _owner: &UserId,
        _slug: &Slug,
        _project: &NewProject,
    ) -> Result<(), ProjectRepositoryError> {
        Ok(())
    }

    async fn find_by_slug(&self, _slug: &Slug) -> Result<Option<Project>, ProjectRepositoryError> {
        Ok(None)
    }

    async fn list(
        &self,
        query: &ProjectListQuery,
    ) -> Result<Paginated<ProjectSummary>, ProjectRepositoryError> {
        Ok(Paginated::empty(query.page))
    }
}
