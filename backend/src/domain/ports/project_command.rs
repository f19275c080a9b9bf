//! Driving ports for project submission, detail reads and listings.

use async_trait::async_trait;

use crate::domain::{
    Error, NewProject, Paginated, ProjectDetail, ProjectListQuery, ProjectSummary, Slug, UserId,
};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProjectCommand: Send + Sync {
    /// Create a project owned by `owner`, returning the slug it was stored under.
    async fn create_project(&self, owner: UserId, project: NewProject) -> Result<Slug, Error>;
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProjectQuery: Send + Sync {
    /// Project detail. Absent slugs are `not_found`.
    async fn get_project(&self, slug: Slug) -> Result<ProjectDetail, Error>;

    /// One page of persisted projects.
    async fn list_projects(
        &self,
        query: ProjectListQuery,
    ) -> Result<Paginated<ProjectSummary>, Error>;
}

/// Command deriving the slug without storing anything.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureProjectCommand;

#[async_trait]
impl ProjectCommand for FixtureProjectCommand {
    async fn create_project(&self, _owner: UserId, project: NewProject) -> Result<Slug, Error> {
        Slug::derive(project.name()).map_err(|err| Error::invalid_request(err.to_string()))
    }
}

/// Query with no projects.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureProjectQuery;

#[async_trait]
impl ProjectQuery for FixtureProjectQuery {
    async fn get_project(&self, slug: Slug) -> Result<ProjectDetail, Error> {
        Err(Error::not_found(format!("project {slug} not found")))
    }

    async fn list_projects(
        &self,
        query: ProjectListQuery,
    ) -> Result<Paginated<ProjectSummary>, Error> {
        Ok(Paginated::empty(query.page))
    }
}
