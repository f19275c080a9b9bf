//! PostgreSQL-backed [`ProjectRepository`] and [`ForumPostRepository`].

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use tracing::warn;
use uuid::Uuid;

use crate::domain::ports::{
    ForumPostRepository, ForumPostRepositoryError, ProjectRepository, ProjectRepositoryError,
};
use crate::domain::{
    AuthorProfile, ForumPost, ForumPostListQuery, ForumPostSummary, NewProject, OwnerProfile,
    Paginated, Project, ProjectListQuery, ProjectStatus, ProjectSummary, Slug, UserId,
};

use super::diesel_helpers::{is_unique_violation, map_diesel_error, map_pool_error};
use super::diesel_listing::{ListedRow, load_forum_page, load_project_page};
use super::models::{ForumPostRow, NewProjectRow, OwnerRow, ProjectRow};
use super::pool::{DbPool, PoolError};
use super::schema::{forum_posts, projects, users};

/// Name of the unique constraint on `projects.slug`.
const PROJECT_SLUG_CONSTRAINT: &str = "projects_slug_key";

/// Diesel-backed project repository.
#[derive(Clone)]
pub struct DieselProjectRepository {
    pool: DbPool,
}

impl DieselProjectRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

/// Diesel-backed forum post repository.
#[derive(Clone)]
pub struct DieselForumPostRepository {
    pool: DbPool,
}

impl DieselForumPostRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn owner_profile(row: OwnerRow) -> OwnerProfile {
    OwnerProfile {
        author: AuthorProfile {
            id: UserId::from(row.id),
            name: row.name,
            image: row.image,
        },
        bio: row.bio,
    }
}

fn parse_stored_slug(raw: &str) -> Result<Slug, String> {
    Slug::parse(raw).map_err(|err| format!("stored slug {raw:?} is invalid: {err}"))
}

fn parse_status(project_id: Uuid, raw: &str) -> ProjectStatus {
    raw.parse().unwrap_or_else(|_| {
        warn!(
            value = raw,
            %project_id,
            "unrecognised project status, defaulting to development"
        );
        ProjectStatus::Development
    })
}

fn row_to_project((row, owner): (ProjectRow, OwnerRow)) -> Result<Project, ProjectRepositoryError> {
    let slug = parse_stored_slug(&row.slug).map_err(ProjectRepositoryError::query)?;
    Ok(Project {
        id: row.id,
        slug,
        status: parse_status(row.id, &row.status),
        name: row.name,
        tagline: row.tagline,
        description: row.description,
        website: row.website,
        github: row.github,
        created_at: row.created_at,
        owner: owner_profile(owner),
    })
}

fn row_to_post(
    (row, owner): (ForumPostRow, OwnerRow),
) -> Result<ForumPost, ForumPostRepositoryError> {
    let slug = parse_stored_slug(&row.slug).map_err(ForumPostRepositoryError::query)?;
    Ok(ForumPost {
        id: row.id,
        slug,
        title: row.title,
        content: row.content,
        created_at: row.created_at,
        owner: owner_profile(owner),
    })
}

fn map_post_pool(error: PoolError) -> ForumPostRepositoryError {
    map_pool_error(error, ForumPostRepositoryError::connection)
}

fn map_post_error(error: diesel::result::Error) -> ForumPostRepositoryError {
    map_diesel_error(
        error,
        ForumPostRepositoryError::query,
        ForumPostRepositoryError::connection,
    )
}

fn map_project_pool(error: PoolError) -> ProjectRepositoryError {
    map_pool_error(error, ProjectRepositoryError::connection)
}

fn map_project_error(error: diesel::result::Error) -> ProjectRepositoryError {
    map_diesel_error(
        error,
        ProjectRepositoryError::query,
        ProjectRepositoryError::connection,
    )
}

#[async_trait]
impl ProjectRepository for DieselProjectRepository {
    async fn slug_exists(&self, slug: &Slug) -> Result<bool, ProjectRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_project_pool)?;
        diesel::select(diesel::dsl::exists(
            projects::table.filter(projects::slug.eq(slug.as_ref())),
        ))
        .get_result::<bool>(&mut conn)
        .await
        .map_err(map_project_error)
    }

    async fn create(
        &self,
        owner: &UserId,
        slug: &Slug,
        project: &NewProject,
    ) -> Result<(), ProjectRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_project_pool)?;
        let new_row = NewProjectRow {
            id: Uuid::new_v4(),
            slug: slug.as_ref(),
            name: project.name(),
            tagline: project.tagline(),
            description: project.description(),
            website: project.website().map(url::Url::as_str),
            github: project.github().map(url::Url::as_str),
            status: project.status().as_str(),
            owner_id: *owner.as_uuid(),
        };

        match diesel::insert_into(projects::table)
            .values(&new_row)
            .execute(&mut conn)
            .await
        {
            Ok(_) => Ok(()),
            Err(error) if is_unique_violation(&error, PROJECT_SLUG_CONSTRAINT) => {
                Err(ProjectRepositoryError::duplicate_slug(slug.as_ref()))
            }
            Err(error) => Err(map_project_error(error)),
        }
    }

    async fn find_by_slug(&self, slug: &Slug) -> Result<Option<Project>, ProjectRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_project_pool)?;
        let row = projects::table
            .inner_join(users::table)
            .filter(projects::slug.eq(slug.as_ref()))
            .select((ProjectRow::as_select(), OwnerRow::as_select()))
            .first::<(ProjectRow, OwnerRow)>(&mut conn)
            .await
            .optional()
            .map_err(map_project_error)?;

        row.map(row_to_project).transpose()
    }

    async fn list(
        &self,
        query: &ProjectListQuery,
    ) -> Result<Paginated<ProjectSummary>, ProjectRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_project_pool)?;
        let (rows, total) = load_project_page(&mut conn, query)
            .await
            .map_err(map_project_error)?;

        let items = rows
            .into_iter()
            .map(|listed: ListedRow<_>| {
                Ok(ProjectSummary {
                    project: row_to_project((listed.row, listed.owner))?,
                    vote_count: listed.vote_count,
                    comment_count: listed.comment_count,
                })
            })
            .collect::<Result<Vec<_>, ProjectRepositoryError>>()?;

        Ok(Paginated {
            items,
            page: query.page,
            total,
        })
    }
}

#[async_trait]
impl ForumPostRepository for DieselForumPostRepository {
    async fn find_by_slug(
        &self,
        slug: &Slug,
    ) -> Result<Option<ForumPost>, ForumPostRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_post_pool)?;
        let row = forum_posts::table
            .inner_join(users::table)
            .filter(forum_posts::slug.eq(slug.as_ref()))
            .select((ForumPostRow::as_select(), OwnerRow::as_select()))
            .first::<(ForumPostRow, OwnerRow)>(&mut conn)
            .await
            .optional()
            .map_err(map_post_error)?;

        row.map(row_to_post).transpose()
    }

    async fn list(
        &self,
        query: &ForumPostListQuery,
    ) -> Result<Paginated<ForumPostSummary>, ForumPostRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_post_pool)?;
        let (rows, total) = load_forum_page(&mut conn, query)
            .await
            .map_err(map_post_error)?;

        let items = rows
            .into_iter()
            .map(|listed: ListedRow<_>| {
                Ok(ForumPostSummary {
                    post: row_to_post((listed.row, listed.owner))?,
                    vote_count: listed.vote_count,
                    comment_count: listed.comment_count,
                })
            })
            .collect::<Result<Vec<_>, ForumPostRepositoryError>>()?;

        Ok(Paginated {
            items,
            page: query.page,
            total,
        })
    }
}
