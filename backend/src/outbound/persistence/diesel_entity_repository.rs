//! Slug lookup over the `projects` and `forum_posts` tables.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use uuid::Uuid;

use crate::domain::ports::{EntityRepositoryError, VotableEntityRepository};
use crate::domain::{EntityKind, Slug, UserId, VotableEntity};

use super::diesel_helpers::{map_diesel_error, map_pool_error};
use super::pool::DbPool;
use super::schema::{forum_posts, projects};

/// Diesel-backed [`VotableEntityRepository`].
#[derive(Clone)]
pub struct DieselVotableEntityRepository {
    pool: DbPool,
}

impl DieselVotableEntityRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_error(error: diesel::result::Error) -> EntityRepositoryError {
    map_diesel_error(
        error,
        EntityRepositoryError::query,
        EntityRepositoryError::connection,
    )
}

#[async_trait]
impl VotableEntityRepository for DieselVotableEntityRepository {
    async fn find_by_slug(
        &self,
        kind: EntityKind,
        slug: &Slug,
    ) -> Result<Option<VotableEntity>, EntityRepositoryError> {
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|err| map_pool_error(err, EntityRepositoryError::connection))?;

        let row: Option<(Uuid, Uuid)> = match kind {
            EntityKind::Project => {
                projects::table
                    .filter(projects::slug.eq(slug.as_ref()))
                    .select((projects::id, projects::owner_id))
                    .first::<(Uuid, Uuid)>(&mut conn)
                    .await
            }
            EntityKind::ForumPost => {
                forum_posts::table
                    .filter(forum_posts::slug.eq(slug.as_ref()))
                    .select((forum_posts::id, forum_posts::author_id))
                    .first::<(Uuid, Uuid)>(&mut conn)
                    .await
            }
        }
        .optional()
        .map_err(map_error)?;

        Ok(row.map(|(id, owner_id)| VotableEntity {
            id,
            kind,
            slug: slug.clone(),
            owner_id: UserId::from(owner_id),
        }))
    }
}
