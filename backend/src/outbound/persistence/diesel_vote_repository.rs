//! Vote rows in `votes` (projects) and `forum_votes` (forum posts).
//!
//! Inserts use `ON CONFLICT DO NOTHING` against the `(user_id, entity_id)`
//! unique constraint, so a concurrent duplicate inserts zero rows instead of
//! failing the statement.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use tracing::debug;
use uuid::Uuid;

use crate::domain::ports::{VoteRepository, VoteRepositoryError};
use crate::domain::{EntityKind, UserId};

use super::diesel_helpers::{count_from_db, map_diesel_error, map_pool_error};
use super::models::{NewForumVoteRow, NewVoteRow};
use super::pool::{DbPool, PoolError};
use super::schema::{forum_votes, votes};

/// Diesel-backed [`VoteRepository`].
#[derive(Clone)]
pub struct DieselVoteRepository {
    pool: DbPool,
}

impl DieselVoteRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool(error: PoolError) -> VoteRepositoryError {
    map_pool_error(error, VoteRepositoryError::connection)
}

fn map_error(error: diesel::result::Error) -> VoteRepositoryError {
    map_diesel_error(
        error,
        VoteRepositoryError::query,
        VoteRepositoryError::connection,
    )
}

#[async_trait]
impl VoteRepository for DieselVoteRepository {
    async fn has_vote(
        &self,
        kind: EntityKind,
        entity_id: Uuid,
        user: &UserId,
    ) -> Result<bool, VoteRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool)?;
        let user_id = *user.as_uuid();

        match kind {
            EntityKind::Project => {
                diesel::select(diesel::dsl::exists(
                    votes::table
                        .filter(votes::project_id.eq(entity_id))
                        .filter(votes::user_id.eq(user_id)),
                ))
                .get_result::<bool>(&mut conn)
                .await
            }
            EntityKind::ForumPost => {
                diesel::select(diesel::dsl::exists(
                    forum_votes::table
                        .filter(forum_votes::forum_post_id.eq(entity_id))
                        .filter(forum_votes::user_id.eq(user_id)),
                ))
                .get_result::<bool>(&mut conn)
                .await
            }
        }
        .map_err(map_error)
    }

    async fn insert_vote(
        &self,
        kind: EntityKind,
        entity_id: Uuid,
        user: &UserId,
    ) -> Result<(), VoteRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool)?;
        let user_id = *user.as_uuid();

        let inserted = match kind {
            EntityKind::Project => {
                diesel::insert_into(votes::table)
                    .values(NewVoteRow {
                        id: Uuid::new_v4(),
                        user_id,
                        project_id: entity_id,
                    })
                    .on_conflict((votes::user_id, votes::project_id))
                    .do_nothing()
                    .execute(&mut conn)
                    .await
            }
            EntityKind::ForumPost => {
                diesel::insert_into(forum_votes::table)
                    .values(NewForumVoteRow {
                        id: Uuid::new_v4(),
                        user_id,
                        forum_post_id: entity_id,
                    })
                    .on_conflict((forum_votes::user_id, forum_votes::forum_post_id))
                    .do_nothing()
                    .execute(&mut conn)
                    .await
            }
        }
        .map_err(map_error)?;

        if inserted == 0 {
            debug!(%entity_id, kind = %kind, "vote insert hit the uniqueness constraint");
            return Err(VoteRepositoryError::DuplicateVote);
        }
        Ok(())
    }

    async fn delete_vote(
        &self,
        kind: EntityKind,
        entity_id: Uuid,
        user: &UserId,
    ) -> Result<bool, VoteRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool)?;
        let user_id = *user.as_uuid();

        let deleted = match kind {
            EntityKind::Project => {
                diesel::delete(
                    votes::table
                        .filter(votes::project_id.eq(entity_id))
                        .filter(votes::user_id.eq(user_id)),
                )
                .execute(&mut conn)
                .await
            }
            EntityKind::ForumPost => {
                diesel::delete(
                    forum_votes::table
                        .filter(forum_votes::forum_post_id.eq(entity_id))
                        .filter(forum_votes::user_id.eq(user_id)),
                )
                .execute(&mut conn)
                .await
            }
        }
        .map_err(map_error)?;

        Ok(deleted > 0)
    }

    async fn count_votes(
        &self,
        kind: EntityKind,
        entity_id: Uuid,
    ) -> Result<u64, VoteRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool)?;

        let count = match kind {
            EntityKind::Project => {
                votes::table
                    .filter(votes::project_id.eq(entity_id))
                    .count()
                    .get_result::<i64>(&mut conn)
                    .await
            }
            EntityKind::ForumPost => {
                forum_votes::table
                    .filter(forum_votes::forum_post_id.eq(entity_id))
                    .count()
                    .get_result::<i64>(&mut conn)
                    .await
            }
        }
        .map_err(map_error)?;

        Ok(count_from_db(count))
    }
}
