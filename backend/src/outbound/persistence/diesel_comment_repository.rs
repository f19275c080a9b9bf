//! Append-only comment rows in `comments` and `forum_comments`.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::scoped_futures::ScopedFutureExt;
use diesel_async::{AsyncConnection, RunQueryDsl};
use uuid::Uuid;

use crate::domain::ports::{CommentRepository, CommentRepositoryError};
use crate::domain::{AuthorProfile, Comment, CommentContent, EntityKind, UserId};

use super::diesel_helpers::{map_diesel_error, map_pool_error};
use super::models::{AuthorRow, CommentRow, ForumCommentRow, NewCommentRow, NewForumCommentRow};
use super::pool::{DbPool, PoolError};
use super::schema::{comments, forum_comments, users};

/// Diesel-backed [`CommentRepository`].
#[derive(Clone)]
pub struct DieselCommentRepository {
    pool: DbPool,
}

impl DieselCommentRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool(error: PoolError) -> CommentRepositoryError {
    map_pool_error(error, CommentRepositoryError::connection)
}

fn map_error(error: diesel::result::Error) -> CommentRepositoryError {
    map_diesel_error(
        error,
        CommentRepositoryError::query,
        CommentRepositoryError::connection,
    )
}

fn author_profile(row: AuthorRow) -> AuthorProfile {
    AuthorProfile {
        id: UserId::from(row.id),
        name: row.name,
        image: row.image,
    }
}

fn row_to_comment((row, author): (CommentRow, AuthorRow)) -> Comment {
    Comment {
        id: row.id,
        content: row.content,
        created_at: row.created_at,
        updated_at: row.updated_at,
        author: author_profile(author),
    }
}

#[async_trait]
impl CommentRepository for DieselCommentRepository {
    async fn insert_comment(
        &self,
        kind: EntityKind,
        entity_id: Uuid,
        author: &UserId,
        content: &CommentContent,
    ) -> Result<Comment, CommentRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool)?;
        let author_id = *author.as_uuid();
        let text: &str = content.as_ref();

        let stored = conn
            .transaction(|conn| {
                async move {
                    let row: CommentRow = match kind {
                        EntityKind::Project => {
                            diesel::insert_into(comments::table)
                                .values(NewCommentRow {
                                    id: Uuid::new_v4(),
                                    content: text,
                                    project_id: entity_id,
                                    author_id,
                                })
                                .returning(CommentRow::as_returning())
                                .get_result(conn)
                                .await?
                        }
                        EntityKind::ForumPost => diesel::insert_into(forum_comments::table)
                            .values(NewForumCommentRow {
                                id: Uuid::new_v4(),
                                content: text,
                                forum_post_id: entity_id,
                                author_id,
                            })
                            .returning(ForumCommentRow::as_returning())
                            .get_result::<ForumCommentRow>(conn)
                            .await?
                            .into(),
                    };

                    let author: AuthorRow = users::table
                        .find(author_id)
                        .select(AuthorRow::as_select())
                        .first(conn)
                        .await?;

                    Ok::<_, diesel::result::Error>((row, author))
                }
                .scope_boxed()
            })
            .await
            .map_err(map_error)?;

        Ok(row_to_comment(stored))
    }

    async fn list_comments(
        &self,
        kind: EntityKind,
        entity_id: Uuid,
    ) -> Result<Vec<Comment>, CommentRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool)?;

        let rows: Vec<(CommentRow, AuthorRow)> = match kind {
            EntityKind::Project => comments::table
                .inner_join(users::table)
                .filter(comments::project_id.eq(entity_id))
                .order_by((comments::created_at.desc(), comments::id.desc()))
                .select((CommentRow::as_select(), AuthorRow::as_select()))
                .load(&mut conn)
                .await
                .map_err(map_error)?,
            EntityKind::ForumPost => forum_comments::table
                .inner_join(users::table)
                .filter(forum_comments::forum_post_id.eq(entity_id))
                .order_by((
                    forum_comments::created_at.desc(),
                    forum_comments::id.desc(),
                ))
                .select((ForumCommentRow::as_select(), AuthorRow::as_select()))
                .load::<(ForumCommentRow, AuthorRow)>(&mut conn)
                .await
                .map_err(map_error)?
                .into_iter()
                .map(|(row, author)| (row.into(), author))
                .collect(),
        };

        Ok(rows.into_iter().map(row_to_comment).collect())
    }
}
