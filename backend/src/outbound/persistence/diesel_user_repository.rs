//! PostgreSQL-backed [`UserRepository`].

use async_trait::async_trait;
use diesel::prelude::*;
use diesel::upsert::excluded;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{UserPersistenceError, UserRepository};
use crate::domain::{EmailAddress, Identity, UserId};

use super::diesel_helpers::{map_diesel_error, map_pool_error};
use super::models::{NewUserRow, UserRow};
use super::pool::{DbPool, PoolError};
use super::schema::users;

/// Diesel-backed user repository keyed by email.
#[derive(Clone)]
pub struct DieselUserRepository {
    pool: DbPool,
}

impl DieselUserRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool(error: PoolError) -> UserPersistenceError {
    map_pool_error(error, UserPersistenceError::connection)
}

fn map_error(error: diesel::result::Error) -> UserPersistenceError {
    map_diesel_error(
        error,
        UserPersistenceError::query,
        UserPersistenceError::connection,
    )
}

fn row_to_identity(row: UserRow) -> Result<Identity, UserPersistenceError> {
    let email = EmailAddress::new(&row.email)
        .map_err(|err| UserPersistenceError::query(format!("stored email is invalid: {err}")))?;
    let mut identity = Identity::new(UserId::from(row.id), email);
    if let Some(name) = row.name {
        identity = identity.with_name(name);
    }
    if let Some(image) = row.image {
        identity = identity.with_image(image);
    }
    Ok(identity)
}

#[async_trait]
impl UserRepository for DieselUserRepository {
    async fn upsert(&self, identity: &Identity) -> Result<Identity, UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool)?;
        let new_row = NewUserRow {
            id: *identity.user_id().as_uuid(),
            email: identity.email().as_ref(),
            name: identity.name(),
            image: identity.image(),
        };

        let row = diesel::insert_into(users::table)
            .values(&new_row)
            .on_conflict(users::email)
            .do_update()
            .set((
                users::name.eq(excluded(users::name)),
                users::image.eq(excluded(users::image)),
                users::updated_at.eq(diesel::dsl::now),
            ))
            .returning(UserRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(map_error)?;

        row_to_identity(row)
    }

    async fn find_by_email(
        &self,
        email: &EmailAddress,
    ) -> Result<Option<Identity>, UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool)?;

        let row = users::table
            .filter(users::email.eq(email.as_ref()))
            .select(UserRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_error)?;

        row.map(row_to_identity).transpose()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn row(email: &str) -> UserRow {
        UserRow {
            id: Uuid::new_v4(),
            email: email.to_owned(),
            name: Some("Ada Lovelace".to_owned()),
            image: None,
        }
    }

    #[test]
    fn rows_become_identities() {
        let source = row("ada@devhunt.dev");
        let id = source.id;

        let identity = row_to_identity(source).expect("valid row");

        assert_eq!(identity.user_id().as_uuid(), &id);
        assert_eq!(identity.email().as_ref(), "ada@devhunt.dev");
        assert_eq!(identity.name(), Some("Ada Lovelace"));
        assert_eq!(identity.image(), None);
    }

    #[test]
    fn corrupt_emails_are_query_errors() {
        let error = row_to_identity(row("not-an-email")).expect_err("invalid email");
        assert!(matches!(error, UserPersistenceError::Query { .. }));
    }
}
